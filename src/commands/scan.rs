//! # scan 命令实现
//!
//! 逐个运行 slither，根据 `human-summary` 报告统计存在中高危问题的合约。
//!
//! ## 功能
//! - 报告通过临时文件捕获，每个合约检查完即删除
//! - 只统计，不修改任何文件
//! - 逐行输出 `n/total files analyzed.`
//!
//! ## 依赖关系
//! - 使用 `cli/scan.rs` 定义的参数
//! - 使用 `batch/`, `policy.rs`, `utils/process.rs`

use super::common;
use crate::batch::{BatchRunner, CancelFlag};
use crate::cli::scan::ScanArgs;
use crate::error::Result;
use crate::models::{BatchReport, ReportEntry, Verdict};
use crate::policy::AnalysisPolicy;
use crate::utils::output;
use crate::utils::process::{Capture, ToolCommand};

use colored::Colorize;
use std::path::PathBuf;

/// 执行 scan 命令
pub fn execute(args: ScanArgs) -> Result<()> {
    output::print_header("Static Analysis");

    let files = common::collect_items(
        &args.batch,
        "Enter the path to the folder containing .sol files: ",
    )?;

    let analyzer = ToolCommand::new(args.slither.as_str())
        .args(args.slither_args.iter().cloned())
        .capture(Capture::ScratchFile);
    let policy = AnalysisPolicy {
        min_severity: args.min_severity,
    };
    output::print_info(&format!(
        "Flagging contracts with {}",
        policy.flag_reason().trim_end_matches(" found")
    ));

    let observer = common::observer(
        args.batch.progress,
        files.len(),
        "Analyzing",
        describe,
        |processed, total| format!("{}/{} files analyzed.", processed, total),
    );

    let runner = BatchRunner::new(args.batch.jobs)
        .with_observer(observer.as_ref())
        .with_cancel(CancelFlag::install_ctrlc()?);
    if runner.jobs() > 1 {
        output::print_info(&format!(
            "Running {} jobs in parallel, results are listed in completion order",
            runner.jobs()
        ));
    }

    let report = scan_files(&runner, files, &analyzer, policy)?;

    output::print_separator();
    output::print_done(&format!(
        "{}/{} are vulnerable.",
        report.flagged_count, report.total_items
    ));

    common::finish(&report, &args.batch)
}

/// 静态分析并统计（不做修复）
pub fn scan_files(
    runner: &BatchRunner<'_>,
    files: Vec<PathBuf>,
    analyzer: &ToolCommand,
    policy: AnalysisPolicy,
) -> Result<BatchReport> {
    runner.run(
        files,
        |file| analyzer.check(file),
        |outcome| policy.classify(outcome),
        None,
    )
}

/// 只为被标记或无法判定的文件输出状态行
fn describe(entry: &ReportEntry) -> Option<String> {
    let name = common::file_label(&entry.item);
    match &entry.verdict {
        Verdict::Pass => None,
        Verdict::Flagged(reason) => {
            Some(format!("{} {}: {}", "[VULN]".red().bold(), name, reason))
        }
        Verdict::Inconclusive(reason) => {
            Some(format!("{} {}: {}", "[WARN]".yellow().bold(), name, reason))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Severity;
    use std::fs;

    /// 用 sh 模拟分析器：把合约内容当作报告输出，并像 slither 一样以非零状态退出
    #[cfg(unix)]
    fn fake_analyzer() -> ToolCommand {
        ToolCommand::new("sh")
            .args(["-c", "cat \"$0\" >&2; exit 255", "{file}"])
            .capture(Capture::ScratchFile)
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_counts_vulnerable() {
        let dir = tempfile::tempdir().unwrap();
        let safe = dir.path().join("safe.sol");
        let risky = dir.path().join("risky.sol");
        let plain = dir.path().join("plain.sol");
        fs::write(&safe, "Number of medium issues: 0\nNumber of high issues: 0\n").unwrap();
        fs::write(&risky, "Number of medium issues: 2\nNumber of high issues: 0\n").unwrap();
        fs::write(&plain, "no summary here\n").unwrap();

        let runner = BatchRunner::new(1);
        let report = scan_files(
            &runner,
            vec![safe.clone(), risky.clone(), plain.clone()],
            &fake_analyzer(),
            AnalysisPolicy::default(),
        )
        .unwrap();

        assert_eq!(report.processed_count, 3);
        assert_eq!(report.flagged_count, 1);
        assert_eq!(report.entries[1].item, risky);
        assert_eq!(
            report.entries[1].verdict,
            Verdict::Flagged("medium/high severity issues found".into())
        );
        // 扫描不修改文件
        assert!(safe.exists() && risky.exists() && plain.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_with_high_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let medium = dir.path().join("medium.sol");
        fs::write(&medium, "Number of medium issues: 3\n").unwrap();

        let runner = BatchRunner::new(1);
        let report = scan_files(
            &runner,
            vec![medium],
            &fake_analyzer(),
            AnalysisPolicy {
                min_severity: Severity::High,
            },
        )
        .unwrap();
        assert_eq!(report.flagged_count, 0);
    }

    #[test]
    fn test_describe_skips_passing() {
        let entry = ReportEntry {
            item: PathBuf::from("a.sol"),
            verdict: Verdict::Pass,
            remediation: crate::models::Remediation::NotApplicable,
        };
        assert!(describe(&entry).is_none());
    }
}
