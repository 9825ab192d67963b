//! # prune 命令实现
//!
//! 逐个用 solc 编译合约，删除编译失败的文件。
//!
//! ## 功能
//! - 编译器退出码非零 -> 标记并删除（`--dry-run` 时只标记）
//! - 编译器无法运行 -> 默认保留文件并列为无法判定
//! - 逐行输出 `Visited: n/total`
//!
//! ## 依赖关系
//! - 使用 `cli/prune.rs` 定义的参数
//! - 使用 `batch/`, `policy.rs`, `utils/process.rs`

use super::common;
use crate::batch::{BatchRunner, CancelFlag, Remedy};
use crate::cli::prune::PruneArgs;
use crate::error::Result;
use crate::models::{BatchReport, Remediation, ReportEntry, Verdict};
use crate::policy::{remove_item, CompilePolicy};
use crate::utils::output;
use crate::utils::process::{Capture, ToolCommand};

use colored::Colorize;
use std::path::PathBuf;

/// 执行 prune 命令
pub fn execute(args: PruneArgs) -> Result<()> {
    output::print_header("Compile Check");

    let files = common::collect_items(
        &args.batch,
        "Enter the path to the folder containing .sol files: ",
    )?;

    let compiler = ToolCommand::new(args.solc.as_str())
        .args(args.solc_args.iter().cloned())
        .capture(Capture::Discard);
    let policy = CompilePolicy {
        flag_tool_errors: args.flag_tool_errors,
    };

    if args.dry_run {
        output::print_info("Dry run: failing files will be reported but not deleted");
    }

    let observer = common::observer(
        args.batch.progress,
        files.len(),
        "Compiling",
        describe,
        |processed, total| format!("Visited: {}/{}", processed, total),
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

    let report = prune_files(&runner, files, &compiler, policy, args.dry_run)?;

    output::print_separator();
    output::print_done(&format!(
        "{}/{} failed to compile.",
        report.flagged_count, report.total_items
    ));

    common::finish(&report, &args.batch)
}

/// 编译检查并删除失败文件
pub fn prune_files(
    runner: &BatchRunner<'_>,
    files: Vec<PathBuf>,
    compiler: &ToolCommand,
    policy: CompilePolicy,
    dry_run: bool,
) -> Result<BatchReport> {
    let remove: &Remedy<'_> = &remove_item;
    let on_flagged = if dry_run { None } else { Some(remove) };

    runner.run(
        files,
        |file| compiler.check(file),
        |outcome| policy.classify(outcome),
        on_flagged,
    )
}

/// 单个文件的状态行
fn describe(entry: &ReportEntry) -> Option<String> {
    let name = common::file_label(&entry.item);
    let line = match (&entry.verdict, &entry.remediation) {
        (Verdict::Pass, _) => format!("Successfully compiled {}", name),
        (Verdict::Flagged(_), Remediation::Applied) => {
            format!("Compilation error in {}, {}", name, "deleted".red())
        }
        (Verdict::Flagged(_), Remediation::Failed(err)) => {
            format!("Compilation error in {}, delete failed: {}", name, err)
        }
        (Verdict::Flagged(_), Remediation::NotApplicable) => {
            format!("Compilation error in {}, {}", name, "kept".yellow())
        }
        (Verdict::Inconclusive(reason), _) => {
            format!("Could not compile {}: {}", name, reason.yellow())
        }
    };
    Some(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::FileCollector;
    use std::fs;

    fn entry(verdict: Verdict, remediation: Remediation) -> ReportEntry {
        ReportEntry {
            item: PathBuf::from("out/Token.sol"),
            verdict,
            remediation,
        }
    }

    #[test]
    fn test_describe() {
        colored::control::set_override(false);

        assert_eq!(
            describe(&entry(Verdict::Pass, Remediation::NotApplicable)).unwrap(),
            "Successfully compiled Token.sol"
        );
        assert_eq!(
            describe(&entry(
                Verdict::Flagged("compilation failed".into()),
                Remediation::Applied
            ))
            .unwrap(),
            "Compilation error in Token.sol, deleted"
        );
        assert!(describe(&entry(
            Verdict::Inconclusive("solc not found in PATH".into()),
            Remediation::NotApplicable
        ))
        .unwrap()
        .contains("solc not found"));
    }

    /// 用 sh 模拟编译器：内容含 "broken" 的文件编译失败
    #[cfg(unix)]
    fn fake_compiler() -> ToolCommand {
        ToolCommand::new("sh").args([
            "-c",
            "if grep -q broken \"$0\"; then echo 'ParserError' >&2; exit 1; fi",
        ])
    }

    #[cfg(unix)]
    fn corpus() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.sol"), "contract A {}").unwrap();
        fs::write(dir.path().join("b.sol"), "contract B { broken").unwrap();
        fs::write(dir.path().join("c.sol"), "contract C {}").unwrap();
        dir
    }

    #[cfg(unix)]
    #[test]
    fn test_prune_deletes_failing_files() {
        let dir = corpus();
        let files = FileCollector::new(dir.path())
            .with_extension("sol")
            .collect()
            .unwrap();

        let runner = BatchRunner::new(1);
        let report =
            prune_files(&runner, files, &fake_compiler(), CompilePolicy::default(), false).unwrap();

        assert_eq!(report.total_items, 3);
        assert_eq!(report.flagged_count, 1);
        assert_eq!(report.entries[1].remediation, Remediation::Applied);
        assert!(dir.path().join("a.sol").exists());
        assert!(!dir.path().join("b.sol").exists());
        assert!(dir.path().join("c.sol").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_prune_dry_run_keeps_files() {
        let dir = corpus();
        let files = FileCollector::new(dir.path())
            .with_extension("sol")
            .collect()
            .unwrap();

        let runner = BatchRunner::new(1);
        let report =
            prune_files(&runner, files, &fake_compiler(), CompilePolicy::default(), true).unwrap();

        assert_eq!(report.flagged_count, 1);
        assert_eq!(report.entries[1].remediation, Remediation::NotApplicable);
        assert!(dir.path().join("b.sol").exists());
    }

    #[test]
    fn test_missing_compiler_keeps_files() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.sol");
        fs::write(&file, "contract A {}").unwrap();

        let compiler = ToolCommand::new("solsieve-no-such-solc");
        let runner = BatchRunner::new(1);
        let report =
            prune_files(&runner, vec![file.clone()], &compiler, CompilePolicy::default(), false)
                .unwrap();

        assert_eq!(report.inconclusive_count, 1);
        assert_eq!(report.flagged_count, 0);
        assert!(file.exists());
    }
}
