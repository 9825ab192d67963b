//! # 批处理命令公共流程
//!
//! `prune` 与 `scan` 共用：取得目录、收集文件、选择进度显示、
//! 打印汇总和导出报告，并把中断 / 标记结果映射为退出码。
//!
//! ## 依赖关系
//! - 被 `commands/prune.rs`, `commands/scan.rs` 使用
//! - 使用 `batch/collector.rs`, `utils/`
//! - 使用 `tabled` 打印被标记文件列表

use crate::batch::FileCollector;
use crate::cli::batch::{BatchArgs, ProgressMode};
use crate::error::{Result, SieveError};
use crate::models::{BatchReport, Remediation, ReportEntry};
use crate::utils::progress::{
    BarProgress, Describe, LineProgress, ProgressLine, ProgressObserver, SilentProgress,
};
use crate::utils::{export, output, prompt};

use std::path::{Path, PathBuf};
use tabled::{Table, Tabled};

/// 汇总中最多列出的条目数
const MAX_LISTED: usize = 20;

/// 取得目录并收集文件
pub fn collect_items(args: &BatchArgs, prompt_message: &str) -> Result<Vec<PathBuf>> {
    let folder = prompt::folder_or_prompt(args.folder.clone(), prompt_message)?;

    let mut collector = FileCollector::new(&folder)
        .with_extension(&args.extension)
        .recursive(args.recursive);
    if let Some(pattern) = &args.pattern {
        collector = collector.with_pattern(pattern)?;
    }

    let files = collector.collect()?;
    output::print_info(&format!(
        "Found {} .{} file(s) in '{}'",
        files.len(),
        args.extension.trim_start_matches('.'),
        folder.display()
    ));
    Ok(files)
}

/// 按参数创建进度观察者
pub fn observer(
    mode: ProgressMode,
    total: usize,
    message: &str,
    describe: Describe,
    line: ProgressLine,
) -> Box<dyn ProgressObserver> {
    match mode {
        ProgressMode::Line => Box::new(LineProgress::new(describe, line)),
        ProgressMode::Bar => Box::new(BarProgress::new(total, message, describe)),
        ProgressMode::Off => Box::new(SilentProgress),
    }
}

/// 文件名（用于状态行）
pub fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[derive(Tabled)]
struct FlaggedRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Reason")]
    reason: String,
    #[tabled(rename = "Action")]
    action: String,
}

fn action_label(entry: &ReportEntry) -> String {
    match &entry.remediation {
        Remediation::NotApplicable => "-".to_string(),
        Remediation::Applied => "removed".to_string(),
        Remediation::Failed(err) => format!("remove failed: {}", err),
    }
}

/// 打印汇总、导出报告，并决定退出状态
pub fn finish(report: &BatchReport, args: &BatchArgs) -> Result<()> {
    if report.flagged_count > 0 {
        let rows: Vec<FlaggedRow> = report
            .flagged()
            .take(MAX_LISTED)
            .enumerate()
            .map(|(i, e)| FlaggedRow {
                index: i + 1,
                file: file_label(&e.item),
                reason: e.verdict.reason().to_string(),
                action: action_label(e),
            })
            .collect();
        println!("{}", Table::new(&rows));
        if report.flagged_count > MAX_LISTED {
            output::print_warning(&format!(
                "  ... and {} more flagged",
                report.flagged_count - MAX_LISTED
            ));
        }
    }

    if report.inconclusive_count > 0 {
        output::print_warning(&format!(
            "{} file(s) could not be checked:",
            report.inconclusive_count
        ));
        for entry in report.inconclusive().take(MAX_LISTED) {
            output::print_warning(&format!(
                "  {}: {}",
                file_label(&entry.item),
                entry.verdict.reason()
            ));
        }
    }

    for (entry, err) in report.remediation_failures() {
        output::print_error(&format!("Could not remove {}: {}", entry.item.display(), err));
    }

    if let Some(path) = &args.report {
        export::write_report_csv(report, path)?;
        output::print_success(&format!("Report saved to '{}'", path.display()));
    }

    if !report.is_complete() {
        return Err(SieveError::Interrupted {
            processed: report.processed_count,
            total: report.total_items,
        });
    }

    if args.fail_on_flagged && report.flagged_count > 0 {
        return Err(SieveError::FlaggedItems {
            flagged: report.flagged_count,
            total: report.total_items,
        });
    }

    Ok(())
}
