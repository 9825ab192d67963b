//! # pragma 命令实现
//!
//! 递归查找 `.sol` 文件，把固定补丁版本的编译器声明
//! （`pragma solidity 0.8.19;` / `pragma solidity = 0.8.19;`）改为 `^0.8.0`。
//!
//! ## 依赖关系
//! - 使用 `cli/pragma.rs` 定义的参数
//! - 使用 `regex` 改写，`batch/collector.rs` 收集文件

use crate::batch::FileCollector;
use crate::cli::pragma::PragmaArgs;
use crate::error::{Result, SieveError};
use crate::utils::{output, prompt};

use regex::Regex;
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

/// 某一编译器系列的改写规则
#[derive(Debug)]
pub struct PragmaRewriter {
    pattern: Regex,
    replacement: String,
}

impl PragmaRewriter {
    /// `series` 形如 `0.8`
    pub fn new(series: &str) -> Result<Self> {
        let (major, minor) = series
            .trim()
            .split_once('.')
            .filter(|(major, minor)| is_number(major) && is_number(minor))
            .ok_or_else(|| {
                SieveError::InvalidArgument(format!(
                    "Invalid compiler series '{}', expected 'major.minor'",
                    series
                ))
            })?;

        let pattern = Regex::new(&format!(
            r"pragma\s+solidity\s+(?:=\s*)?{}\.{}\.\d+\s*;",
            major, minor
        ))
        .map_err(|e| SieveError::Other(e.to_string()))?;

        Ok(Self {
            pattern,
            replacement: format!("pragma solidity ^{}.{}.0;", major, minor),
        })
    }

    /// 返回改写后的文本和替换次数
    pub fn rewrite<'t>(&self, text: &'t str) -> (Cow<'t, str>, usize) {
        let count = self.pattern.find_iter(text).count();
        if count == 0 {
            return (Cow::Borrowed(text), 0);
        }
        (
            self.pattern.replace_all(text, self.replacement.as_str()),
            count,
        )
    }
}

fn is_number(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// 单个文件的处理结果
#[derive(Debug, PartialEq, Eq)]
pub enum PragmaStatus {
    Updated(usize),
    Unchanged,
}

/// 批量改写的计数
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PragmaSummary {
    pub updated: usize,
    pub unchanged: usize,
    pub failed: usize,
}

/// 执行 pragma 命令
pub fn execute(args: PragmaArgs) -> Result<()> {
    output::print_header("Relaxing Compiler Pragmas");

    let rewriter = PragmaRewriter::new(&args.series)?;
    let folder = prompt::folder_or_prompt(
        args.folder.clone(),
        "Enter the path to the folder containing .sol files: ",
    )?;
    let files = FileCollector::new(&folder)
        .with_extension("sol")
        .recursive(true)
        .collect()?;

    let summary = update_files(&rewriter, &files, args.dry_run);

    output::print_separator();
    let verb = if args.dry_run { "Would update" } else { "Updated" };
    output::print_done(&format!(
        "{} {}/{} file(s) ({} failed)",
        verb,
        summary.updated,
        files.len(),
        summary.failed
    ));
    Ok(())
}

/// 逐个改写，单个文件出错只报告不中断
pub fn update_files(
    rewriter: &PragmaRewriter,
    files: &[PathBuf],
    dry_run: bool,
) -> PragmaSummary {
    let mut summary = PragmaSummary::default();

    for path in files {
        match update_file(rewriter, path, dry_run) {
            Ok(PragmaStatus::Updated(replacements)) => {
                tracing::debug!(file = %path.display(), replacements, "pragma rewritten");
                output::print_success(&format!("Updated pragma in: {}", path.display()));
                summary.updated += 1;
            }
            Ok(PragmaStatus::Unchanged) => {
                output::print_skip(&format!("No changes made in: {}", path.display()));
                summary.unchanged += 1;
            }
            Err(e) => {
                output::print_error(&format!("{}", e));
                summary.failed += 1;
            }
        }
    }

    summary
}

/// 改写单个文件（`dry_run` 时只统计）
pub fn update_file(
    rewriter: &PragmaRewriter,
    path: &Path,
    dry_run: bool,
) -> Result<PragmaStatus> {
    let text = fs::read_to_string(path).map_err(|e| SieveError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    let (new_text, replacements) = rewriter.rewrite(&text);
    if replacements == 0 {
        return Ok(PragmaStatus::Unchanged);
    }

    if !dry_run {
        fs::write(path, new_text.as_bytes()).map_err(|e| SieveError::FileWriteError {
            path: path.display().to_string(),
            source: e,
        })?;
    }
    Ok(PragmaStatus::Updated(replacements))
}
