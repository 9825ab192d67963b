//! # 交互式输入
//!
//! 命令行未给出目录时，在终端中提示用户输入。
//! stdin 不是终端（管道、CI）时不提示，直接报参数错误。
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `console` crate

use crate::error::{Result, SieveError};

use console::Term;
use std::io::{self, BufRead, IsTerminal};
use std::path::PathBuf;

/// 取得目录参数：优先使用命令行值，否则交互式询问
pub fn folder_or_prompt(folder: Option<PathBuf>, message: &str) -> Result<PathBuf> {
    if let Some(folder) = folder {
        return Ok(folder);
    }

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    read_folder(interactive, stdin.lock(), message)
}

/// 从 `input` 读取一行目录；`interactive` 为假（stdin 不是终端）时直接报错
fn read_folder<R: BufRead>(interactive: bool, mut input: R, message: &str) -> Result<PathBuf> {
    if !interactive {
        return Err(SieveError::InvalidArgument(
            "no folder given and stdin is not a terminal".to_string(),
        ));
    }

    // 提示写到 stderr，stdout 被重定向时仍可见
    Term::stderr()
        .write_str(message)
        .map_err(|e| SieveError::Other(format!("Failed to write prompt: {}", e)))?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .map_err(|e| SieveError::Other(format!("Failed to read folder path: {}", e)))?;
    parse_folder(&line)
}

/// 去除首尾空白和成对引号（从文件管理器拖入的路径常带引号）
fn parse_folder(line: &str) -> Result<PathBuf> {
    let trimmed = line.trim();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| trimmed.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
        .unwrap_or(trimmed);

    if unquoted.is_empty() {
        return Err(SieveError::InvalidArgument("folder path is empty".to_string()));
    }
    Ok(PathBuf::from(unquoted))
}
