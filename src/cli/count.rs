//! # count 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/count.rs`

use clap::Args;
use std::path::PathBuf;

/// count 子命令参数
#[derive(Args, Debug)]
pub struct CountArgs {
    /// Folder to count in (prompted for when omitted)
    pub folder: Option<PathBuf>,

    /// File extension to count
    #[arg(short, long, default_value = "sol")]
    pub extension: String,

    /// Recurse into subdirectories
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,
}
