//! # extract 子命令 CLI 定义
//!
//! 把区块浏览器导出的 JSON（含 `SourceCode` 字段）转换为 `.sol` 文件
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/extract.rs`

use clap::Args;
use std::path::PathBuf;

/// extract 子命令参数
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Folder containing the .json dumps (prompted for when omitted)
    pub folder: Option<PathBuf>,

    /// JSON field holding the contract source
    #[arg(long, default_value = "SourceCode")]
    pub field: String,

    /// Write the .sol files here instead of next to the .json files
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Overwrite existing .sol files
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
}
