//! # pragma 子命令 CLI 定义
//!
//! 把 `pragma solidity 0.8.19;` 之类的固定版本改为 `^0.8.0`
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/pragma.rs`

use clap::Args;
use std::path::PathBuf;

/// pragma 子命令参数
#[derive(Args, Debug)]
pub struct PragmaArgs {
    /// Root folder, searched recursively (prompted for when omitted)
    pub folder: Option<PathBuf>,

    /// Compiler series to relax, as 'major.minor'
    #[arg(long, default_value = "0.8")]
    pub series: String,

    /// Show what would change without writing
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}
