//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `batch/`, `policy.rs`, `utils/`
//! - 子模块: common, count, extract, pragma, prune, scan

pub mod common;
pub mod count;
pub mod extract;
pub mod pragma;
pub mod prune;
pub mod scan;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Prune(args) => prune::execute(args),
        Commands::Scan(args) => scan::execute(args),
        Commands::Count(args) => count::execute(args),
        Commands::Extract(args) => extract::execute(args),
        Commands::Pragma(args) => pragma::execute(args),
    }
}
