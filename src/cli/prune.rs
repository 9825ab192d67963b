//! # prune 子命令 CLI 定义
//!
//! 逐个编译合约，删除编译失败的文件
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/prune.rs`

use super::batch::BatchArgs;
use clap::Args;

/// prune 子命令参数
#[derive(Args, Debug)]
pub struct PruneArgs {
    #[command(flatten)]
    pub batch: BatchArgs,

    /// Compiler executable
    #[arg(long, env = "SOLSIEVE_SOLC", default_value = "solc")]
    pub solc: String,

    /// Compiler arguments; '{file}' is replaced by the contract path (appended if absent)
    #[arg(
        long = "solc-arg",
        default_values_t = vec!["--bin".to_string()],
        allow_hyphen_values = true
    )]
    pub solc_args: Vec<String>,

    /// Only report failures, do not delete anything
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Also delete files when the compiler itself cannot run (missing binary, crash)
    #[arg(long, default_value_t = false)]
    pub flag_tool_errors: bool,
}
