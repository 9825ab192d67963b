//! # scan 子命令 CLI 定义
//!
//! 逐个运行静态分析器，统计存在中高危问题的合约
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/scan.rs`

use super::batch::BatchArgs;
use crate::policy::Severity;
use clap::Args;

/// scan 子命令参数
#[derive(Args, Debug)]
pub struct ScanArgs {
    #[command(flatten)]
    pub batch: BatchArgs,

    /// Static analyzer executable
    #[arg(long, env = "SOLSIEVE_SLITHER", default_value = "slither")]
    pub slither: String,

    /// Analyzer arguments; '{file}' is replaced by the contract path
    #[arg(
        long = "slither-arg",
        default_values_t = vec![
            "{file}".to_string(),
            "--print".to_string(),
            "human-summary".to_string(),
        ],
        allow_hyphen_values = true
    )]
    pub slither_args: Vec<String>,

    /// Lowest severity that marks a contract as vulnerable
    #[arg(long, value_enum, default_value = "medium")]
    pub min_severity: Severity,
}
