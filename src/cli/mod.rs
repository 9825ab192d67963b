//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `prune`: 编译检查，删除编译失败的合约
//! - `scan`: 静态分析，统计存在中高危问题的合约
//! - `count`: 统计指定扩展名的文件数
//! - `extract`: 从 JSON 导出文件提取 `.sol` 源码
//! - `pragma`: 放宽固定版本的 `pragma solidity`
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: batch, count, extract, pragma, prune, scan

pub mod batch;
pub mod count;
pub mod extract;
pub mod pragma;
pub mod prune;
pub mod scan;

use clap::{ArgAction, Parser, Subcommand};

/// solsieve - Solidity 合约集批处理工具
#[derive(Parser)]
#[command(name = "solsieve")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(
    about = "Batch compile-check, static-analysis tally and preprocessing for Solidity contract corpora",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Compile every contract and delete the ones that fail
    Prune(prune::PruneArgs),

    /// Run a static analyzer on every contract and count vulnerable ones
    Scan(scan::ScanArgs),

    /// Count files with a given extension in a folder
    Count(count::CountArgs),

    /// Extract .sol sources from block-explorer JSON dumps
    Extract(extract::ExtractArgs),

    /// Relax pinned `pragma solidity 0.8.x;` lines to a caret range
    Pragma(pragma::PragmaArgs),
}
