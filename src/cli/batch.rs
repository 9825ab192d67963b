//! # 批处理公共参数
//!
//! `prune` 与 `scan` 共用的目录、过滤、并行和输出选项。
//!
//! ## 依赖关系
//! - 被 `cli/prune.rs`, `cli/scan.rs` 通过 `#[command(flatten)]` 引用

use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// 进度显示方式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ProgressMode {
    /// One line per processed file
    Line,
    /// Interactive progress bar
    Bar,
    /// No progress output
    Off,
}

/// 批处理公共参数
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Folder containing the contracts (prompted for when omitted)
    pub folder: Option<PathBuf>,

    /// File extension to process
    #[arg(short, long, default_value = "sol")]
    pub extension: String,

    /// Additional glob pattern on file names (e.g. 'Token*')
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// Recurse into subdirectories
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// Number of parallel jobs (0 = auto, 1 = sequential in folder order)
    #[arg(short, long, default_value_t = 1)]
    pub jobs: usize,

    /// Progress display
    #[arg(long, value_enum, default_value = "line")]
    pub progress: ProgressMode,

    /// Write a per-file CSV report
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Exit with status 2 when any file is flagged
    #[arg(long, default_value_t = false)]
    pub fail_on_flagged: bool,
}
