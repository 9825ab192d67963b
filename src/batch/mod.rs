//! # 批量处理模块
//!
//! 对目录中的合约文件批量执行外部检查。
//!
//! ## 功能
//! - 收集匹配文件列表（目录快照）
//! - 逐个检查、分类、修复
//! - 进度反馈与统计
//! - Ctrl-C 中断
//!
//! ## 依赖关系
//! - 被各命令模块使用
//! - 使用 `rayon` 进行并行处理

pub mod cancel;
pub mod collector;
pub mod runner;

pub use cancel::CancelFlag;
pub use collector::FileCollector;
pub use runner::{BatchRunner, Remedy};
