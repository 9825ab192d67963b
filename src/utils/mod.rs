//! # 工具函数模块
//!
//! 提供美化输出、进度反馈、外部命令调用、交互输入和报告导出。
//!
//! ## 依赖关系
//! - 被 `batch/` 和 `commands/` 模块使用
//! - 子模块: export, output, process, progress, prompt

pub mod export;
pub mod output;
pub mod process;
pub mod progress;
pub mod prompt;
