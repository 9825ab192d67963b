//! # 数据模型模块
//!
//! 定义检查结果、判定和批处理报告。
//!
//! ## 依赖关系
//! - 被 `batch/`, `policy.rs` 和 `commands/` 使用
//! - 子模块: outcome, report

pub mod outcome;
pub mod report;

pub use outcome::{CheckOutcome, Verdict};
pub use report::{BatchReport, Remediation, ReportEntry};
