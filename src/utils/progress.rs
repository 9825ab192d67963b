//! # 进度反馈
//!
//! 批处理每完成一个文件通知一次观察者。提供三种实现：
//! - `LineProgress`: 逐行输出（`Visited: 3/10` 风格），适合日志和管道
//! - `BarProgress`: 封装 `indicatif` 进度条
//! - `SilentProgress`: 不输出
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 调用
//! - 被 `commands/` 构造
//! - 使用 `indicatif` crate

use crate::models::ReportEntry;

use indicatif::{ProgressBar, ProgressStyle};

/// 单条状态描述（返回 None 则不输出）
pub type Describe = fn(&ReportEntry) -> Option<String>;

/// 进度行格式
pub type ProgressLine = fn(usize, usize) -> String;

/// 进度观察者
pub trait ProgressObserver: Sync {
    /// 每处理完一个文件调用一次
    fn on_item(&self, processed: usize, total: usize, entry: &ReportEntry);

    /// 批处理结束（正常完成或中断）
    fn finish(&self) {}
}

/// 逐行输出
pub struct LineProgress {
    describe: Describe,
    line: ProgressLine,
}

impl LineProgress {
    pub fn new(describe: Describe, line: ProgressLine) -> Self {
        Self { describe, line }
    }
}

impl ProgressObserver for LineProgress {
    fn on_item(&self, processed: usize, total: usize, entry: &ReportEntry) {
        if let Some(status) = (self.describe)(entry) {
            println!("{}", status);
        }
        println!("{}", (self.line)(processed, total));
    }
}

/// 进度条
pub struct BarProgress {
    pb: ProgressBar,
    describe: Describe,
}

impl BarProgress {
    pub fn new(total: usize, message: &str, describe: Describe) -> Self {
        Self {
            pb: create_progress_bar(total as u64, message),
            describe,
        }
    }
}

impl ProgressObserver for BarProgress {
    fn on_item(&self, processed: usize, _total: usize, entry: &ReportEntry) {
        if let Some(status) = (self.describe)(entry) {
            self.pb.suspend(|| println!("{}", status));
        }
        self.pb.set_position(processed as u64);
    }

    fn finish(&self) {
        self.pb.finish_and_clear();
    }
}

/// 不输出
pub struct SilentProgress;

impl ProgressObserver for SilentProgress {
    fn on_item(&self, _processed: usize, _total: usize, _entry: &ReportEntry) {}
}

/// 创建标准进度条
pub fn create_progress_bar(len: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    let style = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
    )
    .map(|s| s.progress_chars("#>-"))
    .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}
