//! # 批量执行器
//!
//! 对一组文件逐个执行外部检查、分类、（可选）修复，并汇总为 `BatchReport`。
//!
//! ## 功能
//! - 默认单线程，按输入顺序处理
//! - `jobs > 1` 时使用 rayon 线程池，记录按完成顺序排列
//! - 单个文件的失败不会中断批处理
//! - 每个文件开始前和检查返回后都检查中断标志；被中断的文件不分类、不修复
//!
//! ## 依赖关系
//! - 被 `commands/prune.rs`, `commands/scan.rs` 调用
//! - 使用 `utils/progress.rs` 的观察者接口
//! - 使用 `rayon` 进行并行处理

use super::cancel::CancelFlag;
use crate::error::{Result, SieveError};
use crate::models::{BatchReport, CheckOutcome, Remediation, ReportEntry, Verdict};
use crate::utils::progress::{ProgressObserver, SilentProgress};

use rayon::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// 被标记文件的修复动作（如删除）
pub type Remedy<'r> = dyn Fn(&Path) -> anyhow::Result<()> + Sync + 'r;

/// 批量执行器
pub struct BatchRunner<'a> {
    /// 并行作业数
    jobs: usize,
    /// 中断标志
    cancel: CancelFlag,
    /// 进度观察者
    observer: &'a dyn ProgressObserver,
}

impl<'a> BatchRunner<'a> {
    /// 创建新的批量执行器（jobs = 0 表示使用全部 CPU）
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self {
            jobs,
            cancel: CancelFlag::new(),
            observer: &SilentProgress,
        }
    }

    pub fn with_observer(mut self, observer: &'a dyn ProgressObserver) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_cancel(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// 处理文件列表
    ///
    /// `check` 对每个文件恰好调用一次；`classify` 必须是纯函数；
    /// `on_flagged` 仅在判定为 `Flagged` 后调用，失败只记录不中断。
    pub fn run<C, K>(
        &self,
        items: Vec<PathBuf>,
        check: C,
        classify: K,
        on_flagged: Option<&Remedy<'_>>,
    ) -> Result<BatchReport>
    where
        C: Fn(&Path) -> CheckOutcome + Sync + Send,
        K: Fn(&CheckOutcome) -> Verdict + Sync + Send,
    {
        let items = dedup(items);
        let total = items.len();

        let report = if self.jobs <= 1 {
            self.run_sequential(&items, &check, &classify, on_flagged)
        } else {
            self.run_parallel(&items, &check, &classify, on_flagged)?
        };

        self.observer.finish();
        tracing::info!(
            total,
            processed = report.processed_count,
            flagged = report.flagged_count,
            inconclusive = report.inconclusive_count,
            interrupted = report.interrupted,
            "batch finished"
        );
        Ok(report)
    }

    fn run_sequential<C, K>(
        &self,
        items: &[PathBuf],
        check: &C,
        classify: &K,
        on_flagged: Option<&Remedy<'_>>,
    ) -> BatchReport
    where
        C: Fn(&Path) -> CheckOutcome,
        K: Fn(&CheckOutcome) -> Verdict,
    {
        let total = items.len();
        let mut report = BatchReport::new(total);

        for item in items {
            if self.cancel.is_cancelled() {
                report.interrupted = true;
                break;
            }

            let Some(entry) = self.process_item(item, check, classify, on_flagged) else {
                report.interrupted = true;
                break;
            };
            report.record(entry);
            if let Some(entry) = report.entries.last() {
                self.observer.on_item(report.processed_count, total, entry);
            }
        }

        report
    }

    fn run_parallel<C, K>(
        &self,
        items: &[PathBuf],
        check: &C,
        classify: &K,
        on_flagged: Option<&Remedy<'_>>,
    ) -> Result<BatchReport>
    where
        C: Fn(&Path) -> CheckOutcome + Sync + Send,
        K: Fn(&CheckOutcome) -> Verdict + Sync + Send,
    {
        let total = items.len();
        let shared = Mutex::new(BatchReport::new(total));

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| SieveError::Other(format!("Failed to build thread pool: {}", e)))?;

        pool.install(|| {
            items.par_iter().for_each(|item| {
                if self.cancel.is_cancelled() {
                    return;
                }

                let Some(entry) = self.process_item(item, check, classify, on_flagged) else {
                    return;
                };

                let mut report = shared.lock().unwrap_or_else(PoisonError::into_inner);
                report.record(entry);
                if let Some(entry) = report.entries.last() {
                    self.observer.on_item(report.processed_count, total, entry);
                }
            });
        });

        let mut report = shared.into_inner().unwrap_or_else(PoisonError::into_inner);
        report.interrupted = self.cancel.is_cancelled() && report.processed_count < total;
        Ok(report)
    }

    /// 检查 -> 分类 -> 修复，生成单条记录
    ///
    /// 检查期间收到中断时返回 `None`：子进程同样收到了信号，
    /// 其结果不可信，既不分类也不修复，该文件视为未处理。
    fn process_item<C, K>(
        &self,
        item: &Path,
        check: &C,
        classify: &K,
        on_flagged: Option<&Remedy<'_>>,
    ) -> Option<ReportEntry>
    where
        C: Fn(&Path) -> CheckOutcome,
        K: Fn(&CheckOutcome) -> Verdict,
    {
        let outcome = check(item);
        if self.cancel.is_cancelled() {
            tracing::debug!(item = %item.display(), ?outcome, "discarded after interrupt");
            return None;
        }

        let verdict = classify(&outcome);
        tracing::debug!(item = %item.display(), ?outcome, ?verdict, "classified");

        let remediation = match (&verdict, on_flagged) {
            (Verdict::Flagged(_), Some(remedy)) => match remedy(item) {
                Ok(()) => Remediation::Applied,
                Err(e) => {
                    let message = format!("{:#}", e);
                    tracing::warn!(item = %item.display(), error = %message, "remediation failed");
                    Remediation::Failed(message)
                }
            },
            _ => Remediation::NotApplicable,
        };

        Some(ReportEntry {
            item: item.to_path_buf(),
            verdict,
            remediation,
        })
    }
}

/// 去重，保留首次出现的位置
fn dedup(items: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| {
            let fresh = seen.insert(item.clone());
            if !fresh {
                tracing::warn!(item = %item.display(), "duplicate item ignored");
            }
            fresh
        })
        .collect()
}
