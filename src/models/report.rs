//! # 批处理报告
//!
//! 一次运行的有序、只追加记录：每个文件一条判定，外加汇总计数。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 逐条写入
//! - 被 `commands/` 打印，被 `utils/export.rs` 导出

use super::outcome::{Verdict, VerdictLabel};

use serde::Serialize;
use std::path::PathBuf;

/// 修复动作（删除文件）的执行情况
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Remediation {
    /// 未执行（未标记，或未配置修复动作）
    NotApplicable,
    /// 执行成功
    Applied,
    /// 执行失败，附带错误信息
    Failed(String),
}

/// 单个文件的记录
#[derive(Debug, Clone)]
pub struct ReportEntry {
    pub item: PathBuf,
    pub verdict: Verdict,
    pub remediation: Remediation,
}

/// 批处理报告
#[derive(Debug, Default)]
pub struct BatchReport {
    /// 本次运行的文件总数
    pub total_items: usize,
    /// 已处理数量
    pub processed_count: usize,
    /// 被标记数量
    pub flagged_count: usize,
    /// 无法判定数量
    pub inconclusive_count: usize,
    /// 是否被中断
    pub interrupted: bool,
    /// 按完成顺序排列的记录
    pub entries: Vec<ReportEntry>,
}

impl BatchReport {
    pub fn new(total_items: usize) -> Self {
        Self {
            total_items,
            ..Self::default()
        }
    }

    /// 追加一条记录并更新计数
    pub fn record(&mut self, entry: ReportEntry) {
        self.processed_count += 1;
        if entry.verdict.is_flagged() {
            self.flagged_count += 1;
        } else if entry.verdict.is_inconclusive() {
            self.inconclusive_count += 1;
        }
        self.entries.push(entry);
    }

    /// 通过数量
    pub fn passed_count(&self) -> usize {
        self.processed_count - self.flagged_count - self.inconclusive_count
    }

    /// 是否处理完全部文件
    pub fn is_complete(&self) -> bool {
        !self.interrupted && self.processed_count == self.total_items
    }

    pub fn flagged(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(|e| e.verdict.is_flagged())
    }

    pub fn inconclusive(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(|e| e.verdict.is_inconclusive())
    }

    /// 修复失败的记录
    pub fn remediation_failures(&self) -> impl Iterator<Item = (&ReportEntry, &str)> {
        self.entries.iter().filter_map(|e| match &e.remediation {
            Remediation::Failed(err) => Some((e, err.as_str())),
            _ => None,
        })
    }

    /// 导出用的扁平行
    pub fn rows(&self) -> Vec<ReportRow> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| ReportRow {
                index: i + 1,
                file: e.item.display().to_string(),
                verdict: e.verdict.label(),
                reason: e.verdict.reason().to_string(),
                remediation: match &e.remediation {
                    Remediation::NotApplicable => String::new(),
                    Remediation::Applied => "removed".to_string(),
                    Remediation::Failed(err) => format!("failed: {}", err),
                },
            })
            .collect()
    }
}

/// CSV 导出行
#[derive(Debug, Serialize)]
pub struct ReportRow {
    pub index: usize,
    pub file: String,
    pub verdict: VerdictLabel,
    pub reason: String,
    pub remediation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, verdict: Verdict) -> ReportEntry {
        ReportEntry {
            item: PathBuf::from(name),
            verdict,
            remediation: Remediation::NotApplicable,
        }
    }

    #[test]
    fn test_record_updates_counts() {
        let mut report = BatchReport::new(3);
        report.record(entry("a.sol", Verdict::Pass));
        report.record(entry("b.sol", Verdict::Flagged("compilation failed".into())));
        report.record(entry("c.sol", Verdict::Inconclusive("solc not found".into())));

        assert_eq!(report.processed_count, 3);
        assert_eq!(report.flagged_count, 1);
        assert_eq!(report.inconclusive_count, 1);
        assert_eq!(report.passed_count(), 1);
        assert!(report.is_complete());
        assert_eq!(report.flagged().count(), report.flagged_count);
    }

    #[test]
    fn test_interrupted_report_is_incomplete() {
        let mut report = BatchReport::new(2);
        report.record(entry("a.sol", Verdict::Pass));
        report.interrupted = true;
        assert!(!report.is_complete());
    }

    #[test]
    fn test_rows() {
        let mut report = BatchReport::new(2);
        report.record(entry("a.sol", Verdict::Pass));
        report.record(ReportEntry {
            item: PathBuf::from("b.sol"),
            verdict: Verdict::Flagged("compilation failed".into()),
            remediation: Remediation::Failed("gone".into()),
        });

        let rows = report.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].index, 1);
        assert_eq!(rows[0].remediation, "");
        assert_eq!(rows[1].verdict, VerdictLabel::Flagged);
        assert_eq!(rows[1].reason, "compilation failed");
        assert_eq!(rows[1].remediation, "failed: gone");
        assert_eq!(report.remediation_failures().count(), 1);
    }
}
