//! # 分类策略
//!
//! 把外部工具的原始结果映射为判定。
//!
//! ## 策略
//! - 编译检查：退出码 0 为通过，其余为编译失败；工具本身无法运行时
//!   默认判为无法判定，`flag_tool_errors` 打开后同样视为编译失败
//! - 静态分析：从 slither `human-summary` 报告中读取各级别问题数，
//!   达到阈值级别的问题数大于 0 即标记
//!
//! ## 依赖关系
//! - 被 `commands/prune.rs`, `commands/scan.rs` 使用
//! - 使用 `regex` 扫描报告，`console` 去除 ANSI 颜色

use crate::models::{CheckOutcome, Verdict};

use anyhow::Context;
use clap::ValueEnum;
use regex::Regex;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

pub const COMPILATION_FAILED: &str = "compilation failed";

// ─────────────────────────────────────────────────────────────
// 编译检查
// ─────────────────────────────────────────────────────────────

/// 编译检查策略
#[derive(Debug, Clone, Copy, Default)]
pub struct CompilePolicy {
    /// 工具无法运行时也视为编译失败（会触发删除）
    pub flag_tool_errors: bool,
}

impl CompilePolicy {
    pub fn classify(&self, outcome: &CheckOutcome) -> Verdict {
        match outcome {
            CheckOutcome::Success(_) => Verdict::Pass,
            CheckOutcome::Failure(_) => Verdict::Flagged(COMPILATION_FAILED.to_string()),
            CheckOutcome::ToolError(_) if self.flag_tool_errors => {
                Verdict::Flagged(COMPILATION_FAILED.to_string())
            }
            CheckOutcome::ToolError(detail) => Verdict::Inconclusive(detail.clone()),
        }
    }
}

/// 删除文件（编译失败时的修复动作）
pub fn remove_item(path: &Path) -> anyhow::Result<()> {
    fs::remove_file(path).with_context(|| format!("failed to delete {}", path.display()))
}

// ─────────────────────────────────────────────────────────────
// 静态分析
// ─────────────────────────────────────────────────────────────

/// 问题严重程度（由低到高）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum Severity {
    Informational,
    Low,
    Medium,
    High,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Informational,
        Severity::Low,
        Severity::Medium,
        Severity::High,
    ];

    fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "informational" => Some(Severity::Informational),
            "low" => Some(Severity::Low),
            "medium" => Some(Severity::Medium),
            "high" => Some(Severity::High),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Informational => write!(f, "informational"),
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
        }
    }
}

/// 报告中各级别的问题数（缺失的标签为 None）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IssueCounts {
    pub informational: Option<u64>,
    pub low: Option<u64>,
    pub medium: Option<u64>,
    pub high: Option<u64>,
}

impl IssueCounts {
    /// 某级别的问题数，缺失按 0 计
    pub fn get(&self, severity: Severity) -> u64 {
        let value = match severity {
            Severity::Informational => self.informational,
            Severity::Low => self.low,
            Severity::Medium => self.medium,
            Severity::High => self.high,
        };
        value.unwrap_or(0)
    }

    fn slot(&mut self, severity: Severity) -> &mut Option<u64> {
        match severity {
            Severity::Informational => &mut self.informational,
            Severity::Low => &mut self.low,
            Severity::Medium => &mut self.medium,
            Severity::High => &mut self.high,
        }
    }

    /// 是否存在不低于 `min` 级别的问题
    pub fn any_at_or_above(&self, min: Severity) -> bool {
        Severity::ALL
            .iter()
            .filter(|s| **s >= min)
            .any(|s| self.get(*s) > 0)
    }
}

/// `Number of <severity> issues: <n>`，行首允许空白，大小写不敏感
static SUMMARY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(concat!(
        r"(?im)^[^\S\n]*number[^\S\n]+of[^\S\n]+",
        r"(informational|low|medium|high)",
        r"[^\S\n]+issues[^\S\n]*:[^\S\n]*(\S*)",
    )) {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid summary regex: {err}"),
    }
});

/// 解析 `Number of <severity> issues: <n>` 行
///
/// 每个级别取第一次出现的值；标签存在但数值无法解析时返回错误。
pub fn parse_issue_counts(report: &str) -> Result<IssueCounts, String> {
    let text = console::strip_ansi_codes(report);
    let mut counts = IssueCounts::default();

    for caps in SUMMARY_LINE.captures_iter(&text) {
        let Some(severity) = Severity::from_label(&caps[1]) else {
            continue;
        };
        let slot = counts.slot(severity);
        if slot.is_some() {
            continue;
        }

        let raw = &caps[2];
        let value = raw
            .parse::<u64>()
            .map_err(|_| format!("unparseable {} issue count '{}'", severity, raw))?;
        *slot = Some(value);
    }

    Ok(counts)
}

/// 静态分析策略
#[derive(Debug, Clone, Copy)]
pub struct AnalysisPolicy {
    /// 标记阈值
    pub min_severity: Severity,
}

impl Default for AnalysisPolicy {
    fn default() -> Self {
        Self {
            min_severity: Severity::Medium,
        }
    }
}

impl AnalysisPolicy {
    pub fn classify(&self, outcome: &CheckOutcome) -> Verdict {
        // 分析器发现问题时退出码也可能非零，只看报告内容
        let report = match outcome {
            CheckOutcome::Success(text) | CheckOutcome::Failure(text) => text,
            CheckOutcome::ToolError(detail) => return Verdict::Inconclusive(detail.clone()),
        };

        match parse_issue_counts(report) {
            Ok(counts) if counts.any_at_or_above(self.min_severity) => {
                Verdict::Flagged(self.flag_reason())
            }
            Ok(_) => Verdict::Pass,
            Err(reason) => Verdict::Inconclusive(reason),
        }
    }

    /// 例如 `medium/high severity issues found`
    pub fn flag_reason(&self) -> String {
        let levels: Vec<String> = Severity::ALL
            .iter()
            .filter(|s| **s >= self.min_severity)
            .map(|s| s.to_string())
            .collect();
        format!("{} severity issues found", levels.join("/"))
    }
}
