//! # 检查结果与判定
//!
//! `CheckOutcome` 是外部工具对单个文件的原始结果，
//! `Verdict` 是分类器给出的语义判定。
//!
//! ## 依赖关系
//! - 被 `utils/process.rs` 产生
//! - 被 `policy.rs` 消费，结果写入 `models/report.rs`

use serde::Serialize;
use std::fmt;

/// 外部检查的原始结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// 工具正常退出（退出码 0），附带捕获的输出
    Success(String),
    /// 工具运行完成但报告失败（非零退出码），附带输出或错误信息
    Failure(String),
    /// 工具本身无法运行、被信号终止或输出无法读取
    ToolError(String),
}

/// 分类判定
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// 通过
    Pass,
    /// 被标记（编译失败 / 存在中高危问题）
    Flagged(String),
    /// 无法判定（工具缺失、报告无法解析），不触发修复动作
    Inconclusive(String),
}

impl Verdict {
    pub fn is_flagged(&self) -> bool {
        matches!(self, Verdict::Flagged(_))
    }

    pub fn is_inconclusive(&self) -> bool {
        matches!(self, Verdict::Inconclusive(_))
    }

    /// 判定标签
    pub fn label(&self) -> VerdictLabel {
        match self {
            Verdict::Pass => VerdictLabel::Pass,
            Verdict::Flagged(_) => VerdictLabel::Flagged,
            Verdict::Inconclusive(_) => VerdictLabel::Inconclusive,
        }
    }

    /// 判定原因（Pass 为空）
    pub fn reason(&self) -> &str {
        match self {
            Verdict::Pass => "",
            Verdict::Flagged(reason) | Verdict::Inconclusive(reason) => reason,
        }
    }
}

/// 不带原因的判定类别，用于导出
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictLabel {
    Pass,
    Flagged,
    Inconclusive,
}

impl fmt::Display for VerdictLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerdictLabel::Pass => write!(f, "pass"),
            VerdictLabel::Flagged => write!(f, "flagged"),
            VerdictLabel::Inconclusive => write!(f, "inconclusive"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_accessors() {
        let flagged = Verdict::Flagged("compilation failed".into());
        assert!(flagged.is_flagged());
        assert_eq!(flagged.reason(), "compilation failed");
        assert_eq!(flagged.label().to_string(), "flagged");

        assert_eq!(Verdict::Pass.reason(), "");
        assert!(Verdict::Inconclusive("x".into()).is_inconclusive());
    }
}
