//! # 报告导出
//!
//! 把 `BatchReport` 的逐文件记录写成 CSV。
//!
//! ## 依赖关系
//! - 被 `commands/common.rs` 调用
//! - 使用 `csv` + `serde`

use crate::error::{Result, SieveError};
use crate::models::BatchReport;

use std::path::Path;

/// 写出 CSV（index, file, verdict, reason, remediation）
pub fn write_report_csv(report: &BatchReport, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    for row in report.rows() {
        wtr.serialize(row)?;
    }

    wtr.flush().map_err(|e| SieveError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}
