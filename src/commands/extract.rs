//! # extract 命令实现
//!
//! 把区块浏览器导出的 JSON 转换为 `.sol` 源码文件。
//!
//! ## 功能
//! - 读取目录下所有 `.json`
//! - 取顶层字段，或 API 响应里 `result[0]` 下的同名字段
//! - 写入同名 `.sol`（默认与 JSON 同目录）
//! - 已存在的 `.sol` 默认跳过
//!
//! ## 依赖关系
//! - 使用 `cli/extract.rs` 定义的参数
//! - 使用 `serde_json` 解析，`batch/collector.rs` 收集文件

use crate::batch::FileCollector;
use crate::cli::extract::ExtractArgs;
use crate::error::{Result, SieveError};
use crate::utils::{output, prompt};

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// 单个文件的处理结果
#[derive(Debug, PartialEq, Eq)]
pub enum ExtractStatus {
    Written(PathBuf),
    Skipped(PathBuf),
    MissingField,
}

/// 执行 extract 命令
pub fn execute(args: ExtractArgs) -> Result<()> {
    output::print_header("Extracting Sources from JSON");

    let folder = prompt::folder_or_prompt(
        args.folder.clone(),
        "Enter the path to the folder containing .json files: ",
    )?;
    let files = FileCollector::new(&folder).with_extension("json").collect()?;

    if files.is_empty() {
        output::print_warning(&format!("No .json files found in '{}'", folder.display()));
        return Ok(());
    }

    let output_dir = args.output.as_deref();
    if let Some(dir) = output_dir {
        fs::create_dir_all(dir).map_err(|e| SieveError::FileWriteError {
            path: dir.display().to_string(),
            source: e,
        })?;
    }

    let mut written = 0;
    let mut skipped = 0;
    let mut failed = 0;

    for json_path in &files {
        let name = json_path.display();
        match extract_file(json_path, output_dir, &args.field, args.overwrite) {
            Ok(ExtractStatus::Written(sol_path)) => {
                output::print_success(&format!("Converted {} to {}", name, sol_path.display()));
                written += 1;
            }
            Ok(ExtractStatus::Skipped(sol_path)) => {
                output::print_skip(&format!("{} already exists", sol_path.display()));
                skipped += 1;
            }
            Ok(ExtractStatus::MissingField) => {
                output::print_warning(&format!("{}: no '{}' field", name, args.field));
                failed += 1;
            }
            Err(e) => {
                output::print_error(&format!("{}", e));
                failed += 1;
            }
        }
    }

    output::print_separator();
    output::print_done(&format!(
        "Extracted {} file(s) ({} skipped, {} failed)",
        written, skipped, failed
    ));
    Ok(())
}

/// 从 JSON 值中取源码字段
pub fn extract_source<'v>(value: &'v Value, field: &str) -> Option<&'v str> {
    value
        .get(field)
        .or_else(|| value.get("result").and_then(|r| r.get(0)).and_then(|r| r.get(field)))
        .and_then(Value::as_str)
}

/// 处理单个 JSON 文件
pub fn extract_file(
    json_path: &Path,
    output_dir: Option<&Path>,
    field: &str,
    overwrite: bool,
) -> Result<ExtractStatus> {
    let stem = json_path
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| "contract".into());
    let mut sol_name = stem;
    sol_name.push(".sol");

    let sol_path = match output_dir {
        Some(dir) => dir.join(&sol_name),
        None => json_path.with_file_name(&sol_name),
    };

    if sol_path.exists() && !overwrite {
        return Ok(ExtractStatus::Skipped(sol_path));
    }

    let text = fs::read_to_string(json_path).map_err(|e| SieveError::FileReadError {
        path: json_path.display().to_string(),
        source: e,
    })?;
    let value: Value = serde_json::from_str(&text).map_err(|e| SieveError::JsonError {
        path: json_path.display().to_string(),
        source: e,
    })?;

    let Some(source) = extract_source(&value, field) else {
        return Ok(ExtractStatus::MissingField);
    };

    fs::write(&sol_path, source).map_err(|e| SieveError::FileWriteError {
        path: sol_path.display().to_string(),
        source: e,
    })?;
    Ok(ExtractStatus::Written(sol_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_source_top_level() {
        let value = json!({ "SourceCode": "contract A {}", "ContractName": "A" });
        assert_eq!(extract_source(&value, "SourceCode"), Some("contract A {}"));
    }

    #[test]
    fn test_extract_source_api_response() {
        let value = json!({
            "status": "1",
            "result": [{ "SourceCode": "contract B {}" }]
        });
        assert_eq!(extract_source(&value, "SourceCode"), Some("contract B {}"));
        assert_eq!(extract_source(&value, "ABI"), None);
    }

    #[test]
    fn test_extract_file_writes_next_to_json() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("0xabc.json");
        fs::write(&json_path, r#"{"SourceCode": "pragma solidity ^0.8.0;\ncontract C {}"}"#)
            .unwrap();

        let status = extract_file(&json_path, None, "SourceCode", false).unwrap();
        let sol_path = dir.path().join("0xabc.sol");
        assert_eq!(status, ExtractStatus::Written(sol_path.clone()));
        assert_eq!(
            fs::read_to_string(&sol_path).unwrap(),
            "pragma solidity ^0.8.0;\ncontract C {}"
        );

        // 再次运行时跳过
        let again = extract_file(&json_path, None, "SourceCode", false).unwrap();
        assert_eq!(again, ExtractStatus::Skipped(sol_path));
    }

    #[test]
    fn test_extract_file_to_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("a.json");
        fs::write(&json_path, r#"{"SourceCode": "contract A {}"}"#).unwrap();

        let status = extract_file(&json_path, Some(out.path()), "SourceCode", false).unwrap();
        assert_eq!(status, ExtractStatus::Written(out.path().join("a.sol")));
    }

    #[test]
    fn test_extract_file_missing_field_and_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let no_field = dir.path().join("a.json");
        let bad = dir.path().join("b.json");
        fs::write(&no_field, r#"{"ABI": "[]"}"#).unwrap();
        fs::write(&bad, "{ not json").unwrap();

        assert_eq!(
            extract_file(&no_field, None, "SourceCode", false).unwrap(),
            ExtractStatus::MissingField
        );
        assert!(!dir.path().join("a.sol").exists());
        assert!(matches!(
            extract_file(&bad, None, "SourceCode", false),
            Err(SieveError::JsonError { .. })
        ));
    }
}
