//! # 统一错误处理模块
//!
//! 定义 solsieve 的所有错误类型，使用 `thiserror` 派生。
//!
//! 只有启动阶段的错误（目录不存在、参数非法）会向上传播；
//! 单个文件的检查失败记录在 `BatchReport` 中，不经过这里。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// solsieve 统一错误类型
#[derive(Error, Debug)]
pub enum SieveError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("Not a directory: {path}")]
    NotADirectory { path: String },

    #[error("Directory is not readable: {path}")]
    DirectoryUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // 序列化错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid JSON in {path}: {source}")]
    JsonError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 批处理结果
    // ─────────────────────────────────────────────────────────────
    #[error("{flagged}/{total} files were flagged")]
    FlaggedItems { flagged: usize, total: usize },

    #[error("Interrupted after {processed}/{total} files")]
    Interrupted { processed: usize, total: usize },

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

impl SieveError {
    /// 进程退出码
    pub fn exit_code(&self) -> i32 {
        match self {
            SieveError::FlaggedItems { .. } => 2,
            SieveError::Interrupted { .. } => 130,
            _ => 1,
        }
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, SieveError>;
