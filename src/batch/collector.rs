//! # 文件收集器
//!
//! 根据目录、扩展名和可选的 glob 模式收集待处理文件列表。
//!
//! ## 功能
//! - 扩展名过滤（`sol` 与 `.sol` 等价，不区分大小写）
//! - 可选 glob 模式匹配文件名
//! - 可选递归目录搜索
//! - 结果排序，保证同一目录多次运行顺序一致
//!
//! 目录不存在、不是目录或不可读时返回错误，且发生在任何文件被处理之前。
//!
//! ## 依赖关系
//! - 被 `commands/` 各子命令调用
//! - 使用 `walkdir` 遍历目录，`glob` 匹配文件名

use crate::error::{Result, SieveError};

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 文件收集器
pub struct FileCollector {
    /// 输入目录
    root: PathBuf,
    /// 扩展名（不带点，小写），None 表示不过滤
    extension: Option<String>,
    /// 文件名匹配模式
    pattern: Option<glob::Pattern>,
    /// 是否递归
    recursive: bool,
}

impl FileCollector {
    /// 创建新的文件收集器
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: None,
            pattern: None,
            recursive: false,
        }
    }

    /// 设置扩展名过滤
    pub fn with_extension(mut self, extension: &str) -> Self {
        let ext = extension.trim().trim_start_matches('.').to_lowercase();
        self.extension = if ext.is_empty() { None } else { Some(ext) };
        self
    }

    /// 设置文件名 glob 模式
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        let compiled = glob::Pattern::new(pattern).map_err(|e| {
            SieveError::InvalidArgument(format!("Invalid pattern '{}': {}", pattern, e))
        })?;
        self.pattern = Some(compiled);
        Ok(self)
    }

    /// 设置是否递归搜索
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 校验输入目录
    fn validate_root(&self) -> Result<()> {
        let path = self.root.display().to_string();

        if !self.root.exists() {
            return Err(SieveError::DirectoryNotFound { path });
        }
        if !self.root.is_dir() {
            return Err(SieveError::NotADirectory { path });
        }

        // 提前尝试读取，权限问题在这里暴露
        fs::read_dir(&self.root).map_err(|e| SieveError::DirectoryUnreadable { path, source: e })?;
        Ok(())
    }

    /// 收集所有匹配的文件（已排序）
    pub fn collect(&self) -> Result<Vec<PathBuf>> {
        self.validate_root()?;

        let max_depth = if self.recursive { usize::MAX } else { 1 };

        let mut files: Vec<PathBuf> = WalkDir::new(&self.root)
            .max_depth(max_depth)
            .into_iter()
            .filter_map(|e| match e {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::debug!(error = %err, "skipping unreadable entry");
                    None
                }
            })
            .filter(|e| e.file_type().is_file())
            .filter(|e| self.matches(e.path()))
            .map(|e| e.path().to_path_buf())
            .collect();

        files.sort();
        tracing::debug!(root = %self.root.display(), count = files.len(), "collected files");
        Ok(files)
    }

    /// 只计数，不保留路径
    pub fn count(&self) -> Result<usize> {
        Ok(self.collect()?.len())
    }

    /// 检查文件是否同时满足扩展名和模式
    fn matches(&self, path: &Path) -> bool {
        if let Some(ext) = &self.extension {
            let matches_ext = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case(ext))
                .unwrap_or(false);
            if !matches_ext {
                return false;
            }
        }

        match (&self.pattern, path.file_name().and_then(|n| n.to_str())) {
            (Some(pattern), Some(name)) => pattern.matches(name),
            (Some(_), None) => false,
            (None, _) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), "contract A {}").unwrap();
    }

    #[test]
    fn test_collect_by_extension_sorted() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "b.sol");
        touch(dir.path(), "a.sol");
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "C.SOL");

        let files = FileCollector::new(dir.path())
            .with_extension(".sol")
            .collect()
            .unwrap();

        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["C.SOL", "a.sol", "b.sol"]);
    }

    #[test]
    fn test_non_matching_extension_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.sol");

        let files = FileCollector::new(dir.path())
            .with_extension("vy")
            .collect()
            .unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_recursive() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        touch(dir.path(), "top.sol");
        touch(&nested, "deep.sol");

        let flat = FileCollector::new(dir.path())
            .with_extension("sol")
            .count()
            .unwrap();
        let deep = FileCollector::new(dir.path())
            .with_extension("sol")
            .recursive(true)
            .count()
            .unwrap();
        assert_eq!(flat, 1);
        assert_eq!(deep, 2);
    }

    #[test]
    fn test_pattern() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "Token.sol");
        touch(dir.path(), "Vault.sol");

        let files = FileCollector::new(dir.path())
            .with_extension("sol")
            .with_pattern("Tok*")
            .unwrap()
            .collect()
            .unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("Token.sol"));
    }

    #[test]
    fn test_invalid_pattern() {
        let result = FileCollector::new(".").with_pattern("[");
        assert!(matches!(result, Err(SieveError::InvalidArgument(_))));
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let result = FileCollector::new(&missing).collect();
        assert!(matches!(result, Err(SieveError::DirectoryNotFound { .. })));
    }

    #[test]
    fn test_file_is_not_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.sol");
        let result = FileCollector::new(dir.path().join("a.sol")).collect();
        assert!(matches!(result, Err(SieveError::NotADirectory { .. })));
    }
}
