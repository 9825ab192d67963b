//! # count 命令实现
//!
//! 统计目录中指定扩展名的普通文件数量。
//!
//! ## 依赖关系
//! - 使用 `cli/count.rs` 定义的参数
//! - 使用 `batch/collector.rs`

use crate::batch::FileCollector;
use crate::cli::count::CountArgs;
use crate::error::Result;
use crate::utils::{output, prompt};

use std::path::Path;

/// 执行 count 命令
pub fn execute(args: CountArgs) -> Result<()> {
    let folder = prompt::folder_or_prompt(args.folder, "Enter the directory path: ")?;
    let count = count_files(&folder, &args.extension, args.recursive)?;

    output::print_done(&format!(
        "Number of .{} files: {}",
        args.extension.trim_start_matches('.'),
        count
    ));
    Ok(())
}

/// 统计扩展名匹配的文件数
pub fn count_files(folder: &Path, extension: &str, recursive: bool) -> Result<usize> {
    FileCollector::new(folder)
        .with_extension(extension)
        .recursive(recursive)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SieveError;
    use std::fs;

    fn corpus() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.sol"), "").unwrap();
        fs::write(dir.path().join("b.sol"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::create_dir(dir.path().join("lib")).unwrap();
        fs::write(dir.path().join("lib").join("c.sol"), "").unwrap();
        dir
    }

    #[test]
    fn test_count_ignores_other_extensions() {
        let dir = corpus();
        assert_eq!(count_files(dir.path(), "sol", false).unwrap(), 2);
        assert_eq!(count_files(dir.path(), ".txt", false).unwrap(), 1);
        assert_eq!(count_files(dir.path(), "json", false).unwrap(), 0);
    }

    #[test]
    fn test_count_recursive() {
        let dir = corpus();
        assert_eq!(count_files(dir.path(), "sol", true).unwrap(), 3);
    }

    #[test]
    fn test_count_missing_folder() {
        let dir = tempfile::tempdir().unwrap();
        let result = count_files(&dir.path().join("missing"), "sol", false);
        assert!(matches!(result, Err(SieveError::DirectoryNotFound { .. })));
    }
}
