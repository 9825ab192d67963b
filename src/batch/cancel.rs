//! # 中断标志
//!
//! Ctrl-C 只设置标志，不直接退出进程；批处理在每个文件开始前检查，
//! 已完成的记录保留在报告中，临时文件随作用域正常释放。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 检查
//! - 使用 `ctrlc` 注册信号处理

use crate::error::{Result, SieveError};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// 可克隆的中断标志
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建标志并绑定 Ctrl-C
    pub fn install_ctrlc() -> Result<Self> {
        let flag = Self::new();
        let handle = flag.clone();
        ctrlc::set_handler(move || {
            handle.cancel();
        })
        .map_err(|e| SieveError::Other(format!("Failed to install Ctrl-C handler: {}", e)))?;
        Ok(flag)
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let flag = CancelFlag::new();
        let other = flag.clone();
        assert!(!other.is_cancelled());
        flag.cancel();
        assert!(other.is_cancelled());
    }
}
