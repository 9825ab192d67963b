//! # 外部命令调用
//!
//! 同步运行外部工具（solc / slither）并把结果映射为 `CheckOutcome`。
//!
//! ## 输出捕获
//! - `Capture::Discard`: 丢弃 stdout，保留 stderr 作为失败详情
//! - `Capture::ScratchFile`: stdout 与 stderr 合并写入唯一命名的临时文件，
//!   读回后随作用域删除（包括提前返回）
//!
//! ## 结果映射
//! - 退出码 0 -> `Success`
//! - 非零退出码 -> `Failure`
//! - 无法启动 / 被信号终止 / 输出无法读取 -> `ToolError`
//!
//! ## 依赖关系
//! - 被 `commands/prune.rs`, `commands/scan.rs` 使用
//! - 使用 `tempfile` 管理临时文件

use crate::models::CheckOutcome;

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

/// 文件路径占位符；参数中没有时追加在末尾
pub const FILE_PLACEHOLDER: &str = "{file}";

/// 输出捕获方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    Discard,
    ScratchFile,
}

/// 外部工具命令
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: String,
    args: Vec<String>,
    capture: Capture,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            capture: Capture::Discard,
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn capture(mut self, capture: Capture) -> Self {
        self.capture = capture;
        self
    }

    /// 展开后的参数列表
    pub fn argv(&self, file: &Path) -> Vec<OsString> {
        let mut argv = Vec::with_capacity(self.args.len() + 1);
        let mut substituted = false;

        for arg in &self.args {
            if arg == FILE_PLACEHOLDER {
                argv.push(file.as_os_str().to_os_string());
                substituted = true;
            } else if arg.contains(FILE_PLACEHOLDER) {
                argv.push(OsString::from(
                    arg.replace(FILE_PLACEHOLDER, &file.to_string_lossy()),
                ));
                substituted = true;
            } else {
                argv.push(OsString::from(arg));
            }
        }

        if !substituted {
            argv.push(file.as_os_str().to_os_string());
        }
        argv
    }

    /// 用于日志的命令行
    pub fn display(&self, file: &Path) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.argv(file).iter().map(|a| a.to_string_lossy().into_owned()));
        parts.join(" ")
    }

    /// 对单个文件执行检查
    pub fn check(&self, file: &Path) -> CheckOutcome {
        tracing::debug!(command = %self.display(file), "running tool");
        match self.capture {
            Capture::Discard => self.run_discarding(file),
            Capture::ScratchFile => self.run_with_scratch(file),
        }
    }

    fn command(&self, file: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.argv(file)).stdin(Stdio::null());
        cmd
    }

    fn run_discarding(&self, file: &Path) -> CheckOutcome {
        let output = match self
            .command(file)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
        {
            Ok(output) => output,
            Err(e) => return self.launch_error(e),
        };

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        self.map_status(output.status, stderr)
    }

    fn run_with_scratch(&self, file: &Path) -> CheckOutcome {
        let scratch = match tempfile::Builder::new()
            .prefix("solsieve-")
            .suffix(".txt")
            .tempfile()
        {
            Ok(scratch) => scratch,
            Err(e) => {
                return CheckOutcome::ToolError(format!("failed to create scratch file: {}", e))
            }
        };

        let (stdout, stderr) = match scratch
            .as_file()
            .try_clone()
            .and_then(|out| out.try_clone().map(|err| (out, err)))
        {
            Ok(handles) => handles,
            Err(e) => return CheckOutcome::ToolError(format!("failed to open scratch file: {}", e)),
        };

        let status = match self
            .command(file)
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::from(stderr))
            .status()
        {
            Ok(status) => status,
            Err(e) => return self.launch_error(e),
        };

        let captured = match fs::read(scratch.path()) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => return CheckOutcome::ToolError(format!("failed to read tool output: {}", e)),
        };

        self.map_status(status, captured)
    }

    fn map_status(&self, status: ExitStatus, output: String) -> CheckOutcome {
        if status.success() {
            return CheckOutcome::Success(output);
        }

        match status.code() {
            Some(code) if output.trim().is_empty() => {
                CheckOutcome::Failure(format!("{} exited with status {}", self.program, code))
            }
            Some(_) => CheckOutcome::Failure(output),
            None => CheckOutcome::ToolError(format!("{} was terminated by a signal", self.program)),
        }
    }

    fn launch_error(&self, e: io::Error) -> CheckOutcome {
        if e.kind() == io::ErrorKind::NotFound {
            CheckOutcome::ToolError(format!("{} not found in PATH", self.program))
        } else {
            CheckOutcome::ToolError(format!("failed to run {}: {}", self.program, e))
        }
    }
}
