//! # solsieve - Solidity 合约集批处理工具
//!
//! 对一个目录里的合约批量调用外部工具并汇总结果。
//!
//! ## 子命令
//! - `prune`   - 用 solc 编译，删除编译失败的合约
//! - `scan`    - 用 slither 分析，统计存在中高危问题的合约
//! - `count`   - 统计指定扩展名的文件数
//! - `extract` - 从区块浏览器 JSON 提取 `.sol` 源码
//! - `pragma`  - 放宽固定版本的 `pragma solidity`
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── batch/     (文件收集、批量执行、中断)
//!   │     ├── policy.rs  (分类策略)
//!   │     └── models/    (检查结果与报告)
//!   ├── utils/      (输出、进度、外部命令、交互输入、导出)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod models;
mod policy;
mod utils;

use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

/// 日志级别环境变量
const LOG_ENV: &str = "SOLSIEVE_LOG";

/// 初始化 tracing：环境变量优先，其次 `-v` 次数
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(format!("solsieve={}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(e.exit_code());
    }
}
