//! # dftgen - DFT 输入文件生成工具
//!
//! 从晶体结构生成 DFT 代码的输入文件。
//!
//! ## 子命令
//! - `pw.x` - Quantum ESPRESSO pw.x 输入文件
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (结构文件解析)
//!   │     ├── qe/        (pw.x 设置合并与文本生成)
//!   │     ├── data/      (元素数据)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod cli;
mod commands;
mod data;
mod error;
mod models;
mod parsers;
mod qe;
mod utils;

use clap::{CommandFactory, Parser};
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        Cli::command().print_help().ok();
        return;
    };

    if let Err(e) = commands::run(command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
