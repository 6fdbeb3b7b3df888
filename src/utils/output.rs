//! # 美化输出工具
//!
//! 提供统一的终端输出样式。所有提示都带有固定前缀，错误写到 stderr。
//!
//! `--dry-run` 把生成的输入文本写到 stdout，此时调用 [`notices_to_stderr`]
//! 让其余提示改走 stderr，stdout 上只剩输入文本。
//!
//! ## 依赖关系
//! - 被 `commands/`、`qe/pseudo.rs` 与 `main.rs` 使用
//! - 使用 `colored` crate

use colored::Colorize;
use std::sync::atomic::{AtomicBool, Ordering};

static NOTICES_TO_STDERR: AtomicBool = AtomicBool::new(false);

/// 切换提示的输出流
pub fn notices_to_stderr(enabled: bool) {
    NOTICES_TO_STDERR.store(enabled, Ordering::SeqCst);
}

fn notice(line: String) {
    if NOTICES_TO_STDERR.load(Ordering::SeqCst) {
        eprintln!("{}", line);
    } else {
        println!("{}", line);
    }
}

/// 打印成功消息
pub fn print_success(msg: &str) {
    notice(format!("{} {}", "[OK]".green().bold(), msg));
}

/// 打印错误消息
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

/// 打印警告消息
pub fn print_warning(msg: &str) {
    notice(format!("{} {}", "[WARN]".yellow().bold(), msg));
}

/// 打印信息消息
pub fn print_info(msg: &str) {
    notice(format!("{} {}", "[*]".blue().bold(), msg));
}

/// 打印跳过消息
pub fn print_skip(msg: &str) {
    notice(format!("{} {}", "[SKIP]".dimmed(), msg));
}

/// 打印完成消息
pub fn print_done(msg: &str) {
    notice(format!("{} {}", "[DONE]".green().bold(), msg));
}

/// 打印标题栏
pub fn print_header(title: &str) {
    let line = "─".repeat(60);
    notice(format!("\n{}", line.dimmed()));
    notice(format!("  {}", title.bold()));
    notice(format!("{}\n", line.dimmed()));
}

/// 打印表格（与其他提示走同一输出流）
pub fn print_table(table: &str) {
    notice(table.to_string());
}
