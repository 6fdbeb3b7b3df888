//! # 统一错误处理模块
//!
//! 定义 dftgen 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// dftgen 统一错误类型
#[derive(Error, Debug)]
pub enum DftgenError {
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

    // ─────────────────────────────────────────────────────────────
    // 结构文件解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse {format} file: {path}\nReason: {reason}")]
    ParseError {
        format: String,
        path: String,
        reason: String,
    },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    // ─────────────────────────────────────────────────────────────
    // 计算设置错误
    // ─────────────────────────────────────────────────────────────
    #[error("Unknown calculation preset '{0}' (available: scf, relax, vc-relax)")]
    UnknownPreset(String),

    #[error("Malformed settings file: {path}\nReason: {reason}")]
    MalformedSettings { path: String, reason: String },

    #[error("Invalid settings: {0}")]
    Configuration(String),

    #[error("Not implemented: {0}")]
    UnsupportedFeature(String),

    // ─────────────────────────────────────────────────────────────
    // 元素与赝势错误
    // ─────────────────────────────────────────────────────────────
    #[error("No valid element symbol found in '{label}'")]
    ElementLookup { label: String },

    #[error("Failed to find potential for [{missing}]")]
    PseudopotentialAssignment { missing: String },

    #[error("Failed to list contents in \"{path}\"")]
    PseudoDirectory {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 输出错误
    // ─────────────────────────────────────────────────────────────
    #[error("Location to write files not specified")]
    MissingLocation,

    #[error("Name of the input file to write into not specified")]
    MissingFilename,

    #[error("Nothing to write. No input settings found?")]
    NothingToWrite,
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, DftgenError>;
