//! # 数据模型模块
//!
//! 定义输入文件生成所需的晶体结构数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/` 和 `qe/` 使用
//! - 子模块: structure

pub mod structure;

pub use structure::{Atom, Crystal, Lattice};
