//! # 静态参考数据模块
//!
//! ## 依赖关系
//! - 被 `qe/` 模块使用
//! - 子模块: elements

pub mod elements;
