//! # Quantum ESPRESSO (pw.x) 输入文件生成
//!
//! ## 子模块
//! - `schema`: namelist/card 名称与 tag 顺序
//! - `presets`: 内置计算预设
//! - `settings`: 分层设置合并
//! - `pseudo`: 赝势匹配
//! - `format`: tag 值格式化
//! - `cards`: namelist 与 card 文本生成
//! - `writer`: 写出输入文件
//! - `generator`: `DftInputGenerator` 约定与 `PwxInputGenerator`
//!
//! ## 依赖关系
//! - 被 `commands/pwx.rs` 使用
//! - 使用 `models/`, `data/`, `utils/output.rs`

pub mod cards;
pub mod format;
pub mod generator;
pub mod presets;
pub mod pseudo;
pub mod schema;
pub mod settings;
pub mod writer;

pub use generator::PwxInputGenerator;
pub use settings::Settings;
