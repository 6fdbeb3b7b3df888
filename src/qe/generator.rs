//! # DFT 输入文件生成器
//!
//! `DftInputGenerator` 约定了每个 DFT 代码的生成器需要提供的能力；
//! `PwxInputGenerator` 为 pw.x 实现该约定。
//!
//! ## 生成流程
//! 1. 合并设置（预设 -> 设置文件 -> 设置字典 -> 结构参数）
//! 2. 只有启用了 `control` namelist 或 `atomic_species` card 时才解析赝势，
//!    结果写入本次合并得到的设置副本，生成器本身不被修改
//! 3. 按 namelist、card 顺序生成文本
//! 4. 写入文件
//!
//! ## 依赖关系
//! - 被 `commands/pwx.rs` 使用
//! - 使用 `qe/settings.rs`, `qe/pseudo.rs`, `qe/cards.rs`, `qe/writer.rs`

use super::cards;
use super::pseudo;
use super::schema::Card;
use super::settings::{self, Settings};
use super::writer;
use crate::error::Result;
use crate::models::Crystal;
use std::path::{Path, PathBuf};

/// DFT 输入文件生成器
pub trait DftInputGenerator {
    /// DFT 代码名称
    fn dft_package(&self) -> &'static str;

    /// 合并后的计算设置
    fn calculation_settings(&self) -> Result<Settings>;

    /// 写出所有输入文件，返回写入的路径
    fn write_input_files(&self) -> Result<Vec<PathBuf>>;
}

/// pw.x 输入文件生成器
#[derive(Debug, Clone)]
pub struct PwxInputGenerator {
    crystal: Crystal,

    /// 预设名称 (scf / relax / vc-relax)
    pub calculation_presets: Option<String>,

    /// 运行环境给出的默认值（如 `--pseudo-dir`），只覆盖预设
    pub default_sett_dict: Settings,

    /// JSON 自定义设置文件，覆盖预设与默认值
    pub custom_sett_file: Option<PathBuf>,

    /// 自定义设置，覆盖预设与设置文件
    pub custom_sett_dict: Settings,

    /// 是否必须为每个物种找到赝势
    pub specify_potentials: bool,

    /// 输出目录（默认为当前工作目录）
    pub write_location: Option<PathBuf>,

    /// 输出文件名（默认为 `<preset>.in` 或 `pwx.in`）
    pub pwx_input_file: Option<String>,
}

impl PwxInputGenerator {
    pub fn new(crystal: Crystal) -> Self {
        PwxInputGenerator {
            crystal,
            calculation_presets: None,
            default_sett_dict: Settings::new(),
            custom_sett_file: None,
            custom_sett_dict: Settings::new(),
            specify_potentials: false,
            write_location: None,
            pwx_input_file: None,
        }
    }

    pub fn with_presets(mut self, name: impl Into<String>) -> Self {
        self.calculation_presets = Some(name.into());
        self
    }

    pub fn with_defaults(mut self, defaults: Settings) -> Self {
        self.default_sett_dict = defaults;
        self
    }

    pub fn with_settings_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.custom_sett_file = Some(path.into());
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.custom_sett_dict = settings;
        self
    }

    pub fn with_specify_potentials(mut self, specify: bool) -> Self {
        self.specify_potentials = specify;
        self
    }

    pub fn crystal(&self) -> &Crystal {
        &self.crystal
    }

    fn needs_pseudopotentials(cs: &Settings) -> Result<bool> {
        Ok(cards::active_names(cs, "namelists")?.contains(&"control")
            || cards::active_names(cs, "cards")?.contains(&Card::AtomicSpecies.name()))
    }

    /// 合并设置，并在需要时解析赝势
    pub fn resolved_settings(&self) -> Result<Settings> {
        let mut cs = self.calculation_settings()?;
        if Self::needs_pseudopotentials(&cs)? {
            pseudo::set_pseudopotentials(&mut cs, &self.crystal, self.specify_potentials)?;
        }
        Ok(cs)
    }

    /// 完整的 pw.x 输入文本
    pub fn pwx_input_as_str(&self) -> Result<String> {
        cards::pwx_input_as_str(&self.resolved_settings()?, &self.crystal)
    }

    pub fn default_input_filename(&self) -> String {
        match &self.calculation_presets {
            Some(preset) => format!("{}.in", preset.to_lowercase()),
            None => "pwx.in".to_string(),
        }
    }

    /// 输入文件的目标路径（目录缺省为当前工作目录）
    pub fn input_file_path(&self) -> Option<PathBuf> {
        let location = self
            .write_location
            .clone()
            .or_else(|| std::env::current_dir().ok())?;
        let filename = self
            .pwx_input_file
            .clone()
            .unwrap_or_else(|| self.default_input_filename());
        Some(location.join(filename))
    }

    /// 写出 pw.x 输入文件
    pub fn write_pwx_input(
        &self,
        write_location: Option<&Path>,
        filename: Option<&str>,
    ) -> Result<PathBuf> {
        let text = self.pwx_input_as_str()?;
        writer::write_input_file(&text, write_location, filename)
    }
}

/// 单独生成某个 namelist/card，便于逐块检查输出
#[cfg(test)]
impl PwxInputGenerator {
    /// 替换结构；之后的设置合并会反映新的 `nat`/`ntyp`
    pub fn set_crystal(&mut self, crystal: Crystal) {
        self.crystal = crystal;
    }

    pub fn parameters_from_structure(&self) -> Settings {
        settings::parameters_from_structure(&self.crystal)
    }

    /// 生成单个 namelist；`control` 包含 `pseudo_dir`，因此会先解析赝势
    pub fn namelist_to_str(&self, namelist: &str) -> Result<String> {
        let mut cs = self.calculation_settings()?;
        if namelist.eq_ignore_ascii_case("control") {
            pseudo::set_pseudopotentials(&mut cs, &self.crystal, self.specify_potentials)?;
        }
        cards::namelist_to_str(namelist, &cs)
    }

    pub fn all_namelists_as_str(&self) -> Result<String> {
        cards::all_namelists_as_str(&self.resolved_settings()?)
    }

    /// 生成单个 card；`atomic_species` 会先解析赝势
    pub fn card_to_str(&self, card: Card) -> Result<String> {
        let mut cs = self.calculation_settings()?;
        if card == Card::AtomicSpecies {
            pseudo::set_pseudopotentials(&mut cs, &self.crystal, self.specify_potentials)?;
        }
        cards::render_card(card, &cs, &self.crystal)
    }

    pub fn all_cards_as_str(&self) -> Result<String> {
        cards::all_cards_as_str(&self.resolved_settings()?, &self.crystal)
    }
}

impl DftInputGenerator for PwxInputGenerator {
    fn dft_package(&self) -> &'static str {
        "qe"
    }

    fn calculation_settings(&self) -> Result<Settings> {
        settings::resolve_settings(
            self.calculation_presets.as_deref(),
            &self.default_sett_dict,
            self.custom_sett_file.as_deref(),
            &self.custom_sett_dict,
            Some(&self.crystal),
        )
    }

    fn write_input_files(&self) -> Result<Vec<PathBuf>> {
        let location = self
            .write_location
            .clone()
            .or_else(|| std::env::current_dir().ok());
        let filename = self
            .pwx_input_file
            .clone()
            .unwrap_or_else(|| self.default_input_filename());
        let path = self.write_pwx_input(location.as_deref(), Some(filename.as_str()))?;
        Ok(vec![path])
    }
}
