//! # pw.x 子命令 CLI 定义
//!
//! 从结构文件生成 pw.x 输入文件
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/pwx.rs`

use crate::qe::presets::PRESET_NAMES;
use crate::qe::settings::{parse_settings, Settings};
use clap::builder::PossibleValuesParser;
use clap::Args;
use std::path::PathBuf;

/// pw.x 子命令参数
#[derive(Args, Debug)]
pub struct PwxArgs {
    /// Structure file (POSCAR, CONTCAR, *.vasp)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Calculation preset
    #[arg(short = 'p', long, value_parser = PossibleValuesParser::new(PRESET_NAMES.iter().copied()))]
    pub calculation_presets: Option<String>,

    /// JSON file with settings overriding the preset
    #[arg(short = 'f', long)]
    pub custom_settings_file: Option<PathBuf>,

    /// JSON object with settings overriding the preset and the settings file
    #[arg(short = 'd', long, value_parser = parse_settings)]
    pub custom_settings_dict: Option<Settings>,

    /// Directory containing pseudopotential files
    #[arg(long, env = "ESPRESSO_PSEUDO")]
    pub pseudo_dir: Option<PathBuf>,

    /// Fail unless every species gets a pseudopotential
    #[arg(short, long, default_value_t = false)]
    pub specify_potentials: bool,

    /// Directory to write the input file into [default: current directory]
    #[arg(short = 'l', long)]
    pub write_location: Option<PathBuf>,

    /// Name of the input file [default: <preset>.in or pwx.in]
    #[arg(short = 'o', long)]
    pub pwx_input_file: Option<String>,

    /// Do not overwrite an existing input file
    #[arg(long, default_value_t = false)]
    pub keep_existing: bool,

    /// Print the input to stdout instead of writing it
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}
