//! # pw.x namelist 与 card 生成
//!
//! 按 `qe/schema.rs` 中的顺序生成文本，只输出设置中 `namelists` / `cards` 列出的部分。
//!
//! ## 输出格式
//! ```text
//! &CONTROL
//!     calculation = "scf"
//! /
//! ATOMIC_SPECIES
//! Fe     55.84500000  fe_pbe_v1.5.uspp.F.UPF
//! ATOMIC_POSITIONS {crystal}
//! Fe      0.00000000    0.00000000    0.00000000
//! K_POINTS {automatic}
//! 7 7 7 0 0 0
//! CELL_PARAMETERS {angstrom}
//!   4.60000000    0.00000000    0.00000000
//! ```
//!
//! 本模块只读设置，不解析赝势；ATOMIC_SPECIES 使用设置中已有的 `psp_names`。
//!
//! ## 依赖关系
//! - 被 `qe/generator.rs` 使用
//! - 使用 `qe/schema.rs`, `qe/format.rs`, `data/elements.rs`, `models/structure.rs`

use super::format::qe_val_formatter;
use super::schema::{self, Card, PW_CARDS, PW_NAMELISTS};
use super::settings::Settings;
use crate::data::elements::{atomic_weight, get_elem_symbol};
use crate::error::{DftgenError, Result};
use crate::models::structure::norm;
use crate::models::Crystal;
use serde::Deserialize;
use serde_json::Value;

/// `kpoints` 设置
#[derive(Debug, Default, Deserialize)]
struct KPointsSettings {
    scheme: Option<String>,
    grid: Option<Vec<i64>>,
    shift: Option<Vec<i64>>,
    spacing: Option<f64>,
}

/// 设置中启用的 namelist/card 名称（`key` 为 "namelists" 或 "cards"）
pub fn active_names<'a>(settings: &'a Settings, key: &str) -> Result<Vec<&'a str>> {
    match settings.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str().ok_or_else(|| {
                    DftgenError::Configuration(format!("'{}' must be a list of names", key))
                })
            })
            .collect(),
        Some(_) => Err(DftgenError::Configuration(format!(
            "'{}' must be a list of names",
            key
        ))),
    }
}

/// 生成单个 namelist；设置中没有的 tag 直接跳过
pub fn namelist_to_str(namelist: &str, settings: &Settings) -> Result<String> {
    let tags = schema::namelist_tags(&namelist.to_lowercase()).ok_or_else(|| {
        DftgenError::UnsupportedFeature(format!("Unknown pw.x namelist '{}'", namelist))
    })?;

    let mut lines = vec![format!("&{}", namelist.to_uppercase())];
    for tag in tags {
        if let Some(val) = settings.get(*tag) {
            lines.push(format!("    {} = {}", tag, qe_val_formatter(val)));
        }
    }
    lines.push("/".to_string());
    Ok(lines.join("\n"))
}

/// 按固定顺序生成所有启用的 namelist
pub fn all_namelists_as_str(settings: &Settings) -> Result<String> {
    let active = active_names(settings, "namelists")?;
    let mut blocks = Vec::new();
    for namelist in PW_NAMELISTS {
        if active.contains(&namelist.name) {
            blocks.push(namelist_to_str(namelist.name, settings)?);
        }
    }
    Ok(blocks.join("\n"))
}

/// ATOMIC_SPECIES：按字母顺序列出物种、原子量与赝势文件名
pub fn atomic_species_card(settings: &Settings, crystal: &Crystal) -> Result<String> {
    let psp_names = settings.get("psp_names").and_then(Value::as_object);

    let mut lines = vec!["ATOMIC_SPECIES".to_string()];
    for sp in crystal.species() {
        let symbol = get_elem_symbol(sp)?;
        let weight = atomic_weight(symbol).ok_or_else(|| DftgenError::ElementLookup {
            label: sp.to_string(),
        })?;
        let psp = psp_names
            .and_then(|names| names.get(sp))
            .and_then(Value::as_str)
            .unwrap_or("None");
        lines.push(format!("{:<4}  {:12.8}  {}", sp, weight, psp));
    }
    Ok(lines.join("\n"))
}

/// ATOMIC_POSITIONS：按结构中的原子顺序输出分数坐标
pub fn atomic_positions_card(crystal: &Crystal) -> String {
    let mut lines = vec!["ATOMIC_POSITIONS {crystal}".to_string()];
    for atom in &crystal.atoms {
        let [x, y, z] = atom.position;
        lines.push(format!(
            "{:<4}  {:12.8}  {:12.8}  {:12.8}",
            atom.element, x, y, z
        ));
    }
    lines.join("\n")
}

/// 由 k 点间距计算均匀网格：ceil(|b_i| / spacing)
///
/// `spacing` 是倒空间中相邻 k 点的最大距离 (1/Å)，倒格子取 2π·inv(cell)ᵀ。
pub fn get_kpoint_grid_from_spacing(crystal: &Crystal, spacing: f64) -> Result<[i64; 3]> {
    if spacing.is_nan() || spacing <= 0.0 {
        return Err(DftgenError::Configuration(format!(
            "K-point spacing must be positive, found {}",
            spacing
        )));
    }
    let rcell = crystal.lattice.reciprocal().ok_or_else(|| {
        DftgenError::Configuration("Lattice vectors are linearly dependent".to_string())
    })?;
    Ok(rcell.map(|b| (norm(b) / spacing).ceil() as i64))
}

fn three_ints(values: Vec<i64>, what: &str) -> Result<[i64; 3]> {
    <[i64; 3]>::try_from(values).map_err(|v| {
        DftgenError::Configuration(format!(
            "K-point {} must have 3 integers, found {}",
            what,
            v.len()
        ))
    })
}

/// K_POINTS：支持 `gamma` 与 `automatic`（显式网格或由间距计算）
///
/// 方案名区分大小写，其他写法（如 `GAMMA`）按不支持处理。
pub fn kpoints_card(settings: &Settings, crystal: &Crystal) -> Result<String> {
    let kpoints: KPointsSettings = match settings.get("kpoints") {
        None | Some(Value::Null) => KPointsSettings::default(),
        Some(value) => serde_json::from_value(value.clone()).map_err(|e| {
            DftgenError::Configuration(format!("Invalid 'kpoints' settings: {}", e))
        })?,
    };

    let scheme = kpoints
        .scheme
        .as_deref()
        .ok_or_else(|| DftgenError::Configuration("K-point scheme not specified".to_string()))?;

    match scheme {
        "gamma" => Ok("K_POINTS {gamma}".to_string()),
        "automatic" => {
            let shift = kpoints.shift.ok_or_else(|| {
                DftgenError::Configuration("K-point shift not specified".to_string())
            })?;
            let shift = three_ints(shift, "shift")?;

            let grid = match kpoints.grid {
                Some(grid) if !grid.is_empty() => three_ints(grid, "grid")?,
                _ => {
                    let spacing = kpoints.spacing.ok_or_else(|| {
                        DftgenError::Configuration(
                            "Neither a k-point grid nor a k-point spacing specified".to_string(),
                        )
                    })?;
                    get_kpoint_grid_from_spacing(crystal, spacing)?
                }
            };

            Ok(format!(
                "K_POINTS {{automatic}}\n{} {} {} {} {} {}",
                grid[0], grid[1], grid[2], shift[0], shift[1], shift[2]
            ))
        }
        other => Err(DftgenError::UnsupportedFeature(format!(
            "K-point scheme '{}'",
            other
        ))),
    }
}

/// CELL_PARAMETERS：晶格向量 (Å)
pub fn cell_parameters_card(crystal: &Crystal) -> String {
    let mut lines = vec!["CELL_PARAMETERS {angstrom}".to_string()];
    for [x, y, z] in crystal.lattice.matrix {
        lines.push(format!("{:12.8}  {:12.8}  {:12.8}", x, y, z));
    }
    lines.join("\n")
}

/// 生成单个 card
pub fn render_card(card: Card, settings: &Settings, crystal: &Crystal) -> Result<String> {
    match card {
        Card::AtomicSpecies => atomic_species_card(settings, crystal),
        Card::AtomicPositions => Ok(atomic_positions_card(crystal)),
        Card::KPoints => kpoints_card(settings, crystal),
        Card::CellParameters => Ok(cell_parameters_card(crystal)),
        Card::Occupations | Card::Constraints | Card::AtomicForces => Err(
            DftgenError::UnsupportedFeature(format!("{} card", card.name().to_uppercase())),
        ),
    }
}

/// 按固定顺序生成所有启用的 card
pub fn all_cards_as_str(settings: &Settings, crystal: &Crystal) -> Result<String> {
    let active = active_names(settings, "cards")?;
    let mut blocks = Vec::new();
    for card in PW_CARDS {
        if active.contains(&card.name()) {
            blocks.push(render_card(*card, settings, crystal)?);
        }
    }
    Ok(blocks.join("\n"))
}

/// 完整的 pw.x 输入文本：namelist 区在前，card 区在后
pub fn pwx_input_as_str(settings: &Settings, crystal: &Crystal) -> Result<String> {
    Ok([
        all_namelists_as_str(settings)?,
        all_cards_as_str(settings, crystal)?,
    ]
    .join("\n"))
}
