//! # pw.x 计算预设
//!
//! 每个预设是一组默认计算设置：启用哪些 namelist/card、k 点策略以及常用 tag 的默认值。
//!
//! ## 预设
//! - `scf`: 单点自洽计算
//! - `relax`: 固定晶胞的离子弛豫（增加 `ions`）
//! - `vc-relax`: 可变晶胞弛豫（增加 `ions` 和 `cell`）
//!
//! ## 依赖关系
//! - 被 `qe/settings.rs` 使用
//! - 纯静态数据，使用 `serde_json`

use super::settings::Settings;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// 可用预设名称（命令行 `--calculation-presets` 的可选值）
pub const PRESET_NAMES: &[&str] = &["scf", "relax", "vc-relax"];

/// 预设名称 -> 设置
///
/// 只读表；合并前调用方必须复制一份（见 [`preset`]）。
pub static QE_PRESETS: LazyLock<BTreeMap<&'static str, Settings>> = LazyLock::new(|| {
    let mut presets = BTreeMap::new();

    presets.insert(
        "scf",
        as_settings(json!({
            "namelists": ["control", "system", "electrons"],
            "cards": ["atomic_species", "atomic_positions", "kpoints", "cell_parameters"],
            "calculation": "scf",
            "pseudo_dir": "~/pseudos/qe/default",
            "tprnfor": true,
            "tstress": true,
            "ibrav": 0,
            "ecutwfc": 45,
            "ecutrho": 360,
            "occupations": "smearing",
            "smearing": "gaussian",
            "degauss": 0.005,
            "conv_thr": 1e-8,
            "mixing_beta": 0.3,
            "kpoints": {
                "scheme": "automatic",
                "shift": [0, 0, 0],
                "spacing": 0.16
            }
        })),
    );

    presets.insert(
        "relax",
        as_settings(json!({
            "namelists": ["control", "system", "electrons", "ions"],
            "cards": ["atomic_species", "atomic_positions", "kpoints", "cell_parameters"],
            "calculation": "relax",
            "pseudo_dir": "~/pseudos/qe/default",
            "tprnfor": true,
            "tstress": true,
            "forc_conv_thr": 1e-3,
            "ibrav": 0,
            "ecutwfc": 45,
            "ecutrho": 360,
            "occupations": "smearing",
            "smearing": "gaussian",
            "degauss": 0.005,
            "conv_thr": 1e-8,
            "mixing_beta": 0.3,
            "ion_dynamics": "bfgs",
            "kpoints": {
                "scheme": "automatic",
                "shift": [0, 0, 0],
                "spacing": 0.16
            }
        })),
    );

    presets.insert(
        "vc-relax",
        as_settings(json!({
            "namelists": ["control", "system", "electrons", "ions", "cell"],
            "cards": ["atomic_species", "atomic_positions", "kpoints", "cell_parameters"],
            "calculation": "vc-relax",
            "pseudo_dir": "~/pseudos/qe/default",
            "tprnfor": true,
            "tstress": true,
            "forc_conv_thr": 1e-3,
            "ibrav": 0,
            "ecutwfc": 45,
            "ecutrho": 360,
            "occupations": "smearing",
            "smearing": "gaussian",
            "degauss": 0.005,
            "conv_thr": 1e-8,
            "mixing_beta": 0.3,
            "ion_dynamics": "bfgs",
            "cell_dynamics": "bfgs",
            "press_conv_thr": 0.5,
            "kpoints": {
                "scheme": "automatic",
                "shift": [0, 0, 0],
                "spacing": 0.16
            }
        })),
    );

    presets
});

fn as_settings(value: Value) -> Settings {
    match value {
        Value::Object(map) => map,
        _ => Settings::new(),
    }
}

/// 返回预设设置的副本（名称不区分大小写）
pub fn preset(name: &str) -> Option<Settings> {
    QE_PRESETS.get(name.to_lowercase().as_str()).cloned()
}
