//! # 计算设置合并
//!
//! 按固定优先级（低 -> 高）依次覆盖：
//! 预设 -> 运行环境默认值 -> 自定义设置文件 -> 自定义设置字典 -> 由结构决定的参数 (`nat`, `ntyp`)。
//!
//! 运行环境默认值来自命令行 `--pseudo-dir` 或 `ESPRESSO_PSEUDO`，只替换预设中的值，
//! 设置文件与设置字典中显式给出的同名 tag 仍然优先。
//!
//! 每次合并都从空表开始，预设表只被复制、从不被修改。
//!
//! ## 依赖关系
//! - 被 `qe/generator.rs`, `cli/pwx.rs` 使用
//! - 使用 `qe/presets.rs`, `models/structure.rs`
//! - 使用 `serde_json` 作为设置的值类型

use super::presets;
use crate::error::{DftgenError, Result};
use crate::models::Crystal;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// tag -> 值 的平铺设置表
pub type Settings = Map<String, Value>;

/// 合并所有设置层
pub fn resolve_settings(
    preset_name: Option<&str>,
    defaults: &Settings,
    settings_file: Option<&Path>,
    settings_dict: &Settings,
    crystal: Option<&Crystal>,
) -> Result<Settings> {
    let mut calc_sett = Settings::new();

    if let Some(name) = preset_name {
        let preset =
            presets::preset(name).ok_or_else(|| DftgenError::UnknownPreset(name.to_string()))?;
        calc_sett.extend(preset);
    }

    calc_sett.extend(defaults.clone());

    if let Some(path) = settings_file {
        calc_sett.extend(load_settings_file(path)?);
    }

    calc_sett.extend(settings_dict.clone());

    if let Some(crystal) = crystal {
        calc_sett.extend(parameters_from_structure(crystal));
    }

    Ok(calc_sett)
}

/// 由结构决定的参数：原子数与物种数
pub fn parameters_from_structure(crystal: &Crystal) -> Settings {
    let mut params = Settings::new();
    params.insert("nat".to_string(), Value::from(crystal.num_atoms()));
    params.insert("ntyp".to_string(), Value::from(crystal.num_species()));
    params
}

/// 读取 JSON 格式的自定义设置文件（顶层必须是对象）
pub fn load_settings_file(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path).map_err(|e| DftgenError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_settings(&content).map_err(|reason| DftgenError::MalformedSettings {
        path: path.display().to_string(),
        reason,
    })
}

/// 解析 JSON 字符串为设置表
pub fn parse_settings(content: &str) -> std::result::Result<Settings, String> {
    match serde_json::from_str::<Value>(content) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(format!(
            "expected a mapping of tags to values, found {}",
            json_kind(&other)
        )),
        Err(e) => Err(e.to_string()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Atom, Lattice};
    use serde_json::json;

    fn feo() -> Crystal {
        let lattice =
            Lattice::from_vectors([[4.6, 0.0, 0.0], [0.0, 4.6, 0.0], [0.0, 0.0, 4.6]]);
        Crystal::new(
            "FeO",
            lattice,
            vec![
                Atom::new("Fe", [0.0, 0.0, 0.0]),
                Atom::new("O", [0.5, 0.0, 0.0]),
                Atom::new("Fe", [0.5, 0.5, 0.5]),
                Atom::new("O", [0.0, 0.5, 0.5]),
            ],
        )
    }

    fn obj(value: Value) -> Settings {
        value.as_object().cloned().unwrap()
    }

    fn empty() -> Settings {
        Settings::new()
    }

    #[test]
    fn test_parameters_from_structure() {
        assert_eq!(
            Value::Object(parameters_from_structure(&feo())),
            json!({"nat": 4, "ntyp": 2})
        );
    }

    #[test]
    fn test_merge_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("custom.json");
        fs::write(&file, r#"{"calculation": "relax", "ecutwfc": 60, "tag_1": "FROM_FILE"}"#)
            .unwrap();
        let dict = obj(json!({"ecutwfc": 80, "tag_2": "FROM_DICT", "nat": 100}));

        let cs = resolve_settings(Some("scf"), &empty(), Some(&file), &dict, Some(&feo())).unwrap();

        // preset
        assert_eq!(cs["mixing_beta"], json!(0.3));
        // file over preset
        assert_eq!(cs["calculation"], "relax");
        assert_eq!(cs["tag_1"], "FROM_FILE");
        // dict over file
        assert_eq!(cs["ecutwfc"], json!(80));
        assert_eq!(cs["tag_2"], "FROM_DICT");
        // structure over everything
        assert_eq!(cs["nat"], json!(4));
        assert_eq!(cs["ntyp"], json!(2));
    }

    #[test]
    fn test_defaults_sit_between_preset_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let defaults = obj(json!({"pseudo_dir": "/from/env", "outdir": "/scratch"}));

        let cs = resolve_settings(Some("scf"), &defaults, None, &empty(), None).unwrap();
        assert_eq!(cs["pseudo_dir"], "/from/env");

        let file = dir.path().join("custom.json");
        fs::write(&file, r#"{"pseudo_dir": "/from/file"}"#).unwrap();
        let cs =
            resolve_settings(Some("scf"), &defaults, Some(&file), &empty(), None).unwrap();
        assert_eq!(cs["pseudo_dir"], "/from/file");
        assert_eq!(cs["outdir"], "/scratch");

        let dict = obj(json!({"pseudo_dir": "/from/dict"}));
        let cs = resolve_settings(Some("scf"), &defaults, None, &dict, None).unwrap();
        assert_eq!(cs["pseudo_dir"], "/from/dict");
    }

    #[test]
    fn test_bare_settings_only_structure() {
        let cs = resolve_settings(None, &empty(), None, &empty(), Some(&feo())).unwrap();
        assert_eq!(Value::Object(cs), json!({"nat": 4, "ntyp": 2}));

        let cs = resolve_settings(None, &empty(), None, &empty(), None).unwrap();
        assert!(cs.is_empty());
    }

    #[test]
    fn test_resolution_follows_structure_changes() {
        let mut crystal = feo();
        let resolve = |c: &Crystal| resolve_settings(Some("scf"), &empty(), None, &empty(), Some(c));
        let first = resolve(&crystal).unwrap();
        let again = resolve(&crystal).unwrap();
        assert_eq!(first, again);

        crystal.atoms.push(Atom::new("Ni", [0.25, 0.25, 0.25]));
        let updated = resolve(&crystal).unwrap();
        assert_eq!(updated["nat"], json!(5));
        assert_eq!(updated["ntyp"], json!(3));
        assert!(!presets::QE_PRESETS["scf"].contains_key("nat"));
    }

    #[test]
    fn test_unknown_preset() {
        let err = resolve_settings(Some("md"), &empty(), None, &empty(), None).unwrap_err();
        assert!(matches!(err, DftgenError::UnknownPreset(ref name) if name == "md"));
    }

    #[test]
    fn test_settings_file_errors() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.json");
        assert!(matches!(
            load_settings_file(&missing),
            Err(DftgenError::FileReadError { .. })
        ));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{\"ecutwfc\": ").unwrap();
        assert!(matches!(
            load_settings_file(&broken),
            Err(DftgenError::MalformedSettings { .. })
        ));

        let list = dir.path().join("list.json");
        fs::write(&list, "[1, 2, 3]").unwrap();
        let err = load_settings_file(&list).unwrap_err();
        assert!(err.to_string().contains("found a list"));
    }
}
