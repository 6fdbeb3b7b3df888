//! # 赝势匹配
//!
//! 为结构中的每个物种选择一个赝势文件。
//!
//! ## 匹配规则
//! 1. 设置中 `psp_names` 显式给出的文件名优先
//! 2. 其余物种在赝势目录中按文件名前缀匹配：文件名截断到第一个 `.`，
//!    再截断到第一个 `_`，剩余部分与元素符号不区分大小写相等，且扩展名为 `.upf`
//! 3. 多个文件匹配时取目录列表中的第一个（不做"最佳"匹配）
//!
//! `required = true` 时，目录缺失/无法列出或有物种未匹配都会报错；
//! 否则未匹配的物种记为 `None`，在 ATOMIC_SPECIES 中输出 "None"。
//!
//! ## 依赖关系
//! - 被 `qe/generator.rs` 使用
//! - 使用 `data/elements.rs`, `qe/settings.rs`, `utils/output.rs`

use super::settings::Settings;
use crate::data::elements::get_elem_symbol;
use crate::error::{DftgenError, Result};
use crate::models::Crystal;
use crate::utils::output;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// 物种 -> 赝势文件名（未匹配为 `None`）
pub type PseudoAssignment = BTreeMap<String, Option<String>>;

/// 从赝势文件名推断元素（小写），例如 "fe_pbe_v1.5.uspp.F.UPF" -> "fe"
fn elem_from_fname(fname: &str) -> String {
    let stem = fname.split('.').next().unwrap_or_default();
    let prefix = stem.split('_').next().unwrap_or_default();
    prefix.to_lowercase()
}

fn is_upf(fname: &str) -> bool {
    Path::new(fname)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("upf"))
}

/// 列出赝势目录中的文件名（保持目录列表顺序）
fn list_pseudo_dir(pseudo_dir: &Path) -> std::io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(pseudo_dir)? {
        let entry = entry?;
        if entry.path().is_dir() {
            continue;
        }
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}

fn first_match<'a>(species: &str, candidates: &'a [String]) -> Result<Option<&'a String>> {
    let elem_low = get_elem_symbol(species)?.to_lowercase();
    Ok(candidates
        .iter()
        .find(|name| is_upf(name) && elem_from_fname(name) == elem_low))
}

/// 为一组物种分配赝势
pub fn resolve_pseudopotentials<'s>(
    species: impl IntoIterator<Item = &'s str>,
    pseudo_dir: Option<&Path>,
    explicit: &BTreeMap<String, String>,
    required: bool,
) -> Result<PseudoAssignment> {
    let mut assignment: PseudoAssignment = species
        .into_iter()
        .map(|sp| (sp.to_string(), explicit.get(sp).cloned()))
        .collect();

    if assignment.values().any(Option::is_none) {
        match pseudo_dir {
            None if required => {
                return Err(DftgenError::Configuration(
                    "Pseudopotentials directory not specified".to_string(),
                ));
            }
            None => {}
            Some(dir) => match list_pseudo_dir(dir) {
                Ok(candidates) => {
                    for (sp, psp) in assignment.iter_mut().filter(|(_, p)| p.is_none()) {
                        *psp = first_match(sp, &candidates)?.cloned();
                    }
                }
                Err(e) if required => {
                    return Err(DftgenError::PseudoDirectory {
                        path: dir.display().to_string(),
                        source: e,
                    });
                }
                Err(_) => {}
            },
        }
    }

    if required {
        let missing: Vec<&str> = assignment
            .iter()
            .filter(|(_, p)| p.is_none())
            .map(|(sp, _)| sp.as_str())
            .collect();
        if !missing.is_empty() {
            return Err(DftgenError::PseudopotentialAssignment {
                missing: missing.join(", "),
            });
        }
    }

    Ok(assignment)
}

/// 将开头的 `~` 展开为 `$HOME`
pub fn expand_user(path: &str) -> PathBuf {
    if path == "~" || path.starts_with("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(path.trim_start_matches('~').trim_start_matches('/'));
        }
    }
    PathBuf::from(path)
}

/// 从设置中确定赝势目录
///
/// 优先使用 `pseudo_dir`；否则由 `pseudo_repo_dir`/`pseudo_set` 拼接。
pub fn get_pseudo_dir(settings: &Settings) -> Option<String> {
    if let Some(dir) = settings.get("pseudo_dir").and_then(Value::as_str) {
        return Some(dir.to_string());
    }
    let repo = settings.get("pseudo_repo_dir").and_then(Value::as_str)?;
    let set = settings.get("pseudo_set").and_then(Value::as_str)?;
    Some(expand_user(repo).join(set).display().to_string())
}

/// 读取 `psp_names` 中显式给出的赝势（值为 null 的物种视为未给出）
pub fn explicit_pseudo_names(settings: &Settings) -> Result<BTreeMap<String, String>> {
    let Some(value) = settings.get("psp_names") else {
        return Ok(BTreeMap::new());
    };
    let map = value.as_object().ok_or_else(|| {
        DftgenError::Configuration("'psp_names' must map species to file names".to_string())
    })?;

    let mut names = BTreeMap::new();
    for (sp, psp) in map {
        match psp {
            Value::String(name) => {
                names.insert(sp.clone(), name.clone());
            }
            Value::Null => {}
            _ => {
                return Err(DftgenError::Configuration(format!(
                    "Pseudopotential for '{}' must be a file name",
                    sp
                )))
            }
        }
    }
    Ok(names)
}

/// 按设置为结构中的物种分配赝势，不修改设置、不输出提示
pub fn assign_pseudopotentials(
    settings: &Settings,
    crystal: &Crystal,
    required: bool,
) -> Result<PseudoAssignment> {
    let listing_dir = get_pseudo_dir(settings).map(|dir| expand_user(&dir));
    let explicit = explicit_pseudo_names(settings)?;
    resolve_pseudopotentials(crystal.species(), listing_dir.as_deref(), &explicit, required)
}

/// 解析赝势并写回设置：`psp_names`（物种 -> 文件名或 null），以及推导出的 `pseudo_dir`
pub fn set_pseudopotentials(
    settings: &mut Settings,
    crystal: &Crystal,
    required: bool,
) -> Result<()> {
    let assignment = assign_pseudopotentials(settings, crystal, required)?;

    let psp_names = assignment
        .into_iter()
        .map(|(sp, psp)| (sp, psp.map_or(Value::Null, Value::String)))
        .collect::<Settings>();
    settings.insert("psp_names".to_string(), Value::Object(psp_names));
    output::print_info("Pseudopotentials set for all elemental species");

    if let Some(dir) = get_pseudo_dir(settings) {
        if !settings.contains_key("pseudo_dir") {
            settings.insert("pseudo_dir".to_string(), Value::String(dir.clone()));
        }
        output::print_info(&format!("Pseudopotentials directory set to {}", dir));
    }

    Ok(())
}
