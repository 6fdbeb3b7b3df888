//! # pw.x 命令实现
//!
//! 读取结构文件，合并设置并生成 pw.x 输入文件。
//!
//! ## 功能
//! - 读取 POSCAR / CONTCAR / *.vasp
//! - `--pseudo-dir` 作为默认值，只覆盖预设，设置文件与设置字典中的 `pseudo_dir` 优先
//! - `--dry-run` 只把输入文本写到 stdout，其余提示改走 stderr
//! - `--keep-existing` 时跳过已存在的输入文件
//! - 输出物种汇总表
//!
//! ## 依赖关系
//! - 使用 `cli/pwx.rs` 定义的参数
//! - 使用 `parsers/`, `qe/`
//! - 使用 `utils/output.rs`

use crate::cli::pwx::PwxArgs;
use crate::data::elements::{atomic_weight, get_elem_symbol};
use crate::error::{DftgenError, Result};
use crate::models::Crystal;
use crate::parsers;
use crate::qe::generator::DftInputGenerator;
use crate::qe::pseudo::{self, PseudoAssignment};
use crate::qe::{PwxInputGenerator, Settings};
use crate::utils::output;

use serde_json::Value;
use std::io::{self, Write};
use tabled::{Table, Tabled};

/// 物种汇总表的一行
#[derive(Debug, Clone, Tabled)]
struct SpeciesRow {
    #[tabled(rename = "Species")]
    species: String,
    #[tabled(rename = "Atoms")]
    count: usize,
    #[tabled(rename = "Weight (u)")]
    weight: String,
    #[tabled(rename = "Pseudopotential")]
    pseudopotential: String,
}

/// 执行 pw.x 命令
pub fn execute(args: PwxArgs) -> Result<()> {
    execute_to(args, &mut io::stdout())
}

/// 执行 pw.x 命令；`--dry-run` 的输入文本写到 `out`
fn execute_to(args: PwxArgs, out: &mut impl Write) -> Result<()> {
    output::notices_to_stderr(args.dry_run);
    output::print_header("Generating pw.x input");

    let crystal = parsers::read_structure(&args.input)?;
    output::print_info(&format!(
        "Read {} from '{}' ({} atoms, {} species)",
        crystal.formula(),
        args.input.display(),
        crystal.num_atoms(),
        crystal.num_species()
    ));

    // --pseudo-dir / ESPRESSO_PSEUDO 只替换预设值，设置文件与字典仍然优先
    let mut defaults = Settings::new();
    if let Some(dir) = &args.pseudo_dir {
        defaults.insert(
            "pseudo_dir".to_string(),
            Value::String(dir.display().to_string()),
        );
    }

    let mut pwig = PwxInputGenerator::new(crystal)
        .with_defaults(defaults)
        .with_settings(args.custom_settings_dict.unwrap_or_default())
        .with_specify_potentials(args.specify_potentials);
    if let Some(preset) = args.calculation_presets {
        pwig = pwig.with_presets(preset);
    }
    if let Some(path) = args.custom_settings_file {
        pwig = pwig.with_settings_file(path);
    }
    pwig.write_location = args.write_location;
    pwig.pwx_input_file = args.pwx_input_file;

    if args.dry_run {
        let text = pwig.pwx_input_as_str()?;
        writeln!(out, "{}", text).map_err(|e| DftgenError::FileWriteError {
            path: "<stdout>".to_string(),
            source: e,
        })?;
        return Ok(());
    }

    let target = pwig.input_file_path().ok_or(DftgenError::MissingLocation)?;
    if args.keep_existing && target.exists() {
        output::print_skip(&format!("'{}' already exists", target.display()));
        return Ok(());
    }

    let written = pwig.write_input_files()?;
    for path in &written {
        output::print_success(&format!("pw.x input written to '{}'", path.display()));
    }

    // 汇总表只用于展示，赝势无法确定时按未分配处理
    let cs = pwig.calculation_settings()?;
    let assignment =
        pseudo::assign_pseudopotentials(&cs, pwig.crystal(), false).unwrap_or_default();
    let rows = species_rows(&assignment, pwig.crystal());
    for row in rows.iter().filter(|r| r.pseudopotential == "None") {
        output::print_warning(&format!("No pseudopotential assigned to {}", row.species));
    }
    if !rows.is_empty() {
        output::print_table(&Table::new(&rows).to_string());
    }

    output::print_done(&format!(
        "Generated {} input for {} ({} file(s))",
        pwig.dft_package(),
        pwig.crystal().formula(),
        written.len()
    ));
    Ok(())
}

/// 按物种汇总原子数、原子量与赝势
fn species_rows(assignment: &PseudoAssignment, crystal: &Crystal) -> Vec<SpeciesRow> {
    let symbols = crystal.symbols();

    crystal
        .species()
        .into_iter()
        .map(|sp| {
            let weight = get_elem_symbol(sp)
                .ok()
                .and_then(atomic_weight)
                .map(|w| format!("{:.4}", w))
                .unwrap_or_else(|| "-".to_string());
            let pseudopotential = assignment
                .get(sp)
                .cloned()
                .flatten()
                .unwrap_or_else(|| "None".to_string());
            SpeciesRow {
                species: sp.to_string(),
                count: symbols.iter().filter(|s| **s == sp).count(),
                weight,
                pseudopotential,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Atom, Lattice};
    use serde_json::json;
    use std::fs;
    use std::path::{Path, PathBuf};

    const FEO_POSCAR: &str = "FeO
1.0
4.6 0.0 0.0
0.0 4.6 0.0
0.0 0.0 4.6
Fe O
2 2
Direct
0.0 0.0 0.0
0.5 0.5 0.5
0.5 0.0 0.0
0.0 0.5 0.5
";

    fn args(input: &Path) -> PwxArgs {
        PwxArgs {
            input: input.to_path_buf(),
            calculation_presets: Some("scf".to_string()),
            custom_settings_file: None,
            custom_settings_dict: None,
            pseudo_dir: None,
            specify_potentials: false,
            write_location: None,
            pwx_input_file: None,
            keep_existing: false,
            dry_run: false,
        }
    }

    fn workspace() -> (tempfile::TempDir, PathBuf, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let poscar = dir.path().join("POSCAR");
        fs::write(&poscar, FEO_POSCAR).unwrap();
        let pseudos = dir.path().join("pseudos");
        fs::create_dir(&pseudos).unwrap();
        for name in ["fe_pbe_v1.5.uspp.F.UPF", "o_pbe_v1.2.uspp.F.UPF"] {
            fs::write(pseudos.join(name), "").unwrap();
        }
        (dir, poscar, pseudos)
    }

    #[test]
    fn test_execute_writes_input() {
        let (dir, poscar, pseudos) = workspace();
        let mut a = args(&poscar);
        a.pseudo_dir = Some(pseudos.clone());
        a.specify_potentials = true;
        a.write_location = Some(dir.path().to_path_buf());
        execute(a).unwrap();

        let text = fs::read_to_string(dir.path().join("scf.in")).unwrap();
        assert!(text.starts_with("&CONTROL\n    calculation = \"scf\"\n"));
        assert!(text.contains(&format!("    pseudo_dir = \"{}\"", pseudos.display())));
        assert!(text.contains("Fe     55.84500000  fe_pbe_v1.5.uspp.F.UPF"));
        assert!(text.contains("K_POINTS {automatic}\n9 9 9 0 0 0"));
    }

    #[test]
    fn test_inline_pseudo_dir_wins_over_flag() {
        let (dir, poscar, pseudos) = workspace();
        let mut a = args(&poscar);
        a.pseudo_dir = Some(dir.path().join("elsewhere"));
        a.custom_settings_dict = json!({"pseudo_dir": pseudos.display().to_string()})
            .as_object()
            .cloned();
        a.specify_potentials = true;
        a.write_location = Some(dir.path().to_path_buf());
        a.pwx_input_file = Some("feo.in".to_string());
        execute(a).unwrap();
        assert!(dir.path().join("feo.in").exists());
    }

    #[test]
    fn test_settings_file_pseudo_dir_wins_over_flag() {
        let (dir, poscar, pseudos) = workspace();
        let file = dir.path().join("custom.json");
        fs::write(
            &file,
            json!({"pseudo_dir": pseudos.display().to_string()}).to_string(),
        )
        .unwrap();

        let mut a = args(&poscar);
        a.pseudo_dir = Some(dir.path().join("from_env"));
        a.custom_settings_file = Some(file);
        a.specify_potentials = true;
        a.write_location = Some(dir.path().to_path_buf());
        execute(a).unwrap();

        let text = fs::read_to_string(dir.path().join("scf.in")).unwrap();
        assert!(text.contains(&format!("    pseudo_dir = \"{}\"", pseudos.display())));
        assert!(text.contains("O      15.99940000  o_pbe_v1.2.uspp.F.UPF"));
    }

    #[test]
    fn test_flag_pseudo_dir_replaces_preset_value() {
        let (_dir, poscar, pseudos) = workspace();
        let mut a = args(&poscar);
        a.pseudo_dir = Some(pseudos.clone());
        a.dry_run = true;
        let mut out = Vec::new();
        execute_to(a, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(&format!("    pseudo_dir = \"{}\"", pseudos.display())));
        assert!(!text.contains("~/pseudos/qe/default"));
    }

    #[test]
    fn test_dry_run_prints_only_the_input() {
        let (dir, poscar, pseudos) = workspace();
        let mut a = args(&poscar);
        a.pseudo_dir = Some(pseudos.clone());
        a.specify_potentials = true;
        a.write_location = Some(dir.path().to_path_buf());
        a.dry_run = true;
        let mut out = Vec::new();
        execute_to(a, &mut out).unwrap();

        let mut defaults = Settings::new();
        defaults.insert("pseudo_dir".into(), json!(pseudos.display().to_string()));
        let expected = PwxInputGenerator::new(parsers::read_structure(&poscar).unwrap())
            .with_presets("scf")
            .with_defaults(defaults)
            .with_specify_potentials(true)
            .pwx_input_as_str()
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), format!("{}\n", expected));
        assert!(!dir.path().join("scf.in").exists());
    }

    #[test]
    fn test_keep_existing_and_dry_run() {
        let (dir, poscar, _) = workspace();
        let target = dir.path().join("scf.in");
        fs::write(&target, "keep me").unwrap();

        let mut a = args(&poscar);
        a.write_location = Some(dir.path().to_path_buf());
        a.keep_existing = true;
        execute(a).unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "keep me");

        let mut a = args(&poscar);
        a.write_location = Some(dir.path().to_path_buf());
        a.pwx_input_file = Some("dry.in".to_string());
        a.dry_run = true;
        execute(a).unwrap();
        assert!(!dir.path().join("dry.in").exists());

        let mut a = args(&poscar);
        a.write_location = Some(dir.path().to_path_buf());
        execute(a).unwrap();
        assert_ne!(fs::read_to_string(&target).unwrap(), "keep me");
    }

    #[test]
    fn test_missing_pseudopotentials_fail() {
        let (dir, poscar, _) = workspace();
        let mut a = args(&poscar);
        a.pseudo_dir = Some(dir.path().to_path_buf());
        a.specify_potentials = true;
        a.write_location = Some(dir.path().to_path_buf());
        assert!(matches!(
            execute(a),
            Err(DftgenError::PseudopotentialAssignment { .. })
        ));
        assert!(!dir.path().join("scf.in").exists());
    }

    #[test]
    fn test_species_rows() {
        let crystal = Crystal::new(
            "FeO",
            Lattice::from_vectors([[4.6, 0.0, 0.0], [0.0, 4.6, 0.0], [0.0, 0.0, 4.6]]),
            vec![
                Atom::new("Fe", [0.0, 0.0, 0.0]),
                Atom::new("O", [0.5, 0.0, 0.0]),
                Atom::new("Fe", [0.5, 0.5, 0.5]),
            ],
        );
        let mut assignment = PseudoAssignment::new();
        assignment.insert("Fe".to_string(), Some("fe.UPF".to_string()));
        assignment.insert("O".to_string(), None);
        let rows = species_rows(&assignment, &crystal);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].species, "Fe");
        assert_eq!(rows[0].count, 2);
        assert_eq!(rows[0].weight, "55.8450");
        assert_eq!(rows[0].pseudopotential, "fe.UPF");
        assert_eq!(rows[1].pseudopotential, "None");
    }
}
