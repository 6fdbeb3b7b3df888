//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `pw.x`: 生成 Quantum ESPRESSO pw.x 输入文件
//!
//! 不带子命令时打印用法并正常退出。
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: pwx

pub mod pwx;

use clap::{Parser, Subcommand};

/// dftgen - DFT 输入文件生成工具
#[derive(Parser)]
#[command(name = "dftgen")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Generate input files for DFT codes from crystal structures", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Generate a Quantum ESPRESSO pw.x input file
    #[command(name = "pw.x")]
    Pwx(pwx::PwxArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use std::path::PathBuf;

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from(["dftgen"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_pwx_defaults() {
        let cli = Cli::try_parse_from(["dftgen", "pw.x", "-i", "POSCAR"]).unwrap();
        let Some(Commands::Pwx(args)) = cli.command else {
            panic!("expected the pw.x subcommand");
        };
        assert_eq!(args.input, PathBuf::from("POSCAR"));
        assert_eq!(args.calculation_presets, None);
        assert!(args.custom_settings_dict.is_none());
        assert!(!args.specify_potentials);
        assert!(!args.dry_run);
        assert!(!args.keep_existing);
    }

    #[test]
    fn test_pwx_all_options() {
        let cli = Cli::try_parse_from([
            "dftgen",
            "pw.x",
            "-i",
            "FeO.vasp",
            "-p",
            "vc-relax",
            "-f",
            "custom.json",
            "-d",
            r#"{"ecutwfc": 60}"#,
            "--pseudo-dir",
            "/opt/pseudos",
            "-s",
            "-l",
            "runs",
            "-o",
            "feo.in",
            "--keep-existing",
            "--dry-run",
        ])
        .unwrap();
        let Some(Commands::Pwx(args)) = cli.command else {
            panic!("expected the pw.x subcommand");
        };
        assert_eq!(args.calculation_presets.as_deref(), Some("vc-relax"));
        assert_eq!(args.custom_settings_file, Some(PathBuf::from("custom.json")));
        let dict = args.custom_settings_dict.unwrap();
        assert_eq!(dict["ecutwfc"], 60);
        assert_eq!(args.pseudo_dir, Some(PathBuf::from("/opt/pseudos")));
        assert!(args.specify_potentials);
        assert_eq!(args.write_location, Some(PathBuf::from("runs")));
        assert_eq!(args.pwx_input_file.as_deref(), Some("feo.in"));
        assert!(args.keep_existing);
        assert!(args.dry_run);
    }

    #[test]
    fn test_usage_errors() {
        let err = Cli::try_parse_from(["dftgen", "pw.x"]).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);

        let err = Cli::try_parse_from(["dftgen", "pw.x", "-i", "POSCAR", "-p", "nscf"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);

        let err = Cli::try_parse_from(["dftgen", "pw.x", "-i", "POSCAR", "-d", "[1, 2]"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }
}
