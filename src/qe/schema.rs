//! # pw.x 输入格式表
//!
//! 定义 pw.x 的 namelist（及其允许的 tag）与 card。两张表的顺序就是输出顺序。
//!
//! ## 数据来源
//! Quantum ESPRESSO `INPUT_PW` 文档
//! https://www.quantum-espresso.org/Doc/INPUT_PW.html
//!
//! ## 依赖关系
//! - 被 `qe/cards.rs`, `qe/generator.rs` 使用
//! - 纯静态数据，无外部依赖

/// 一个 namelist 及其允许的 tag（按文档顺序）
#[derive(Debug, Clone, Copy)]
pub struct Namelist {
    pub name: &'static str,
    pub tags: &'static [&'static str],
}

/// pw.x 的 card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Card {
    AtomicSpecies,
    AtomicPositions,
    KPoints,
    CellParameters,
    Occupations,
    Constraints,
    AtomicForces,
}

impl Card {
    /// 计算设置中 `cards` 列表使用的名称
    pub fn name(&self) -> &'static str {
        match self {
            Card::AtomicSpecies => "atomic_species",
            Card::AtomicPositions => "atomic_positions",
            Card::KPoints => "kpoints",
            Card::CellParameters => "cell_parameters",
            Card::Occupations => "occupations",
            Card::Constraints => "constraints",
            Card::AtomicForces => "atomic_forces",
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// pw.x card 的输出顺序
pub const PW_CARDS: &[Card] = &[
    Card::AtomicSpecies,
    Card::AtomicPositions,
    Card::KPoints,
    Card::CellParameters,
    Card::Occupations,
    Card::Constraints,
    Card::AtomicForces,
];

/// pw.x namelist 的输出顺序
pub const PW_NAMELISTS: &[Namelist] = &[
    Namelist {
        name: "control",
        tags: CONTROL_TAGS,
    },
    Namelist {
        name: "system",
        tags: SYSTEM_TAGS,
    },
    Namelist {
        name: "electrons",
        tags: ELECTRONS_TAGS,
    },
    Namelist {
        name: "ions",
        tags: IONS_TAGS,
    },
    Namelist {
        name: "cell",
        tags: CELL_TAGS,
    },
];

/// 查找 namelist 的 tag 列表
pub fn namelist_tags(name: &str) -> Option<&'static [&'static str]> {
    PW_NAMELISTS
        .iter()
        .find(|nl| nl.name == name)
        .map(|nl| nl.tags)
}

#[rustfmt::skip]
const CONTROL_TAGS: &[&str] = &[
    "calculation", "title", "verbosity", "restart_mode", "wf_collect", "nstep",
    "iprint", "tstress", "tprnfor", "dt", "outdir", "wfcdir", "prefix",
    "lkpoint_dir", "max_seconds", "etot_conv_thr", "forc_conv_thr", "disk_io",
    "pseudo_dir", "tefield", "dipfield", "lelfield", "nberrycyc", "lorbm",
    "lberry", "gdir", "nppstr", "gate", "twochem", "lfcp", "trism",
];

#[rustfmt::skip]
const SYSTEM_TAGS: &[&str] = &[
    "ibrav", "celldm", "A", "B", "C", "cosAB", "cosAC", "cosBC", "nat", "ntyp",
    "nbnd", "nbnd_cond", "tot_charge", "starting_charge", "tot_magnetization",
    "starting_magnetization", "ecutwfc", "ecutrho", "ecutfock", "nr1", "nr2",
    "nr3", "nr1s", "nr2s", "nr3s", "nosym", "nosym_evc", "noinv", "no_t_rev",
    "force_symmorphic", "use_all_frac", "occupations", "one_atom_occupations",
    "starting_spin_angle", "degauss_cond", "nelec_cond", "degauss", "smearing",
    "nspin", "sic_gamma", "pol_type", "sic_energy", "sci_vb", "sci_cb",
    "noncolin", "ecfixed", "qcutz", "q2sigma", "input_dft", "ace",
    "exx_fraction", "screening_parameter", "exxdiv_treatment",
    "x_gamma_extrapolation", "ecutvcut", "nqx1", "nqx2", "nqx3",
    "localization_thr", "Hubbard_occ", "Hubbard_alpha", "Hubbard_beta",
    "starting_ns_eigenvalue", "dmft", "dmft_prefix", "ensemble_energies", "edir",
    "emaxpos", "eopreg", "eamp", "angle1", "angle2", "lforcet",
    "constrained_magnetization", "fixed_magnetization", "lambda", "report",
    "lspinorb", "assume_isolated", "esm_bc", "esm_w", "esm_efield", "esm_nfit",
    "lgcscf", "gcscf_mu", "gcscf_conv_thr", "gcscf_beta", "vdw_corr", "london",
    "london_s6", "london_c6", "london_rvdw", "london_rcut", "dftd3_version",
    "dftd3_threebody", "ts_vdw_econv_thr", "ts_vdw_isolated", "xdm", "xdm_a1",
    "xdm_a2", "space_group", "uniqueb", "origin_choice", "rhombohedral", "zgate",
    "relaxz", "block", "block_1", "block_2", "block_height", "nextffield",
];

#[rustfmt::skip]
const ELECTRONS_TAGS: &[&str] = &[
    "electron_maxstep", "exx_maxstep", "scf_must_converge", "conv_thr",
    "adaptive_thr", "conv_thr_init", "conv_thr_multi", "mixing_mode",
    "mixing_beta", "mixing_ndim", "mixing_fixed_ns", "diagonalization",
    "diago_thr_init", "diago_cg_maxiter", "diago_ppcg_maxiter",
    "diago_david_ndim", "diago_rmm_ndim", "diago_rmm_conv", "diago_gs_nblock",
    "diago_full_acc", "efield", "efield_cart", "efield_phase", "startingpot",
    "startingwfc", "tqr", "real_space",
];

#[rustfmt::skip]
const IONS_TAGS: &[&str] = &[
    "ion_positions", "ion_velocities", "ion_dynamics", "pot_extrapolation",
    "wfc_extrapolation", "remove_rigid_rot", "ion_temperature", "tempw", "tolp",
    "delta_t", "nraise", "refold_pos", "upscale", "bfgs_ndim",
    "trust_radius_max", "trust_radius_min", "trust_radius_ini", "w_1", "w_2",
    "fire_alpha_init", "fire_falpha", "fire_nmin", "fire_f_inc", "fire_f_dec",
    "fire_dtmax",
];

#[rustfmt::skip]
const CELL_TAGS: &[&str] = &[
    "cell_dynamics", "press", "wmass", "cell_factor", "press_conv_thr",
    "cell_dofree",
];
