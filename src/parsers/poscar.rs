//! # VASP POSCAR 格式解析器
//!
//! 读取 POSCAR/CONTCAR（以及 `*.vasp`）结构文件，作为输入文件生成的结构来源。
//!
//! ## POSCAR 格式说明
//! ```text
//! Comment line (structure name)
//! 1.0                    # scaling factor
//! a1 a2 a3               # lattice vector a
//! b1 b2 b3               # lattice vector b
//! c1 c2 c3               # lattice vector c
//! Element1 Element2 ...  # element symbols (VASP 5+, required here)
//! n1 n2 ...              # number of atoms per element
//! Selective dynamics     # optional
//! Direct/Cartesian       # coordinate type
//! x1 y1 z1               # atom positions
//! ...
//! ```
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `models/structure.rs`

use crate::error::{DftgenError, Result};
use crate::models::{Atom, Crystal, Lattice};
use std::fs;
use std::path::Path;

/// 解析 POSCAR/CONTCAR 文件
pub fn parse_poscar_file(path: &Path) -> Result<Crystal> {
    let content = fs::read_to_string(path).map_err(|e| DftgenError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_poscar_content(
        &content,
        path.file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown"),
    )
}

/// 逐行读取 POSCAR 内容，出错时带上行号
struct Lines<'a> {
    name: String,
    lines: Vec<&'a str>,
    cursor: usize,
}

impl<'a> Lines<'a> {
    fn next(&mut self, what: &str) -> Result<&'a str> {
        let line = self
            .lines
            .get(self.cursor)
            .copied()
            .ok_or_else(|| self.error(format!("Missing {} (line {})", what, self.cursor + 1)))?;
        self.cursor += 1;
        Ok(line)
    }

    fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.cursor).copied()
    }

    fn floats(&mut self, what: &str) -> Result<[f64; 3]> {
        let line_no = self.cursor + 1;
        let line = self.next(what)?;
        let parts: Vec<f64> = line
            .split_whitespace()
            .take(3)
            .map(|s| s.parse::<f64>())
            .collect::<std::result::Result<_, _>>()
            .map_err(|_| self.error(format!("Invalid {} at line {}", what, line_no)))?;
        if parts.len() < 3 {
            return Err(self.error(format!("Invalid {} at line {}", what, line_no)));
        }
        Ok([parts[0], parts[1], parts[2]])
    }

    fn error(&self, reason: String) -> DftgenError {
        DftgenError::ParseError {
            format: "poscar".to_string(),
            path: self.name.clone(),
            reason,
        }
    }
}

/// 从字符串内容解析 POSCAR 格式
pub fn parse_poscar_content(content: &str, default_name: &str) -> Result<Crystal> {
    let mut lines = Lines {
        name: default_name.to_string(),
        lines: content.lines().collect(),
        cursor: 0,
    };

    let name = match lines.next("comment line")?.trim() {
        "" => default_name.to_string(),
        comment => comment.to_string(),
    };

    let scale_line = lines.next("scaling factor")?;
    let scale: f64 = scale_line
        .split_whitespace()
        .next()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| lines.error(format!("Invalid scaling factor '{}'", scale_line.trim())))?;
    if scale <= 0.0 {
        // 负数表示目标体积，本工具只读取直接的缩放因子
        return Err(lines.error("Volume-type (negative) scaling factor is not supported".into()));
    }

    let mut matrix = [[0.0; 3]; 3];
    for row in matrix.iter_mut() {
        let v = lines.floats("lattice vector")?;
        *row = [v[0] * scale, v[1] * scale, v[2] * scale];
    }
    let lattice = Lattice::from_vectors(matrix);

    let symbol_line = lines.next("element symbols")?;
    let elements: Vec<&str> = symbol_line.split_whitespace().collect();
    if elements.is_empty() || elements[0].parse::<usize>().is_ok() {
        return Err(lines.error(
            "Element symbols line not found (VASP 4 format is not supported)".into(),
        ));
    }

    let count_line = lines.next("atom counts")?;
    let counts: Vec<usize> = count_line
        .split_whitespace()
        .map(|s| s.parse::<usize>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|_| lines.error(format!("Invalid atom counts '{}'", count_line.trim())))?;
    if counts.len() != elements.len() {
        return Err(lines.error(format!(
            "{} element symbols but {} atom counts",
            elements.len(),
            counts.len()
        )));
    }

    if lines
        .peek()
        .is_some_and(|l| l.trim().to_lowercase().starts_with('s'))
    {
        lines.cursor += 1;
    }

    let coord_type = lines.next("coordinate type line")?.trim().to_lowercase();
    let is_cartesian = coord_type.starts_with('c') || coord_type.starts_with('k');

    let mut atoms = Vec::with_capacity(counts.iter().sum());
    for (elem, &count) in elements.iter().zip(counts.iter()) {
        for _ in 0..count {
            let raw = lines.floats("atom position")?;
            let position = if is_cartesian {
                let cart = [raw[0] * scale, raw[1] * scale, raw[2] * scale];
                lattice
                    .to_fractional(cart)
                    .ok_or_else(|| lines.error("Singular lattice".into()))?
            } else {
                raw
            };
            atoms.push(Atom::new(*elem, position));
        }
    }

    Ok(Crystal::new(name, lattice, atoms))
}
