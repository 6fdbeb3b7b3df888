//! # 晶体结构数据模型
//!
//! 输入文件生成器只读取结构的派生量：元素符号、分数坐标与晶格向量。
//!
//! ## 依赖关系
//! - 被 `parsers/` 和 `qe/` 使用
//! - 无外部模块依赖

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::f64::consts::PI;

/// 晶格表示
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lattice {
    /// 晶格向量矩阵 (3x3)，行向量表示 a, b, c (Å)
    pub matrix: [[f64; 3]; 3],
}

impl Lattice {
    /// 从晶格向量矩阵创建
    pub fn from_vectors(matrix: [[f64; 3]; 3]) -> Self {
        Lattice { matrix }
    }

    /// 行列式（有符号体积）
    pub fn determinant(&self) -> f64 {
        let [a, b, c] = self.matrix;
        a[0] * (b[1] * c[2] - b[2] * c[1]) - a[1] * (b[0] * c[2] - b[2] * c[0])
            + a[2] * (b[0] * c[1] - b[1] * c[0])
    }

    /// 晶格矩阵的逆；奇异晶格返回 `None`
    ///
    /// 奇异判据相对于三个晶格向量长度之积，与晶胞尺度无关。
    pub fn inverse(&self) -> Option<[[f64; 3]; 3]> {
        let m = self.matrix;
        let det = self.determinant();
        let scale = norm(m[0]) * norm(m[1]) * norm(m[2]);
        if scale == 0.0 || det.abs() < 1e-10 * scale {
            return None;
        }

        Some([
            [
                (m[1][1] * m[2][2] - m[1][2] * m[2][1]) / det,
                (m[0][2] * m[2][1] - m[0][1] * m[2][2]) / det,
                (m[0][1] * m[1][2] - m[0][2] * m[1][1]) / det,
            ],
            [
                (m[1][2] * m[2][0] - m[1][0] * m[2][2]) / det,
                (m[0][0] * m[2][2] - m[0][2] * m[2][0]) / det,
                (m[0][2] * m[1][0] - m[0][0] * m[1][2]) / det,
            ],
            [
                (m[1][0] * m[2][1] - m[1][1] * m[2][0]) / det,
                (m[0][1] * m[2][0] - m[0][0] * m[2][1]) / det,
                (m[0][0] * m[1][1] - m[0][1] * m[1][0]) / det,
            ],
        ])
    }

    /// 倒格子 2π·inv(cell)ᵀ，行向量为 b1, b2, b3 (1/Å)
    pub fn reciprocal(&self) -> Option<[[f64; 3]; 3]> {
        let inv = self.inverse()?;
        let mut rcell = [[0.0; 3]; 3];
        for (i, row) in rcell.iter_mut().enumerate() {
            for (j, value) in row.iter_mut().enumerate() {
                *value = 2.0 * PI * inv[j][i];
            }
        }
        Some(rcell)
    }

    /// 笛卡尔坐标转分数坐标
    pub fn to_fractional(&self, cart: [f64; 3]) -> Option<[f64; 3]> {
        // frac = cart · inv(cell)，晶格向量按行存储
        let inv = self.inverse()?;
        let mut frac = [0.0; 3];
        for (j, value) in frac.iter_mut().enumerate() {
            *value = (0..3).map(|i| cart[i] * inv[i][j]).sum();
        }
        Some(frac)
    }
}

pub(crate) fn norm(v: [f64; 3]) -> f64 {
    dot(v, v).sqrt()
}

fn dot(u: [f64; 3], v: [f64; 3]) -> f64 {
    u.iter().zip(v.iter()).map(|(x, y)| x * y).sum()
}

/// 原子信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    /// 物种标签，通常就是元素符号（也可以是 "Fe1"、"O-1" 这类标签）
    pub element: String,

    /// 分数坐标 [x, y, z]
    pub position: [f64; 3],
}

impl Atom {
    pub fn new(element: impl Into<String>, position: [f64; 3]) -> Self {
        Atom {
            element: element.into(),
            position,
        }
    }
}

/// 晶体结构
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crystal {
    /// 结构名称
    pub name: String,

    /// 晶格
    pub lattice: Lattice,

    /// 原子列表（保持文件中的顺序）
    pub atoms: Vec<Atom>,
}

impl Crystal {
    pub fn new(name: impl Into<String>, lattice: Lattice, atoms: Vec<Atom>) -> Self {
        Crystal {
            name: name.into(),
            lattice,
            atoms,
        }
    }

    /// 按原子顺序的物种符号
    pub fn symbols(&self) -> Vec<&str> {
        self.atoms.iter().map(|a| a.element.as_str()).collect()
    }

    /// 去重并按字母排序的物种符号
    pub fn species(&self) -> BTreeSet<&str> {
        self.atoms.iter().map(|a| a.element.as_str()).collect()
    }

    pub fn num_atoms(&self) -> usize {
        self.atoms.len()
    }

    pub fn num_species(&self) -> usize {
        self.species().len()
    }

    /// 计算化学式
    pub fn formula(&self) -> String {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();

        for atom in &self.atoms {
            *counts.entry(atom.element.as_str()).or_insert(0) += 1;
        }

        counts
            .into_iter()
            .map(|(el, count)| {
                if count == 1 {
                    el.to_string()
                } else {
                    format!("{}{}", el, count)
                }
            })
            .collect::<Vec<_>>()
            .join("")
    }
}
