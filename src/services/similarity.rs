//! 相似度计算
//!
//! 分数为 0-100 的整数，四舍六入五成双

use crate::error::ConfigError;
use serde::Deserialize;
use std::str::FromStr;

/// 相似度算法
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityMetric {
    /// 基于最长公共子序列的插入/删除距离：`1 - dist / (len_a + len_b)`
    #[default]
    Indel,
    /// 归一化 Levenshtein 距离：`1 - dist / max(len_a, len_b)`
    Levenshtein,
}

impl SimilarityMetric {
    /// 计算两个字符串的相似度分数
    pub fn score(self, a: &str, b: &str) -> u8 {
        let ratio = match self {
            SimilarityMetric::Indel => indel_ratio(a, b),
            SimilarityMetric::Levenshtein => strsim::normalized_levenshtein(a, b),
        };
        to_score(ratio)
    }

    /// 只看长度能达到的最高分，用于跳过不可能达到阈值的比较
    pub fn max_possible_score(self, len_a: usize, len_b: usize) -> u8 {
        if len_a == 0 && len_b == 0 {
            return 100;
        }
        let (short, long) = (len_a.min(len_b) as f64, len_a.max(len_b) as f64);
        let ratio = match self {
            SimilarityMetric::Indel => 2.0 * short / (short + long),
            SimilarityMetric::Levenshtein => short / long,
        };
        // 浮点误差不能让上界低于真实分数
        to_score((ratio + 1e-9).min(1.0))
    }
}

impl FromStr for SimilarityMetric {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "indel" | "ratio" => Ok(SimilarityMetric::Indel),
            "levenshtein" => Ok(SimilarityMetric::Levenshtein),
            other => Err(ConfigError::UnknownMetric(other.to_string())),
        }
    }
}

impl std::fmt::Display for SimilarityMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimilarityMetric::Indel => write!(f, "indel"),
            SimilarityMetric::Levenshtein => write!(f, "levenshtein"),
        }
    }
}

/// 插入/删除距离相似度（0.0 - 1.0），即 `1 - dist / total = 2 * lcs / total`；两个空串视为完全相同
pub fn indel_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    let lcs = lcs_length(&a, &b);
    (2 * lcs) as f64 / total as f64
}

/// 最长公共子序列长度，两行滚动数组
fn lcs_length(a: &[char], b: &[char]) -> usize {
    let (outer, inner) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut prev = vec![0usize; inner.len() + 1];
    let mut curr = vec![0usize; inner.len() + 1];

    for &x in outer {
        for (j, &y) in inner.iter().enumerate() {
            curr[j + 1] = if x == y {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[inner.len()]
}

fn to_score(ratio: f64) -> u8 {
    (ratio * 100.0).round_ties_even().clamp(0.0, 100.0) as u8
}
