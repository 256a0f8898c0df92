//! 重复检测服务 - 业务能力层
//!
//! 两两比较两个来源的题目，收集相似度达到阈值的题目对。
//! 只做跨来源比较，不检测同一来源内部的重复。

use crate::error::DetectionError;
use crate::models::question::{ComparableQuestion, DuplicatePair};
use crate::services::similarity::SimilarityMetric;
use crate::utils::text::truncate_text;
use tracing::{debug, info};

/// 默认相似度阈值
pub const DEFAULT_THRESHOLD: u8 = 95;

/// 重复检测服务
pub struct DuplicateDetector {
    threshold: u8,
    metric: SimilarityMetric,
}

impl DuplicateDetector {
    pub fn new(threshold: u8, metric: SimilarityMetric) -> Self {
        Self { threshold, metric }
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// 查找跨来源重复
    ///
    /// # 参数
    /// - `left`: 来源1（外层循环）
    /// - `right`: 来源2（内层循环）
    ///
    /// # 返回
    /// 按发现顺序排列的题目对；任一来源为空时返回 `InsufficientData`，不做任何比较
    pub fn detect(
        &self,
        left: &[ComparableQuestion],
        right: &[ComparableQuestion],
    ) -> Result<Vec<DuplicatePair>, DetectionError> {
        if left.is_empty() || right.is_empty() {
            return Err(DetectionError::InsufficientData {
                left: left.len(),
                right: right.len(),
            });
        }

        info!(
            "--- 正在比较 {} 道题目与 {} 道题目 (阈值 {}%, 算法 {}) ---",
            left.len(),
            right.len(),
            self.threshold,
            self.metric
        );

        let right_lengths: Vec<usize> = right.iter().map(|q| q.text.chars().count()).collect();
        let mut pairs = Vec::new();
        let mut pruned = 0usize;

        for a in left {
            let len_a = a.text.chars().count();
            for (b, &len_b) in right.iter().zip(&right_lengths) {
                if self.metric.max_possible_score(len_a, len_b) < self.threshold {
                    pruned += 1;
                    continue;
                }

                let score = self.metric.score(&a.text, &b.text);
                if score >= self.threshold {
                    debug!(
                        "重复: {} ~ {} (相似度 {}) | {}",
                        a.id,
                        b.id,
                        score,
                        truncate_text(&a.text, 40)
                    );
                    pairs.push(DuplicatePair::new(a.id.clone(), b.id.clone()));
                }
            }
        }

        debug!("按长度跳过 {} 次比较", pruned);
        Ok(pairs)
    }
}

impl Default for DuplicateDetector {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD, SimilarityMetric::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(id: &str, text: &str) -> ComparableQuestion {
        ComparableQuestion {
            id: id.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_near_duplicate_depends_on_threshold() {
        let left = vec![q("pdf_1", "what is light?")];
        let right = vec![q("json_1", "what is light")];

        let found = DuplicateDetector::new(95, SimilarityMetric::Indel)
            .detect(&left, &right)
            .unwrap();
        assert_eq!(found, vec![DuplicatePair::new("pdf_1", "json_1")]);

        let strict = DuplicateDetector::new(100, SimilarityMetric::Indel)
            .detect(&left, &right)
            .unwrap();
        assert!(strict.is_empty());
    }

    #[test]
    fn test_empty_source_is_insufficient_data() {
        let left = vec![q("pdf_1", "what is light?")];

        let err = DuplicateDetector::default().detect(&left, &[]).unwrap_err();
        assert_eq!(err, DetectionError::InsufficientData { left: 1, right: 0 });

        let err = DuplicateDetector::default().detect(&[], &left).unwrap_err();
        assert_eq!(err, DetectionError::InsufficientData { left: 0, right: 1 });
    }

    #[test]
    fn test_no_matches_is_ok_and_empty() {
        let left = vec![q("pdf_1", "what is light?")];
        let right = vec![q("json_1", "name the parts of a flower")];

        let found = DuplicateDetector::default().detect(&left, &right).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_pairs_in_left_major_order_without_dedup() {
        let left = vec![q("a1", "what is light"), q("a2", "define focus")];
        let right = vec![
            q("b1", "define focus"),
            q("b2", "what is light"),
            q("b3", "what is light?"),
        ];

        let found = DuplicateDetector::default().detect(&left, &right).unwrap();
        assert_eq!(
            found,
            vec![
                DuplicatePair::new("a1", "b2"),
                DuplicatePair::new("a1", "b3"),
                DuplicatePair::new("a2", "b1"),
            ]
        );
    }

    /// 结果恰好是所有达到阈值的题目对（剪枝不影响结果）
    #[test]
    fn test_result_matches_brute_force() {
        let texts = [
            "what is light?",
            "what is light",
            "what is lights",
            "state the laws of reflection",
            "state the laws of refraction",
            "define the principal focus of a concave mirror",
            "define principal focus of concave mirror",
            "a",
            "",
        ];
        let left: Vec<_> = texts
            .iter()
            .enumerate()
            .map(|(i, t)| q(&format!("l{}", i), t))
            .collect();
        let right: Vec<_> = texts
            .iter()
            .rev()
            .enumerate()
            .map(|(i, t)| q(&format!("r{}", i), t))
            .collect();

        for metric in [SimilarityMetric::Indel, SimilarityMetric::Levenshtein] {
            for threshold in [0u8, 50, 80, 90, 95, 100] {
                let expected: Vec<DuplicatePair> = left
                    .iter()
                    .flat_map(|a| right.iter().map(move |b| (a, b)))
                    .filter(|(a, b)| metric.score(&a.text, &b.text) >= threshold)
                    .map(|(a, b)| DuplicatePair::new(a.id.clone(), b.id.clone()))
                    .collect();

                let found = DuplicateDetector::new(threshold, metric)
                    .detect(&left, &right)
                    .unwrap();
                assert_eq!(found, expected, "{} @ {}", metric, threshold);
            }
        }
    }
}
