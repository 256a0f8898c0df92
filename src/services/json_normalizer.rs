//! JSON 题目规范化服务 - 业务能力层
//!
//! 给每道题编号（`json_<序号>`，放在第一个字段），并整理题干中的换行和多余空白。
//! 其他字段原样保留、顺序不变。

use crate::models::loaders::json_loader::locate_question_list_mut;
use crate::utils::text::collapse_whitespace;
use serde_json::{Map, Value};
use tracing::warn;

/// 规范化结果统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeStats {
    /// 重新编号的题目数
    pub renumbered: usize,
    /// 不是对象、原样保留的条目数
    pub passed_through: usize,
}

/// JSON 题目规范化服务
pub struct JsonNormalizer {
    id_prefix: String,
}

impl JsonNormalizer {
    pub fn new(id_prefix: impl Into<String>) -> Self {
        Self {
            id_prefix: id_prefix.into(),
        }
    }

    /// 就地规范化整个文档
    ///
    /// # 返回
    /// 找不到题目列表时返回 `None`，文档保持不变
    pub fn normalize_document(&self, document: &mut Value) -> Option<NormalizeStats> {
        let items = locate_question_list_mut(document)?;
        let mut stats = NormalizeStats::default();

        for (idx, item) in items.iter_mut().enumerate() {
            let index = idx + 1;
            match item {
                Value::Object(fields) => {
                    *fields = self.normalize_item(index, std::mem::take(fields));
                    stats.renumbered += 1;
                }
                _ => {
                    warn!("  > 条目 #{} 不是对象，原样保留", index);
                    stats.passed_through += 1;
                }
            }
        }

        Some(stats)
    }

    /// 规范化单个题目：题号放在最前；条目自带 `questionNUM` 时保留原值（位置仍在最前）
    pub fn normalize_item(&self, index: usize, fields: Map<String, Value>) -> Map<String, Value> {
        let mut reordered = Map::with_capacity(fields.len() + 1);
        reordered.insert(
            "questionNUM".to_string(),
            Value::String(format!("{}_{}", self.id_prefix, index)),
        );

        for (key, value) in fields {
            let value = match (key.as_str(), value) {
                ("question", Value::String(text)) => Value::String(collapse_whitespace(&text)),
                (_, value) => value,
            };
            reordered.insert(key, value);
        }

        reordered
    }
}

impl Default for JsonNormalizer {
    fn default() -> Self {
        Self::new("json")
    }
}
