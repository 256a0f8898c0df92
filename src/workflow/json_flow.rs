//! JSON 题目规范化流程 - 流程层
//!
//! 读取 → 编号并整理题干 → 写出（保留外层对象结构）

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::loaders::{read_json_document, write_json_pretty};
use crate::services::json_normalizer::{JsonNormalizer, NormalizeStats};

/// JSON 题目规范化流程
pub struct JsonQuestionFlow {
    normalizer: JsonNormalizer,
    output: PathBuf,
}

impl JsonQuestionFlow {
    pub fn new(id_prefix: impl Into<String>, output: impl Into<PathBuf>) -> Self {
        Self {
            normalizer: JsonNormalizer::new(id_prefix),
            output: output.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new("json", &config.json_output)
    }

    /// 规范化 `input` 并写到输出路径
    ///
    /// # 返回
    /// 找不到题目列表时返回 `MalformedInput`，不写出任何文件
    pub async fn run(&self, input: &Path) -> AppResult<NormalizeStats> {
        let mut document = read_json_document(input).await?;

        let stats = self
            .normalizer
            .normalize_document(&mut document)
            .ok_or_else(|| AppError::malformed_input(input.display().to_string(), "找不到题目列表"))?;

        if stats.passed_through > 0 {
            warn!("⚠️ {} 个条目不是对象，原样保留", stats.passed_through);
        }

        write_json_pretty(&self.output, &document).await?;
        info!(
            "✓ {} 道题目已编号并写入: {}",
            stats.renumbered,
            self.output.display()
        );

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InputError;
    use serde_json::Value;

    #[tokio::test]
    async fn test_run_keeps_wrapper_object() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.json");
        std::fs::write(
            &input,
            r#"{"chapter": "Light", "items": [{"question": "What is\nlight?", "answer": "energy"}]}"#,
        )
        .unwrap();

        let flow = JsonQuestionFlow::new("json", dir.path().join("out.json"));
        let stats = flow.run(&input).await.unwrap();
        assert_eq!(stats.renumbered, 1);

        let written: Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("out.json")).unwrap())
                .unwrap();
        assert_eq!(written["chapter"], "Light");
        assert_eq!(written["items"][0]["questionNUM"], "json_1");
        assert_eq!(written["items"][0]["question"], "What is light?");
    }

    #[tokio::test]
    async fn test_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let flow = JsonQuestionFlow::new("json", dir.path().join("out.json"));

        let err = flow.run(&dir.path().join("absent.json")).await.unwrap_err();
        assert!(matches!(err, AppError::Input(InputError::MissingInput { .. })));
        assert!(!dir.path().join("out.json").exists());
    }

    #[tokio::test]
    async fn test_document_without_list_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.json");
        std::fs::write(&input, r#"{"title": "no list"}"#).unwrap();

        let flow = JsonQuestionFlow::new("json", dir.path().join("out.json"));
        let err = flow.run(&input).await.unwrap_err();
        assert!(matches!(err, AppError::Input(InputError::MalformedInput { .. })));
    }
}
