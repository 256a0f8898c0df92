use crate::error::{AppError, AppResult, ConfigError, FileError};
use crate::services::similarity::SimilarityMetric;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

/// 默认配置文件名（存在时自动加载）
pub const DEFAULT_CONFIG_FILE: &str = "dedup.toml";

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// PDF 源文件（`.pdf` 用 lopdf 解析，其他扩展名按换页符分隔的文本读取）
    pub pdf_path: String,
    /// JSON 源文件
    pub json_path: String,
    /// 清洗后的 PDF 文本输出
    pub pdf_text_output: String,
    /// PDF 题目 JSON 输出
    pub pdf_json_output: String,
    /// 规范化后的 JSON 源输出
    pub json_output: String,
    /// 重复题目报告输出
    pub report_path: String,
    /// 相似度阈值（0-100）
    pub similarity_threshold: u8,
    /// 相似度算法
    pub similarity_metric: SimilarityMetric,
    /// 文档模板（TOML），不设置则使用内置模板
    pub template_path: Option<String>,
    /// PDF 题号前缀
    pub pdf_id_prefix: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pdf_path: "input_files/Machine_Task.pdf".to_string(),
            json_path: "input_files/Machine_Task.json".to_string(),
            pdf_text_output: "data/output_pdf.txt".to_string(),
            pdf_json_output: "data/pdf_preprocessed.json".to_string(),
            json_output: "data/json_preprocessed.json".to_string(),
            report_path: "result_output.txt".to_string(),
            similarity_threshold: 95,
            similarity_metric: SimilarityMetric::Indel,
            template_path: None,
            pdf_id_prefix: "pdf".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 加载配置：默认值 → TOML 文件 → 环境变量
    ///
    /// 配置文件路径取自 `QDEDUP_CONFIG`，未设置时使用当前目录下的 `dedup.toml`（不存在则跳过）
    pub fn load() -> AppResult<Self> {
        let base = match std::env::var("QDEDUP_CONFIG") {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            Err(_) => Self::default(),
        };

        let config = base.with_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// 从 TOML 文件读取配置，缺省字段使用默认值
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::file_read_failed(display.clone(), e))?;
        Self::from_toml_str(&content).map_err(|source| {
            AppError::File(FileError::TomlParseFailed {
                path: display,
                source,
            })
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    fn with_env_overrides(mut self) -> AppResult<Self> {
        if let Ok(v) = std::env::var("PDF_PATH") {
            self.pdf_path = v;
        }
        if let Ok(v) = std::env::var("JSON_PATH") {
            self.json_path = v;
        }
        if let Ok(v) = std::env::var("PDF_TEXT_OUTPUT") {
            self.pdf_text_output = v;
        }
        if let Ok(v) = std::env::var("PDF_JSON_OUTPUT") {
            self.pdf_json_output = v;
        }
        if let Ok(v) = std::env::var("JSON_OUTPUT") {
            self.json_output = v;
        }
        if let Ok(v) = std::env::var("REPORT_PATH") {
            self.report_path = v;
        }
        if let Ok(v) = std::env::var("TEMPLATE_PATH") {
            self.template_path = Some(v);
        }
        if let Ok(v) = std::env::var("PDF_ID_PREFIX") {
            self.pdf_id_prefix = v;
        }
        if let Some(threshold) = env_parse::<u32>("SIMILARITY_THRESHOLD", "整数")? {
            self.similarity_threshold = u8::try_from(threshold)
                .ok()
                .filter(|t| *t <= 100)
                .ok_or(ConfigError::ThresholdOutOfRange(threshold))?;
        }
        if let Ok(v) = std::env::var("SIMILARITY_METRIC") {
            self.similarity_metric = v.parse()?;
        }
        if let Some(verbose) = env_parse::<bool>("VERBOSE_LOGGING", "布尔值")? {
            self.verbose_logging = verbose;
        }
        Ok(self)
    }

    /// 校验配置取值
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.similarity_threshold > 100 {
            return Err(ConfigError::ThresholdOutOfRange(
                self.similarity_threshold as u32,
            ));
        }
        if self.pdf_id_prefix.trim().is_empty() {
            return Err(ConfigError::EmptyIdPrefix);
        }
        Ok(())
    }
}

/// 读取并解析环境变量，未设置时返回 `None`
fn env_parse<T: FromStr>(var_name: &str, expected_type: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(var_name) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert_eq!(config.similarity_threshold, 95);
        assert_eq!(config.similarity_metric, SimilarityMetric::Indel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            similarity_threshold = 80
            similarity_metric = "levenshtein"
            report_path = "out/report.txt"
            "#,
        )
        .unwrap();

        assert_eq!(config.similarity_threshold, 80);
        assert_eq!(config.similarity_metric, SimilarityMetric::Levenshtein);
        assert_eq!(config.report_path, "out/report.txt");
        assert_eq!(config.pdf_id_prefix, "pdf");
    }

    #[test]
    fn test_threshold_above_100_is_rejected() {
        let config = Config::from_toml_str("similarity_threshold = 101").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ThresholdOutOfRange(101))
        ));
    }

    #[test]
    fn test_empty_prefix_is_rejected() {
        let config = Config {
            pdf_id_prefix: "  ".to_string(),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::EmptyIdPrefix)));
    }
}
