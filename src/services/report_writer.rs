//! 报告写入服务 - 业务能力层
//!
//! 只负责"把检测结果写成纯文本报告"，不关心结果从哪里来

use crate::error::AppResult;
use crate::models::loaders::json_loader::write_bytes;
use crate::models::question::DuplicatePair;
use chrono::{DateTime, Local};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 报告内容
#[derive(Debug, Clone)]
pub struct DuplicateReport {
    /// 来源1显示名（文件名）
    pub left_source: String,
    /// 来源2显示名（文件名）
    pub right_source: String,
    pub threshold: u8,
    pub pairs: Vec<DuplicatePair>,
    pub left_count: usize,
    pub right_count: usize,
    pub generated_at: DateTime<Local>,
}

/// 渲染为纯文本报告
impl fmt::Display for DuplicateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(52);

        writeln!(f, "{}", rule)?;
        writeln!(f, "        Duplicate Question Analysis Report")?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "Generated: {}\n", self.generated_at.format("%Y-%m-%d %H:%M:%S"))?;

        writeln!(f, "Analysis Parameters:")?;
        writeln!(f, "--------------------")?;
        writeln!(f, "Source File 1: {}", self.left_source)?;
        writeln!(f, "Source File 2: {}", self.right_source)?;
        writeln!(f, "Similarity Threshold: {}%\n", self.threshold)?;

        writeln!(f, "Duplicate Pairs Found:")?;
        writeln!(f, "----------------------")?;
        if self.pairs.is_empty() {
            writeln!(f, "No duplicate pairs were identified between the two files.\n")?;
        } else {
            for (i, pair) in self.pairs.iter().enumerate() {
                writeln!(
                    f,
                    "Pair {}: Question '{}' (from {}) is a duplicate of Question '{}' (from {}).",
                    i + 1,
                    pair.left_id,
                    self.left_source,
                    pair.right_id,
                    self.right_source
                )?;
            }
            writeln!(f)?;
        }

        writeln!(f, "Analysis Summary:")?;
        writeln!(f, "-----------------")?;
        writeln!(f, "Questions Analyzed from {}: {}", self.left_source, self.left_count)?;
        writeln!(f, "Questions Analyzed from {}: {}", self.right_source, self.right_count)?;
        writeln!(f, "Total Duplicate Pairs Identified: {}\n", self.pairs.len())?;
        writeln!(f, "{}", rule)
    }
}

/// 报告写入服务
pub struct ReportWriter {
    report_path: PathBuf,
}

impl ReportWriter {
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            report_path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.report_path
    }

    /// 写入报告（覆盖已有文件）
    pub async fn write(&self, report: &DuplicateReport) -> AppResult<()> {
        debug!(
            "写入报告: {} | 题目对 {}",
            self.report_path.display(),
            report.pairs.len()
        );
        write_bytes(&self.report_path, report.to_string().as_bytes()).await
    }
}
