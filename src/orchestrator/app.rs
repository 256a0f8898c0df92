//! 应用主流程 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：持有配置，加载文档模板
//! 2. **来源准备**：依次运行 PDF 提取流程和 JSON 规范化流程
//! 3. **题目加载**：读取两个流程的输出，转成可比较的题目
//! 4. **重复检测**：跨来源两两比较
//! 5. **报告输出**：写出报告并汇总统计
//!
//! 单个来源失败只记录日志，该来源按空处理；
//! 任一来源为空时停止检测，不写报告。

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::AppError;
use crate::infrastructure::open_page_source;
use crate::models::loaders::json_loader::file_name_of;
use crate::models::loaders::{load_comparable_questions, load_template_or_default};
use crate::models::question::{ComparableQuestion, DuplicatePair};
use crate::models::template::DocumentTemplate;
use crate::services::json_normalizer::NormalizeStats;
use crate::services::{DuplicateDetector, DuplicateReport, ReportWriter};
use crate::utils::logging::{log_stage, log_startup, print_final_stats};
use crate::workflow::{JsonQuestionFlow, PdfFlowStats, PdfQuestionFlow};

/// 检测阶段的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectionOutcome {
    /// 完成比较并写出报告
    Reported { pairs: Vec<DuplicatePair> },
    /// 数据不足，未比较、未写报告
    Halted { left: usize, right: usize },
}

/// 一次运行的汇总
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// PDF 流程统计（失败时为 `None`）
    pub pdf: Option<PdfFlowStats>,
    /// JSON 流程统计（失败时为 `None`）
    pub json: Option<NormalizeStats>,
    pub left_count: usize,
    pub right_count: usize,
    pub detection: DetectionOutcome,
}

impl RunOutcome {
    pub fn pairs(&self) -> &[DuplicatePair] {
        match &self.detection {
            DetectionOutcome::Reported { pairs } => pairs,
            DetectionOutcome::Halted { .. } => &[],
        }
    }
}

/// 应用主结构
pub struct App {
    config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// 运行完整流程
    pub async fn run(&self) -> Result<RunOutcome> {
        log_startup(&self.config);

        let template = load_template_or_default(self.config.template_path.as_deref())
            .await
            .context("加载文档模板失败")?;

        log_stage(1, "提取 PDF 题目");
        let pdf = self.run_pdf_flow(&template).await;

        log_stage(2, "规范化 JSON 题目");
        let json = self.run_json_flow().await;

        log_stage(3, "加载可比较题目");
        let left_path = Path::new(&self.config.pdf_json_output);
        let right_path = Path::new(&self.config.json_output);
        let left = if pdf.is_some() {
            load_source(left_path).await
        } else {
            Vec::new()
        };
        let right = if json.is_some() {
            load_source(right_path).await
        } else {
            Vec::new()
        };

        log_stage(4, "检测重复题目");
        let detector =
            DuplicateDetector::new(self.config.similarity_threshold, self.config.similarity_metric);

        let pairs = match detector.detect(&left, &right).map_err(AppError::from) {
            Ok(pairs) => pairs,
            Err(e) if e.is_insufficient_data() => {
                error!("❌ {}，Execution halted", e);
                return Ok(RunOutcome {
                    pdf,
                    json,
                    left_count: left.len(),
                    right_count: right.len(),
                    detection: DetectionOutcome::Halted {
                        left: left.len(),
                        right: right.len(),
                    },
                });
            }
            Err(e) => return Err(e.into()),
        };
        info!("✓ 找到 {} 对重复题目", pairs.len());

        log_stage(5, "写出报告");
        let report = DuplicateReport {
            left_source: file_name_of(left_path),
            right_source: file_name_of(right_path),
            threshold: detector.threshold(),
            pairs,
            left_count: left.len(),
            right_count: right.len(),
            generated_at: chrono::Local::now(),
        };
        ReportWriter::with_path(&self.config.report_path)
            .write(&report)
            .await
            .with_context(|| format!("写入报告失败: {}", self.config.report_path))?;

        print_final_stats(
            report.left_count,
            report.right_count,
            report.pairs.len(),
            &self.config.report_path,
        );

        Ok(RunOutcome {
            pdf,
            json,
            left_count: report.left_count,
            right_count: report.right_count,
            detection: DetectionOutcome::Reported {
                pairs: report.pairs,
            },
        })
    }

    async fn run_pdf_flow(&self, template: &DocumentTemplate) -> Option<PdfFlowStats> {
        let flow = PdfQuestionFlow::from_config(&self.config, template);
        let result = match open_page_source(Path::new(&self.config.pdf_path)) {
            Ok(source) => flow.run(source.as_ref()).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(stats) => {
                info!(
                    "✓ PDF: {} 页, {} 个分区, {} 道题目",
                    stats.pages, stats.sections, stats.questions
                );
                Some(stats)
            }
            Err(e) => {
                error!("❌ PDF 处理失败: {}", e);
                None
            }
        }
    }

    async fn run_json_flow(&self) -> Option<NormalizeStats> {
        let flow = JsonQuestionFlow::from_config(&self.config);
        match flow.run(Path::new(&self.config.json_path)).await {
            Ok(stats) => Some(stats),
            Err(e) => {
                error!("❌ JSON 处理失败: {}", e);
                None
            }
        }
    }
}

/// 加载一个来源；缺失或格式错误时按空来源处理
async fn load_source(path: &Path) -> Vec<ComparableQuestion> {
    match load_comparable_questions(path).await {
        Ok(loaded) => loaded.questions,
        Err(AppError::Input(e)) => {
            warn!("⚠️ {}，该来源按空处理", e);
            Vec::new()
        }
        Err(e) => {
            error!("❌ 加载失败: {}，该来源按空处理", e);
            Vec::new()
        }
    }
}
