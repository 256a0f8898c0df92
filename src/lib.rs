//! # Question Dedup
//!
//! 从固定版式的 PDF 试卷和 JSON 题库中提取题目，并找出两个来源之间的近似重复题
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 只暴露"页数 + 每页纯文本"的能力
//! - `PageSource` - `PdfDocument`（lopdf）/ `TextPages`（换页符分隔的文本）
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，尽量是纯函数
//! - `TextNormalizer` - 页眉、页码、噪声行清洗
//! - `SectionSegmenter` - 结构整理 + 题型分区
//! - `QuestionParser` - 题目块解析
//! - `DuplicateDetector` - 相似度打分与跨来源比较
//! - `JsonNormalizer` / `ReportWriter` - JSON 编号、报告输出
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个来源"的完整处理流程
//! - `PdfQuestionFlow` - 页面 → 清洗 → 分区 → 解析 → 输出
//! - `JsonQuestionFlow` - 读取 → 编号 → 输出
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/app` - 两个来源 + 重复检测 + 报告
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{open_page_source, PageSource};
pub use models::{ComparableQuestion, DuplicatePair, QuestionRecord, QuestionType};
pub use orchestrator::{App, DetectionOutcome, RunOutcome};
pub use workflow::{JsonQuestionFlow, PdfQuestionFlow};
