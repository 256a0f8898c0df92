//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责按顺序调度各个流程，是整个系统的"指挥中心"。
//!
//! ### `app` - 应用主流程
//! - 持有配置，加载文档模板
//! - 运行 PDF / JSON 两个流程，单个来源失败不影响另一个
//! - 加载可比较题目，调用重复检测
//! - 写出报告，输出最终统计
//!
//! ## 层次关系
//!
//! ```text
//! app (两个来源 + 检测 + 报告)
//!     ↓
//! workflow::PdfQuestionFlow / JsonQuestionFlow (处理单个来源)
//!     ↓
//! services (能力层：清洗 / 分区 / 解析 / 相似度 / 报告)
//!     ↓
//! infrastructure (基础设施：PageSource)
//! ```
//!
//! ## 设计原则
//!
//! 1. **向下依赖**：编排层 → workflow → services → infrastructure
//! 2. **无业务逻辑**：只做调度和统计，不做具体文本判断

pub mod app;

pub use app::{App, DetectionOutcome, RunOutcome};
