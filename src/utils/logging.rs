//! 日志工具模块
//!
//! 提供日志初始化和阶段输出的辅助函数
use crate::config::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化全局日志
///
/// `RUST_LOG` 优先；未设置时默认 `info`，`verbose` 为真时默认 `debug`。
/// 重复初始化会被忽略（测试中多次调用是安全的）。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `config`: 当前配置
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 题目提取与重复检测");
    info!("📄 PDF 来源: {}", config.pdf_path);
    info!("📋 JSON 来源: {}", config.json_path);
    info!(
        "🎯 相似度阈值: {}% ({})",
        config.similarity_threshold, config.similarity_metric
    );
    info!("{}", "=".repeat(60));
}

/// 记录阶段开始
///
/// # 参数
/// - `step`: 阶段序号
/// - `title`: 阶段名称
pub fn log_stage(step: usize, title: &str) {
    info!("\n{}", "─".repeat(60));
    info!("▶ 步骤 {}: {}", step, title);
    info!("{}", "─".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `left_count`: 来源1参与比较的题目数
/// - `right_count`: 来源2参与比较的题目数
/// - `pairs`: 重复题目对数量
/// - `report_path`: 报告路径
pub fn print_final_stats(left_count: usize, right_count: usize, pairs: usize, report_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("来源1题目: {}", left_count);
    info!("来源2题目: {}", right_count);
    info!("🔁 重复题目对: {}", pairs);
    info!("{}", "=".repeat(60));
    info!("\n报告已保存至: {}", report_path);
}
