//! 文本工具模块
//!
//! 两个数据源共用同一套比较用规范化，保证相似度计算口径一致

/// 合并连续空白（含换行）为单个空格，并去除首尾空白
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 比较用规范化：去首尾空白、转小写、合并连续空白
pub fn normalize_for_comparison(text: &str) -> String {
    collapse_whitespace(&text.to_lowercase())
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大字符数
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
