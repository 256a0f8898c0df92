//! 文本清洗服务 - 业务能力层
//!
//! 只负责"把一页原始文本变成干净的逻辑行"，不关心分区和题目

use crate::models::template::{DocumentTemplate, SplitMarker};
use once_cell::sync::Lazy;
use regex::Regex;

/// 单独成行的页码（1-3 位数字）
static PAGE_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{1,3}\s*$").unwrap());

/// 只有项目符号/破折号/星号的行
static BULLET_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[•\-–—*]+\s*$").unwrap());

/// 文本清洗服务
///
/// 职责：
/// - 统一换行符
/// - 原样删除页眉横幅
/// - 合并被拆成两行的标题
/// - 过滤空行和噪声行
pub struct TextNormalizer {
    boilerplate_blocks: Vec<String>,
    split_markers: Vec<SplitMarker>,
}

impl TextNormalizer {
    pub fn new(template: &DocumentTemplate) -> Self {
        Self {
            boilerplate_blocks: template.boilerplate_blocks.clone(),
            split_markers: template.split_markers.clone(),
        }
    }

    /// 清洗一页文本
    ///
    /// # 参数
    /// - `raw_text`: 提取出的原始页面文本
    ///
    /// # 返回
    /// 去噪后的逻辑行（已去首尾空白，不含空行）
    pub fn normalize_page(&self, raw_text: &str) -> Vec<String> {
        let text = self.remove_boilerplate(raw_text);
        let lines: Vec<&str> = text.split('\n').collect();

        self.merge_split_lines(&lines)
            .into_iter()
            .filter(|line| !is_noise_line(line))
            .collect()
    }

    /// 统一换行符后按顺序删除每个横幅
    fn remove_boilerplate(&self, raw_text: &str) -> String {
        let mut text = raw_text.replace("\r\n", "\n").replace('\r', "\n");
        for block in &self.boilerplate_blocks {
            if !block.is_empty() {
                text = text.replace(block.as_str(), "");
            }
        }
        text
    }

    /// 合并被拆行的标题，同时去除每行首尾空白
    fn merge_split_lines(&self, lines: &[&str]) -> Vec<String> {
        let mut merged = Vec::with_capacity(lines.len());
        let mut i = 0;

        while i < lines.len() {
            let line = lines[i].trim();
            let next = lines.get(i + 1).map(|l| l.trim());

            let split = self
                .split_markers
                .iter()
                .find(|m| m.head == line && next == Some(m.tail.as_str()));

            match split {
                Some(marker) => {
                    merged.push(marker.merged());
                    i += 2;
                }
                None => {
                    merged.push(line.to_string());
                    i += 1;
                }
            }
        }

        merged
    }
}

/// 空行、页码行、纯符号行
pub fn is_noise_line(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || PAGE_NUMBER.is_match(line) || BULLET_ONLY.is_match(line)
}
