//! 文档模板
//!
//! 描述固定版式试卷的页眉横幅、被拆行的标题和三个题型分区标记

use crate::models::question::QuestionType;
use serde::{Deserialize, Serialize};

/// 被 PDF 提取拆成两行的标题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitMarker {
    /// 第一行内容（去首尾空白后完全相等）
    pub head: String,
    /// 第二行内容
    pub tail: String,
}

impl SplitMarker {
    pub fn merged(&self) -> String {
        format!("{} {}", self.head, self.tail)
    }
}

/// 三个题型分区的标记行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionMarkers {
    pub multiple_choice: String,
    pub short_answer: String,
    pub long_answer: String,
}

impl SectionMarkers {
    pub fn marker_for(&self, question_type: QuestionType) -> &str {
        match question_type {
            QuestionType::MultipleChoice => &self.multiple_choice,
            QuestionType::ShortAnswer => &self.short_answer,
            QuestionType::LongAnswer => &self.long_answer,
        }
    }

    /// 该行是否恰好是某个分区标记
    pub fn is_marker(&self, line: &str) -> bool {
        let line = line.trim();
        QuestionType::ALL
            .iter()
            .any(|qt| self.marker_for(*qt) == line)
    }
}

/// 文档模板
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentTemplate {
    /// 需要原样删除的页眉/章节横幅（按顺序逐个删除，空白必须完全一致）
    #[serde(default)]
    pub boilerplate_blocks: Vec<String>,
    #[serde(default)]
    pub split_markers: Vec<SplitMarker>,
    pub section_markers: SectionMarkers,
}

impl Default for DocumentTemplate {
    fn default() -> Self {
        Self {
            boilerplate_blocks: vec![
                "CBSE – GRADE – 10 \nSCIENCE \nCHAPTER - 9 LIGHT: REFLECTION AND REFRACTION"
                    .to_string(),
                "CHAPTER 9 \nLIGHT: REFLECTION AND REFRACTION".to_string(),
                "--- PAGE BREAK ---\nCBSE – GRADE – 10 \nSCIENCE \nCHAPTER - 9 LIGHT: REFLECTION AND REFRACTION"
                    .to_string(),
            ],
            split_markers: vec![SplitMarker {
                head: "ANSWER THE FOLLOWING QUESTIONS WITH TWO OR THREE".to_string(),
                tail: "SENTENCES".to_string(),
            }],
            section_markers: SectionMarkers {
                multiple_choice: "MULTIPLE CHOICE QUESTIONS".to_string(),
                short_answer: "ANSWER THE FOLLOWING QUESTIONS WITH TWO OR THREE SENTENCES"
                    .to_string(),
                long_answer: "ANSWER THE FOLLOWING QUESTIONS BRIEFLY".to_string(),
            },
        }
    }
}
