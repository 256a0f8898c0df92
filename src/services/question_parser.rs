//! 题目解析服务 - 业务能力层
//!
//! 在单个分区内逐题扫描，拆出题干 / 选项 / 答案 / 关键词，生成 [`QuestionRecord`]

use crate::models::question::{QuestionRecord, QuestionType};
use crate::models::template::SectionMarkers;
use crate::services::section_segmenter::Section;
use once_cell::sync::Lazy;
use regex::Regex;

static NUMBERED_QUESTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)\.\s+(.*)").unwrap());
static KEYWORDS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^Keywords\s*[:：]").unwrap());
static SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-{3,}$").unwrap());
static MCQ_OPTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]\)\s+(.*)").unwrap());
static LEADING_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s*").unwrap());
static ANSWER_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^Answer:\s*").unwrap());
static OPTION_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]\)\s*").unwrap());

/// 一道题在扫描过程中收集到的原始行
#[derive(Debug, Default)]
struct QuestionBlock {
    body: Vec<String>,
    options: Vec<String>,
    answer: Vec<String>,
    keywords: Vec<String>,
}

/// 题目解析服务
///
/// 职责：
/// - 只处理一个分区的行
/// - 题号由调用方传入的计数器统一分配，跨分区连续
/// - 不丢弃题干为空的题目，由调用方决定
pub struct QuestionParser {
    markers: SectionMarkers,
    id_prefix: String,
}

impl QuestionParser {
    pub fn new(markers: SectionMarkers, id_prefix: impl Into<String>) -> Self {
        Self {
            markers,
            id_prefix: id_prefix.into(),
        }
    }

    /// 依次解析所有分区，题号从 1 开始
    pub fn parse_sections(&self, sections: &[Section]) -> Vec<QuestionRecord> {
        let mut counter = 1;
        sections
            .iter()
            .flat_map(|section| self.parse_section(&section.lines, section.question_type, &mut counter))
            .collect()
    }

    /// 解析单个分区
    ///
    /// # 参数
    /// - `lines`: 分区内的行（不含分区标记）
    /// - `question_type`: 分区题型
    /// - `counter`: 全局题号计数器，每生成一道题加一
    pub fn parse_section(
        &self,
        lines: &[String],
        question_type: QuestionType,
        counter: &mut usize,
    ) -> Vec<QuestionRecord> {
        let mut records = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let Some(number) = numbered_question(lines[i].trim()) else {
                i += 1;
                continue;
            };

            let (block, next) = self.scan_block(lines, i, number, question_type);
            i = next;

            records.push(self.build_record(block, question_type, *counter));
            *counter += 1;
        }

        records
    }

    /// 从 `start` 开始扫描一道题，返回收集结果和下一个待处理的位置
    fn scan_block(
        &self,
        lines: &[String],
        start: usize,
        number: u64,
        question_type: QuestionType,
    ) -> (QuestionBlock, usize) {
        let mut block = QuestionBlock::default();
        let mut i = start;

        // 题干（选择题的选项单独收集），直到分隔行
        while i < lines.len() && !is_separator(&lines[i]) {
            let line = lines[i].trim();
            match MCQ_OPTION.captures(line).filter(|_| question_type.is_multiple_choice()) {
                Some(caps) => block.options.push(caps[1].trim().to_string()),
                None => block.body.push(line.to_string()),
            }
            i += 1;
        }

        if i < lines.len() {
            i += 1;
        }

        // 答案，遇到更大的题号、分区标记或关键词行为止
        while i < lines.len() {
            let line = lines[i].trim();
            if self.ends_block(line, number) {
                break;
            }

            if let Some(m) = KEYWORDS.find(line) {
                let rest = line[m.end()..].trim();
                if !rest.is_empty() {
                    block.keywords.push(rest.to_string());
                }
                i += 1;

                while i < lines.len() {
                    let next = lines[i].trim();
                    if self.ends_block(next, number) {
                        break;
                    }
                    block.keywords.push(next.to_string());
                    i += 1;
                }
                break;
            }

            block.answer.push(line.to_string());
            i += 1;
        }

        (block, i)
    }

    /// 更大的题号或分区标记结束当前题；不大于当前题号的编号是答案里的小点
    fn ends_block(&self, line: &str, current: u64) -> bool {
        numbered_question(line).is_some_and(|n| n > current) || self.markers.is_marker(line)
    }

    fn build_record(
        &self,
        block: QuestionBlock,
        question_type: QuestionType,
        sequence: usize,
    ) -> QuestionRecord {
        let question = LEADING_NUMBER
            .replace(&block.body.join(" "), "")
            .trim()
            .to_string();

        let raw_answer = block.answer.join("\n");
        let answer = ANSWER_PREFIX.replace(raw_answer.trim(), "").into_owned();
        let correct_answer = if question_type.is_multiple_choice() {
            OPTION_PREFIX.replace(&answer, "").trim().to_string()
        } else {
            answer.trim().to_string()
        };

        let answer_keywords = block
            .keywords
            .join(", ")
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect();

        QuestionRecord::new(
            format!("{}_{}", self.id_prefix, sequence),
            question_type,
            question,
            block.options,
            correct_answer,
            answer_keywords,
        )
    }
}

fn numbered_question(line: &str) -> Option<u64> {
    NUMBERED_QUESTION
        .captures(line)
        .and_then(|caps| caps[1].parse().ok())
}

fn is_separator(line: &str) -> bool {
    SEPARATOR.is_match(line.trim())
}
