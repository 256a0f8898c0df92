//! 分区服务 - 业务能力层
//!
//! 负责两件事：
//! 1. 结构整理：插入答案分隔行、丢弃 Explanation 段、在新题号前插入空行
//! 2. 按三个分区标记切出选择题 / 简答题 / 问答题的行区间
//!
//! 逐行扫描的状态是一个显式的 [`SegmenterState`]，通过 fold 传递，便于单独测试

use crate::models::question::QuestionType;
use crate::models::template::SectionMarkers;
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

/// 题干与答案之间的分隔行
pub const ANSWER_SEPARATOR: &str = "-----------------------------";

/// 顶层题号：`<数字>. `
static TOP_LEVEL_QUESTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{1,3})\.\s+").unwrap());

/// 选择题选项：`A) `
static MCQ_OPTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]\)\s").unwrap());

/// 结构整理时的扫描状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SegmenterState {
    /// 处于 `Answer:` 之后、下一道顶层题目之前
    pub inside_answer: bool,
    /// 正在丢弃 `Explanation:` 段
    pub skipping_explanation: bool,
    /// 当前顶层题号
    pub current_question: Option<u32>,
}

/// 一个题型分区
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub question_type: QuestionType,
    pub lines: Vec<String>,
}

/// 分区服务
pub struct SectionSegmenter {
    markers: SectionMarkers,
}

impl SectionSegmenter {
    pub fn new(markers: SectionMarkers) -> Self {
        Self { markers }
    }

    /// 完整整理：结构整理 + 题号间距
    pub fn segment(&self, lines: &[String]) -> Vec<String> {
        self.insert_question_spacing(&self.structure(lines))
    }

    /// 结构整理（第一遍）
    pub fn structure(&self, lines: &[String]) -> Vec<String> {
        let (_, out) = lines.iter().fold(
            (SegmenterState::default(), Vec::with_capacity(lines.len())),
            |(state, mut out), line| {
                let state = self.step(state, line.trim(), &mut out);
                (state, out)
            },
        );
        out
    }

    /// 处理一行，返回新的状态
    pub fn step(&self, mut state: SegmenterState, line: &str, out: &mut Vec<String>) -> SegmenterState {
        if line.is_empty() {
            return state;
        }

        if line.starts_with("Explanation:") {
            state.skipping_explanation = true;
            return state;
        }

        if state.skipping_explanation {
            let ends_explanation = MCQ_OPTION.is_match(line)
                || TOP_LEVEL_QUESTION.is_match(line)
                || line.starts_with("Answer:")
                || self.markers.is_marker(line);
            if !ends_explanation {
                return state;
            }
            state.skipping_explanation = false;
        }

        if line.starts_with("Answer:") {
            out.push(ANSWER_SEPARATOR.to_string());
            out.push(line.to_string());
            state.inside_answer = true;
            return state;
        }

        if self.markers.is_marker(line) {
            push_blank(out);
            out.push(line.to_string());
            out.push(String::new());
            return SegmenterState::default();
        }

        if let Some(number) = top_level_number(line) {
            // 答案中的小点编号（不大于当前题号）不算新题
            let is_new_question =
                !state.inside_answer || state.current_question.map_or(true, |c| number > c);
            if is_new_question {
                push_blank(out);
                state.inside_answer = false;
                state.current_question = Some(number);
            }
        }

        out.push(line.to_string());
        state
    }

    /// 题号间距（第二遍）
    ///
    /// 只有题号恰好等于上一题号 + 1 时才在前面插入空行，避免答案中的小点编号造成误断。
    /// 整个文档共用一个计数，从 0 开始。
    pub fn insert_question_spacing(&self, lines: &[String]) -> Vec<String> {
        let mut final_lines = Vec::with_capacity(lines.len());
        let mut last_question_number = 0;

        for line in lines {
            if let Some(number) = top_level_number(line) {
                if number == last_question_number + 1 {
                    push_blank(&mut final_lines);
                    last_question_number = number;
                }
            }
            final_lines.push(line.clone());
        }

        final_lines
    }

    /// 按分区标记切分
    ///
    /// 空行先被丢弃；每个标记取第一次出现的位置（优先整行匹配，没有再退回子串匹配），
    /// 区间延伸到其后最近的另一个标记或文档末尾。缺失的标记得到空分区。
    ///
    /// # 返回
    /// 按选择题、简答题、问答题顺序的三个分区
    pub fn split_sections(&self, lines: &[String]) -> Vec<Section> {
        let content: Vec<&str> = lines
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .collect();

        let starts: Vec<(QuestionType, Option<usize>)> = QuestionType::ALL
            .iter()
            .map(|qt| (*qt, self.find_marker(&content, self.markers.marker_for(*qt))))
            .collect();

        starts
            .iter()
            .map(|(question_type, start)| {
                let lines = start
                    .map(|start| section_range(start, &starts, content.len()))
                    .map(|range| content[range].iter().map(|l| l.to_string()).collect::<Vec<_>>())
                    .unwrap_or_default();
                Section {
                    question_type: *question_type,
                    lines,
                }
            })
            .collect()
    }

    fn find_marker(&self, content: &[&str], marker: &str) -> Option<usize> {
        content
            .iter()
            .position(|line| *line == marker)
            .or_else(|| content.iter().position(|line| line.contains(marker)))
    }
}

/// 标记之后到下一个标记（或文末）之间的行
fn section_range(start: usize, starts: &[(QuestionType, Option<usize>)], len: usize) -> Range<usize> {
    let end = starts
        .iter()
        .filter_map(|(_, s)| *s)
        .filter(|s| *s > start)
        .min()
        .unwrap_or(len);
    (start + 1)..end
}

/// 顶层题号，非题号行返回 `None`
pub fn top_level_number(line: &str) -> Option<u32> {
    TOP_LEVEL_QUESTION
        .captures(line)
        .and_then(|caps| caps[1].parse().ok())
}

/// 上一行不是空行时插入空行
fn push_blank(out: &mut Vec<String>) {
    if out.last().is_some_and(|l| !l.is_empty()) {
        out.push(String::new());
    }
}
