use serde::{Deserialize, Serialize};

/// 题目类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionType {
    /// 选择题
    #[serde(rename = "MCQ")]
    MultipleChoice,
    /// 简答题（两三句话作答）
    #[serde(rename = "Short Answer")]
    ShortAnswer,
    /// 问答题
    #[serde(rename = "Long Answer")]
    LongAnswer,
}

impl QuestionType {
    /// 全部题型，按文档中的出现顺序
    pub const ALL: [QuestionType; 3] = [
        QuestionType::MultipleChoice,
        QuestionType::ShortAnswer,
        QuestionType::LongAnswer,
    ];

    pub fn label(self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "MCQ",
            QuestionType::ShortAnswer => "Short Answer",
            QuestionType::LongAnswer => "Long Answer",
        }
    }

    pub fn is_multiple_choice(self) -> bool {
        self == QuestionType::MultipleChoice
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 从 PDF 解析出的题目
///
/// 序列化字段顺序固定为 `questionNUM`, `questionType`, `question`，其后是题型相关字段。
/// 选择题带 `options`，非选择题带 `answerKeyword`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    #[serde(rename = "questionNUM")]
    pub id: String,

    #[serde(rename = "questionType")]
    pub question_type: QuestionType,

    pub question: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,

    #[serde(rename = "correctAnswer", default)]
    pub correct_answer: String,

    #[serde(
        rename = "answerKeyword",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub answer_keywords: Option<Vec<String>>,
}

impl QuestionRecord {
    /// 按题型创建记录，保证选择题一定有 `options`、非选择题一定有 `answerKeyword`
    pub fn new(
        id: String,
        question_type: QuestionType,
        question: String,
        options: Vec<String>,
        correct_answer: String,
        answer_keywords: Vec<String>,
    ) -> Self {
        let (options, answer_keywords) = if question_type.is_multiple_choice() {
            (Some(options), None)
        } else {
            (None, Some(answer_keywords))
        };

        Self {
            id,
            question_type,
            question,
            options,
            correct_answer,
            answer_keywords,
        }
    }
}

/// 参与相似度比较的题目（已规范化）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparableQuestion {
    pub id: String,
    /// 去首尾空白、转小写、合并连续空白后的题干
    pub text: String,
}

/// 跨来源的重复题目对
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicatePair {
    /// 来源1中的题号
    pub left_id: String,
    /// 来源2中的题号
    pub right_id: String,
}

impl DuplicatePair {
    pub fn new(left_id: impl Into<String>, right_id: impl Into<String>) -> Self {
        Self {
            left_id: left_id.into(),
            right_id: right_id.into(),
        }
    }
}

impl std::fmt::Display for DuplicatePair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.left_id, self.right_id)
    }
}

/// 加载时被跳过的条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedItem {
    /// 条目在列表中的位置（从1开始）
    pub index: usize,
    /// 条目自带的题号
    pub id: Option<String>,
    pub reason: String,
}

impl std::fmt::Display for SkippedItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.id {
            Some(id) => write!(f, "条目 #{} ({}): {}", self.index, id, self.reason),
            None => write!(f, "条目 #{}: {}", self.index, self.reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mcq_field_order() {
        let record = QuestionRecord::new(
            "pdf_1".to_string(),
            QuestionType::MultipleChoice,
            "Pick one".to_string(),
            vec!["Apple".to_string(), "Banana".to_string()],
            "Banana".to_string(),
            Vec::new(),
        );

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"questionNUM":"pdf_1","questionType":"MCQ","question":"Pick one","options":["Apple","Banana"],"correctAnswer":"Banana"}"#
        );
    }

    #[test]
    fn test_short_answer_has_keywords_not_options() {
        let record = QuestionRecord::new(
            "pdf_2".to_string(),
            QuestionType::ShortAnswer,
            "What is X?".to_string(),
            vec!["ignored".to_string()],
            "It is Y.".to_string(),
            Vec::new(),
        );

        assert_eq!(record.options, None);
        assert_eq!(record.answer_keywords, Some(Vec::new()));

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"questionNUM":"pdf_2","questionType":"Short Answer","question":"What is X?","correctAnswer":"It is Y.","answerKeyword":[]}"#
        );
    }

    #[test]
    fn test_record_survives_json_round_trip() {
        let record = QuestionRecord::new(
            "pdf_7".to_string(),
            QuestionType::LongAnswer,
            "Explain refraction — with “quotes”".to_string(),
            Vec::new(),
            "Light bends.\nSpeed changes.".to_string(),
            vec!["bending".to_string(), "speed".to_string()],
        );

        let json = serde_json::to_string_pretty(&record).unwrap();
        let back: QuestionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
