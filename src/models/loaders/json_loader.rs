//! JSON 题目文件读写
//!
//! 题目列表既可以是顶层数组，也可以是顶层对象中第一个数组类型的字段

use crate::error::{AppError, AppResult, FileError};
use crate::models::question::{ComparableQuestion, QuestionRecord, SkippedItem};
use crate::utils::text::normalize_for_comparison;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use tokio::fs;
use tracing::{info, warn};

/// 加载结果：可比较的题目 + 被跳过的条目
#[derive(Debug, Default)]
pub struct LoadedQuestions {
    pub questions: Vec<ComparableQuestion>,
    pub skipped: Vec<SkippedItem>,
}

/// 读取并解析 JSON 文件
///
/// # 返回
/// - 文件不存在: `InputError::MissingInput`
/// - 不是合法 JSON: `InputError::MalformedInput`
pub async fn read_json_document(path: &Path) -> AppResult<Value> {
    let display = path.display().to_string();
    if !fs::try_exists(path).await.unwrap_or(false) {
        return Err(AppError::missing_input(display));
    }

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(display.clone(), e))?;

    serde_json::from_str(&content)
        .map_err(|e| AppError::malformed_input(display, format!("无法解析JSON: {}", e)))
}

/// 定位题目列表
pub fn locate_question_list(document: &Value) -> Option<&Vec<Value>> {
    match document {
        Value::Array(items) => Some(items),
        Value::Object(map) => map.values().find_map(Value::as_array),
        _ => None,
    }
}

/// 定位题目列表（可变）
pub fn locate_question_list_mut(document: &mut Value) -> Option<&mut Vec<Value>> {
    match document {
        Value::Array(items) => Some(items),
        Value::Object(map) => map.values_mut().find_map(Value::as_array_mut),
        _ => None,
    }
}

/// 从题目列表中提取可比较的题目
///
/// 非对象条目、缺少题干或题干为空白的条目会被跳过并记录
pub fn collect_comparable_questions(items: &[Value]) -> LoadedQuestions {
    let mut loaded = LoadedQuestions::default();

    for (idx, item) in items.iter().enumerate() {
        let index = idx + 1;

        let Some(object) = item.as_object() else {
            loaded.skipped.push(SkippedItem {
                index,
                id: None,
                reason: "不是对象".to_string(),
            });
            continue;
        };

        let id = object.get("questionNUM").map(id_text);

        let text = object
            .get("question")
            .and_then(Value::as_str)
            .map(normalize_for_comparison)
            .filter(|text| !text.is_empty());

        match text {
            Some(text) => loaded.questions.push(ComparableQuestion {
                id: id.unwrap_or_else(|| format!("UNKNOWN_ID_at_item_#{}", index)),
                text,
            }),
            None => loaded.skipped.push(SkippedItem {
                index,
                id: Some(id.unwrap_or_else(|| format!("NO_ID_at_item_#{}", index))),
                reason: "缺少题干 'question'".to_string(),
            }),
        }
    }

    loaded
}

/// 题号转成文本：字符串原样取出，其他类型按 JSON 文本表示
fn id_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// 加载一个数据源的可比较题目
///
/// # 参数
/// - `path`: JSON 文件路径
///
/// # 返回
/// 文件缺失、格式错误或找不到非空题目列表时返回错误；单个条目的问题只记录不报错
pub async fn load_comparable_questions(path: &Path) -> AppResult<LoadedQuestions> {
    let file_name = file_name_of(path);
    info!("--- 正在处理文件: {} ---", file_name);

    let document = read_json_document(path).await?;

    let items = locate_question_list(&document)
        .filter(|items| !items.is_empty())
        .ok_or_else(|| AppError::malformed_input(path.display().to_string(), "找不到题目列表"))?;

    info!("  > 列表中共有 {} 个条目", items.len());

    let loaded = collect_comparable_questions(items);
    for skipped in &loaded.skipped {
        warn!("  > 跳过 {}", skipped);
    }

    info!(
        "  > 成功处理 {} 道题目 (跳过 {} 个)",
        loaded.questions.len(),
        loaded.skipped.len()
    );

    Ok(loaded)
}

/// 读取 PDF 流程输出的题目记录
pub async fn load_question_records(path: &Path) -> AppResult<Vec<QuestionRecord>> {
    let document = read_json_document(path).await?;
    serde_json::from_value(document).map_err(|e| {
        AppError::malformed_input(path.display().to_string(), format!("题目记录格式错误: {}", e))
    })
}

/// 以 4 空格缩进写出 JSON（非 ASCII 字符原样保留），必要时创建父目录
pub async fn write_json_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> AppResult<()> {
    let display = path.display().to_string();

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer).map_err(|source| {
        AppError::File(FileError::JsonWriteFailed {
            path: display.clone(),
            source,
        })
    })?;
    buf.push(b'\n');

    write_bytes(path, &buf).await
}

/// 写出文件，必要时创建父目录
pub async fn write_bytes(path: &Path, bytes: &[u8]) -> AppResult<()> {
    let display = path.display().to_string();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::file_write_failed(display.clone(), e))?;
    }
    fs::write(path, bytes)
        .await
        .map_err(|e| AppError::file_write_failed(display, e))
}

/// 取文件名用于日志和报告
pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InputError;
    use serde_json::json;

    #[test]
    fn test_locate_top_level_array() {
        let doc = json!([{ "question": "a" }]);
        assert_eq!(locate_question_list(&doc).map(Vec::len), Some(1));
    }

    #[test]
    fn test_locate_first_array_field_in_order() {
        let doc = json!({
            "title": "Chapter 9",
            "questions": [{ "question": "a" }, { "question": "b" }],
            "extra": [1]
        });
        assert_eq!(locate_question_list(&doc).map(Vec::len), Some(2));
        assert!(locate_question_list(&json!({ "title": "none" })).is_none());
        assert!(locate_question_list(&json!("text")).is_none());
    }

    #[test]
    fn test_collect_skips_bad_items_and_keeps_going() {
        let items = vec![
            json!({ "questionNUM": "json_1", "question": "  What is   LIGHT? " }),
            json!("not an object"),
            json!({ "questionNUM": "json_3", "question": "   " }),
            json!({ "question": 42 }),
            json!({ "question": "Define focus" }),
        ];

        let loaded = collect_comparable_questions(&items);

        assert_eq!(
            loaded.questions,
            vec![
                ComparableQuestion {
                    id: "json_1".to_string(),
                    text: "what is light?".to_string(),
                },
                ComparableQuestion {
                    id: "UNKNOWN_ID_at_item_#5".to_string(),
                    text: "define focus".to_string(),
                },
            ]
        );

        let skipped: Vec<(usize, Option<&str>)> = loaded
            .skipped
            .iter()
            .map(|s| (s.index, s.id.as_deref()))
            .collect();
        assert_eq!(
            skipped,
            vec![
                (2, None),
                (3, Some("json_3")),
                (4, Some("NO_ID_at_item_#4")),
            ]
        );
    }

    #[test]
    fn test_non_string_ids_are_kept() {
        let items = vec![
            json!({ "questionNUM": 7, "question": "What is light?" }),
            json!({ "questionNUM": 8, "question": "" }),
        ];

        let loaded = collect_comparable_questions(&items);

        assert_eq!(loaded.questions.len(), 1);
        assert_eq!(loaded.questions[0].id, "7");
        assert_eq!(loaded.skipped[0].id.as_deref(), Some("8"));
    }

    #[tokio::test]
    async fn test_missing_file_is_missing_input() {
        let err = load_comparable_questions(Path::new("definitely/not/here.json"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Input(InputError::MissingInput { .. })
        ));
    }

    #[tokio::test]
    async fn test_invalid_json_and_missing_list_are_malformed() {
        let dir = tempfile::tempdir().unwrap();

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{ not json").unwrap();
        let err = load_comparable_questions(&broken).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Input(InputError::MalformedInput { .. })
        ));

        let no_list = dir.path().join("no_list.json");
        std::fs::write(&no_list, r#"{ "questions": [] }"#).unwrap();
        let err = load_comparable_questions(&no_list).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Input(InputError::MalformedInput { .. })
        ));
    }

    #[test]
    fn test_write_uses_four_space_indent_and_literal_unicode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.json");

        tokio_test::block_on(write_json_pretty(
            &path,
            &json!([{ "question": "光 – refraction" }]),
        ))
        .unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\n    {\n        \"question\": \"光 – refraction\"\n    }"));
    }
}
