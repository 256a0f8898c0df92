//! PDF 题目提取流程 - 流程层
//!
//! 流程顺序：
//! 1. 逐页清洗（页眉、页码、噪声行、拆行标题）
//! 2. 整页拼接后做结构整理（分隔行、丢弃解析段、题号间距）
//! 3. 写出清洗后的文本
//! 4. 按题型分区 → 解析题目块 → 写出 JSON

use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::PageSource;
use crate::models::loaders::json_loader::{write_bytes, write_json_pretty};
use crate::models::question::QuestionRecord;
use crate::models::template::DocumentTemplate;
use crate::services::{QuestionParser, SectionSegmenter, TextNormalizer};

/// 一次提取的结果（尚未落盘）
#[derive(Debug, Default, Clone)]
pub struct PdfExtraction {
    /// 结构整理后的行
    pub cleaned_lines: Vec<String>,
    /// 非空分区数
    pub sections: usize,
    /// 题干非空的题目
    pub records: Vec<QuestionRecord>,
    /// 因题干为空被丢弃的题号
    pub dropped: Vec<String>,
}

/// 流程统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PdfFlowStats {
    pub pages: usize,
    pub sections: usize,
    pub questions: usize,
    pub dropped: usize,
}

/// PDF 题目提取流程
///
/// - 只编排 services，不直接做文本处理
/// - 不持有页面来源，由调用方传入
pub struct PdfQuestionFlow {
    normalizer: TextNormalizer,
    segmenter: SectionSegmenter,
    parser: QuestionParser,
    text_output: PathBuf,
    json_output: PathBuf,
}

impl PdfQuestionFlow {
    pub fn new(
        template: &DocumentTemplate,
        id_prefix: impl Into<String>,
        text_output: impl Into<PathBuf>,
        json_output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            normalizer: TextNormalizer::new(template),
            segmenter: SectionSegmenter::new(template.section_markers.clone()),
            parser: QuestionParser::new(template.section_markers.clone(), id_prefix),
            text_output: text_output.into(),
            json_output: json_output.into(),
        }
    }

    pub fn from_config(config: &Config, template: &DocumentTemplate) -> Self {
        Self::new(
            template,
            config.pdf_id_prefix.clone(),
            &config.pdf_text_output,
            &config.pdf_json_output,
        )
    }

    /// 从页面文本提取题目（纯计算，不读写文件）
    pub fn extract(&self, pages: &[String]) -> PdfExtraction {
        let normalized: Vec<String> = pages
            .iter()
            .flat_map(|page| self.normalizer.normalize_page(page))
            .collect();

        let cleaned_lines = self.segmenter.segment(&normalized);
        let sections = self.segmenter.split_sections(&cleaned_lines);

        let (records, empty): (Vec<_>, Vec<_>) = self
            .parser
            .parse_sections(&sections)
            .into_iter()
            .partition(|record| !record.question.trim().is_empty());

        PdfExtraction {
            cleaned_lines,
            sections: sections.iter().filter(|s| !s.lines.is_empty()).count(),
            records,
            dropped: empty.into_iter().map(|record| record.id).collect(),
        }
    }

    /// 运行完整流程并写出两个输出文件
    pub async fn run(&self, source: &dyn PageSource) -> AppResult<PdfFlowStats> {
        let pages = source.all_pages()?;
        info!("📄 读取 {} 页文本", pages.len());

        let extraction = self.extract(&pages);

        if extraction.sections == 0 {
            warn!("⚠️ 没有找到任何题型分区");
        }
        for id in &extraction.dropped {
            warn!("  > 丢弃题干为空的题目: {}", id);
        }

        let mut text = extraction.cleaned_lines.join("\n");
        text.push('\n');
        write_bytes(&self.text_output, text.as_bytes()).await?;
        info!("✓ 清洗后的文本已写入: {}", self.text_output.display());

        write_json_pretty(&self.json_output, &extraction.records).await?;
        info!(
            "✓ {} 道题目已写入: {}",
            extraction.records.len(),
            self.json_output.display()
        );

        Ok(PdfFlowStats {
            pages: pages.len(),
            sections: extraction.sections,
            questions: extraction.records.len(),
            dropped: extraction.dropped.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::TextPages;
    use crate::models::question::QuestionType;

    fn pages() -> Vec<String> {
        vec![
            "CBSE – GRADE – 10 \nSCIENCE \nCHAPTER - 9 LIGHT: REFLECTION AND REFRACTION\n\
             MULTIPLE CHOICE QUESTIONS\n\
             1. Light travels fastest in\n\
             A) glass\n\
             B) vacuum\n\
             Answer: B) vacuum\n\
             Explanation: nothing slows it down\n\
             1\n"
                .to_string(),
            "ANSWER THE FOLLOWING QUESTIONS WITH TWO OR THREE\n\
             SENTENCES\n\
             2. What is light?\n\
             Answer: A form of energy.\n\
             Keywords: energy, radiation\n\
             2\n"
                .to_string(),
        ]
    }

    fn flow(dir: &std::path::Path) -> PdfQuestionFlow {
        PdfQuestionFlow::new(
            &DocumentTemplate::default(),
            "pdf",
            dir.join("out.txt"),
            dir.join("out.json"),
        )
    }

    #[test]
    fn test_extract_across_pages() {
        let extraction = flow(std::path::Path::new(".")).extract(&pages());

        assert_eq!(extraction.sections, 2);
        assert!(extraction.dropped.is_empty());
        assert_eq!(extraction.records.len(), 2);

        let mcq = &extraction.records[0];
        assert_eq!(mcq.id, "pdf_1");
        assert_eq!(mcq.question_type, QuestionType::MultipleChoice);
        assert_eq!(mcq.question, "Light travels fastest in");
        assert_eq!(mcq.correct_answer, "vacuum");

        let short = &extraction.records[1];
        assert_eq!(short.id, "pdf_2");
        assert_eq!(short.question, "What is light?");
        assert_eq!(
            short.answer_keywords,
            Some(vec!["energy".to_string(), "radiation".to_string()])
        );

        assert!(!extraction.cleaned_lines.iter().any(|l| l.contains("Explanation")));
        assert!(!extraction.cleaned_lines.iter().any(|l| l.contains("CBSE")));
    }

    #[test]
    fn test_document_without_markers() {
        let pages = vec!["1. A stray question\nAnswer: nothing\n".to_string()];
        let extraction = flow(std::path::Path::new(".")).extract(&pages);

        assert_eq!(extraction.sections, 0);
        assert!(extraction.records.is_empty());
        assert!(!extraction.cleaned_lines.is_empty());
    }

    #[tokio::test]
    async fn test_run_writes_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let flow = flow(dir.path());

        let stats = flow.run(&TextPages::new(pages())).await.unwrap();
        assert_eq!(
            stats,
            PdfFlowStats {
                pages: 2,
                sections: 2,
                questions: 2,
                dropped: 0
            }
        );

        let text = std::fs::read_to_string(dir.path().join("out.txt")).unwrap();
        assert!(text.ends_with('\n'));
        assert!(text.contains("Answer: A form of energy."));

        let json = std::fs::read_to_string(dir.path().join("out.json")).unwrap();
        assert!(json.starts_with("[\n    {\n        \"questionNUM\": \"pdf_1\""));
    }
}
