//! 页面文本来源 - 基础设施层
//!
//! 只暴露"页数 + 每页纯文本"的能力，不认识题目结构

use crate::error::{AppError, AppResult, PdfError};
use lopdf::Document;
use std::path::Path;
use tracing::debug;

/// 页面文本来源
pub trait PageSource {
    /// 页数
    fn page_count(&self) -> usize;

    /// 第 `index` 页（从0开始）的纯文本
    fn page_text(&self, index: usize) -> AppResult<String>;

    /// 按页序取出全部页面文本
    fn all_pages(&self) -> AppResult<Vec<String>> {
        (0..self.page_count()).map(|i| self.page_text(i)).collect()
    }
}

/// 按扩展名打开页面来源：`.pdf` 走 lopdf，其余按换页符分隔的文本读取
pub fn open_page_source(path: &Path) -> AppResult<Box<dyn PageSource>> {
    let is_pdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

    if is_pdf {
        Ok(Box::new(PdfDocument::open(path)?))
    } else {
        Ok(Box::new(TextPages::open(path)?))
    }
}

/// PDF 文档
///
/// 持有已解析的文档和页码列表
pub struct PdfDocument {
    document: Document,
    page_numbers: Vec<u32>,
}

impl PdfDocument {
    pub fn open(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Err(AppError::missing_input(path.display().to_string()));
        }

        let document = Document::load(path).map_err(|source| PdfError::LoadFailed {
            path: path.display().to_string(),
            source,
        })?;
        let page_numbers: Vec<u32> = document.get_pages().keys().copied().collect();
        debug!("PDF 共 {} 页: {}", page_numbers.len(), path.display());

        Ok(Self {
            document,
            page_numbers,
        })
    }
}

impl PageSource for PdfDocument {
    fn page_count(&self) -> usize {
        self.page_numbers.len()
    }

    fn page_text(&self, index: usize) -> AppResult<String> {
        let page = *self
            .page_numbers
            .get(index)
            .ok_or(PdfError::PageOutOfRange {
                index,
                count: self.page_numbers.len(),
            })?;

        let text = self
            .document
            .extract_text(&[page])
            .map_err(|source| PdfError::ExtractFailed { page, source })?;
        Ok(text)
    }
}

/// 已提取好的纯文本页面
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextPages {
    pages: Vec<String>,
}

impl TextPages {
    pub fn new(pages: Vec<String>) -> Self {
        Self { pages }
    }

    /// 按换页符 `\x0c` 切分文本；末尾换页符之后的空白不算一页
    pub fn from_text(text: &str) -> Self {
        let mut pages: Vec<String> = text.split('\x0c').map(str::to_string).collect();
        if pages.len() > 1 && pages.last().is_some_and(|p| p.trim().is_empty()) {
            pages.pop();
        }
        Self { pages }
    }

    pub fn open(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Err(AppError::missing_input(path.display().to_string()));
        }
        let text = std::fs::read_to_string(path)
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        Ok(Self::from_text(&text))
    }
}

impl PageSource for TextPages {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, index: usize) -> AppResult<String> {
        self.pages.get(index).cloned().ok_or_else(|| {
            PdfError::PageOutOfRange {
                index,
                count: self.pages.len(),
            }
            .into()
        })
    }
}
