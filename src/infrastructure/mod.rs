pub mod page_source;

pub use page_source::{open_page_source, PageSource, PdfDocument, TextPages};
