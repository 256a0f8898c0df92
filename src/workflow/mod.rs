pub mod json_flow;
pub mod pdf_flow;

pub use json_flow::JsonQuestionFlow;
pub use pdf_flow::{PdfExtraction, PdfFlowStats, PdfQuestionFlow};
