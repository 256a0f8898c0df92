pub mod duplicate_detector;
pub mod json_normalizer;
pub mod question_parser;
pub mod report_writer;
pub mod section_segmenter;
pub mod similarity;
pub mod text_normalizer;

pub use duplicate_detector::DuplicateDetector;
pub use json_normalizer::JsonNormalizer;
pub use question_parser::QuestionParser;
pub use report_writer::{DuplicateReport, ReportWriter};
pub use section_segmenter::{Section, SectionSegmenter, SegmenterState};
pub use similarity::SimilarityMetric;
pub use text_normalizer::TextNormalizer;
