pub mod json_loader;
pub mod toml_loader;

pub use json_loader::{
    load_comparable_questions, load_question_records, read_json_document, write_json_pretty,
    LoadedQuestions,
};
pub use toml_loader::{load_template, load_template_or_default};
