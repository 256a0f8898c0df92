pub mod logging;
pub mod text;

pub use text::{collapse_whitespace, normalize_for_comparison, truncate_text};
