pub mod loaders;
pub mod question;
pub mod template;

pub use loaders::{load_comparable_questions, load_template_or_default, LoadedQuestions};
pub use question::{ComparableQuestion, DuplicatePair, QuestionRecord, QuestionType, SkippedItem};
pub use template::{DocumentTemplate, SectionMarkers, SplitMarker};
