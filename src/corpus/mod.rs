pub mod catalog;
pub mod core;
pub mod formatter;
pub mod provider;

// Re-export the main types for convenience
pub use catalog::{catalog, Category, CategoryInfo, ALL_CATEGORIES, CUSTOM_CATEGORY};
pub use core::WordList;
pub use formatter::{BasicFormatter, MixedCaseFormatter, PunctuationFormatter, TextFormatter};
pub use provider::{FormatterSettings, PracticeText, TextProvider};
