use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use super::catalog::{Category, ALL_CATEGORIES};
use super::core::WordList;
use super::formatter::{BasicFormatter, MixedCaseFormatter, PunctuationFormatter, TextFormatter};
use crate::error::CorpusError;

pub const COMMON_WORD_COUNT: usize = 50;
pub const PROGRAMMING_WORD_COUNT: usize = 40;
pub const BURMESE_WORD_COUNT: usize = 30;
pub const NUMBER_COUNT: usize = 30;
pub const NUMBER_UPPER_BOUND: u32 = 1000;
pub const PUNCTUATION_WORD_COUNT: usize = 30;
pub const MIXED_CASE_WORD_COUNT: usize = 40;

/// A text handed to the session engine, tagged with the category it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PracticeText {
    pub category: String,
    pub text: String,
}

impl PracticeText {
    pub fn new(category: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            text: text.into(),
        }
    }
}

/// Tuning knobs for the randomized per-word transformations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormatterSettings {
    pub punctuation_probability: f64,
    pub capitalize_probability: f64,
}

impl Default for FormatterSettings {
    fn default() -> Self {
        Self {
            punctuation_probability: 0.3,
            capitalize_probability: 0.5,
        }
    }
}

/// Supplies practice texts per category from the embedded tables.
#[derive(Debug, Clone)]
pub struct TextProvider {
    common_words: WordList,
    programming: WordList,
    quotes: WordList,
    long_texts: WordList,
    burmese_words: WordList,
    burmese_quotes: WordList,
    settings: FormatterSettings,
}

impl TextProvider {
    pub fn new(settings: FormatterSettings) -> Result<Self, CorpusError> {
        Ok(Self {
            common_words: WordList::load("common_words")?,
            programming: WordList::load("programming")?,
            quotes: WordList::load("quotes")?,
            long_texts: WordList::load("long_texts")?,
            burmese_words: WordList::load("burmese_words")?,
            burmese_quotes: WordList::load("burmese_quotes")?,
            settings,
        })
    }

    /// Text for `category_id`; unknown ids get the first category's text.
    pub fn get_text(&self, category_id: &str) -> PracticeText {
        self.get_text_with(category_id, &mut rand::thread_rng())
    }

    pub fn get_text_with(&self, category_id: &str, rng: &mut dyn RngCore) -> PracticeText {
        let category = Category::from_id_or_default(category_id);
        PracticeText::new(category.id(), self.generate(category, rng))
    }

    /// Text from a uniformly chosen category.
    pub fn random_text(&self) -> PracticeText {
        let rng = &mut rand::thread_rng();
        let category = ALL_CATEGORIES[rng.gen_range(0..ALL_CATEGORIES.len())];
        PracticeText::new(category.id(), self.generate(category, rng))
    }

    fn generate(&self, category: Category, rng: &mut dyn RngCore) -> String {
        match category {
            Category::CommonWords => sample_words(&self.common_words, COMMON_WORD_COUNT, rng),
            Category::Programming => {
                sample_words(&self.programming, PROGRAMMING_WORD_COUNT, rng)
            }
            Category::Burmese => sample_words(&self.burmese_words, BURMESE_WORD_COUNT, rng),
            Category::Quotes => pick_one(&self.quotes, rng),
            Category::BurmeseQuotes => pick_one(&self.burmese_quotes, rng),
            Category::LongText => pick_one(&self.long_texts, rng),
            Category::Numbers => random_numbers(NUMBER_COUNT, rng),
            Category::Punctuation => PunctuationFormatter {
                probability: self.settings.punctuation_probability,
            }
            .format(self.common_words.head(PUNCTUATION_WORD_COUNT), rng),
            Category::MixedCase => MixedCaseFormatter {
                probability: self.settings.capitalize_probability,
            }
            .format(self.common_words.head(MIXED_CASE_WORD_COUNT), rng),
        }
    }
}

fn sample_words(list: &WordList, count: usize, rng: &mut dyn RngCore) -> String {
    let words: Vec<String> = list
        .entries
        .choose_multiple(rng, count)
        .cloned()
        .collect();
    BasicFormatter.format(&words, rng)
}

fn pick_one(list: &WordList, rng: &mut dyn RngCore) -> String {
    // WordList::load rejects empty tables
    list.entries.choose(rng).cloned().unwrap_or_default()
}

fn random_numbers(count: usize, rng: &mut dyn RngCore) -> String {
    (0..count)
        .map(|_| rng.gen_range(0..NUMBER_UPPER_BOUND).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
