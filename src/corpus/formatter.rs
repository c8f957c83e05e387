use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

/// Marks the punctuation formatter may append to a word.
pub const PUNCTUATION_MARKS: [char; 11] = ['.', ',', '!', '?', ';', ':', '"', '\'', '(', ')', '-'];

/// Trait for text formatting strategies
pub trait TextFormatter {
    /// Format a list of words into a final string
    fn format(&self, words: &[String], rng: &mut dyn RngCore) -> String;
}

/// Basic formatter that just joins words with spaces
pub struct BasicFormatter;

impl TextFormatter for BasicFormatter {
    fn format(&self, words: &[String], _rng: &mut dyn RngCore) -> String {
        words.join(" ")
    }
}

/// Appends a random punctuation mark to each word with a fixed probability.
pub struct PunctuationFormatter {
    pub probability: f64,
}

impl TextFormatter for PunctuationFormatter {
    fn format(&self, words: &[String], rng: &mut dyn RngCore) -> String {
        let probability = clamp_probability(self.probability);
        words
            .iter()
            .map(|word| {
                let mut formatted = word.clone();
                if rng.gen_bool(probability) {
                    if let Some(mark) = PUNCTUATION_MARKS.choose(rng) {
                        formatted.push(*mark);
                    }
                }
                formatted
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Capitalizes the first letter of each word with a fixed probability.
pub struct MixedCaseFormatter {
    pub probability: f64,
}

impl TextFormatter for MixedCaseFormatter {
    fn format(&self, words: &[String], rng: &mut dyn RngCore) -> String {
        let probability = clamp_probability(self.probability);
        words
            .iter()
            .map(|word| {
                if rng.gen_bool(probability) {
                    capitalize_first_letter(word)
                } else {
                    word.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// gen_bool panics outside [0, 1]; config values are user supplied.
fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}

/// Helper function to capitalize the first letter of a word
pub fn capitalize_first_letter(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() => first.to_uppercase().chain(chars).collect(),
        _ => word.to_string(),
    }
}
