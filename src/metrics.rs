use crate::script::{self, Script, Segmentation};

/// Industry-standard word length for Latin WPM.
pub const CHARS_PER_WORD: f64 = 5.0;

/// Elapsed time floor so near-instant completions do not blow up WPM.
pub const MIN_ELAPSED_SECS: f64 = 0.1;

/// Snapshot of the numbers shown while a session runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiveMetrics {
    pub wpm: u32,
    pub accuracy: u32,
    pub error_count: usize,
    pub typed_units: usize,
    pub elapsed_secs: f64,
}

pub fn elapsed_minutes(elapsed_secs: f64) -> f64 {
    let secs = if elapsed_secs.is_finite() {
        elapsed_secs.max(MIN_ELAPSED_SECS)
    } else {
        MIN_ELAPSED_SECS
    };
    secs / 60.0
}

/// `round((chars / 5) / minutes)`.
pub fn simple_wpm(chars_typed: usize, elapsed_secs: f64) -> u32 {
    to_whole((chars_typed as f64 / CHARS_PER_WORD) / elapsed_minutes(elapsed_secs))
}

/// `round(units / minutes)` for scripts where units are syllables or words.
pub fn unit_wpm(units: usize, elapsed_secs: f64) -> u32 {
    to_whole(units as f64 / elapsed_minutes(elapsed_secs))
}

/// WPM of `typed`, using the counting rule that fits `script`.
pub fn wpm(typed: &str, script: Script, segmentation: Segmentation, elapsed_secs: f64) -> u32 {
    if script.is_complex() {
        unit_wpm(script::word_units(typed, segmentation), elapsed_secs)
    } else {
        simple_wpm(typed.chars().count(), elapsed_secs)
    }
}

/// `round(100 * (typed - errors) / typed)`, 100 when nothing was typed.
pub fn accuracy(typed_len: usize, error_count: usize) -> u32 {
    if typed_len == 0 {
        return 100;
    }
    let correct = typed_len.saturating_sub(error_count);
    to_whole(100.0 * correct as f64 / typed_len as f64).min(100)
}

fn to_whole(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.round() as u32
    } else {
        0
    }
}
