use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

const ASAT: char = '\u{103A}';
const VIRAMA: char = '\u{1039}';

/// Writing system of a practice text, derived from its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    /// Latin and anything else without combining-mark clusters worth segmenting.
    Latin,
    Burmese,
}

/// How word units are counted for complex-script WPM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Segmentation {
    #[default]
    Syllable,
    Whitespace,
}

impl Script {
    pub fn classify(text: &str) -> Self {
        if text.chars().any(is_myanmar) {
            Script::Burmese
        } else {
            Script::Latin
        }
    }

    /// Complex scripts compare by grapheme cluster instead of by char.
    pub fn is_complex(self) -> bool {
        matches!(self, Script::Burmese)
    }
}

pub fn is_myanmar(c: char) -> bool {
    matches!(c, '\u{1000}'..='\u{109F}' | '\u{A9E0}'..='\u{A9FF}' | '\u{AA60}'..='\u{AA7F}')
}

/// Splits `text` into the user-perceived units compared during typing.
pub fn units(text: &str, script: Script) -> Vec<&str> {
    if script.is_complex() {
        text.graphemes(true).collect()
    } else {
        text.char_indices()
            .map(|(i, c)| &text[i..i + c.len_utf8()])
            .collect()
    }
}

pub fn unit_len(text: &str, script: Script) -> usize {
    if script.is_complex() {
        text.graphemes(true).count()
    } else {
        text.chars().count()
    }
}

/// Longest prefix of `text` holding at most `max` units.
pub fn truncate_units(text: &str, script: Script, max: usize) -> &str {
    let end = if script.is_complex() {
        text.grapheme_indices(true).nth(max).map(|(i, _)| i)
    } else {
        text.char_indices().nth(max).map(|(i, _)| i)
    };
    match end {
        Some(i) => &text[..i],
        None => text,
    }
}

/// `text` without its final unit.
pub fn drop_last_unit(text: &str, script: Script) -> &str {
    let len = unit_len(text, script);
    truncate_units(text, script, len.saturating_sub(1))
}

/// Positions where `typed` differs from `target`, compared unit by unit.
pub fn mismatches(typed: &str, target: &str, script: Script) -> Vec<usize> {
    units(typed, script)
        .into_iter()
        .zip(units(target, script))
        .enumerate()
        .filter(|(_, (got, want))| got != want)
        .map(|(i, _)| i)
        .collect()
}

/// Whether the last unit of `typed` is still being composed, i.e. it is a
/// strict prefix of the target unit at the same position.
///
/// Keys arrive one code point at a time, so a Burmese cluster is a bare
/// consonant for a keystroke or two before its marks follow.
pub fn last_unit_pending(typed: &str, target: &str, script: Script) -> bool {
    let typed = units(typed, script);
    let Some((&last, idx)) = typed.last().zip(typed.len().checked_sub(1)) else {
        return false;
    };
    units(target, script)
        .get(idx)
        .is_some_and(|want| want.len() > last.len() && want.starts_with(last))
}

/// Word units in `text` for complex-script WPM.
///
/// Syllable segmentation falls back to whitespace runs when it finds nothing
/// to count in non-blank text.
pub fn word_units(text: &str, segmentation: Segmentation) -> usize {
    match segmentation {
        Segmentation::Whitespace => whitespace_units(text),
        Segmentation::Syllable => match count_syllables(text) {
            0 => whitespace_units(text),
            n => n,
        },
    }
}

pub fn whitespace_units(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Counts Myanmar syllables: a base letter plus its trailing dependent signs.
///
/// A killed consonant (followed by asat or virama) and a stacked consonant
/// (preceded by virama) stay in the current syllable. Runs of non-Myanmar,
/// non-space characters count as one unit each.
pub fn count_syllables(text: &str) -> usize {
    let chars: Vec<char> = text.chars().collect();
    let mut count = 0;
    let mut syllable_open = false;
    let mut foreign_run = false;

    for (i, &c) in chars.iter().enumerate() {
        if c.is_whitespace() {
            syllable_open = false;
            foreign_run = false;
            continue;
        }
        if !is_myanmar(c) {
            if !foreign_run {
                count += 1;
                foreign_run = true;
            }
            syllable_open = false;
            continue;
        }
        foreign_run = false;
        if !is_syllable_base(c) {
            continue;
        }

        let stacked = i > 0 && chars[i - 1] == VIRAMA;
        let killed = matches!(chars.get(i + 1), Some(&ASAT) | Some(&VIRAMA));
        if syllable_open && (stacked || killed) {
            continue;
        }
        count += 1;
        syllable_open = true;
    }

    count
}

fn is_syllable_base(c: char) -> bool {
    matches!(c,
        '\u{1000}'..='\u{102A}'
        | '\u{103F}'..='\u{1049}'
        | '\u{104C}'..='\u{104F}'
        | '\u{1050}'..='\u{1055}'
        | '\u{105A}'..='\u{105D}'
        | '\u{1061}'
        | '\u{1065}'..='\u{1066}'
        | '\u{106E}'..='\u{1070}'
        | '\u{1075}'..='\u{1081}'
        | '\u{108E}'
        | '\u{1090}'..='\u{1099}'
        | '\u{A9E0}'..='\u{A9E4}'
        | '\u{A9E7}'..='\u{A9EF}'
        | '\u{A9FA}'..='\u{A9FE}'
        | '\u{AA60}'..='\u{AA6F}'
        | '\u{AA71}'..='\u{AA76}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(Script::classify("the cat sat"), Script::Latin);
        assert_eq!(Script::classify(""), Script::Latin);
        assert_eq!(Script::classify("ထမင်း စား"), Script::Burmese);
        assert_eq!(Script::classify("hello မြန်မာ"), Script::Burmese);
    }

    #[test]
    fn test_latin_units_are_chars() {
        assert_eq!(units("héllo", Script::Latin), vec!["h", "é", "l", "l", "o"]);
        assert_eq!(unit_len("héllo", Script::Latin), 5);
    }

    #[test]
    fn test_burmese_units_are_graphemes() {
        // consonant + two combining vowel signs form one visual character
        let text = "ကို";
        assert_eq!(text.chars().count(), 3);
        assert_eq!(unit_len(text, Script::Burmese), 1);
        assert_eq!(units(text, Script::Burmese), vec!["ကို"]);
    }

    #[test]
    fn test_truncate_units() {
        assert_eq!(truncate_units("hello", Script::Latin, 3), "hel");
        assert_eq!(truncate_units("hello", Script::Latin, 10), "hello");
        assert_eq!(truncate_units("hello", Script::Latin, 0), "");
        assert_eq!(truncate_units("ကိုက", Script::Burmese, 1), "ကို");
    }

    #[test]
    fn test_drop_last_unit() {
        assert_eq!(drop_last_unit("abc", Script::Latin), "ab");
        assert_eq!(drop_last_unit("", Script::Latin), "");
        assert_eq!(drop_last_unit("ကကို", Script::Burmese), "က");
    }

    #[test]
    fn test_mismatches() {
        assert_eq!(mismatches("hxllo", "hello", Script::Latin), vec![1]);
        assert_eq!(mismatches("he", "hello", Script::Latin), Vec::<usize>::new());
        assert!(mismatches("", "hello", Script::Latin).is_empty());
    }

    #[test]
    fn test_burmese_partial_cluster_is_a_mismatch() {
        // the bare consonant is not the same visual character as consonant + vowels
        assert_eq!(mismatches("က", "ကို", Script::Burmese), vec![0]);
        assert!(mismatches("ကို", "ကို", Script::Burmese).is_empty());
    }

    #[test]
    fn test_last_unit_pending() {
        assert!(last_unit_pending("က", "ကို", Script::Burmese));
        assert!(last_unit_pending("ကိ", "ကို", Script::Burmese));
        assert!(!last_unit_pending("ကို", "ကို", Script::Burmese));
        assert!(last_unit_pending("စာအုပ", "စာအုပ်", Script::Burmese));
        // a wrong base letter is an error, not a cluster in progress
        assert!(!last_unit_pending("ခ", "ကို", Script::Burmese));
        assert!(!last_unit_pending("hel", "hello", Script::Latin));
        assert!(!last_unit_pending("", "ကို", Script::Burmese));
    }

    #[test]
    fn test_count_syllables() {
        // hta + min(asat) + visarga
        assert_eq!(count_syllables("ထမင်း"), 2);
        // kyaung + tha
        assert_eq!(count_syllables("ကျောင်းသား"), 2);
        assert_eq!(count_syllables("ထမင်း စား"), 3);
        // stacked consonant after virama joins the preceding syllable
        assert_eq!(count_syllables("မင်္ဂလာပါ"), 3);
        assert_eq!(count_syllables(""), 0);
        assert_eq!(count_syllables("   "), 0);
    }

    #[test]
    fn test_foreign_runs_count_once() {
        assert_eq!(count_syllables("abc ထမင်း"), 3);
        assert_eq!(count_syllables("abc,def"), 1);
    }

    #[test]
    fn test_word_units_fallback() {
        assert_eq!(word_units("ထမင်း စား", Segmentation::Whitespace), 2);
        assert_eq!(word_units("ထမင်း စား", Segmentation::Syllable), 3);
        // only dependent signs: nothing to anchor a syllable, so whitespace runs
        assert_eq!(word_units("\u{102D}\u{102F} \u{102C}", Segmentation::Syllable), 2);
        assert_eq!(word_units("", Segmentation::Syllable), 0);
    }
}
