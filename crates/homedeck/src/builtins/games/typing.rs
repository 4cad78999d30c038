//! Typing speed test.

use rand::Rng;
use serde::Serialize;
use utoipa::ToSchema;

/// Best-scores key (highest WPM).
pub const GAME_ID: &str = "typing-test";

pub const SAMPLE_TEXTS: [&str; 5] = [
    "The quick brown fox jumps over the lazy dog.",
    "To be or not to be, that is the question.",
    "All that glitters is not gold.",
    "A journey of a thousand miles begins with a single step.",
    "Success is not final, failure is not fatal: it is the courage to continue that counts.",
];

pub fn pick_text<R: Rng>(rng: &mut R) -> &'static str {
    SAMPLE_TEXTS[rng.gen_range(0..SAMPLE_TEXTS.len())]
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TypingStats {
    pub wpm: u32,
    pub accuracy: u32,
    pub finished: bool,
}

/// WPM counts five characters as a word; accuracy compares position by
/// position. Nothing typed yet reads as 100% accurate.
pub fn stats(target: &str, typed: &str, elapsed_secs: f64) -> TypingStats {
    let target_chars: Vec<char> = target.chars().collect();
    let typed_chars: Vec<char> = typed.chars().collect();

    let correct = typed_chars
        .iter()
        .zip(target_chars.iter())
        .filter(|(a, b)| a == b)
        .count();

    let accuracy = if typed_chars.is_empty() {
        100
    } else {
        ((correct as f64 / typed_chars.len() as f64) * 100.0).round() as u32
    };

    let minutes = elapsed_secs / 60.0;
    let wpm = if minutes > 0.0 {
        ((typed_chars.len() as f64 / 5.0) / minutes).round() as u32
    } else {
        0
    };

    let finished = typed_chars.len() == target_chars.len() && correct == target_chars.len();

    TypingStats {
        wpm,
        accuracy,
        finished,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn pick_returns_a_sample() {
        let mut rng = StdRng::seed_from_u64(21);
        assert!(SAMPLE_TEXTS.contains(&pick_text(&mut rng)));
    }

    #[test]
    fn perfect_round_finishes() {
        let target = SAMPLE_TEXTS[0];
        let report = stats(target, target, 60.0);
        assert!(report.finished);
        assert_eq!(report.accuracy, 100);
        // 44 chars in one minute ≈ 9 words.
        assert_eq!(report.wpm, 9);
    }

    #[test]
    fn nothing_typed_is_fully_accurate() {
        let report = stats("abc", "", 5.0);
        assert_eq!(report.accuracy, 100);
        assert_eq!(report.wpm, 0);
        assert!(!report.finished);
    }

    #[test]
    fn typos_lower_accuracy() {
        let report = stats("hello", "hexlo", 60.0);
        assert_eq!(report.accuracy, 80);
        assert!(!report.finished);
    }

    #[test]
    fn full_length_with_typo_does_not_finish() {
        let report = stats("abcd", "abcx", 10.0);
        assert!(!report.finished);
    }

    #[test]
    fn faster_typing_scores_higher_wpm() {
        let slow = stats("hello world", "hello world", 60.0);
        let fast = stats("hello world", "hello world", 15.0);
        assert!(fast.wpm > slow.wpm);
    }

    #[test]
    fn zero_elapsed_has_zero_wpm() {
        let report = stats("abc", "abc", 0.0);
        assert_eq!(report.wpm, 0);
    }
}
