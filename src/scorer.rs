//! Transcript accuracy scoring.
//!
//! Compares a spoken transcript against the reference passage of a lesson
//! and produces an accuracy percentage, the reference words the reader
//! missed, and a tiered practice recommendation.
//!
//! Similarity is a longest-common-subsequence alignment ratio over
//! whitespace tokens: `2 * matched / (spoken_len + reference_len)`. Word
//! order matters for the match, punctuation is kept as-is, and the whole
//! computation is pure, so identical inputs always produce bit-identical
//! results regardless of how many callers run concurrently.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Instant;
use tracing::debug;

/// UI feedback limit: only the first few missed words are reported.
pub const MAX_ERROR_WORDS: usize = 5;

const RECOMMENDATION_TOP: &str = "Excellent reading! Keep it up!";
const RECOMMENDATION_MID: &str = "Good effort! Try reading a bit more slowly and clearly.";
const RECOMMENDATION_LOW: &str = "Keep practicing. Focus on pronunciation and pacing.";

/// Result of scoring one transcript against one reference passage.
///
/// Built fresh per call; nothing is shared between invocations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Alignment ratio as a percentage in `[0, 100]`, rounded to 2 decimals.
    pub accuracy: f64,
    /// Reference tokens missing from the transcript, in reference order,
    /// capped at [`MAX_ERROR_WORDS`].
    pub error_words: Vec<String>,
    /// Tiered practice recommendation keyed off `accuracy`.
    pub recommendation: String,
}

/// Score a spoken transcript against the reference text.
///
/// Never fails: empty or whitespace-only input on either side degrades to
/// an accuracy of `0.0` instead of dividing by zero.
///
/// # Example
///
/// ```
/// let result = lexilearn::score("the quick brown fox", "the quick brown fox jumps");
/// assert_eq!(result.accuracy, 88.89);
/// assert_eq!(result.error_words, vec!["jumps"]);
/// ```
pub fn score(spoken_text: &str, reference_text: &str) -> ScoreResult {
    let start = Instant::now();
    let spoken = tokenize(spoken_text);
    let reference = tokenize(reference_text);

    let accuracy = if spoken.is_empty() || reference.is_empty() {
        0.0
    } else {
        let matched = lcs_len(&spoken, &reference);
        let ratio = 2.0 * matched as f64 / (spoken.len() + reference.len()) as f64;
        round2(ratio * 100.0)
    };

    let error_words = missing_words(&spoken, &reference);
    let recommendation = recommendation_for(accuracy).to_string();

    debug!(
        accuracy,
        spoken_tokens = spoken.len(),
        reference_tokens = reference.len(),
        missed = error_words.len(),
        elapsed_micros = start.elapsed().as_micros() as u64,
        "transcript scored"
    );

    ScoreResult {
        accuracy,
        error_words,
        recommendation,
    }
}

/// Lowercase and split on whitespace. Punctuation stays attached to its
/// word; that is the documented behavior, not an oversight.
fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| w.to_lowercase())
        .collect()
}

/// Reference tokens whose lowercased form never appears in the transcript,
/// in reference order. Set membership, not position-aware.
fn missing_words(spoken: &[String], reference: &[String]) -> Vec<String> {
    let spoken_set: HashSet<&str> = spoken.iter().map(String::as_str).collect();
    reference
        .iter()
        .filter(|w| !spoken_set.contains(w.as_str()))
        .take(MAX_ERROR_WORDS)
        .cloned()
        .collect()
}

/// Longest common subsequence length between two token sequences.
///
/// Row-rolling DP with O(min(m, n)) memory.
fn lcs_len(a: &[String], b: &[String]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let m = short.len();
    let mut prev = vec![0usize; m + 1];
    let mut curr = vec![0usize; m + 1];

    for row in long {
        for j in 1..=m {
            curr[j] = if *row == short[j - 1] {
                prev[j - 1] + 1
            } else {
                prev[j].max(curr[j - 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[m]
}

/// Map an accuracy percentage onto its feedback tier.
///
/// Boundaries are strict: exactly 85.0 is the middle tier and exactly
/// 60.0 the lowest.
pub fn recommendation_for(accuracy: f64) -> &'static str {
    if accuracy > 85.0 {
        RECOMMENDATION_TOP
    } else if accuracy > 60.0 {
        RECOMMENDATION_MID
    } else {
        RECOMMENDATION_LOW
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_text_scores_full_marks() {
        let result = score("The cat sat on the mat", "the cat sat on the mat");
        assert_eq!(result.accuracy, 100.0);
        assert!(result.error_words.is_empty());
        assert_eq!(result.recommendation, RECOMMENDATION_TOP);
    }

    #[test]
    fn partial_overlap_matches_alignment_ratio() {
        // 4 matched tokens, lengths 4 and 5: 2*4/(4+5) = 0.8888... -> 88.89
        let result = score("the quick brown fox", "the quick brown fox jumps");
        assert_eq!(result.accuracy, 88.89);
        assert_eq!(result.error_words, vec!["jumps"]);
        assert_eq!(result.recommendation, RECOMMENDATION_TOP);
    }

    #[test]
    fn empty_spoken_text_scores_zero_with_capped_errors() {
        let result = score("", "one two three four five six seven");
        assert_eq!(result.accuracy, 0.0);
        assert_eq!(
            result.error_words,
            vec!["one", "two", "three", "four", "five"]
        );
        assert_eq!(result.recommendation, RECOMMENDATION_LOW);
    }

    #[test]
    fn empty_reference_scores_zero_with_no_errors() {
        let result = score("anything at all", "");
        assert_eq!(result.accuracy, 0.0);
        assert!(result.error_words.is_empty());
        assert_eq!(result.recommendation, RECOMMENDATION_LOW);
    }

    #[test]
    fn both_empty_scores_zero() {
        let result = score("", "   ");
        assert_eq!(result.accuracy, 0.0);
        assert!(result.error_words.is_empty());
    }

    #[test]
    fn error_words_cap_at_five_in_reference_order() {
        let result = score("alpha", "alpha b1 b2 b3 b4 b5 b6 b7");
        assert_eq!(result.error_words.len(), MAX_ERROR_WORDS);
        assert_eq!(result.error_words, vec!["b1", "b2", "b3", "b4", "b5"]);
    }

    #[test]
    fn error_words_use_set_membership_not_position() {
        // "mat" appears in the transcript, just in the wrong spot, so it
        // is not reported as missing.
        let result = score("mat the cat sat", "the cat sat on the mat");
        assert_eq!(result.error_words, vec!["on"]);
    }

    #[test]
    fn punctuation_is_not_stripped() {
        let result = score("hello world", "hello world!");
        assert!(result.accuracy < 100.0);
        assert_eq!(result.error_words, vec!["world!"]);
    }

    #[test]
    fn exactly_85_falls_into_middle_tier() {
        // 17 matched tokens, both sides 20 tokens: 2*17/40 = 0.85 -> 85.0
        let shared: Vec<String> = (0..17).map(|i| format!("w{i}")).collect();
        let spoken = format!("{} x1 x2 x3", shared.join(" "));
        let reference = format!("{} y1 y2 y3", shared.join(" "));
        let result = score(&spoken, &reference);
        assert_eq!(result.accuracy, 85.0);
        assert_eq!(result.recommendation, RECOMMENDATION_MID);
    }

    #[test]
    fn exactly_60_falls_into_lowest_tier() {
        // 3 matched tokens, lengths 4 and 6: 2*3/10 = 0.6 -> 60.0
        let result = score("a b c q", "a b c x y z");
        assert_eq!(result.accuracy, 60.0);
        assert_eq!(result.recommendation, RECOMMENDATION_LOW);
    }

    #[test]
    fn just_above_85_reaches_top_tier() {
        // 6 matched of 6 and 7 tokens: 12/13 = 92.31
        let result = score("a b c d e f", "a b c d e f g");
        assert!(result.accuracy > 85.0);
        assert_eq!(result.recommendation, RECOMMENDATION_TOP);
    }

    #[test]
    fn repeated_words_are_aligned_not_double_counted() {
        // LCS over sequences, so the duplicated "the" only matches once:
        // lcs("the the", "the") = 1, ratio = 2/3.
        let result = score("the the", "the");
        assert_eq!(result.accuracy, 66.67);
    }

    #[test]
    fn scoring_is_deterministic() {
        let a = score("reading is fun", "reading aloud is good fun");
        let b = score("reading is fun", "reading aloud is good fun");
        assert_eq!(a, b);
    }

    #[test]
    fn accuracy_always_within_bounds() {
        let cases = [
            ("", ""),
            ("a", "b"),
            ("a b c", "c b a"),
            ("x", "x x x x x x"),
            ("Hello, World!", "hello world"),
        ];
        for (spoken, reference) in cases {
            let result = score(spoken, reference);
            assert!(result.accuracy.is_finite());
            assert!((0.0..=100.0).contains(&result.accuracy));
            assert!(!result.recommendation.is_empty());
            assert!(result.error_words.len() <= MAX_ERROR_WORDS);
        }
    }

    #[test]
    fn result_serializes_to_stable_json() {
        let result = score("the quick brown fox", "the quick brown fox jumps");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["accuracy"], 88.89);
        assert_eq!(json["error_words"][0], "jumps");
    }
}
