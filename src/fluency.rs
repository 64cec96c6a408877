//! Reading-speed estimation.
//!
//! Placeholder heuristic carried over from the session workflow: with no
//! timing data from the client, a reading is assumed to take about two
//! minutes, so words-per-minute is simply half the word count. Replace
//! with elapsed-time measurement once the client reports it.

/// Estimate words-per-minute for a transcript with no timing information.
pub fn estimate_wpm(spoken_text: &str) -> u32 {
    (spoken_text.split_whitespace().count() / 2) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halves_the_word_count() {
        assert_eq!(estimate_wpm("one two three four"), 2);
    }

    #[test]
    fn empty_input_is_zero() {
        assert_eq!(estimate_wpm(""), 0);
        assert_eq!(estimate_wpm("   "), 0);
    }

    #[test]
    fn odd_counts_round_down() {
        assert_eq!(estimate_wpm("a b c"), 1);
    }
}
