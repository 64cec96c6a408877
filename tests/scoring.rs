//! End-to-end properties of the accuracy scorer exercised through the
//! public crate API.

use lexilearn::{estimate_wpm, score, MAX_ERROR_WORDS};

#[test]
fn repeated_calls_are_bit_identical() {
    let spoken = "The Quick brown FOX jumps over";
    let reference = "the quick brown fox jumps over the lazy dog";
    let first = score(spoken, reference);
    for _ in 0..50 {
        assert_eq!(score(spoken, reference), first);
    }
}

#[test]
fn concurrent_callers_agree() {
    let expected = score("shared transcript text", "shared reference passage text");
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let expected = expected.clone();
            std::thread::spawn(move || {
                for _ in 0..100 {
                    let got = score("shared transcript text", "shared reference passage text");
                    assert_eq!(got, expected);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("scorer thread panicked");
    }
}

#[test]
fn self_comparison_is_always_perfect() {
    for text in [
        "a",
        "Reading aloud builds fluency.",
        "word word word word",
        "punctuation, stays! attached?",
    ] {
        let result = score(text, text);
        assert_eq!(result.accuracy, 100.0);
        assert!(result.error_words.is_empty());
    }
}

#[test]
fn degenerate_inputs_never_panic() {
    for (spoken, reference) in [
        ("", ""),
        ("", "some reference text here"),
        ("some spoken text", ""),
        ("\t\n ", " \u{00a0}x"),
    ] {
        let result = score(spoken, reference);
        assert!(result.accuracy >= 0.0);
        assert!(result.error_words.len() <= MAX_ERROR_WORDS);
    }
}

#[test]
fn session_metrics_compose() {
    // The shape a session handler persists: scorer output plus the
    // fluency placeholder over the same transcript.
    let spoken = "the quick brown fox";
    let reference = "the quick brown fox jumps";
    let result = score(spoken, reference);
    let wpm = estimate_wpm(spoken);

    assert_eq!(result.accuracy, 88.89);
    assert_eq!(result.error_words, vec!["jumps"]);
    assert_eq!(wpm, 2);
}
