use stylo::{char_class_counts, word_tokens};

#[test]
fn punctuation_separates_and_drops() {
    let (tokens, lower) = word_tokens("Hello, world!! (really)");
    assert_eq!(tokens, vec!["Hello", "world", "really"]);
    assert_eq!(lower, vec!["hello", "world", "really"]);
}

#[test]
fn contraction_apostrophes_split_tokens() {
    let (tokens, _) = word_tokens("don't stop");
    assert_eq!(tokens, vec!["don", "t", "stop"]);
}

#[test]
fn original_and_lowercase_stay_index_aligned() {
    let (tokens, lower) = word_tokens("The QUICK Fox");
    assert_eq!(tokens.len(), lower.len());
    for (t, l) in tokens.iter().zip(&lower) {
        assert_eq!(t.to_lowercase(), *l);
    }
}

#[test]
fn underscore_bearing_segments_are_dropped() {
    // '_' is a word character to the splitter but not alphanumeric, so the
    // retention step discards the whole segment.
    let (tokens, _) = word_tokens("snake_case foo");
    assert_eq!(tokens, vec!["foo"]);
}

#[test]
fn digit_runs_are_word_tokens() {
    let (tokens, _) = word_tokens("agent 007 reporting");
    assert_eq!(tokens, vec!["agent", "007", "reporting"]);
}

#[test]
fn char_counts_are_not_word_aware() {
    // Characters inside contractions and numbers count individually.
    let counts = char_class_counts("Don't #1!");
    assert_eq!(counts.get(&'d'), Some(&1));
    assert_eq!(counts.get(&'o'), Some(&1));
    assert_eq!(counts.get(&'n'), Some(&1));
    assert_eq!(counts.get(&'t'), Some(&1));
    assert_eq!(counts.get(&'\''), Some(&1));
    assert_eq!(counts.get(&'#'), Some(&1));
    assert_eq!(counts.get(&'1'), Some(&1));
    assert_eq!(counts.get(&'!'), Some(&1));
    // Whitespace is outside the class.
    assert_eq!(counts.get(&' '), None);
}

#[test]
fn characters_outside_the_fixed_class_are_ignored() {
    let counts = char_class_counts("naïve € ok");
    assert_eq!(counts.get(&'ï'), None);
    assert_eq!(counts.get(&'€'), None);
    assert_eq!(counts.get(&'n'), Some(&1));
    assert_eq!(counts.get(&'o'), Some(&1));
    assert_eq!(counts.get(&'k'), Some(&1));
}
