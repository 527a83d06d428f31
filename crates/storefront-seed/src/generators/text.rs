//! Lorem-style text helpers for names and descriptions.

use fake::{
    Fake,
    faker::lorem::en::{Sentence, Word},
};
use rand::Rng;

/// A single lorem word with its first letter upper-cased ("Voluptas").
pub fn capitalized_word(rng: &mut impl Rng) -> String {
    let word: String = Word().fake_with_rng(rng);
    capitalize(&word)
}

/// Whole lorem sentences joined by spaces, at most `max_chars` characters long.
///
/// Falls back to a single (possibly truncated) word when not even one
/// sentence fits.
pub fn text(max_chars: usize, rng: &mut impl Rng) -> String {
    let mut text = String::new();
    let mut len = 0;

    loop {
        let sentence: String = Sentence(3..10).fake_with_rng(rng);
        let sentence_len = sentence.chars().count();
        let needed = if text.is_empty() {
            sentence_len
        } else {
            sentence_len + 1
        };
        if len + needed > max_chars {
            break;
        }
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(&sentence);
        len += needed;
    }

    if text.is_empty() {
        text = capitalized_word(rng).chars().take(max_chars).collect();
    }
    text
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
