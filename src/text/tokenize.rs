//! Word tokenizer
//!
//! Splits page text into candidate words and keeps only those made entirely
//! of Turkish letters. Anything else is rejected here so the syllabifier
//! never sees it.

use crate::text::alphabet::{is_turkish_letter, turkish_lowercase};
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

/// Tokenizer settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenizerOptions {
    /// Words with fewer letters than this are dropped
    pub min_word_length: usize,

    /// Drop words starting with an uppercase letter (likely proper names)
    pub skip_capitalized: bool,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        Self {
            min_word_length: 2,
            skip_capitalized: true,
        }
    }
}

/// Why a token was not accepted as a word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// Contains a digit
    Digit,
    /// Contains a letter outside the Turkish table
    Foreign,
    /// Shorter than the minimum word length
    TooShort,
    /// Starts with an uppercase letter
    Capitalized,
}

/// Result of classifying a single token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Word(String),
    Rejected(Rejection),
}

/// Splits text into tokens on every non-alphanumeric character and
/// classifies each one
///
/// # Examples
///
/// ```
/// use hece::text::{tokenize, Rejection, Token, TokenizerOptions};
///
/// let tokens = tokenize("güzel café 2024 ev", TokenizerOptions::default());
/// assert_eq!(tokens[0], Token::Word("güzel".to_string()));
/// assert_eq!(tokens[1], Token::Rejected(Rejection::Foreign));
/// assert_eq!(tokens[2], Token::Rejected(Rejection::Digit));
/// assert_eq!(tokens[3], Token::Word("ev".to_string()));
/// ```
pub fn tokenize(text: &str, options: TokenizerOptions) -> Vec<Token> {
    // Combining marks are not alphanumeric; compose them before splitting
    let composed: String = text.nfc().collect();
    composed
        .split(|c: char| !c.is_alphanumeric())
        .filter(|raw| !raw.is_empty())
        .map(|raw| classify_token(raw, options))
        .collect()
}

/// Returns the accepted words of a text, in order of appearance
pub fn extract_words(text: &str, options: TokenizerOptions) -> Vec<String> {
    tokenize(text, options)
        .into_iter()
        .filter_map(|token| match token {
            Token::Word(word) => Some(word),
            Token::Rejected(_) => None,
        })
        .collect()
}

/// Returns the accepted words of a text with duplicates removed, keeping
/// the first occurrence order
pub fn extract_distinct_words(text: &str, options: TokenizerOptions) -> Vec<String> {
    let mut seen = HashSet::new();
    extract_words(text, options)
        .into_iter()
        .filter(|word| seen.insert(word.clone()))
        .collect()
}

fn classify_token(raw: &str, options: TokenizerOptions) -> Token {
    if raw.chars().any(|c| c.is_numeric()) {
        return Token::Rejected(Rejection::Digit);
    }

    if options.skip_capitalized && raw.chars().next().is_some_and(char::is_uppercase) {
        return Token::Rejected(Rejection::Capitalized);
    }

    let word = turkish_lowercase(raw);
    if !word.chars().all(is_turkish_letter) {
        return Token::Rejected(Rejection::Foreign);
    }

    if word.chars().count() < options.min_word_length {
        return Token::Rejected(Rejection::TooShort);
    }

    Token::Word(word)
}
