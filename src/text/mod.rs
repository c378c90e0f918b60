//! Text processing for Turkish words
//!
//! This module is pure and stateless:
//! - `alphabet`: the letter table, vowel/consonant classes, Turkish casing
//! - `tokenize`: page text to candidate words
//! - `syllable`: word to syllables
//! - `ngram`: word to syllable, monograph, digraph and trigraph units

mod alphabet;
mod ngram;
mod syllable;
mod tokenize;

pub use alphabet::{classify, is_turkish_letter, turkish_lowercase, LetterClass, CONSONANTS, VOWELS};
pub use ngram::{char_windows, extract, Observation, UnitKind, WordUnits};
pub use syllable::{hyphenate, syllabify, Shape, Syllable};
pub use tokenize::{extract_distinct_words, extract_words, tokenize, Rejection, Token, TokenizerOptions};

use thiserror::Error;

/// Errors raised for words that cannot be processed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextError {
    #[error("Empty word")]
    Empty,

    #[error("Character {ch:?} at position {position} is not a Turkish letter")]
    InvalidCharacter { ch: char, position: usize },
}

/// Result type alias for text operations
pub type TextResult<T> = std::result::Result<T, TextError>;
