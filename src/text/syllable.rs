//! Syllabifier
//!
//! Splits a lowercase Turkish word into syllables. The five legal shapes are
//! tried in a fixed priority order at each position, left to right:
//!
//! | Shape | Example |
//! |-------|---------|
//! | CVCC  | türk, kont |
//! | CVC   | tap, göz |
//! | CV    | ki, ba |
//! | VC    | el, is |
//! | V     | a, e |
//!
//! A shape that ends in a consonant is only admissible when the next letter
//! is not a vowel, since a consonant in front of a vowel always opens the
//! following syllable (`kitap` is `ki-tap`, never `kit-ap`). Among the
//! admissible shapes the first one whose remainder can still be fully
//! decomposed wins. Consonant runs that no shape can absorb are emitted as a
//! single [`Shape::Stranded`] unit so the output always covers the word; a
//! run in front of a vowel leaves its last consonant as the next onset.

use crate::text::alphabet::{classify, LetterClass};
use crate::text::{TextError, TextResult};
use std::fmt;

use LetterClass::{Consonant as C, Vowel as V};

/// Shape of a syllable in terms of vowels and consonants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    V,
    VC,
    CV,
    CVC,
    CVCC,
    /// A consonant run that could not join any syllable
    Stranded,
}

impl Shape {
    /// Canonical shapes in the order they are tried
    pub const PRIORITY: [Shape; 5] = [Shape::CVCC, Shape::CVC, Shape::CV, Shape::VC, Shape::V];

    /// Letter classes making up a canonical shape (empty for `Stranded`)
    pub fn pattern(&self) -> &'static [LetterClass] {
        match self {
            Self::V => &[V],
            Self::VC => &[V, C],
            Self::CV => &[C, V],
            Self::CVC => &[C, V, C],
            Self::CVCC => &[C, V, C, C],
            Self::Stranded => &[],
        }
    }

    /// Returns true for the five legal Turkish syllable shapes
    pub fn is_canonical(&self) -> bool {
        !matches!(self, Self::Stranded)
    }

    fn ends_in_consonant(&self) -> bool {
        self.pattern().last() == Some(&C)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_canonical() {
            let code: String = self.pattern().iter().map(|c| c.code()).collect();
            write!(f, "{}", code)
        } else {
            write!(f, "C+")
        }
    }
}

/// One syllable of a word, borrowed from the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Syllable<'a> {
    pub text: &'a str,
    pub shape: Shape,
}

/// Splits a word into syllables
///
/// The word must already be lowercase and consist only of letters from the
/// Turkish table; the tokenizer guarantees this for crawled text.
///
/// # Errors
///
/// * [`TextError::Empty`] for an empty word
/// * [`TextError::InvalidCharacter`] for any letter outside the table
///
/// # Examples
///
/// ```
/// use hece::text::syllabify;
///
/// let parts: Vec<&str> = syllabify("kitap").unwrap().iter().map(|s| s.text).collect();
/// assert_eq!(parts, vec!["ki", "tap"]);
/// ```
pub fn syllabify(word: &str) -> TextResult<Vec<Syllable<'_>>> {
    if word.is_empty() {
        return Err(TextError::Empty);
    }

    let mut offsets = Vec::with_capacity(word.len());
    let mut classes = Vec::with_capacity(word.len());
    for (position, (offset, ch)) in word.char_indices().enumerate() {
        let class = classify(ch).ok_or(TextError::InvalidCharacter { ch, position })?;
        offsets.push(offset);
        classes.push(class);
    }
    offsets.push(word.len());

    let n = classes.len();
    let feasible = feasibility(&classes);

    let mut syllables = Vec::new();
    let mut i = 0;
    while i < n {
        let candidates = || {
            Shape::PRIORITY
                .into_iter()
                .filter(|shape| admissible(&classes, i, *shape))
        };
        let chosen = candidates()
            .find(|shape| feasible[i + shape.pattern().len()])
            .or_else(|| candidates().next());

        let (end, shape) = match chosen {
            Some(shape) => (i + shape.pattern().len(), shape),
            None => (consonant_run_end(&classes, i), Shape::Stranded),
        };

        syllables.push(Syllable {
            text: &word[offsets[i]..offsets[end]],
            shape,
        });
        i = end;
    }

    Ok(syllables)
}

/// Joins the syllables of a word with hyphens, e.g. `bil-gi-sa-yar`
pub fn hyphenate(word: &str) -> TextResult<String> {
    let parts: Vec<&str> = syllabify(word)?.iter().map(|s| s.text).collect();
    Ok(parts.join("-"))
}

/// Returns true if `shape` can be placed at position `i`
fn admissible(classes: &[LetterClass], i: usize, shape: Shape) -> bool {
    let pattern = shape.pattern();
    let end = i + pattern.len();
    if pattern.is_empty() || end > classes.len() || classes[i..end] != *pattern {
        return false;
    }
    !(shape.ends_in_consonant() && classes.get(end) == Some(&V))
}

/// `feasible[i]` is true when `classes[i..]` splits into canonical shapes
fn feasibility(classes: &[LetterClass]) -> Vec<bool> {
    let n = classes.len();
    let mut feasible = vec![false; n + 1];
    feasible[n] = true;
    for i in (0..n).rev() {
        feasible[i] = Shape::PRIORITY.iter().any(|shape| {
            admissible(classes, i, *shape) && feasible[i + shape.pattern().len()]
        });
    }
    feasible
}

/// End of a stranded consonant run starting at `start`
///
/// When a vowel follows, the last consonant of the run is left as that
/// vowel's onset.
fn consonant_run_end(classes: &[LetterClass], start: usize) -> usize {
    let run = classes[start..].iter().take_while(|c| **c == C).count();
    let end = start + run;
    if end < classes.len() {
        (end - 1).max(start + 1)
    } else {
        end.max(start + 1)
    }
}
