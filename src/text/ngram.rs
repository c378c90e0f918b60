//! N-gram and syllable extraction
//!
//! Turns one word into the units counted by the frequency tables.

use crate::text::syllable::syllabify;
use crate::text::TextResult;
use std::fmt;

/// The four kinds of counted units, one frequency table each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UnitKind {
    Syllable,
    Monograph,
    Digraph,
    Trigraph,
}

impl UnitKind {
    pub const ALL: [UnitKind; 4] = [
        UnitKind::Syllable,
        UnitKind::Monograph,
        UnitKind::Digraph,
        UnitKind::Trigraph,
    ];

    /// Window size for character n-grams, `None` for syllables
    pub fn window(&self) -> Option<usize> {
        match self {
            Self::Syllable => None,
            Self::Monograph => Some(1),
            Self::Digraph => Some(2),
            Self::Trigraph => Some(3),
        }
    }

    /// Plural name, also used as the table name and export key
    pub fn plural(&self) -> &'static str {
        match self {
            Self::Syllable => "syllables",
            Self::Monograph => "monographs",
            Self::Digraph => "digraphs",
            Self::Trigraph => "trigraphs",
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Syllable => "syllable",
            Self::Monograph => "monograph",
            Self::Digraph => "digraph",
            Self::Trigraph => "trigraph",
        };
        write!(f, "{}", name)
    }
}

/// A single occurrence of a unit inside a word
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Observation {
    pub kind: UnitKind,
    pub unit: String,
}

/// All units produced by one word
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordUnits {
    pub syllables: Vec<String>,
    pub monographs: Vec<String>,
    pub digraphs: Vec<String>,
    pub trigraphs: Vec<String>,
}

impl WordUnits {
    /// Units of the given kind
    pub fn of(&self, kind: UnitKind) -> &[String] {
        match kind {
            UnitKind::Syllable => &self.syllables,
            UnitKind::Monograph => &self.monographs,
            UnitKind::Digraph => &self.digraphs,
            UnitKind::Trigraph => &self.trigraphs,
        }
    }

    /// Flattens into observations, syllables first
    pub fn observations(&self) -> Vec<Observation> {
        UnitKind::ALL
            .iter()
            .flat_map(|kind| {
                self.of(*kind).iter().map(move |unit| Observation {
                    kind: *kind,
                    unit: unit.clone(),
                })
            })
            .collect()
    }

    /// Total number of observations across all kinds
    pub fn len(&self) -> usize {
        self.syllables.len() + self.monographs.len() + self.digraphs.len() + self.trigraphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Sliding windows of `size` letters over a word
///
/// A word of `L` letters yields `max(0, L - size + 1)` windows; windows
/// ignore syllable boundaries.
///
/// # Examples
///
/// ```
/// use hece::text::char_windows;
///
/// assert_eq!(char_windows("kitap", 3), vec!["kit", "ita", "tap"]);
/// assert!(char_windows("ev", 3).is_empty());
/// ```
pub fn char_windows(word: &str, size: usize) -> Vec<String> {
    if size == 0 {
        return Vec::new();
    }
    let chars: Vec<char> = word.chars().collect();
    chars
        .windows(size)
        .map(|window| window.iter().collect())
        .collect()
}

/// Extracts syllables, monographs, digraphs and trigraphs from a word
///
/// # Errors
///
/// Propagates syllabification errors; callers skip such words.
pub fn extract(word: &str) -> TextResult<WordUnits> {
    let syllables = syllabify(word)?
        .into_iter()
        .map(|s| s.text.to_string())
        .collect();

    Ok(WordUnits {
        syllables,
        monographs: char_windows(word, 1),
        digraphs: char_windows(word, 2),
        trigraphs: char_windows(word, 3),
    })
}
