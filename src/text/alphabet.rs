//! Turkish alphabet table and case folding
//!
//! Every letter the syllabifier accepts is listed here. Circumflexed vowels
//! (â, î, û) appear in loanwords and count as their base vowel.

use unicode_normalization::UnicodeNormalization;

/// The eight Turkish vowels
pub const VOWELS: [char; 8] = ['a', 'e', 'ı', 'i', 'o', 'ö', 'u', 'ü'];

/// The twenty-one Turkish consonants
pub const CONSONANTS: [char; 21] = [
    'b', 'c', 'ç', 'd', 'f', 'g', 'ğ', 'h', 'j', 'k', 'l', 'm', 'n', 'p', 'r', 's', 'ş', 't', 'v',
    'y', 'z',
];

/// Phonological class of a letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LetterClass {
    Vowel,
    Consonant,
}

impl LetterClass {
    /// Single-letter code used when printing shapes (`V` or `C`)
    pub fn code(&self) -> char {
        match self {
            Self::Vowel => 'V',
            Self::Consonant => 'C',
        }
    }
}

/// Classifies a lowercase letter, or returns `None` for anything outside
/// the Turkish table
///
/// # Examples
///
/// ```
/// use hece::text::{classify, LetterClass};
///
/// assert_eq!(classify('ö'), Some(LetterClass::Vowel));
/// assert_eq!(classify('â'), Some(LetterClass::Vowel));
/// assert_eq!(classify('ş'), Some(LetterClass::Consonant));
/// assert_eq!(classify('q'), None);
/// assert_eq!(classify('é'), None);
/// ```
pub fn classify(c: char) -> Option<LetterClass> {
    let base = base_letter(c);
    if VOWELS.contains(&base) {
        Some(LetterClass::Vowel)
    } else if CONSONANTS.contains(&base) {
        Some(LetterClass::Consonant)
    } else {
        None
    }
}

/// Returns true if `c` is a lowercase letter of the Turkish table
pub fn is_turkish_letter(c: char) -> bool {
    classify(c).is_some()
}

/// Maps circumflexed vowels to the vowel they are written over
fn base_letter(c: char) -> char {
    match c {
        'â' => 'a',
        'î' => 'i',
        'û' => 'u',
        other => other,
    }
}

/// Lowercases text with Turkish casing rules
///
/// The input is NFC-composed first so that a decomposed `o` + U+0308 is
/// treated as `ö`. Dotted capital `İ` becomes `i` and plain `I` becomes the
/// dotless `ı`; every other character follows Unicode lowercasing.
///
/// # Examples
///
/// ```
/// use hece::text::turkish_lowercase;
///
/// assert_eq!(turkish_lowercase("İSTANBUL"), "istanbul");
/// assert_eq!(turkish_lowercase("ISPARTA"), "ısparta");
/// assert_eq!(turkish_lowercase("Çiçek"), "çiçek");
/// ```
pub fn turkish_lowercase(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.nfc() {
        match c {
            'I' => out.push('ı'),
            'İ' => out.push('i'),
            other => out.extend(other.to_lowercase()),
        }
    }
    out
}
