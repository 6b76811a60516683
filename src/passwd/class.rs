//! Character classes used as password composition constraints

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use super::error::PasswordError;

const LOWER: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
const SYMBOLS: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// A named subset of printable ASCII characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CharClass {
    Lower,
    Upper,
    Digit,
    Symbol,
}

impl CharClass {
    /// All classes in canonical order
    pub const ALL: [CharClass; 4] = [
        CharClass::Lower,
        CharClass::Upper,
        CharClass::Digit,
        CharClass::Symbol,
    ];

    /// Characters belonging to this class
    pub fn alphabet(&self) -> &'static str {
        match self {
            CharClass::Lower => LOWER,
            CharClass::Upper => UPPER,
            CharClass::Digit => DIGITS,
            CharClass::Symbol => SYMBOLS,
        }
    }

    pub fn contains(&self, c: char) -> bool {
        match self {
            CharClass::Lower => c.is_ascii_lowercase(),
            CharClass::Upper => c.is_ascii_uppercase(),
            CharClass::Digit => c.is_ascii_digit(),
            CharClass::Symbol => c.is_ascii_punctuation(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CharClass::Lower => "lower",
            CharClass::Upper => "upper",
            CharClass::Digit => "digit",
            CharClass::Symbol => "symbol",
        }
    }

    fn bit(&self) -> u8 {
        match self {
            CharClass::Lower => 1,
            CharClass::Upper => 1 << 1,
            CharClass::Digit => 1 << 2,
            CharClass::Symbol => 1 << 3,
        }
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CharClass {
    type Err = PasswordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lower" | "lowercase" => Ok(CharClass::Lower),
            "upper" | "uppercase" => Ok(CharClass::Upper),
            "digit" | "digits" => Ok(CharClass::Digit),
            "symbol" | "symbols" => Ok(CharClass::Symbol),
            other => Err(PasswordError::UnknownClass(other.to_string())),
        }
    }
}

/// Set of required character classes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharClassSet(u8);

impl CharClassSet {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn all() -> Self {
        CharClass::ALL.into_iter().collect()
    }

    pub fn insert(&mut self, class: CharClass) {
        self.0 |= class.bit();
    }

    pub fn contains(&self, class: CharClass) -> bool {
        self.0 & class.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Classes in canonical order
    pub fn iter(&self) -> impl Iterator<Item = CharClass> + '_ {
        CharClass::ALL.into_iter().filter(|c| self.contains(*c))
    }

    /// An empty selection means every class
    pub fn or_all(self) -> Self {
        if self.is_empty() {
            Self::all()
        } else {
            self
        }
    }

    /// Characters of every class in the set, concatenated in canonical order
    pub fn union_alphabet(&self) -> Vec<char> {
        self.iter().flat_map(|c| c.alphabet().chars()).collect()
    }

    /// Whether `candidate` has at least one character of every class
    pub fn is_satisfied_by(&self, candidate: &str) -> bool {
        self.iter()
            .all(|class| candidate.chars().any(|c| class.contains(c)))
    }
}

impl FromIterator<CharClass> for CharClassSet {
    fn from_iter<I: IntoIterator<Item = CharClass>>(iter: I) -> Self {
        let mut set = Self::empty();
        for class in iter {
            set.insert(class);
        }
        set
    }
}
