//! Passphrase generation from a word list

use std::io::BufRead;

use rand::seq::IndexedRandom;
use rand::{CryptoRng, Rng};

use super::error::PasswordError;

pub const DEFAULT_WORD_COUNT: usize = 4;
pub const DEFAULT_WORD_SEPARATOR: &str = "-";

/// Words shorter than this are dropped from the list
const MIN_WORD_LENGTH: usize = 2;

/// Read a word list, one word per line
pub fn load_words<R: BufRead>(reader: R) -> Result<Vec<String>, PasswordError> {
    let mut words = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let word = line.trim();
        if word.chars().count() >= MIN_WORD_LENGTH {
            words.push(word.to_string());
        }
    }
    if words.is_empty() {
        return Err(PasswordError::EmptyWordList);
    }
    Ok(words)
}

/// Join `num_words` uniformly chosen words with `separator`
pub fn generate_passphrase<R>(
    words: &[String],
    num_words: usize,
    separator: &str,
    rng: &mut R,
) -> Result<String, PasswordError>
where
    R: Rng + CryptoRng + ?Sized,
{
    if num_words == 0 {
        return Err(PasswordError::InvalidConfig(
            "number of words must be at least 1".to_string(),
        ));
    }
    let chosen = (0..num_words)
        .map(|_| words.choose(rng).map(String::as_str))
        .collect::<Option<Vec<&str>>>()
        .ok_or(PasswordError::EmptyWordList)?;
    Ok(chosen.join(separator))
}
