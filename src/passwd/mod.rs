//! Password and passphrase generation

pub mod class;
pub mod error;
pub mod generate;
pub mod words;

pub use class::{CharClass, CharClassSet};
pub use error::PasswordError;
pub use generate::{generate_password, generate_passwords, PasswordSpec, DEFAULT_LENGTH};
pub use words::{generate_passphrase, load_words, DEFAULT_WORD_COUNT, DEFAULT_WORD_SEPARATOR};

/// Bits of entropy for `choices` uniform picks from `population` elements
pub fn entropy_bits(population: usize, choices: usize) -> f64 {
    if population == 0 {
        return 0.0;
    }
    choices as f64 * (population as f64).log2()
}
