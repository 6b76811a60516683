use thiserror::Error;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("length {length} is too short to include {classes} required character classes")]
    LengthTooShort { length: usize, classes: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("unknown character class: {0}")]
    UnknownClass(String),
    #[error("word list is empty")]
    EmptyWordList,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
