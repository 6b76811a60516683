use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenameError {
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
    #[error("invalid renumbering match group format: {0}")]
    InvalidRenumberGroup(String),
    #[error("match group {group} is not an integer in {name:?}: {value:?}")]
    NonNumericGroup {
        group: usize,
        name: String,
        value: String,
    },
    #[error("renumbering {name:?} overflows")]
    NumberOverflow { name: String },
    #[error("invalid glob expression: {0}")]
    InvalidGlob(#[from] glob::PatternError),
    #[error("cannot read {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
