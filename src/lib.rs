pub mod choose;
pub mod cli;
pub mod config;
pub mod passwd;
pub mod rename;
pub mod selftest;
pub mod util;

pub use config::{Config, ConfigError};
pub use passwd::{
    generate_password, generate_passwords, CharClass, CharClassSet, PasswordError, PasswordSpec,
};
pub use rename::{plan, FsProbe, RenameError, RenameOperation, RenamePlan, RenameRule};
