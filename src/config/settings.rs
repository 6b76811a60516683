use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::passwd::{
    CharClass, CharClassSet, DEFAULT_LENGTH, DEFAULT_WORD_COUNT, DEFAULT_WORD_SEPARATOR,
};
use crate::util::paths::{config_path, default_dict_path, explicit_config_path};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub batchrename: RenameDefaults,
    pub genpasswd: PasswordDefaults,
}

/// Defaults for `batchrename` numbering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenameDefaults {
    pub zero_pad: usize,
    pub renumber_from: i64,
}

/// Defaults for `genpasswd`
#[derive(Debug, Clone, PartialEq)]
pub struct PasswordDefaults {
    pub length: usize,
    pub count: usize,
    /// Empty means every class
    pub classes: CharClassSet,
    pub dict_file: PathBuf,
    pub separator: String,
    pub num_words: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            batchrename: RenameDefaults {
                zero_pad: 1,
                renumber_from: 1,
            },
            genpasswd: PasswordDefaults {
                length: DEFAULT_LENGTH,
                count: 1,
                classes: CharClassSet::empty(),
                dict_file: default_dict_path(),
                separator: DEFAULT_WORD_SEPARATOR.to_string(),
                num_words: DEFAULT_WORD_COUNT,
            },
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlRenameConfig {
    pub zero_pad: Option<usize>,
    pub renumber_from: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlPasswordConfig {
    pub length: Option<usize>,
    pub count: Option<usize>,
    pub classes: Option<Vec<CharClass>>,
    pub dict_file: Option<PathBuf>,
    pub separator: Option<String>,
    pub num_words: Option<usize>,
}

/// TOML representation of the config file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub batchrename: Option<TomlRenameConfig>,
    pub genpasswd: Option<TomlPasswordConfig>,
}

impl Config {
    /// Load from the configured path.
    ///
    /// A missing file at the default location yields defaults; a path given
    /// with `--config` must exist.
    pub fn load() -> Result<Self, ConfigError> {
        match explicit_config_path() {
            Some(path) => Self::load_required(&path),
            None => Self::load_from(&config_path()),
        }
    }

    /// Load `path`, falling back to defaults when it does not exist
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }
        Self::load_required(path)
    }

    /// Load `path`, which must exist
    pub fn load_required(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Merge a TOML document on top of the defaults
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        let toml_config: TomlConfig = toml::from_str(contents)?;
        let mut config = Config::default();

        if let Some(rename) = toml_config.batchrename {
            if let Some(zero_pad) = rename.zero_pad {
                config.batchrename.zero_pad = zero_pad;
            }
            if let Some(renumber_from) = rename.renumber_from {
                config.batchrename.renumber_from = renumber_from;
            }
        }

        if let Some(passwd) = toml_config.genpasswd {
            let defaults = &mut config.genpasswd;
            if let Some(length) = passwd.length {
                defaults.length = length;
            }
            if let Some(count) = passwd.count {
                defaults.count = count;
            }
            if let Some(classes) = passwd.classes {
                defaults.classes = classes.into_iter().collect();
            }
            if let Some(dict_file) = passwd.dict_file {
                defaults.dict_file = dict_file;
            }
            if let Some(separator) = passwd.separator {
                defaults.separator = separator;
            }
            if let Some(num_words) = passwd.num_words {
                defaults.num_words = num_words;
            }
        }

        Ok(config)
    }
}
