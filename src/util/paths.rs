//! Path utilities for toolbin configuration files

use std::path::PathBuf;
use std::sync::OnceLock;

/// Global storage for a custom config file path
static CONFIG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Override the config file location with an explicit path.
/// Must be called before `config_path()` is first used.
pub fn init_config_path(custom_path: Option<PathBuf>) {
    let Some(path) = custom_path else {
        return;
    };
    if CONFIG_PATH.set(path.clone()).is_err() {
        let existing = CONFIG_PATH
            .get()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<unknown>".to_string());
        tracing::debug!(
            path = %path.display(),
            existing = %existing,
            "Config path already initialized"
        );
    }
}

/// Get the default config directory (`<config_dir>/toolbin`)
fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("toolbin"))
        .unwrap_or_else(|| PathBuf::from(".toolbin"))
}

/// Get the config file path.
/// Returns the custom path if set via init_config_path(), otherwise
/// `<config_dir>/toolbin/config.toml`
pub fn config_path() -> PathBuf {
    CONFIG_PATH
        .get()
        .cloned()
        .unwrap_or_else(|| default_config_dir().join("config.toml"))
}

/// The path given with `--config`, if any
pub fn explicit_config_path() -> Option<PathBuf> {
    CONFIG_PATH.get().cloned()
}

/// Default word list for passphrase generation
pub fn default_dict_path() -> PathBuf {
    PathBuf::from("/usr/share/dict/words")
}
