//! Utility modules

pub mod logging;
pub mod paths;

pub use paths::{config_path, explicit_config_path, init_config_path};
