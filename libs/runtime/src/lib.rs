//! Process-level plumbing shared by the students-admin binaries:
//! layered configuration, logging setup and home directory resolution.

pub mod config;
pub mod logging;
pub mod paths;

pub use config::{
    default_logging_config, AppConfig, CliOverrides, LogSection, LoggingConfig, ServerConfig,
};
pub use paths::{resolve_home_dir, HomeDirError};
