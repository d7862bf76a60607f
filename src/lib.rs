use std::path::PathBuf;

pub mod cli;
pub mod config;
pub mod console;
pub mod dataset;
mod error;
pub use error::Error;
pub mod gps;
pub use gps::{BoundingBox, Location};
pub mod plot;
pub mod route;
pub mod services;
pub mod style;

static APP_DIR_NAME: &str = "sport-map";
static CONFIG_FILE_NAME: &str = "config.yml";

/// Directory holding the application's configuration
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(PathBuf::new)
        .join(APP_DIR_NAME)
}

/// Config file read when no other file is given on the command line
pub fn config_file() -> PathBuf {
    config_dir().join(CONFIG_FILE_NAME)
}
