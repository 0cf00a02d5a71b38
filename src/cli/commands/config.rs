//! Config Command
//!
//! Usage:
//!   storyweaver config show [-f json] [--file PATH]
//!   storyweaver config path
//!   storyweaver config init [-g] [--force]

use std::path::Path;

use crate::cli::Output;
use crate::config::ConfigLoader;
use crate::types::{Result, StoryError};

/// Show the merged effective configuration, or a single file on top of
/// the defaults when `file` is given
pub fn show(format: &str, file: Option<&Path>) -> Result<()> {
    let config = match file {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    println!("{}", ConfigLoader::render_config(&config, format == "json")?);
    Ok(())
}

/// Show configuration paths
pub fn path() -> Result<()> {
    let config = ConfigLoader::load()?;
    ConfigLoader::show_path(&config);
    Ok(())
}

/// Write a default config file in the project or global directory
pub fn init(global: bool, force: bool) -> Result<()> {
    let dir = if global {
        ConfigLoader::global_dir().ok_or_else(|| {
            StoryError::Config("Cannot determine global config directory".to_string())
        })?
    } else {
        ConfigLoader::project_dir()
    };

    let path = ConfigLoader::init_config(&dir, force)?;
    Output::new().success(&format!("Configuration ready at {}", path.display()));
    Ok(())
}
