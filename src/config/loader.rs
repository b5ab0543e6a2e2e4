//! Loader for the RON movement config at startup.

use ron::Options;
use std::fs;
use std::path::Path;

use super::data::MovementConfigFile;

/// Error type for config loading failures.
#[derive(Debug)]
pub struct ConfigLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse and validate config text. `source` only labels errors.
pub fn parse_movement_config(
    source: &str,
    contents: &str,
) -> Result<MovementConfigFile, ConfigLoadError> {
    let config: MovementConfigFile = ron_options()
        .from_str(contents)
        .map_err(|e| ConfigLoadError {
            file: source.to_string(),
            message: format!("Parse error: {}", e),
        })?;

    config.movement.validate().map_err(|message| ConfigLoadError {
        file: source.to_string(),
        message: format!("Invalid movement tuning: {}", message),
    })?;

    Ok(config)
}

pub fn load_movement_config(path: &Path) -> Result<MovementConfigFile, ConfigLoadError> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ConfigLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    parse_movement_config(&file_name, &contents)
}
