//! Loading the optional `--config` JSON overlay.

use crate::error::CliError;
use hello_opengl_core::WindowConfig;
use std::fs;
use std::path::Path;

/// Returns the defaults when `path` is `None`, otherwise the file's JSON
/// laid over the defaults. The result is validated either way.
pub fn load_config(path: Option<&Path>) -> Result<WindowConfig, CliError> {
    let config = match path {
        None => WindowConfig::default(),
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|e| {
                CliError::Input(format!("cannot read config {}: {e}", path.display()))
            })?;
            WindowConfig::from_json(&text).map_err(|e| {
                CliError::Input(format!("config {}: {e}", path.display()))
            })?
        }
    };
    config.validate()?;
    Ok(config)
}
