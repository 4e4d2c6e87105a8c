use super::ServerConfig;
use crate::errors::Error;
use std::fs;
use std::path::Path;

use tracing::info;

/// Loads a server configuration from a YAML or TOML file
///
/// The format is picked from the extension: `.toml` is read as TOML,
/// anything else as YAML. Missing keys fall back to their defaults.
///
/// # Errors
///
/// Returns `Error::Config` if:
/// * The file cannot be read
/// * The content cannot be parsed into a ServerConfig
pub fn load_server_config(file_path: &str) -> Result<ServerConfig, Error> {
    let raw = fs::read_to_string(file_path)?;
    let config = parse_server_config(&raw, file_path)?;
    info!("Loaded server configuration from {}", file_path);
    Ok(config)
}

fn parse_server_config(raw: &str, file_path: &str) -> Result<ServerConfig, Error> {
    let is_toml = Path::new(file_path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    if is_toml {
        Ok(toml::from_str(raw)?)
    } else {
        Ok(serde_yaml::from_str(raw)?)
    }
}
