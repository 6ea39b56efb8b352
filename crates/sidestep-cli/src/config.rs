//! Configuration and scene file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory),
//! and reading the scene files that the CLI replays.

use std::{fs, path::Path};

use directories::ProjectDirs;
use log::{debug, info};
use serde::de::DeserializeOwned;

use sidestep::{SidestepError, config::AppConfig, scene::Scene};

use crate::error::CliError;

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (sidestep/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// The loaded configuration is validated before it is returned.
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
/// - Config values fail validation
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, CliError> {
    let config = find_config(explicit_path)?;
    config.validate().map_err(SidestepError::from)?;
    Ok(config)
}

fn find_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, CliError> {
    // 1. Try the explicitly provided path first if available
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_toml_file(path);
    }

    // 2. Try the local project directory
    let local_config = Path::new("sidestep/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_toml_file(local_config);
    }

    // 3. Try the platform-specific config directory
    if let Some(proj_dirs) = ProjectDirs::from("com", "sidestep", "sidestep") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_toml_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    // 4. If no config is found, return default config
    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load and validate a scene description.
///
/// # Errors
///
/// Returns error if the file is missing, is not valid TOML for a
/// [`Scene`], or describes invalid geometry.
pub fn load_scene(path: impl AsRef<Path>) -> Result<Scene, CliError> {
    let scene: Scene = load_toml_file(path)?;
    scene.validate()?;
    debug!(
        width = scene.container().width(),
        height = scene.container().height(),
        events = scene.events().len();
        "Scene loaded"
    );
    Ok(scene)
}

fn load_toml_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, CliError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CliError::MissingFile(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;

    toml::from_str(&content)
        .map_err(|err| CliError::toml(path.display().to_string(), content.as_str(), &err))
}
