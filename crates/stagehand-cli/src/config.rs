//! Configuration file loading for the CLI
//!
//! Layout settings come from a TOML file found in one of three places: the
//! path given with `--config`, `stagehand/config.toml` under the working
//! directory, or the platform configuration directory. A diagram's own
//! `layout` object is applied on top of whatever is loaded here.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use stagehand::{StagehandError, config::AppConfig};

/// Relative path checked when no explicit configuration is given.
const LOCAL_CONFIG: &str = "stagehand/config.toml";

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for StagehandError {
    fn from(err: ConfigError) -> Self {
        StagehandError::Config(err.to_string())
    }
}

/// Where a configuration file was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given on the command line.
    Explicit,
    /// `stagehand/config.toml` under the working directory.
    Local,
    /// The platform configuration directory.
    System,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Explicit => "explicit",
            Self::Local => "local",
            Self::System => "system",
        };
        f.write_str(name)
    }
}

/// Locates the configuration file to use, if any.
///
/// Search order:
/// 1. Explicit path if provided, whether or not it exists
/// 2. Local project directory (`stagehand/config.toml`)
/// 3. Platform-specific config directory
///
/// Returns `None` when neither default location holds a file.
pub fn find_config(explicit_path: Option<&Path>) -> Option<(ConfigSource, PathBuf)> {
    // 1. An explicit path wins even when missing, so the caller can report it
    if let Some(path) = explicit_path {
        return Some((ConfigSource::Explicit, path.to_path_buf()));
    }

    // 2. Local project directory
    let local_config = Path::new(LOCAL_CONFIG);
    if local_config.exists() {
        return Some((ConfigSource::Local, local_config.to_path_buf()));
    }

    // 3. Platform-specific config directory
    let Some(proj_dirs) = ProjectDirs::from("com", "stagehand", "stagehand") else {
        debug!("Could not determine platform-specific config directory");
        return None;
    };
    let system_config = proj_dirs.config_dir().join("config.toml");
    if system_config.exists() {
        return Some((ConfigSource::System, system_config));
    }

    debug!(path = system_config.display().to_string(); "System configuration file not found");
    None
}

/// Find and load the layout configuration.
///
/// Falls back to [`AppConfig::default`] when [`find_config`] finds nothing.
///
/// # Errors
///
/// Returns [`StagehandError::Config`] when:
/// - An explicit path is given but no file exists there
/// - The chosen file is not valid TOML or does not match the configuration schema
///
/// Returns [`StagehandError::Io`] when the file exists but cannot be read.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, StagehandError> {
    let explicit_path: Option<&Path> = explicit_path.as_ref().map(AsRef::as_ref);
    match find_config(explicit_path) {
        Some((source, path)) => {
            info!(
                path = path.display().to_string(),
                source = source.to_string();
                "Loading configuration"
            );
            load_config_file(&path)
        }
        None => {
            debug!("No configuration file found, using default configuration");
            Ok(AppConfig::default())
        }
    }
}

/// Reads and parses one TOML configuration file.
///
/// # Errors
///
/// Fails when the file is missing or unreadable, or when TOML parsing fails.
fn load_config_file(path: &Path) -> Result<AppConfig, StagehandError> {
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    Ok(config)
}
