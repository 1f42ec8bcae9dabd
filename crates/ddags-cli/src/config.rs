//! Configuration discovery for the CLI.
//!
//! The configuration file is looked up in this order:
//! 1. `--config <path>`, which must exist
//! 2. `ddags/config.toml` under the working directory
//! 3. `config.toml` in the platform config directory
//!
//! When none is found the defaults of [`AppConfig`] apply. Command-line
//! flags are applied on top of whatever was loaded.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use ddags::{
    DdagsError,
    config::{AppConfig, OutputConfig},
};

use crate::Args;

const LOCAL_CONFIG: &str = "ddags/config.toml";
const CONFIG_FILE: &str = "config.toml";

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Failed to read configuration file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to parse TOML configuration {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

impl From<ConfigError> for DdagsError {
    fn from(err: ConfigError) -> Self {
        DdagsError::Config(err.to_string())
    }
}

/// Where the effective configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Explicit(PathBuf),
    Local(PathBuf),
    System(PathBuf),
    Default,
}

impl ConfigSource {
    /// Finds the configuration file for this process.
    pub fn locate(explicit: Option<&Path>) -> Self {
        let system_dir =
            ProjectDirs::from("com", "ddags", "ddags").map(|dirs| dirs.config_dir().to_owned());
        if system_dir.is_none() {
            debug!("Could not determine platform-specific config directory");
        }
        Self::locate_in(explicit, Path::new("."), system_dir.as_deref())
    }

    /// Finds the configuration file relative to `working_dir`, with
    /// `system_dir` as the platform directory.
    ///
    /// An explicit path is returned as is; its existence is checked on load.
    pub fn locate_in(
        explicit: Option<&Path>,
        working_dir: &Path,
        system_dir: Option<&Path>,
    ) -> Self {
        if let Some(path) = explicit {
            return Self::Explicit(path.to_owned());
        }

        let local = working_dir.join(LOCAL_CONFIG);
        if local.is_file() {
            return Self::Local(local);
        }

        if let Some(dir) = system_dir {
            let system = dir.join(CONFIG_FILE);
            if system.is_file() {
                return Self::System(system);
            }
            debug!(path = system.display().to_string(); "System configuration file not found");
        }

        Self::Default
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(path) | Self::Local(path) | Self::System(path) => Some(path),
            Self::Default => None,
        }
    }

    /// Reads the configuration this source points at.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is missing, unreadable or not
    /// valid configuration TOML.
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        let Some(path) = self.path() else {
            debug!("No configuration file found, using default configuration");
            return Ok(AppConfig::default());
        };
        info!(source:? = self; "Loading configuration");

        let content = fs::read_to_string(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => ConfigError::MissingFile(path.to_owned()),
            _ => ConfigError::Read {
                path: path.to_owned(),
                source,
            },
        })?;

        toml::from_str(&content).map_err(|err| ConfigError::Parse {
            path: path.to_owned(),
            message: err.message().to_string(),
        })
    }
}

/// Loads the configuration for `args` and applies its flag overrides.
///
/// # Errors
///
/// Returns `DdagsError::Config` if the configuration file cannot be loaded.
pub fn load_config(args: &Args) -> Result<AppConfig, DdagsError> {
    let source = ConfigSource::locate(args.config.as_deref().map(Path::new));
    let config = source.load()?;
    Ok(apply_overrides(config, args))
}

fn apply_overrides(config: AppConfig, args: &Args) -> AppConfig {
    if !args.pretty {
        return config;
    }
    AppConfig::new(config.validation().clone(), OutputConfig::new(true))
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn args(pretty: bool) -> Args {
        Args {
            input: "snapshot.json".to_string(),
            models: Vec::new(),
            output: None,
            config: None,
            log_level: "off".to_string(),
            pretty,
        }
    }

    #[test]
    fn test_explicit_path_wins() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("ddags")).unwrap();
        fs::write(dir.path().join(LOCAL_CONFIG), "").unwrap();
        let explicit = dir.path().join("custom.toml");

        let source = ConfigSource::locate_in(Some(&explicit), dir.path(), None);

        assert_eq!(source, ConfigSource::Explicit(explicit));
    }

    #[test]
    fn test_local_before_system() {
        let dir = tempdir().unwrap();
        let system = tempdir().unwrap();
        fs::create_dir(dir.path().join("ddags")).unwrap();
        fs::write(dir.path().join(LOCAL_CONFIG), "").unwrap();
        fs::write(system.path().join(CONFIG_FILE), "").unwrap();

        let source = ConfigSource::locate_in(None, dir.path(), Some(system.path()));

        assert_eq!(source, ConfigSource::Local(dir.path().join(LOCAL_CONFIG)));
    }

    #[test]
    fn test_system_then_default() {
        let dir = tempdir().unwrap();
        let system = tempdir().unwrap();

        let source = ConfigSource::locate_in(None, dir.path(), Some(system.path()));
        assert_eq!(source, ConfigSource::Default);
        assert!(source.load().unwrap().validation().validate_on_load());

        fs::write(system.path().join(CONFIG_FILE), "[output]\npretty = true\n").unwrap();
        let source = ConfigSource::locate_in(None, dir.path(), Some(system.path()));
        assert_eq!(source, ConfigSource::System(system.path().join(CONFIG_FILE)));
        assert!(source.load().unwrap().output().pretty());
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let err = ConfigSource::Explicit(path.clone()).load().unwrap_err();

        assert!(matches!(err, ConfigError::MissingFile(ref missing) if *missing == path));
        assert!(DdagsError::from(err).to_string().contains("Missing configuration file"));
    }

    #[test]
    fn test_invalid_value_names_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[validation]\nvalidate_on_load = \"sometimes\"\n").unwrap();

        let err = ConfigSource::Explicit(path.clone()).load().unwrap_err();

        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(&path.display().to_string()));
    }

    #[test]
    fn test_pretty_flag_overrides_file() {
        let config = AppConfig::new(Default::default(), OutputConfig::new(false));

        assert!(apply_overrides(config.clone(), &args(true)).output().pretty());
        assert!(!apply_overrides(config, &args(false)).output().pretty());
    }

    #[test]
    fn test_overrides_keep_validation_settings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[validation]\nreject_self_references = false\n").unwrap();
        let mut cli_args = args(true);
        cli_args.config = Some(path.to_string_lossy().to_string());

        let config = load_config(&cli_args).unwrap();

        assert!(config.output().pretty());
        assert!(!config.validation().reject_self_references());
    }
}
