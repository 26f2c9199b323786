//! Report configuration resolution and loading.
//!
//! Resolution order: CLI argument → PASSCHART_CONFIG → PASSCHART_CONFIG_DIR →
//! XDG config directory → built-in defaults.

use pc_common::{Error, Result};
use pc_report::ReportConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable names.
pub const ENV_CONFIG_PATH: &str = "PASSCHART_CONFIG";
pub const ENV_CONFIG_DIR: &str = "PASSCHART_CONFIG_DIR";

/// Standard config file name.
const CONFIG_FILENAME: &str = "report.json";

/// Application name for XDG directories.
const APP_NAME: &str = "passchart";

/// Where the report configuration came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly provided via `--config`.
    CliArgument,

    /// Set via PASSCHART_CONFIG or PASSCHART_CONFIG_DIR.
    Environment,

    /// Found in the XDG config directory.
    XdgConfig,

    /// Using built-in defaults.
    #[default]
    BuiltinDefault,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::CliArgument => write!(f, "CLI argument"),
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::XdgConfig => write!(f, "XDG config"),
            ConfigSource::BuiltinDefault => write!(f, "builtin default"),
        }
    }
}

/// Lookup locations other than the CLI argument.
#[derive(Debug, Clone, Default)]
pub struct ConfigLocations {
    /// Value of PASSCHART_CONFIG.
    pub env_path: Option<PathBuf>,
    /// Value of PASSCHART_CONFIG_DIR.
    pub env_dir: Option<PathBuf>,
    /// `$XDG_CONFIG_HOME/passchart` or the platform equivalent.
    pub xdg_dir: Option<PathBuf>,
}

impl ConfigLocations {
    /// Read locations from the process environment.
    pub fn from_env() -> Self {
        ConfigLocations {
            env_path: std::env::var_os(ENV_CONFIG_PATH)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            env_dir: std::env::var_os(ENV_CONFIG_DIR)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            xdg_dir: xdg_config_dir(),
        }
    }
}

/// A loaded report configuration and its origin.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: ReportConfig,
    pub source: ConfigSource,
    pub path: Option<PathBuf>,
}

/// Resolve the configuration file path.
///
/// An explicit CLI path must exist. An environment path that does not exist
/// is skipped with a warning. Returns `None` when defaults apply.
pub fn resolve_config_path(
    cli_path: Option<&Path>,
    locations: &ConfigLocations,
) -> Result<(Option<PathBuf>, ConfigSource)> {
    // 1. CLI argument
    if let Some(path) = cli_path {
        if !path.is_file() {
            return Err(Error::Config(format!(
                "config file '{}' does not exist",
                path.display()
            )));
        }
        return Ok((Some(path.to_path_buf()), ConfigSource::CliArgument));
    }

    // 2. Environment variable (direct path)
    if let Some(path) = &locations.env_path {
        if path.is_file() {
            return Ok((Some(path.clone()), ConfigSource::Environment));
        }
        warn!(
            path = %path.display(),
            "{} points to a missing file; ignoring",
            ENV_CONFIG_PATH
        );
    }

    // 3. Environment variable (config dir)
    if let Some(dir) = &locations.env_dir {
        let path = dir.join(CONFIG_FILENAME);
        if path.is_file() {
            return Ok((Some(path), ConfigSource::Environment));
        }
    }

    // 4. XDG config directory
    if let Some(dir) = &locations.xdg_dir {
        let path = dir.join(CONFIG_FILENAME);
        if path.is_file() {
            return Ok((Some(path), ConfigSource::XdgConfig));
        }
    }

    // 5. Built-in default
    Ok((None, ConfigSource::BuiltinDefault))
}

/// Load the report configuration from the resolved location.
pub fn load_report_config(
    cli_path: Option<&Path>,
    locations: &ConfigLocations,
) -> Result<ResolvedConfig> {
    let (path, source) = resolve_config_path(cli_path, locations)?;

    let config = match &path {
        Some(path) => read_config_file(path)?,
        None => ReportConfig::default(),
    };
    config.validate()?;

    debug!(
        source = %source,
        path = ?path,
        "Report configuration resolved"
    );

    Ok(ResolvedConfig {
        config,
        source,
        path,
    })
}

fn read_config_file(path: &Path) -> Result<ReportConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("failed to read '{}': {}", path.display(), e))
    })?;
    ReportConfig::from_json(&content)
        .map_err(|e| Error::Config(format!("invalid config '{}': {}", path.display(), e)))
}

/// Get the XDG config directory for passchart.
pub fn xdg_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME))
}
