use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

const DEFAULT_TOML: &str = "judgeload.toml";
const DEFAULT_JSON: &str = "judgeload.json";

/// Loads `path`, or the `judgeload.toml` / `judgeload.json` in the working
/// directory when no path is given.
///
/// # Errors
///
/// Returns an error when the config file cannot be read or parsed, or when
/// both default files exist.
pub fn load_config(path: Option<&str>) -> AppResult<Option<ConfigFile>> {
    let path = match path {
        Some(path) => Some(PathBuf::from(path)),
        None => default_config_path(Path::new("."))?,
    };
    path.map(|path| load_config_file(&path)).transpose()
}

/// Picks the default config file in `dir`. Having both is an error rather
/// than a silent preference for one of them.
pub(crate) fn default_config_path(dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let toml = dir.join(DEFAULT_TOML);
    let json = dir.join(DEFAULT_JSON);
    match (toml.is_file(), json.is_file()) {
        (true, true) => Err(ConfigError::AmbiguousDefault { toml, json }),
        (true, false) => Ok(Some(toml)),
        (false, true) => Ok(Some(json)),
        (false, false) => Ok(None),
    }
}

pub(crate) fn load_config_file(path: &Path) -> AppResult<ConfigFile> {
    let content = std::fs::read_to_string(path).map_err(|err| {
        AppError::config(ConfigError::ReadConfig {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    let config = parse_config(path, &content)?;

    info!("Loaded config from {}.", path.display());
    if config.password.is_some() {
        warn!(
            "{} stores the judge password in plain text; prefer JUDGE_PASSWORD.",
            path.display()
        );
    }
    Ok(config)
}

fn parse_config(path: &Path, content: &str) -> Result<ConfigFile, ConfigError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(content).map_err(|err| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source: err,
        }),
        Some("json") => serde_json::from_str(content).map_err(|err| ConfigError::ParseJson {
            path: path.to_path_buf(),
            source: err,
        }),
        Some(ext) => Err(ConfigError::UnsupportedExtension {
            ext: ext.to_owned(),
        }),
        None => Err(ConfigError::MissingExtension),
    }
}
