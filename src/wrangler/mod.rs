//! Reading the wrangler configuration of the application.


use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Looked up in this order when no `--config` is given.
const CONFIG_FILES: [&str; 2] = ["wrangler.json", "wrangler.toml"];

#[derive(Debug, Error)]
pub enum WranglerConfigError {
    #[error("wrangler config not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("environment '{env}' is not defined in {}", .path.display())]
    UnknownEnvironment { env: String, path: PathBuf },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WranglerConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub main: Option<String>,
    #[serde(default)]
    pub compatibility_date: Option<String>,
    #[serde(default)]
    pub compatibility_flags: Vec<String>,
    #[serde(skip)]
    pub path: PathBuf,
}

impl WranglerConfig {
    pub fn has_nodejs_compat(&self) -> bool {
        self.compatibility_flags
            .iter()
            .any(|f| f == "nodejs_compat" || f == "nodejs_compat_v2")
    }
}

/// Read the wrangler config for `env`.
///
/// An explicit `config_file` (relative to `app_dir`) must exist. Otherwise the
/// default file names are tried and `None` is returned if there is none.
pub fn read_wrangler_config(
    app_dir: &Path,
    env: Option<&str>,
    config_file: Option<&str>,
) -> Result<Option<WranglerConfig>, WranglerConfigError> {
    let path = match config_file {
        Some(file) => {
            let path = app_dir.join(file);
            if !path.is_file() {
                return Err(WranglerConfigError::NotFound(path));
            }
            path
        }
        None => match CONFIG_FILES
            .iter()
            .map(|name| app_dir.join(name))
            .find(|p| p.is_file())
        {
            Some(path) => path,
            None => {
                tracing::debug!(dir = %app_dir.display(), "no wrangler config found");
                return Ok(None);
            }
        },
    };

    let content = std::fs::read_to_string(&path).map_err(|source| WranglerConfigError::Read {
        path: path.clone(),
        source,
    })?;

    let parse_err = |message: String| WranglerConfigError::Parse {
        path: path.clone(),
        message,
    };
    let mut value: serde_json::Value = if path.extension().is_some_and(|e| e == "toml") {
        toml::from_str(&content).map_err(|e| parse_err(e.to_string()))?
    } else {
        serde_json::from_str(&content).map_err(|e| parse_err(e.to_string()))?
    };

    if let Some(env) = env {
        apply_environment(&mut value, env).ok_or_else(|| {
            WranglerConfigError::UnknownEnvironment {
                env: env.to_string(),
                path: path.clone(),
            }
        })?;
    }

    let mut config: WranglerConfig =
        serde_json::from_value(value).map_err(|e| parse_err(e.to_string()))?;
    config.path = path;
    Ok(Some(config))
}

/// Overlay `env.<name>` onto the top-level keys. `None` if the environment is missing.
fn apply_environment(value: &mut serde_json::Value, env: &str) -> Option<()> {
    let overrides = value.get("env")?.get(env)?.as_object()?.clone();
    let top = value.as_object_mut()?;
    for (key, v) in overrides {
        top.insert(key, v);
    }
    top.remove("env");
    Some(())
}
