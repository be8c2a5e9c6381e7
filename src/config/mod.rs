//! `open-next.config.json`: creation, compilation and platform validation.

mod validate;


pub use validate::ensure_cloudflare_config;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_FILE: &str = "open-next.config.json";
const EDGE_CONFIG_FILE: &str = "open-next.config.edge.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode {}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("the OpenNext config is not compatible with Cloudflare:\n  - {}", .problems.join("\n  - "))]
    Incompatible { problems: Vec<String> },
}

/// Implementations plugged into a server function.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Override {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrapper: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub converter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_external_request: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incremental_cache: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_cache: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionConfig {
    #[serde(default, rename = "override")]
    pub override_: Override,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiddlewareConfig {
    #[serde(default)]
    pub external: bool,
    #[serde(default, rename = "override")]
    pub override_: Override,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenNextConfig {
    #[serde(default)]
    pub default: FunctionConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middleware: Option<MiddlewareConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub edge_externals: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_output_path: Option<String>,
    #[serde(default)]
    pub debug: bool,
}

impl OpenNextConfig {
    /// Configuration that satisfies every Cloudflare constraint.
    pub fn cloudflare_default() -> Self {
        let overrides = |wrapper: &str| Override {
            wrapper: Some(wrapper.into()),
            converter: Some("edge".into()),
            proxy_external_request: Some("fetch".into()),
            incremental_cache: Some("dummy".into()),
            tag_cache: Some("dummy".into()),
            queue: Some("dummy".into()),
        };

        Self {
            default: FunctionConfig {
                override_: overrides("cloudflare-node"),
            },
            middleware: Some(MiddlewareConfig {
                external: true,
                override_: overrides("cloudflare-edge"),
            }),
            edge_externals: vec!["node:crypto".into()],
            ..Self::default()
        }
    }
}

/// Compilation output: the parsed config and where its build artifacts live.
#[derive(Debug, Clone)]
pub struct CompiledConfig {
    pub config: OpenNextConfig,
    pub build_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CompileOptions {
    /// Also emit the config for edge runtimes.
    pub compile_edge: bool,
}

/// Write a default Cloudflare config into `app_dir` if none exists.
///
/// Returns `true` when a file was created.
pub fn ensure_default_config(app_dir: &Path) -> Result<bool, ConfigError> {
    let path = app_dir.join(CONFIG_FILE);
    if path.exists() {
        return Ok(false);
    }

    write_json(&path, &OpenNextConfig::cloudflare_default())?;
    tracing::info!(path = %path.display(), "created default OpenNext config");
    Ok(true)
}

/// Build directory for compiled config and intermediate artifacts.
pub fn build_dir(app_dir: &Path) -> PathBuf {
    app_dir.join(".open-next").join(".build")
}

/// Read `open-next.config.json` from `app_dir` and write its normalized form
/// into the build directory.
pub fn compile_open_next_config(
    app_dir: &Path,
    opts: CompileOptions,
) -> Result<CompiledConfig, ConfigError> {
    let path = app_dir.join(CONFIG_FILE);
    let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    let config: OpenNextConfig =
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;

    let build_dir = build_dir(app_dir);
    std::fs::create_dir_all(&build_dir).map_err(|source| ConfigError::Write {
        path: build_dir.clone(),
        source,
    })?;

    write_json(&build_dir.join(CONFIG_FILE), &config)?;
    if opts.compile_edge {
        write_json(&build_dir.join(EDGE_CONFIG_FILE), &config)?;
    }

    tracing::debug!(build_dir = %build_dir.display(), edge = opts.compile_edge, "compiled OpenNext config");
    Ok(CompiledConfig { config, build_dir })
}

fn write_json(path: &Path, config: &OpenNextConfig) -> Result<(), ConfigError> {
    let mut content = serde_json::to_string_pretty(config).map_err(|source| ConfigError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    content.push('\n');
    std::fs::write(path, content).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}
