//! Build options derived from the compiled config and the install location.

use std::path::{Path, PathBuf};

use crate::config::OpenNextConfig;
use crate::env::{EnvSource, is_truthy};

pub const NEXT_PRIVATE_DEBUG: &str = "NEXT_PRIVATE_DEBUG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Next.js application directory.
    pub app_path: PathBuf,
    /// Compiled config and intermediate artifacts.
    pub build_dir: PathBuf,
    /// Final bundle location (`.open-next` by default).
    pub output_dir: PathBuf,
    /// Where `ocf` itself is installed.
    pub tool_dir: PathBuf,
    pub debug: bool,
}

pub fn normalize_options(
    config: &OpenNextConfig,
    app_dir: &Path,
    tool_dir: &Path,
    build_dir: &Path,
    env: &impl EnvSource,
) -> BuildOptions {
    let app_path = match &config.app_path {
        Some(p) => app_dir.join(p),
        None => app_dir.to_path_buf(),
    };
    let output_root = match &config.build_output_path {
        Some(p) => app_dir.join(p),
        None => app_dir.to_path_buf(),
    };

    BuildOptions {
        app_path,
        build_dir: build_dir.to_path_buf(),
        output_dir: output_root.join(".open-next"),
        tool_dir: tool_dir.to_path_buf(),
        debug: config.debug || is_truthy(env, NEXT_PRIVATE_DEBUG),
    }
}
