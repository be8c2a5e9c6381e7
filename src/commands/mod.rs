//! Command handlers.
//!
//! The dispatcher only talks to [`CommandHandlers`]; [`ExternalHandlers`] is
//! the implementation used by the binary, which hands the actual work to
//! `next` and `wrangler`.

mod build;
mod populate_cache;
mod wrangler;


pub use build::plan_next_build;
pub use populate_cache::{KV_BINDING, bulk_file, plan_populate_cache};
pub use wrangler::plan_wrangler;

use std::path::{Path, PathBuf};

use crate::cli::{BuildArgs, CommandName, PopulateCacheArgs, WranglerArgs};
use crate::config::OpenNextConfig;
use crate::options::BuildOptions;
use crate::process::run_tool;
use crate::wrangler::WranglerConfig;

/// What a handler receives besides the shared options and config.
#[derive(Debug)]
pub struct CommandInput<'a, T> {
    pub args: &'a T,
    /// `--output`, when given.
    pub output_dir: Option<&'a Path>,
    /// Directory `ocf` was started in.
    pub source_dir: &'a Path,
}

impl<T> CommandInput<'_, T> {
    /// `--output` if given, else the normalized output directory.
    pub fn output_dir_or(&self, options: &BuildOptions) -> PathBuf {
        self.output_dir
            .map(Path::to_path_buf)
            .unwrap_or_else(|| options.output_dir.clone())
    }
}

#[allow(async_fn_in_trait)]
pub trait CommandHandlers {
    async fn build(
        &self,
        options: &BuildOptions,
        config: &OpenNextConfig,
        input: CommandInput<'_, BuildArgs>,
        wrangler: Option<&WranglerConfig>,
    ) -> anyhow::Result<()>;

    async fn preview(
        &self,
        options: &BuildOptions,
        config: &OpenNextConfig,
        input: CommandInput<'_, WranglerArgs>,
    ) -> anyhow::Result<()>;

    async fn deploy(
        &self,
        options: &BuildOptions,
        config: &OpenNextConfig,
        input: CommandInput<'_, WranglerArgs>,
    ) -> anyhow::Result<()>;

    async fn upload(
        &self,
        options: &BuildOptions,
        config: &OpenNextConfig,
        input: CommandInput<'_, WranglerArgs>,
    ) -> anyhow::Result<()>;

    async fn populate_cache(
        &self,
        options: &BuildOptions,
        config: &OpenNextConfig,
        input: CommandInput<'_, PopulateCacheArgs>,
    ) -> anyhow::Result<()>;
}

/// Runs each command through `next`/`wrangler` child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExternalHandlers;

impl CommandHandlers for ExternalHandlers {
    async fn build(
        &self,
        options: &BuildOptions,
        _config: &OpenNextConfig,
        input: CommandInput<'_, BuildArgs>,
        wrangler: Option<&WranglerConfig>,
    ) -> anyhow::Result<()> {
        build::run(options, input, wrangler).await
    }

    async fn preview(
        &self,
        options: &BuildOptions,
        _config: &OpenNextConfig,
        input: CommandInput<'_, WranglerArgs>,
    ) -> anyhow::Result<()> {
        run_tool(&plan_wrangler(CommandName::Preview, options, input.args)).await
    }

    async fn deploy(
        &self,
        options: &BuildOptions,
        _config: &OpenNextConfig,
        input: CommandInput<'_, WranglerArgs>,
    ) -> anyhow::Result<()> {
        run_tool(&plan_wrangler(CommandName::Deploy, options, input.args)).await
    }

    async fn upload(
        &self,
        options: &BuildOptions,
        _config: &OpenNextConfig,
        input: CommandInput<'_, WranglerArgs>,
    ) -> anyhow::Result<()> {
        run_tool(&plan_wrangler(CommandName::Upload, options, input.args)).await
    }

    async fn populate_cache(
        &self,
        options: &BuildOptions,
        _config: &OpenNextConfig,
        input: CommandInput<'_, PopulateCacheArgs>,
    ) -> anyhow::Result<()> {
        populate_cache::run(options, input).await
    }
}
