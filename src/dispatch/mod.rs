//! Shared setup and routing from a resolved command to its handler.

#[cfg(test)]
mod dispatch_tests;

use std::path::Path;

use anyhow::Context;

use crate::cli::wrangler_flags::{config_flag, environment_flag};
use crate::cli::{Arguments, Command};
use crate::commands::{CommandHandlers, CommandInput};
use crate::config::{self, CompileOptions};
use crate::env::EnvSource;
use crate::logger::{LogLevel, Logger};
use crate::options::normalize_options;
use crate::ui;
use crate::wrangler::read_wrangler_config;

/// Process-level inputs the dispatcher needs besides the command itself.
pub struct RunContext<'a, E> {
    /// Next.js application directory (the working directory).
    pub app_dir: &'a Path,
    /// Installation directory of `ocf`.
    pub tool_dir: &'a Path,
    /// Arguments as given, program name stripped.
    pub raw_args: &'a [String],
    pub env: &'a E,
    pub logger: &'a Logger,
}

/// Run shared setup once, then exactly one handler.
pub async fn run_command<E, H>(
    args: &Arguments,
    ctx: &RunContext<'_, E>,
    handlers: &H,
) -> anyhow::Result<()>
where
    E: EnvSource,
    H: CommandHandlers,
{
    let name = args.command.name().as_str();
    ui::print_header(&format!("Cloudflare {name}"));
    ui::show_warning_on_windows();

    config::ensure_default_config(ctx.app_dir)?;
    let compiled =
        config::compile_open_next_config(ctx.app_dir, CompileOptions { compile_edge: true })?;
    config::ensure_cloudflare_config(&compiled.config)?;

    let options = normalize_options(
        &compiled.config,
        ctx.app_dir,
        ctx.tool_dir,
        &compiled.build_dir,
        ctx.env,
    );
    ctx.logger.set_level(LogLevel::from_debug(options.debug));
    tracing::debug!(?options, "normalized options");

    let config = &compiled.config;
    let output_dir = args.output_dir.as_deref();
    let source_dir = ctx.app_dir;

    match &args.command {
        Command::Build(build) => {
            let env = environment_flag(ctx.raw_args);
            let config_file = config_flag(ctx.raw_args);
            let wrangler =
                read_wrangler_config(ctx.app_dir, env.as_deref(), config_file.as_deref())
                    .context("failed to read wrangler config")?;

            let input = CommandInput {
                args: build,
                output_dir,
                source_dir,
            };
            handlers
                .build(&options, config, input, wrangler.as_ref())
                .await
        }
        Command::Preview(preview) => {
            let input = CommandInput {
                args: preview,
                output_dir,
                source_dir,
            };
            handlers.preview(&options, config, input).await
        }
        Command::Deploy(deploy) => {
            let input = CommandInput {
                args: deploy,
                output_dir,
                source_dir,
            };
            handlers.deploy(&options, config, input).await
        }
        Command::Upload(upload) => {
            let input = CommandInput {
                args: upload,
                output_dir,
                source_dir,
            };
            handlers.upload(&options, config, input).await
        }
        Command::PopulateCache(populate) => {
            let input = CommandInput {
                args: populate,
                output_dir,
                source_dir,
            };
            handlers.populate_cache(&options, config, input).await
        }
    }
}
