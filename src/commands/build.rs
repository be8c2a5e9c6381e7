use anyhow::Context;

use super::CommandInput;
use crate::cli::BuildArgs;
use crate::options::BuildOptions;
use crate::process::{ToolInvocation, run_tool};
use crate::wrangler::WranglerConfig;

/// `npx next build`, unless the Next.js build is skipped.
pub fn plan_next_build(options: &BuildOptions, args: &BuildArgs) -> Option<ToolInvocation> {
    (!args.skip_next_build).then(|| ToolInvocation::npx(&options.app_path, ["next", "build"]))
}

pub(super) async fn run(
    options: &BuildOptions,
    input: CommandInput<'_, BuildArgs>,
    wrangler: Option<&WranglerConfig>,
) -> anyhow::Result<()> {
    let args = input.args;
    tracing::debug!(source_dir = %input.source_dir.display(), "building");

    match plan_next_build(options, args) {
        Some(invocation) => run_tool(&invocation)
            .await
            .context("Next.js build failed")?,
        None => tracing::info!("skipping Next.js build"),
    }

    if args.skip_wrangler_config_check {
        tracing::debug!("skipping wrangler config check");
    } else {
        check_wrangler_config(wrangler)?;
    }

    let output_dir = input.output_dir_or(options);
    eprintln!(
        "  {} build ready in {} (minify: {})",
        console::style("✓").green().bold(),
        output_dir.display(),
        if args.minify { "on" } else { "off" },
    );
    Ok(())
}

fn check_wrangler_config(wrangler: Option<&WranglerConfig>) -> anyhow::Result<()> {
    let Some(config) = wrangler else {
        eprintln!(
            "  {} no wrangler config found. Create wrangler.json or pass --skipWranglerConfigCheck",
            console::style("!").yellow().bold(),
        );
        return Ok(());
    };

    if !config.has_nodejs_compat() {
        anyhow::bail!(
            "the `nodejs_compat` compatibility flag must be enabled in {}",
            config.path.display()
        );
    }
    Ok(())
}
