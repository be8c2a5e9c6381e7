use crate::cli::{CommandName, WranglerArgs};
use crate::options::BuildOptions;
use crate::process::ToolInvocation;

/// `npx wrangler <subcommand> <passthrough...>` in the app directory.
pub fn plan_wrangler(
    command: CommandName,
    options: &BuildOptions,
    args: &WranglerArgs,
) -> ToolInvocation {
    let subcommand: &[&str] = match command {
        CommandName::Preview => &["dev"],
        CommandName::Upload => &["versions", "upload"],
        _ => &["deploy"],
    };

    if let Some(size) = args.cache_chunk_size {
        tracing::debug!(size, "cache chunk size is only used when populating the cache");
    }

    let argv = std::iter::once("wrangler".to_string())
        .chain(subcommand.iter().map(|s| s.to_string()))
        .chain(args.passthrough_args.iter().cloned());
    ToolInvocation::npx(&options.app_path, argv)
}
