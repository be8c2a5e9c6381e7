use std::path::{Path, PathBuf};

use super::CommandInput;
use crate::cli::PopulateCacheArgs;
use crate::options::BuildOptions;
use crate::process::{ToolInvocation, run_tool};

/// KV namespace binding of the incremental cache.
pub const KV_BINDING: &str = "NEXT_INC_CACHE_KV";

/// Bulk file produced by the build, relative to the output directory.
pub fn bulk_file(output_dir: &Path) -> PathBuf {
    output_dir.join("cache").join("kv-bulk.json")
}

/// `npx wrangler kv bulk put <file> --binding <kv> --local|--remote [--env <e>]`.
pub fn plan_populate_cache(
    options: &BuildOptions,
    output_dir: &Path,
    args: &PopulateCacheArgs,
) -> ToolInvocation {
    let mut argv = vec![
        "wrangler".to_string(),
        "kv".into(),
        "bulk".into(),
        "put".into(),
        bulk_file(output_dir).display().to_string(),
        "--binding".into(),
        KV_BINDING.into(),
        format!("--{}", args.target.as_str()),
    ];
    if let Some(env) = &args.environment {
        argv.push("--env".into());
        argv.push(env.clone());
    }
    ToolInvocation::npx(&options.app_path, argv)
}

pub(super) async fn run(
    options: &BuildOptions,
    input: CommandInput<'_, PopulateCacheArgs>,
) -> anyhow::Result<()> {
    let args = input.args;
    let output_dir = input.output_dir_or(options);

    let file = bulk_file(&output_dir);
    if !file.is_file() {
        anyhow::bail!(
            "cache data not found at {}. Run `ocf build` first",
            file.display()
        );
    }

    tracing::info!(
        cache_target = args.target.as_str(),
        environment = args.environment.as_deref(),
        chunk_size = args.cache_chunk_size,
        "populating incremental cache"
    );
    run_tool(&plan_populate_cache(options, &output_dir, args)).await
}
