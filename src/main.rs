use std::path::PathBuf;

use anyhow::Context;

use ocf::commands::ExternalHandlers;
use ocf::env::ProcessEnv;
use ocf::logger::Logger;
use ocf::{RunContext, resolve_args, run_command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let logger = Logger::init();

    let raw_args = std::env::args_os()
        .skip(1)
        .map(|arg| {
            arg.into_string().map_err(|arg| {
                anyhow::anyhow!("argument is not valid UTF-8: {}", arg.to_string_lossy())
            })
        })
        .collect::<anyhow::Result<Vec<String>>>()?;
    let app_dir = std::env::current_dir().context("failed to resolve the current directory")?;
    let env = ProcessEnv;

    let args = resolve_args(&raw_args, &app_dir, &env)?;

    let tool_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(PathBuf::from))
        .unwrap_or_else(|| app_dir.clone());

    let ctx = RunContext {
        app_dir: &app_dir,
        tool_dir: &tool_dir,
        raw_args: &raw_args,
        env: &env,
        logger: &logger,
    };
    run_command(&args, &ctx, &ExternalHandlers).await
}
