use std::path::{Component, Path, PathBuf};

use clap::ValueEnum;

use super::dir::assert_dir_arg;
use super::error::ArgsError;
use super::parser::{ParsedOptions, parse_options};
use super::passthrough::passthrough_args;
use super::schema::cli_schema;
use super::wrangler_flags::environment_flag;
use super::{
    Arguments, BuildArgs, Command, CommandName, PopulateCacheArgs, Target, WranglerArgs,
};
use crate::env::{EnvSource, flag_or_env};

pub const SKIP_NEXT_APP_BUILD: &str = "SKIP_NEXT_APP_BUILD";
pub const SKIP_WRANGLER_CONFIG_CHECK: &str = "SKIP_WRANGLER_CONFIG_CHECK";

/// Turn the raw argument vector (program name stripped) into a command descriptor.
///
/// `cwd` anchors a relative `--output`; `env` supplies the build overrides.
pub fn resolve_args<S: AsRef<str>>(
    args: &[S],
    cwd: &Path,
    env: &impl EnvSource,
) -> Result<Arguments, ArgsError> {
    let schema = cli_schema();
    let parsed = parse_options(args, &schema);

    let output_dir = match parsed.string("output") {
        Some(output) => {
            let dir = absolute(cwd, Path::new(output));
            assert_dir_arg(&dir, Some("output"), true)?;
            Some(dir)
        }
        None => None,
    };

    let name = parsed.positional(0);
    let command = match name.and_then(|n| CommandName::from_str(n, false).ok()) {
        Some(CommandName::Build) => Command::Build(BuildArgs {
            skip_next_build: flag_or_env(parsed.flag("skipBuild"), SKIP_NEXT_APP_BUILD, env),
            skip_wrangler_config_check: flag_or_env(
                parsed.flag("skipWranglerConfigCheck"),
                SKIP_WRANGLER_CONFIG_CHECK,
                env,
            ),
            minify: !parsed.flag("noMinify"),
        }),
        Some(name @ (CommandName::Preview | CommandName::Deploy | CommandName::Upload)) => {
            let wrangler = WranglerArgs {
                passthrough_args: passthrough_args(args, &schema),
                cache_chunk_size: cache_chunk_size(&parsed)?,
            };
            match name {
                CommandName::Preview => Command::Preview(wrangler),
                CommandName::Deploy => Command::Deploy(wrangler),
                _ => Command::Upload(wrangler),
            }
        }
        Some(CommandName::PopulateCache) => {
            let value = parsed.positional(1);
            let target = value
                .and_then(|t| Target::from_str(t, false).ok())
                .ok_or_else(|| ArgsError::InvalidTarget {
                    value: value.map(str::to_string),
                })?;
            Command::PopulateCache(PopulateCacheArgs {
                target,
                environment: environment_flag(args),
                cache_chunk_size: cache_chunk_size(&parsed)?,
            })
        }
        None => {
            return Err(ArgsError::UnknownCommand {
                value: name.map(str::to_string),
                expected: expected_commands(),
            });
        }
    };

    tracing::debug!(?command, ?output_dir, "resolved arguments");
    Ok(Arguments {
        command,
        output_dir,
    })
}

/// `'build' | 'preview' | ...`, straight from the command enum.
fn expected_commands() -> String {
    CommandName::value_variants()
        .iter()
        .map(|c| format!("'{}'", c.as_str()))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// An empty value counts as not given; zero is rejected.
fn cache_chunk_size(parsed: &ParsedOptions) -> Result<Option<u64>, ArgsError> {
    match parsed.string("cacheChunkSize") {
        None | Some("") => Ok(None),
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(size) if size > 0 => Ok(Some(size)),
            _ => Err(ArgsError::InvalidCacheChunkSize {
                value: raw.to_string(),
            }),
        },
    }
}

/// Join onto `base` and fold `.`/`..` lexically, without touching the filesystem.
fn absolute(base: &Path, path: &Path) -> PathBuf {
    let joined = base.join(path);
    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
