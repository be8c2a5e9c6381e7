pub mod dir;
pub mod error;
pub mod parser;
pub mod passthrough;
pub mod resolve;
pub mod schema;
pub mod wrangler_flags;


pub use error::ArgsError;
pub use parser::{OptionValue, ParsedOptions, parse_options};
pub use passthrough::passthrough_args;
pub use resolve::resolve_args;
pub use schema::{OptionKind, OptionSchema, OptionSpec, cli_schema};

use std::path::PathBuf;

use clap::ValueEnum;

/// Top-level commands, in the order they are listed in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CommandName {
    Build,
    Preview,
    Deploy,
    Upload,
    #[value(name = "populateCache")]
    PopulateCache,
}

impl CommandName {
    pub fn as_str(self) -> &'static str {
        match self {
            CommandName::Build => "build",
            CommandName::Preview => "preview",
            CommandName::Deploy => "deploy",
            CommandName::Upload => "upload",
            CommandName::PopulateCache => "populateCache",
        }
    }
}

/// Where `populateCache` writes: wrangler's local emulation or the real account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Target {
    Local,
    Remote,
}

impl Target {
    pub fn as_str(self) -> &'static str {
        match self {
            Target::Local => "local",
            Target::Remote => "remote",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildArgs {
    pub skip_next_build: bool,
    pub skip_wrangler_config_check: bool,
    pub minify: bool,
}

/// Shared by `preview`, `deploy` and `upload`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WranglerArgs {
    pub passthrough_args: Vec<String>,
    pub cache_chunk_size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulateCacheArgs {
    pub target: Target,
    pub environment: Option<String>,
    pub cache_chunk_size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Build(BuildArgs),
    Preview(WranglerArgs),
    Deploy(WranglerArgs),
    Upload(WranglerArgs),
    PopulateCache(PopulateCacheArgs),
}

impl Command {
    pub fn name(&self) -> CommandName {
        match self {
            Command::Build(_) => CommandName::Build,
            Command::Preview(_) => CommandName::Preview,
            Command::Deploy(_) => CommandName::Deploy,
            Command::Upload(_) => CommandName::Upload,
            Command::PopulateCache(_) => CommandName::PopulateCache,
        }
    }
}

/// Resolved invocation: one command plus the options every command accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arguments {
    pub command: Command,
    /// Absolute, existing directory.
    pub output_dir: Option<PathBuf>,
}
