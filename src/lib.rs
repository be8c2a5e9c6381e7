//! ocf: build and deploy Next.js applications to Cloudflare Workers

pub mod cli;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod env;
pub mod logger;
pub mod options;
pub mod process;
pub mod ui;
pub mod wrangler;

// Re-export commonly used types
pub use cli::{Arguments, Command, resolve_args};
pub use dispatch::{RunContext, run_command};
