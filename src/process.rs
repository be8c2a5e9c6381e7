use std::path::{Path, PathBuf};
use std::process::Stdio;

use anyhow::Context;
use tokio::process::Command;
use tokio::signal;

/// An external program to run on behalf of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl ToolInvocation {
    /// `npx <args...>` in `cwd`, so project-local binaries are picked up.
    pub fn npx<I, S>(cwd: &Path, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: "npx".to_string(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: cwd.to_path_buf(),
        }
    }

    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Run `invocation` with inherited stdio until it exits.
///
/// Ctrl-C sends SIGTERM to the child and kills it if it is still
/// alive after 5 seconds.
pub async fn run_tool(invocation: &ToolInvocation) -> anyhow::Result<()> {
    tracing::debug!(command = %invocation.display(), cwd = %invocation.cwd.display(), "spawning");

    let mut child = Command::new(&invocation.program)
        .args(&invocation.args)
        .current_dir(&invocation.cwd)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .with_context(|| format!("failed to start `{}`", invocation.display()))?;

    tokio::select! {
        status = child.wait() => {
            let status = status?;
            if !status.success() {
                anyhow::bail!("`{}` exited with {status}", invocation.display());
            }
        }
        _ = signal::ctrl_c() => {
            tracing::info!("interrupted, stopping {}...", invocation.program);
            #[cfg(unix)]
            {
                if let Some(pid) = child.id() {
                    // SAFETY: pid belongs to a child we spawned and have not reaped yet.
                    unsafe { libc::kill(pid as i32, libc::SIGTERM); }
                    if tokio::time::timeout(std::time::Duration::from_secs(5), child.wait())
                        .await
                        .is_ok()
                    {
                        anyhow::bail!("interrupted");
                    }
                    tracing::warn!("{} did not exit after 5s, force killing", invocation.program);
                }
            }
            let _ = child.kill().await;
            anyhow::bail!("interrupted");
        }
    }

    Ok(())
}
