// src/exec/command.rs

use std::path::Path;
use std::process::Stdio;

use anyhow::{Context, Result, anyhow};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info};

/// Result of one generation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateOutcome {
    Success,
    Failed(i32), // exit code
}

/// The configured renderer command.
///
/// The command string is split on whitespace into program + leading args (no
/// shell interpretation); `--source`, `--out` and `--size` are appended per
/// invocation, so paths with spaces pass through untouched.
#[derive(Debug, Clone)]
pub struct GeneratorCommand {
    program: String,
    base_args: Vec<String>,
}

impl GeneratorCommand {
    pub fn parse(command: &str) -> Result<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| anyhow!("renderer command is empty"))?;

        Ok(Self {
            program,
            base_args: parts.collect(),
        })
    }

    /// Run one generation pass over the whole source tree and wait for it.
    ///
    /// A non-zero exit is an outcome, not an error; `Err` is reserved for
    /// failing to spawn or wait on the process at all.
    pub async fn run(&self, source: &Path, out: &Path, size: u32) -> Result<GenerateOutcome> {
        info!(
            program = %self.program,
            source = ?source,
            out = ?out,
            size,
            "starting generation pass"
        );

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.base_args)
            .arg("--source")
            .arg(source)
            .arg("--out")
            .arg(out)
            .arg("--size")
            .arg(size.to_string())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd
            .spawn()
            .with_context(|| format!("spawning renderer '{}'", self.program))?;

        // Always consume both pipes so buffers don't fill; log at debug.
        if let Some(stdout) = child.stdout.take() {
            tokio::spawn(async move {
                let reader = BufReader::new(stdout);
                let mut lines = reader.lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    debug!("renderer stdout: {}", line);
                }
            });
        }
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(async move {
                let reader = BufReader::new(stderr);
                let mut lines = reader.lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    debug!("renderer stderr: {}", line);
                }
            });
        }

        let status = child
            .wait()
            .await
            .with_context(|| format!("waiting for renderer '{}'", self.program))?;

        let code = status.code().unwrap_or(-1);
        info!(
            exit_code = code,
            success = status.success(),
            "generation pass exited"
        );

        Ok(if status.success() {
            GenerateOutcome::Success
        } else {
            GenerateOutcome::Failed(code)
        })
    }
}
