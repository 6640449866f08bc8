use std::io::ErrorKind;
use std::process::Stdio;

use async_trait::async_trait;
use log::{debug, info};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::config::CompilerConfig;
use crate::RecipeError;

/// Turns rendered markup into a finished document
#[async_trait]
pub trait Compiler: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Compiles markup into the bytes of the output document
    async fn compile(&self, markup: &str) -> Result<Vec<u8>, RecipeError>;
}

/// Pipes markup through an external `typst` executable.
///
/// The command reads markup on stdin and writes the PDF to stdout
/// (`typst compile --format pdf - -` by default).
#[derive(Debug, Clone)]
pub struct TypstCli {
    command: String,
    args: Vec<String>,
}

impl TypstCli {
    pub fn new(config: &CompilerConfig) -> Self {
        TypstCli {
            command: config.command.clone(),
            args: config.args.clone(),
        }
    }

    pub fn with_command(command: impl Into<String>, args: Vec<String>) -> Self {
        TypstCli {
            command: command.into(),
            args,
        }
    }
}

impl Default for TypstCli {
    fn default() -> Self {
        TypstCli::new(&CompilerConfig::default())
    }
}

#[async_trait]
impl Compiler for TypstCli {
    fn name(&self) -> &str {
        &self.command
    }

    async fn compile(&self, markup: &str) -> Result<Vec<u8>, RecipeError> {
        info!("Compiling {} bytes of markup with {}", markup.len(), self.command);
        debug!("{} {}", self.command, self.args.join(" "));

        let mut child = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                RecipeError::CompileFailed(format!("could not start '{}': {}", self.command, e))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| RecipeError::CompileFailed("compiler stdin unavailable".to_string()))?;
        // stdin is fed from its own task while stdout is drained
        let input = markup.as_bytes().to_vec();
        let writer = tokio::spawn(async move {
            let written = stdin.write_all(&input).await;
            drop(stdin);
            written
        });

        let output = child.wait_with_output().await?;
        match writer.await? {
            Err(e) if e.kind() != ErrorKind::BrokenPipe => return Err(e.into()),
            _ => {}
        }
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RecipeError::CompileFailed(format!(
                "'{}' exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            )));
        }

        Ok(output.stdout)
    }
}
