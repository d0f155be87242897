//! Client for the `pass` password store

use super::diagnostics::{StderrVerdict, classify_stderr};
use super::runner::{CapturedOutput, CommandRunner, Invocation};
use crate::config::PassSettings;
use crate::secret::Secret;
use anyhow::Result;

/// Result of reading one entry
#[derive(Debug)]
pub struct PassLookup {
    pub secret: Secret,
    /// Benign stderr that was ignored, if any
    pub suppressed_warning: Option<String>,
}

pub struct PassStore<'a> {
    runner: &'a dyn CommandRunner,
    settings: &'a PassSettings,
}

impl<'a> PassStore<'a> {
    pub fn new(runner: &'a dyn CommandRunner, settings: &'a PassSettings) -> Self {
        Self { runner, settings }
    }

    pub fn show_invocation(&self, entry: &str) -> Invocation {
        Invocation::new(&self.settings.program).arg(entry)
    }

    pub fn insert_invocation(&self, entry: &str, secret: &Secret) -> Invocation {
        Invocation::new(&self.settings.program)
            .args(["insert", "--multiline", "--force", entry])
            .stdin(Secret::new(format!("{}\n", secret.expose())))
    }

    /// Read the password stored under `entry`
    pub fn show(&self, entry: &str) -> Result<PassLookup> {
        let output = self.runner.run(&self.show_invocation(entry))?;
        if !output.success() {
            return Err(exit_failure(&output, "reading", entry));
        }

        let suppressed_warning = match classify_stderr(&output.stderr, &self.settings.ignored_warnings) {
            StderrVerdict::Clean => None,
            StderrVerdict::Suppressed(text) => {
                tracing::debug!(entry, warning = %text, "suppressed pass warning");
                Some(text)
            }
            StderrVerdict::Failure(text) => anyhow::bail!("{text}"),
        };

        let secret = Secret::new(output.stdout.trim());
        tracing::debug!(entry, length = secret.len(), "retrieved secret from pass");

        Ok(PassLookup {
            secret,
            suppressed_warning,
        })
    }

    /// Overwrite `entry` with `secret`
    pub fn insert(&self, entry: &str, secret: &Secret) -> Result<()> {
        let output = self.runner.run(&self.insert_invocation(entry, secret))?;
        if !output.success() {
            return Err(exit_failure(&output, "updating", entry));
        }

        if let StderrVerdict::Failure(text) =
            classify_stderr(&output.stderr, &self.settings.ignored_warnings)
        {
            anyhow::bail!("{text}");
        }
        tracing::info!(entry, "updated pass entry");
        Ok(())
    }
}

/// Raw stderr of a failed call, benign warnings included
fn exit_failure(output: &CapturedOutput, action: &str, entry: &str) -> anyhow::Error {
    let stderr = output.stderr.trim();
    if stderr.is_empty() {
        anyhow::anyhow!("pass exited with status {:?} while {action} '{entry}'", output.code)
    } else {
        anyhow::anyhow!("{stderr}")
    }
}
