//! Command implementations for the vctools CLI
//!
//! Each subcommand lives in its own module with its clap `Args` struct and an
//! async `execute` entry point.

use crate::cli::AppContext;
use crate::secret::Secret;
use anyhow::Result;
use std::path::Path;

pub mod change_key;
pub mod config;
pub mod mount;
pub mod mount_pass;

/// Read a password from pass, reporting any warning that was ignored
pub(crate) fn lookup_secret(ctx: &AppContext<'_>, entry: &str) -> Result<Secret> {
    let lookup = ctx.pass_store().show(entry)?;

    if let Some(warning) = lookup.suppressed_warning {
        ctx.output.warning("warning suppressed");
        ctx.output.verbose(&warning);
    }
    ctx.output
        .verbose(&format!("read pass entry '{entry}' ({} chars)", lookup.secret.len()));

    Ok(lookup.secret)
}

/// Mount with veracrypt and report the outcome
pub(crate) fn mount_volume(
    ctx: &AppContext<'_>,
    partition: &Path,
    mount_point: &Path,
    password: &Secret,
) -> Result<()> {
    let veracrypt = ctx.veracrypt();

    ctx.output.step("mounting...");
    ctx.output.verbose(
        &veracrypt
            .mount_invocation(partition, mount_point, password)
            .to_string(),
    );

    let stdout = veracrypt.mount(partition, mount_point, password)?;
    ctx.output.success(&format!("SUCCESS: {stdout}"));
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::cli::{AppContext, Output};
    use crate::config::Settings;
    use crate::external::CommandRunner;

    pub fn context(runner: &dyn CommandRunner) -> AppContext<'_> {
        AppContext {
            settings: Settings::defaults().unwrap(),
            output: Output::new(false, true),
            runner,
        }
    }
}
