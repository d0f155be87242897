//! Rotate the password of an unmounted VeraCrypt container
//!
//! The old password comes either straight from `-o` or from the pass entry
//! named with `-i`. In the latter case the entry is rewritten with the new
//! password once veracrypt has accepted the change.

use super::lookup_secret;
use crate::cli::AppContext;
use crate::cli::args::existing_path;
use crate::entropy::EntropyFile;
use crate::external::KeyChange;
use crate::secret::Secret;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct ChangeKeyArgs {
    /// The old password
    #[arg(short, long, conflicts_with = "id")]
    pub old: Option<String>,

    /// The name or id of the pass entry holding the old password
    #[arg(short, long)]
    pub id: Option<String>,

    /// The new password
    #[arg(short, long)]
    pub new: String,

    /// The unmounted container
    #[arg(short, long, value_parser = existing_path)]
    pub container: PathBuf,

    /// Do not write the new password back to the pass entry given with -i
    #[arg(long)]
    pub keep_pass_entry: bool,
}

pub async fn execute(args: ChangeKeyArgs, ctx: &AppContext<'_>) -> Result<()> {
    let ChangeKeyArgs {
        old,
        id,
        new,
        container,
        keep_pass_entry,
    } = args;

    let old_password = match (old, id.as_deref()) {
        (Some(old), _) => Secret::from(old),
        (None, Some(entry)) => lookup_secret(ctx, entry)?,
        (None, None) => anyhow::bail!(
            "You must specify either the old password, or the id of a Pass entry"
        ),
    };
    let new_password = Secret::from(new);

    // Removed from disk when this goes out of scope, success or not
    let entropy = EntropyFile::generate(&ctx.settings.entropy)?;

    let change = KeyChange {
        container: &container,
        old_password: &old_password,
        new_password: &new_password,
        random_source: entropy.path(),
    };
    let veracrypt = ctx.veracrypt();

    ctx.output.step("changing key...");
    ctx.output
        .verbose(&veracrypt.change_key_invocation(&change).to_string());

    let stdout = veracrypt.change_key(&change)?;
    ctx.output.success(&format!("SUCCESS: {stdout}"));

    if let Some(entry) = id.as_deref() {
        if keep_pass_entry || !ctx.settings.pass.update_entry_on_change {
            ctx.output
                .info(&format!("pass entry '{entry}' left unchanged"));
        } else {
            ctx.pass_store()
                .insert(entry, &new_password)
                .with_context(|| {
                    format!("Key changed, but updating pass entry '{entry}' failed")
                })?;
            ctx.output.success(&format!("Updated pass entry '{entry}'"));
        }
    }

    Ok(())
}
