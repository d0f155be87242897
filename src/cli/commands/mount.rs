use super::{lookup_secret, mount_volume};
use crate::cli::AppContext;
use crate::cli::args::existing_path;
use crate::secret::Secret;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct MountArgs {
    /// The decryption password
    #[arg(long, conflicts_with = "pass")]
    pub password: Option<String>,

    /// Look up the password for ENTRY with pass
    #[arg(short, long, value_name = "ENTRY")]
    pub pass: Option<String>,

    /// Partition or container to mount
    #[arg(value_parser = existing_path)]
    pub partition: PathBuf,

    /// Directory to mount it on
    #[arg(value_parser = existing_path)]
    pub mount_point: PathBuf,
}

pub async fn execute(args: MountArgs, ctx: &AppContext<'_>) -> Result<()> {
    let password = match (args.password, args.pass.as_deref()) {
        (Some(password), None) => Secret::from(password),
        (None, Some(entry)) => lookup_secret(ctx, entry)?,
        _ => anyhow::bail!(
            "You must include either the --pass or --password flags. Try vctools mount --help for more info"
        ),
    };

    mount_volume(ctx, &args.partition, &args.mount_point, &password)
}
