use super::{lookup_secret, mount_volume};
use crate::cli::AppContext;
use crate::cli::args::existing_path;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct MountPassArgs {
    /// The name of the pass entry containing the VeraCrypt password
    #[arg(short, long)]
    pub name: String,

    /// Partition or container to mount
    #[arg(value_parser = existing_path)]
    pub partition: PathBuf,

    /// Directory to mount it on
    #[arg(value_parser = existing_path)]
    pub mount_point: PathBuf,
}

pub async fn execute(args: MountPassArgs, ctx: &AppContext<'_>) -> Result<()> {
    let password = lookup_secret(ctx, &args.name)?;
    mount_volume(ctx, &args.partition, &args.mount_point, &password)
}
