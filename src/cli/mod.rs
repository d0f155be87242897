//! Command-line interface for vctools
//!
//! Parses flags with clap, sets up logging and configuration, then hands a
//! shared [`AppContext`] to the selected command.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

pub mod args;
pub mod commands;
pub mod hello;
mod output;

pub use output::Output;

use crate::config::Settings;
use crate::external::{CommandRunner, DryRunRunner, PassStore, SystemRunner, VeraCrypt};
use commands::{change_key, config, mount, mount_pass};

/// Mount VeraCrypt volumes and rotate their keys using secrets from pass
#[derive(Parser)]
#[command(name = "vctools", author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use custom configuration file
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<String>,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print the external commands instead of running them
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Mount a VeraCrypt partition using a password stored in pass
    MountPass(mount_pass::MountPassArgs),
    /// Mount a VeraCrypt partition with a given password or a pass entry
    Mount(mount::MountArgs),
    /// Change the key (password) of a VeraCrypt container
    ChangeKey(change_key::ChangeKeyArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

/// Everything a command needs to talk to the outside world
pub struct AppContext<'a> {
    pub settings: Settings,
    pub output: Output,
    pub runner: &'a dyn CommandRunner,
}

impl AppContext<'_> {
    pub fn pass_store(&self) -> PassStore<'_> {
        PassStore::new(self.runner, &self.settings.pass)
    }

    pub fn veracrypt(&self) -> VeraCrypt<'_> {
        VeraCrypt::new(
            self.runner,
            &self.settings.veracrypt,
            &self.settings.pass.ignored_warnings,
        )
    }
}

impl Cli {
    pub fn output(&self) -> Output {
        Output::new(self.verbose > 0, self.quiet)
    }

    /// Execute the CLI command
    pub async fn run(self) -> Result<()> {
        setup_logging(self.verbose, self.quiet);
        let output = self.output();

        let Some(command) = self.command else {
            Cli::command().print_help()?;
            return Ok(());
        };

        let settings = Settings::load_with_custom_config(self.config.as_deref())?;
        tracing::debug!(?settings, "loaded configuration");

        let system = SystemRunner;
        let dry_run = DryRunRunner::new(output);
        let runner: &dyn CommandRunner = if self.dry_run { &dry_run } else { &system };

        let ctx = AppContext {
            settings,
            output,
            runner,
        };

        match command {
            Commands::MountPass(args) => mount_pass::execute(args, &ctx).await,
            Commands::Mount(args) => mount::execute(args, &ctx).await,
            Commands::ChangeKey(args) => change_key::execute(args, &ctx).await,
            Commands::Config(args) => config::execute(args, &ctx.settings).await,
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info"),
            2 => tracing_subscriber::EnvFilter::new("debug"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
