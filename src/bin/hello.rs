use anyhow::Result;
use clap::Parser;
use vctools::cli::hello::HelloCli;

fn main() -> Result<()> {
    HelloCli::parse().run()
}
