//! The `hello` greeter binary

use crate::greeter::greet;
use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter};

/// A basic greeter
#[derive(Parser)]
#[command(name = "hello", version, long_about = None)]
pub struct HelloCli {
    /// Any name
    #[arg(long, default_value = "World")]
    pub name: String,

    /// Number of times to be greeted
    #[arg(long, default_value_t = 1)]
    pub count: u32,

    /// Path to a file, or '-' for stdout
    #[arg(value_name = "OUTPUT_FILE", default_value = "-")]
    pub output: String,
}

impl HelloCli {
    pub fn run(self) -> Result<()> {
        if self.output == "-" {
            let stdout = io::stdout();
            greet(&mut stdout.lock(), &self.name, self.count).context("Failed to write to stdout")
        } else {
            let file = File::create(&self.output)
                .with_context(|| format!("Failed to create {}", self.output))?;
            greet(&mut BufWriter::new(file), &self.name, self.count)
                .with_context(|| format!("Failed to write {}", self.output))
        }
    }
}
