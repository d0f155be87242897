//! Configuration management for vctools
//!
//! Settings are layered with figment: embedded defaults, then the user's
//! config file (or the one given with `--config`), then `VCTOOLS_*`
//! environment variables.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod loader;

/// Main configuration structure for vctools
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub pass: PassSettings,
    pub veracrypt: VeraCryptSettings,
    pub entropy: EntropySettings,
}

/// How the `pass` password store is invoked
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassSettings {
    /// Program name or path
    pub program: String,

    /// stderr snippets that are benign and must not abort a lookup
    #[serde(default)]
    pub ignored_warnings: Vec<String>,

    /// Rewrite the pass entry after a successful `change-key -i`
    #[serde(default = "default_update_entry")]
    pub update_entry_on_change: bool,
}

fn default_update_entry() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VeraCryptSettings {
    pub program: String,
    #[serde(default)]
    pub pim: u32,
    #[serde(default)]
    pub new_pim: u32,
}

/// Random source file written for key changes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntropySettings {
    /// Number of random bytes before encoding
    pub bytes: usize,

    /// Where to create the file; system temp dir when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}
