//! # vctools - VeraCrypt helpers backed by pass
//!
//! Small command-line utilities that glue the `pass` password manager to the
//! `veracrypt` encryption tool: mount a volume with a stored password, or
//! rotate a container's key and record the new one in pass.
//!
//! ```bash
//! vctools mount-pass -n volumes/usb /dev/sdb1 /mnt/usb
//! vctools change-key -i volumes/usb -n 'new password' -c ~/vault.hc
//! ```
//!
//! A trivial `hello` greeter ships alongside.

pub mod cli;
pub mod config;
pub mod entropy;
pub mod external;
pub mod greeter;
pub mod secret;

pub use cli::{Cli, Output};
pub use config::Settings;

