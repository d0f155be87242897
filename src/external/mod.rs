//! External tool integration
//!
//! Everything vctools does is delegated to `pass` and `veracrypt`. This
//! module builds their argument lists, runs them and interprets their output.

pub mod diagnostics;
pub mod pass;
pub mod runner;
pub mod veracrypt;

#[cfg(test)]
pub(crate) mod mock;

pub use pass::{PassLookup, PassStore};
pub use runner::{CapturedOutput, CommandRunner, DryRunRunner, Invocation, SystemRunner};
pub use veracrypt::{KeyChange, VeraCrypt};
