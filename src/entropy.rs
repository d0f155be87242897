//! Random source file for veracrypt key changes

use crate::config::EntropySettings;
use anyhow::{Context, Result};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore;
use rand::rngs::OsRng;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use zeroize::Zeroizing;

/// A private temporary file filled with random text, removed on drop
pub struct EntropyFile {
    file: NamedTempFile,
}

impl EntropyFile {
    pub fn generate(settings: &EntropySettings) -> Result<Self> {
        if settings.bytes == 0 {
            anyhow::bail!("entropy.bytes must be greater than zero");
        }

        let mut raw = Zeroizing::new(vec![0u8; settings.bytes]);
        OsRng
            .try_fill_bytes(raw.as_mut_slice())
            .context("Failed to read random bytes from the operating system")?;
        let encoded = Zeroizing::new(URL_SAFE_NO_PAD.encode(raw.as_slice()));

        let builder = {
            let mut b = tempfile::Builder::new();
            b.prefix("vctools-random-").suffix(".txt");
            b
        };
        let mut file = match &settings.directory {
            Some(dir) => builder
                .tempfile_in(dir)
                .with_context(|| format!("Failed to create random source file in {}", dir.display()))?,
            None => builder
                .tempfile()
                .context("Failed to create random source file")?,
        };

        file.write_all(encoded.as_bytes())
            .context("Failed to write random source file")?;
        file.flush().context("Failed to flush random source file")?;

        tracing::debug!(path = %file.path().display(), bytes = settings.bytes, "wrote random source file");
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}
