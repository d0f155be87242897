//! Shared argument value parsers

use std::path::PathBuf;

/// Accept only paths that exist on disk
pub fn existing_path(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.exists() {
        Ok(path)
    } else {
        Err(format!("Path '{value}' does not exist."))
    }
}
