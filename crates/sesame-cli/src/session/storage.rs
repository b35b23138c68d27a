//! Location of the persisted client session.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

/// Resolve the data directory, preferring an explicit override.
pub fn data_dir(override_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir.to_path_buf());
    }

    let dirs =
        ProjectDirs::from("", "", "sesame").context("Could not determine data directory")?;

    Ok(dirs.data_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins() {
        let dir = data_dir(Some(Path::new("/tmp/sesame-test"))).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/sesame-test"));
    }
}
