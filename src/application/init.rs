//! Initialize timeline use case

use crate::error::Result;
use crate::infrastructure::{Config, FileSystemRepository, PersistenceAdapter};
use std::fs;
use std::path::Path;

/// Initialize a new timeline at the specified path with an empty entry list.
pub fn init(path: &Path, config: &Config) -> Result<FileSystemRepository> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let mut repo = FileSystemRepository::new(path.to_path_buf());

    repo.initialize()?;
    repo.save_config(config)?;
    repo.save_entries(&[])?;

    Ok(repo)
}
