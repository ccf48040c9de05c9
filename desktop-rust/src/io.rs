use anyhow::{Context, Result};
use parts_lookup_common::{loader, Dataset};
use std::path::{Path, PathBuf};

pub fn load_inventory(path: &Path) -> Result<Dataset> {
    let dataset = loader::load_dataset(path, None)
        .with_context(|| format!("load {}", path.display()))?;
    log::info!("loaded {} parts from {}", dataset.len(), path.display());
    Ok(dataset)
}

/// `images/` next to the spreadsheet wins, otherwise `./images`.
pub fn resolve_images_dir(source: &Path) -> PathBuf {
    let sibling = source
        .parent()
        .map(|p| p.join("images"))
        .filter(|p| p.is_dir());
    sibling.unwrap_or_else(|| PathBuf::from("images"))
}
