use parts_lookup_common::{Dataset, FilterStateStore};
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub dataset: Dataset,
    pub filters: FilterStateStore,
    pub source_path: Option<PathBuf>,
    pub images_dir: PathBuf,
}
