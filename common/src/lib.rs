//! Parts Lookup Common Library
//!
//! CLIとデスクトップビューアで共有される型とフィルタエンジン

pub mod types;
pub mod derive;
pub mod error;
pub mod filter;

#[cfg(feature = "excel")]
pub mod loader;
#[cfg(feature = "excel")]
pub mod export;

pub use types::{Dataset, PartRecord};
pub use derive::{categorize, extract_dimensions, Category};
pub use error::{Error, Result};
pub use filter::{
    apply, candidate_options, filter_view, selector_choices, FilterEntry, FilterEvent,
    FilterField, FilterMode, FilterStateStore, FilteredView,
};
