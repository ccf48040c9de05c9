//! Export core modules shared across the CLI and the desktop viewer.

pub mod excel_core;
