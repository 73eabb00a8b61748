//! Utility functions

pub mod glob;
pub mod path;

pub use glob::matches_glob;
pub use path::{file_id, normalize_path};
