//! Script formats consumed by the tagging engine

pub mod ink;

pub use ink::{DebugMetadata, InkParser, Node, Scope, Story, Text};
