//! Stack configuration
//!
//! Configuration documents form a tree under the configuration root. Each
//! document may set `defaults` inherited by every stack at or below its path
//! and declare `stacks`.

mod document;
mod store;

pub use document::{ConfigDocument, Defaults, StackConfig};
pub(crate) use document::null_as_default;
pub use store::{ConfigMap, ConfigStore, StackConfigSource, load, merge};
