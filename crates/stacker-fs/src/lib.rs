//! Filesystem abstraction for stacker
//!
//! Provides the on-disk layout of a stacker directory, logical path keys used
//! for configuration inheritance, and format-aware document parsing.

pub mod constants;
pub mod document;
pub mod error;
pub mod io;
pub mod layout;
pub mod path;

pub use constants::StackerDir;
pub use document::DocumentFormat;
pub use error::{Error, Result};
pub use layout::StackerLayout;
pub use path::{NormalizedPath, ROOT_KEY, key_ancestors, parent_key};
