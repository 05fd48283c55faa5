//! Configuration and parameter-resolution engine for stacker
//!
//! This crate turns a stacker base directory into stacks ready to submit:
//!
//! - **Config store**: loads the configuration tree and merges inherited
//!   `defaults` into each stack, nearest ancestor first
//! - **Template store**: finds templates by name and extracts their declared
//!   parameters, memoized per name
//! - **Resolver registry**: flattens raw parameter values, dispatching
//!   `{ Name: input }` mappings to named resolvers (`Stack`, `File`)
//! - **Fetcher**: binds configuration to templates, keeping only declared
//!   parameters
//!
//! # Architecture
//!
//! ```text
//!                  stacker-cli
//!                       |
//!                 stacker-core
//!                       |
//!            +----------+-----------+
//!            |                      |
//!       stacker-fs            stacker-cloud
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod fetcher;
pub mod params;
pub mod stack;
pub mod template;

pub use config::{ConfigDocument, ConfigStore, Defaults, StackConfig, StackConfigSource};
pub use engine::Engine;
pub use error::{Error, Result};
pub use fetcher::Fetcher;
pub use params::{Param, RawParams, RawValue, ResolverRegistry, StackContext, StackInfo};
pub use stack::ResolvedStack;
pub use template::{Template, TemplateSource, TemplateStore};
