//! Shared test utilities for the stacker workspace.
//!
//! A dev-dependency only; never published.
//!
//! # Modules
//!
//! - [`dir`]: [`TestStackerDir`] builder for config trees and templates
//! - [`fixtures`]: locations of the checked-in golden fixtures

pub mod dir;
pub mod fixtures;

pub use dir::TestStackerDir;
