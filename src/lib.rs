//! Calculate a semantic version from git tags and commit height
//!
//! The version of a commit is read from the nearest version tag in its
//! ancestry. Commits past the tag add height, which becomes a trailing
//! pre-release identifier so every commit gets a distinct, ordered version.

pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod git;
pub mod logging;
pub mod resolver;
pub mod ui;

pub use error::{MinVerError, Result};
pub use resolver::{Resolver, Settings};
