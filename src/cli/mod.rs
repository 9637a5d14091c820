//! Command-line workflow, independent of argument parsing

pub mod orchestration;

pub use orchestration::{load_options, run, RunArgs};
