//! CLI command implementations.

pub mod build;
pub mod common;
pub mod name;
pub mod run;
pub mod version;
