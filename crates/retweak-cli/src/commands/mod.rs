//! CLI command implementations.

pub mod check;
mod common;
pub mod list;
pub mod types;
