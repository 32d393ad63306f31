//! Command handlers for the Prism CLI.

pub mod config;
pub mod generate;
