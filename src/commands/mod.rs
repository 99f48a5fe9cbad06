//! Subcommand handlers

pub mod config;
pub mod enrich;
pub mod show;
