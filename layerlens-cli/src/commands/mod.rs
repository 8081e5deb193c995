//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`catalog`] - Catalog listing and consistency checks
//! - [`config`] - Configuration file management (init, path)
//! - [`replay`] - Scripted state replay against the in-memory engine

pub mod catalog;
pub mod common;
pub mod config;
pub mod replay;
