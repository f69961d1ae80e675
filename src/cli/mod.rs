//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `serve` - Start the HTTP server
//! - `migrate` - Database migrations
//! - `create-superuser` - Create a staff account with every permission

pub mod args;

pub use args::{Cli, Commands};
