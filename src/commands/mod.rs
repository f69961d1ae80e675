//! Commands module - CLI command implementations.
//!
//! Each command is implemented in its own module for separation of concerns.

pub mod create_superuser;
pub mod migrate;
pub mod serve;
