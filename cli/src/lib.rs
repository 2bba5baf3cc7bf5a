//! gridquery CLI - run data-grid requests against a SQLite database
//!
//! The schema of the queryable entities is declared in a `gridquery.toml`
//! file instead of Rust code.
//!
//! # Quick Start
//!
//! 1. Run `gridquery init` to create a `gridquery.toml`
//! 2. Declare your entities and their relations
//! 3. Run `gridquery query --entity user --request request.json`
//!
//! # Commands
//!
//! - `gridquery init` - Create a starter configuration file
//! - `gridquery check` - Validate the configuration and list entities
//! - `gridquery explain` - Print the SQL a request compiles to
//! - `gridquery query` - Run a request and print the response envelope

pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
