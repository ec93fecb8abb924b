//! Storage infrastructure: configuration file persistence.
//!
//! A thin adapter between the application and the file system. The
//! `config` sub-module reads the TOML configuration file from the
//! platform-appropriate directory, writes changes back to disk, and
//! provides sensible defaults when the file does not exist yet.

pub mod config;
