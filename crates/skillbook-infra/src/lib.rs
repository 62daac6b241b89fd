//! Infrastructure layer for Skillbook.
//!
//! Contains the SQLite implementation of the session traits defined in
//! `skillbook-core` and the configuration file loader.

pub mod config;
pub mod sqlite;
