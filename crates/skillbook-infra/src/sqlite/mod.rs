//! SQLite storage layer.
//!
//! Session implementation backed by SQLite with WAL mode and split
//! read/write connection pools.

pub mod pool;
pub mod session;
