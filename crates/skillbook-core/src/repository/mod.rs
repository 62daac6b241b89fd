//! Storage port definitions.
//!
//! These traits define the storage interface that the infrastructure layer
//! (skillbook-infra) implements. The core crate never depends on any
//! specific storage technology.

pub mod session;

/// Whether a session will only read, or may also write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    Read,
    Write,
}
