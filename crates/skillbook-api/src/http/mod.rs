//! HTTP/REST API layer for Skillbook.
//!
//! Axum-based REST API for the `skills` resource with pagination headers
//! and CORS support.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod router;
