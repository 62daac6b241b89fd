//! Business logic and storage port definitions for Skillbook.
//!
//! This crate defines the transactional session traits that the
//! infrastructure layer implements. It depends only on `skillbook-types` --
//! never on `skillbook-infra` or any database/IO crate.

pub mod repository;
pub mod service;
