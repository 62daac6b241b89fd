//! Shared domain types for Skillbook.
//!
//! This crate contains the domain types used across the Skillbook service:
//! Skill, its confidence level, pagination values, configuration, and the
//! associated error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod config;
pub mod error;
pub mod page;
pub mod skill;
