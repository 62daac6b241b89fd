//! Business services built on the storage ports.

pub mod skill;
