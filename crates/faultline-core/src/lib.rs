//! # faultline-core
//!
//! Ambient layer for the Faultline coupling-diagram analysis engine:
//! collection aliases, per-subsystem error enums, layered configuration,
//! and tracing setup. Holds no graph algorithms.

pub mod config;
pub mod errors;
pub mod tracing;
pub mod types;
