//! Diagram model errors, raised by registry mutations only.
//!
//! Read-only lookups never fail; they return `None`.

use super::error_code::{self, FaultlineErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("Unknown node {node_id}")]
    UnknownNode { node_id: u32 },

    #[error("Node {node_id} has been deleted")]
    DeletedNode { node_id: u32 },

    #[error("Unknown point {point}")]
    UnknownPoint { point: String },

    #[error("Cannot connect {first} to {second}: both points are {role} points")]
    RoleMismatch {
        first: String,
        second: String,
        role: &'static str,
    },

    #[error("Input point {point} already has an incoming connection")]
    InputAlreadyConnected { point: String },

    #[error("Node {node_id} is not an aggregate; its ports cannot be wired to each other")]
    InternalOutsideAggregate { node_id: u32 },

    #[error("Connection {from} -> {to} does not exist")]
    UnknownConnection { from: String, to: String },
}

impl FaultlineErrorCode for ModelError {
    fn error_code(&self) -> &'static str {
        error_code::MODEL_ERROR
    }
}
