//! Error handling for Faultline.
//! One error enum per subsystem, `thiserror` only.
//!
//! Lookup misses during graph queries are not errors: they surface as `None`
//! and stop the traversal that hit them. Empty graphs yield empty results.

pub mod config_error;
pub mod error_code;
pub mod layout_error;
pub mod model_error;

pub use config_error::ConfigError;
pub use error_code::FaultlineErrorCode;
pub use layout_error::{LayoutError, LayoutResult, TreeVariant};
pub use model_error::ModelError;
