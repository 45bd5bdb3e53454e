//! FaultlineErrorCode trait for boundary conversion.

/// Every error enum implements this to provide a structured error code
/// string for callers that cross a language or process boundary.
pub trait FaultlineErrorCode {
    /// Returns the error code string (e.g., "LAYOUT_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted boundary string: `[ERROR_CODE] message`.
    fn boundary_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const MODEL_ERROR: &str = "MODEL_ERROR";
pub const LAYOUT_ERROR: &str = "LAYOUT_ERROR";
pub const NO_ROOTS: &str = "NO_ROOTS";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
