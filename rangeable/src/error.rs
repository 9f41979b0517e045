use thiserror::Error;

/// Errors raised by the public slider surface.
///
/// Value inputs never fail: out-of-range or non-numeric values are clamped or
/// ignored. Errors are reserved for misuse that would otherwise leave the
/// widget without a target or silently drop a caller's request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeableError {
    /// The selector did not match any element in the document.
    #[error("no element matches selector `{selector}`")]
    TargetNotFound {
        /// The selector that was looked up.
        selector: String,
    },
    /// A handle index outside the slider's handle count was supplied.
    #[error("handle index {index} is out of range for a slider with {handles} handle(s)")]
    InvalidHandleIndex {
        /// The index supplied by the caller.
        index: usize,
        /// Number of handles the slider has.
        handles: usize,
    },
    /// A dual-handle slider was asked to change a value without saying which.
    #[error("a handle index is required for a double slider")]
    MissingHandleIndex,
}

/// Result alias used across the crate.
pub type Result<T, E = RangeableError> = std::result::Result<T, E>;
