//! Error classification shared across the product addon crates
//!
//! Domain crates define their own `thiserror` enums; this module only provides
//! the vocabulary to rank them.

use std::fmt;

/// Severity levels for error classification
///
/// - **Warning**: the customer can correct the input and resubmit. Required
///   fields left empty and files over the size limit land here.
/// - **Error**: the operation failed for reasons outside the customer's input,
///   such as the storage backend refusing a file.
///
/// # Examples
///
/// ```rust
/// use product_addons_common::ErrorSeverity;
///
/// let missing_field = ErrorSeverity::Warning;
/// let storage_down = ErrorSeverity::Error;
/// assert_ne!(missing_field, storage_down);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Input problem the customer can fix
    Warning,

    /// Operation failed but the request pipeline can continue
    Error,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Trait for error types that have severity levels
///
/// ```rust
/// use product_addons_common::{ErrorSeverity, Severity};
///
/// #[derive(Debug)]
/// enum CheckoutError {
///     MissingValue,
///     StorageOffline,
/// }
///
/// impl Severity for CheckoutError {
///     fn severity(&self) -> ErrorSeverity {
///         match self {
///             CheckoutError::MissingValue => ErrorSeverity::Warning,
///             CheckoutError::StorageOffline => ErrorSeverity::Error,
///         }
///     }
/// }
///
/// assert_eq!(CheckoutError::MissingValue.severity(), ErrorSeverity::Warning);
/// ```
pub trait Severity {
    /// Get the severity level of this error
    fn severity(&self) -> ErrorSeverity;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(ErrorSeverity::Warning < ErrorSeverity::Error);
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(ErrorSeverity::Warning.to_string(), "warning");
        assert_eq!(ErrorSeverity::Error.to_string(), "error");
    }
}
