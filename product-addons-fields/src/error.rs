//! Error types for addon field validation and derivation

use product_addons_common::{ErrorSeverity, Severity};
use thiserror::Error;

/// Result type for addon field operations
pub type Result<T> = std::result::Result<T, AddonError>;

/// Errors raised while validating a submission or deriving its cart data.
///
/// Every message names the addon so it can be shown to the customer as is.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AddonError {
    /// Required addon submitted without a value
    #[error("\"{name}\" is a required field.")]
    RequiredFieldMissing { name: String },

    /// Uploaded file exceeds the size policy
    #[error("The file for \"{name}\" is too large ({size} bytes).")]
    FileTooLarge { name: String, size: u64 },

    /// The uploader could not store the file
    #[error("The file for \"{name}\" could not be uploaded: {detail}")]
    UploadFailed { name: String, detail: String },

    /// List submission nested in a shape the storefront never produces
    #[error("\"{name}\" received a malformed selection.")]
    IrregularSelection { name: String },

    /// Text shorter than the minimum length
    #[error("\"{name}\" must be at least {min} characters.")]
    TooShort { name: String, min: usize },

    /// Text longer than the maximum length
    #[error("\"{name}\" must be at most {max} characters.")]
    TooLong { name: String, max: usize },

    /// Value that should be a number is not one
    #[error("\"{name}\" must be a valid number, got \"{value}\".")]
    InvalidNumber { name: String, value: String },

    /// Number below the allowed minimum
    #[error("\"{name}\" must be at least {min}.")]
    BelowMinimum { name: String, min: f64 },

    /// Number above the allowed maximum
    #[error("\"{name}\" must be at most {max}.")]
    AboveMaximum { name: String, max: f64 },
}

impl AddonError {
    pub fn required(name: impl Into<String>) -> Self {
        AddonError::RequiredFieldMissing { name: name.into() }
    }

    /// Display name of the addon the error belongs to.
    pub fn addon_name(&self) -> &str {
        match self {
            AddonError::RequiredFieldMissing { name }
            | AddonError::FileTooLarge { name, .. }
            | AddonError::UploadFailed { name, .. }
            | AddonError::IrregularSelection { name }
            | AddonError::TooShort { name, .. }
            | AddonError::TooLong { name, .. }
            | AddonError::InvalidNumber { name, .. }
            | AddonError::BelowMinimum { name, .. }
            | AddonError::AboveMaximum { name, .. } => name,
        }
    }
}

impl Severity for AddonError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            AddonError::UploadFailed { .. } => ErrorSeverity::Error,
            _ => ErrorSeverity::Warning,
        }
    }
}

/// All errors from evaluating a set of addons together.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}", render(.0))]
pub struct AddonErrors(pub Vec<AddonError>);

fn render(errors: &[AddonError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

impl AddonErrors {
    pub fn errors(&self) -> &[AddonError] {
        &self.0
    }
}

impl From<AddonError> for AddonErrors {
    fn from(error: AddonError) -> Self {
        AddonErrors(vec![error])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_message_names_addon() {
        let err = AddonError::required("Engraving");
        assert_eq!(err.to_string(), "\"Engraving\" is a required field.");
        assert_eq!(err.addon_name(), "Engraving");
    }

    #[test]
    fn test_upload_failed_carries_detail() {
        let err = AddonError::UploadFailed {
            name: "Logo".into(),
            detail: "disk quota exceeded".into(),
        };
        assert!(err.to_string().contains("Logo"));
        assert!(err.to_string().contains("disk quota exceeded"));
        assert_eq!(err.severity(), ErrorSeverity::Error);
    }

    #[test]
    fn test_validation_errors_are_warnings() {
        let err = AddonError::FileTooLarge {
            name: "Logo".into(),
            size: 10,
        };
        assert_eq!(err.severity(), ErrorSeverity::Warning);
    }

    #[test]
    fn test_errors_join_messages() {
        let errors = AddonErrors(vec![
            AddonError::required("Engraving"),
            AddonError::required("Gift Options"),
        ]);
        assert_eq!(
            errors.to_string(),
            "\"Engraving\" is a required field. \"Gift Options\" is a required field."
        );
    }
}
