//! Configuration types

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Default upload size limit: 8 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 8 * 1024 * 1024;

/// Base location uploaded files are written under, before the per-customer
/// subdirectory is appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadLocation {
    /// Filesystem directory
    pub path: String,
    /// Public URL prefix matching `path`
    pub url: String,
    /// Date or bucket subdirectory already applied to `path` and `url`, if any
    pub subdir: String,
}

impl Default for UploadLocation {
    fn default() -> Self {
        Self {
            path: "uploads".to_string(),
            url: "/uploads".to_string(),
            subdir: String::new(),
        }
    }
}

/// Settings for addon field validation and cart data derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddonsConfig {
    /// Files larger than this are rejected at validation.
    pub max_upload_bytes: u64,
    /// Skip storing uploaded files. Used for previews and tests.
    pub dry_run: bool,
    /// Reject list submissions with irregular nesting instead of collapsing
    /// them to the first inner sequence.
    pub strict_list_nesting: bool,
    pub upload: UploadLocation,
}

impl Default for AddonsConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            dry_run: false,
            strict_list_nesting: false,
            upload: UploadLocation::default(),
        }
    }
}

impl AddonsConfig {
    /// Check values that deserialize fine but make no sense.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_upload_bytes == 0 {
            return Err(ConfigError::validation(
                "max_upload_bytes must be greater than zero",
            ));
        }
        if self.upload.path.trim().is_empty() {
            return Err(ConfigError::validation("upload.path must not be empty"));
        }
        Ok(())
    }
}
