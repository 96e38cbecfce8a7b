//! Interfaces to the systems a field calls out to.
//!
//! Physical storage and size limits live outside this crate. Fields only see
//! these traits, so a storefront can plug in object storage, a virus scanner
//! or a per-product limit without touching validation logic.

use std::fmt;
use std::path::PathBuf;

use product_addons_config::AddonsConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::submission::FileEntry;
use crate::upload_dir::UploadDir;

/// Opaque identifier of the customer placing the order.
///
/// Must stay the same for every call within one request, otherwise files of
/// one cart land in different directories.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomerId(String);

impl CustomerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Decides whether an uploaded file is too big.
pub trait SizePolicy {
    fn is_over_limit(&self, file: &FileEntry) -> bool;
}

/// Fixed byte limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxUploadSize {
    max_bytes: u64,
}

impl MaxUploadSize {
    pub const fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }
}

impl From<&AddonsConfig> for MaxUploadSize {
    fn from(config: &AddonsConfig) -> Self {
        Self::new(config.max_upload_bytes)
    }
}

impl SizePolicy for MaxUploadSize {
    fn is_over_limit(&self, file: &FileEntry) -> bool {
        file.size > self.max_bytes
    }
}

/// Where a stored file ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredUpload {
    /// Filesystem location
    pub file: PathBuf,
    /// Public locator recorded in the cart
    pub url: String,
}

/// Storage failure, with a message suitable for the customer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct UploadError(pub String);

impl UploadError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self(detail.into())
    }
}

impl From<std::io::Error> for UploadError {
    fn from(error: std::io::Error) -> Self {
        Self(error.to_string())
    }
}

/// Rewrites the target directory right before a file is written.
pub type PathRewriter<'a> = &'a dyn Fn(UploadDir) -> UploadDir;

/// Stores uploaded files. One attempt per call; retries are the
/// implementation's business.
pub trait Uploader {
    fn store(
        &self,
        file: &FileEntry,
        rewrite: Option<PathRewriter<'_>>,
    ) -> Result<StoredUpload, UploadError>;
}
