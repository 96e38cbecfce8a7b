//! Per-customer upload directories.
//!
//! Uploaded files are grouped under `product_addons_uploads/<md5 of customer
//! id>` so one customer's files never share a directory with another's, and
//! the customer id itself never appears in a URL.

use product_addons_config::UploadLocation;
use serde::{Deserialize, Serialize};

use crate::collaborators::CustomerId;

/// Directory every addon upload is nested under.
pub const ADDON_UPLOADS_DIR: &str = "product_addons_uploads";

/// Target of an upload: filesystem path, matching URL, and the subdirectory
/// already applied to both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadDir {
    pub path: String,
    pub url: String,
    pub subdir: String,
}

impl UploadDir {
    pub fn new(path: impl Into<String>, url: impl Into<String>, subdir: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            url: url.into(),
            subdir: subdir.into(),
        }
    }
}

impl From<&UploadLocation> for UploadDir {
    fn from(location: &UploadLocation) -> Self {
        Self::new(&location.path, &location.url, &location.subdir)
    }
}

/// Lowercase hex MD5 of the customer id.
pub fn customer_hash(customer: &CustomerId) -> String {
    format!("{:x}", md5::compute(customer.as_str().as_bytes()))
}

/// Nest `dir` under the customer's upload directory.
///
/// Without a subdirectory the customer directory is appended. With one, it is
/// substituted in place, so a directory that already went through this
/// function comes back unchanged.
pub fn customer_upload_dir(dir: UploadDir, customer: &CustomerId) -> UploadDir {
    let subdir = format!("/{}/{}", ADDON_UPLOADS_DIR, customer_hash(customer));

    if dir.subdir.is_empty() {
        return UploadDir {
            path: format!("{}{}", dir.path.trim_end_matches('/'), subdir),
            url: format!("{}{}", dir.url.trim_end_matches('/'), subdir),
            subdir,
        };
    }

    UploadDir {
        path: dir.path.replace(&dir.subdir, &subdir),
        url: dir.url.replace(&dir.subdir, &subdir),
        subdir,
    }
}
