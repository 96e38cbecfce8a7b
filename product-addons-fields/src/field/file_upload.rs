//! File upload addons.

use tracing::{debug, warn};

use super::{addon_record, AddonField, FieldEnv};
use crate::cart::CartItemData;
use crate::error::{AddonError, Result};
use crate::price::PriceContext;
use crate::submission::{FileEntry, SubmittedValue};
use crate::types::AddonDef;
use crate::upload_dir::{customer_upload_dir, UploadDir};

/// Stores the submitted file and records where it went.
///
/// A previously stored locator may be submitted instead of a file, e.g. when
/// an order is edited; it is carried into the record unchanged.
#[derive(Debug, Clone)]
pub struct FileUploadField<'a> {
    addon: &'a AddonDef,
    file: Option<FileEntry>,
    prior: Option<SubmittedValue>,
}

impl<'a> FileUploadField<'a> {
    pub fn new(
        addon: &'a AddonDef,
        file: Option<FileEntry>,
        prior: Option<SubmittedValue>,
    ) -> Self {
        Self { addon, file, prior }
    }

    fn submitted_file(&self) -> Option<&FileEntry> {
        self.file.as_ref().filter(|f| f.is_present())
    }

    fn prior_locator(&self) -> Option<&str> {
        self.prior
            .as_ref()
            .and_then(SubmittedValue::as_scalar)
            .filter(|s| !s.trim().is_empty())
    }
}

/// Last path segment of a locator.
fn base_name(locator: &str) -> &str {
    locator
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(locator)
}

impl AddonField for FileUploadField<'_> {
    fn addon(&self) -> &AddonDef {
        self.addon
    }

    fn validate(&self, env: &FieldEnv<'_>) -> Result<()> {
        match self.submitted_file() {
            Some(file) if env.size_policy.is_over_limit(file) => Err(AddonError::FileTooLarge {
                name: self.addon.name.clone(),
                size: file.size,
            }),
            Some(_) => Ok(()),
            None if self.addon.required && self.prior_locator().is_none() => {
                Err(AddonError::required(&self.addon.name))
            }
            None => Ok(()),
        }
    }

    fn cart_item_data(
        &self,
        env: &FieldEnv<'_>,
        pricing: &PriceContext,
    ) -> Result<Vec<CartItemData>> {
        let record = addon_record(self.addon, env, pricing);

        if let Some(file) = self.submitted_file().filter(|_| !env.dry_run) {
            let rewrite = |dir: UploadDir| customer_upload_dir(dir, &env.customer);

            let stored = env.uploader.store(file, Some(&rewrite)).map_err(|e| {
                warn!(field = %self.addon.field_name, error = %e, "upload failed");
                AddonError::UploadFailed {
                    name: self.addon.name.clone(),
                    detail: e.to_string(),
                }
            })?;

            let locator = env.sanitizer.sanitize_text(&stored.url);
            let display = base_name(&locator).to_string();
            debug!(field = %self.addon.field_name, %locator, "file uploaded");
            return Ok(vec![record.with_value(locator).with_display(display)]);
        }

        if let Some(prior) = self.prior_locator() {
            let display = base_name(prior).to_string();
            return Ok(vec![record.with_value(prior).with_display(display)]);
        }

        Ok(Vec::new())
    }
}
