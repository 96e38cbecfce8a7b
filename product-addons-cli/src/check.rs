//! The `check` and `upload-dir` commands.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use product_addons_common::{PlainTextSanitizer, Severity};
use product_addons_config::{AddonsConfig, ConfigProvider};
use product_addons_fields::{
    customer_upload_dir, evaluate_addons, AddonDef, AddonErrors, CartItemData, CustomerId,
    FieldEnv, FileEntry, FilesystemUploader, MaxUploadSize, PriceContext, Submission,
    SubmittedValue, Submissions, UploadDir,
};
use serde::Deserialize;
use tracing::{debug, warn};

/// One entry of the submission file. Files are given by path.
#[derive(Debug, Default, Deserialize)]
struct SubmissionEntry {
    #[serde(default)]
    value: Option<SubmittedValue>,
    #[serde(default)]
    file: Option<PathBuf>,
}

/// Options for [`run_check`].
#[derive(Debug, Clone)]
pub struct CheckOptions {
    pub addons: PathBuf,
    pub submission: PathBuf,
    pub customer_id: String,
    pub pricing: PriceContext,
    pub dry_run: bool,
}

/// Outcome of a check: records, or the customer-facing validation errors.
pub type CheckOutcome = std::result::Result<Vec<CartItemData>, AddonErrors>;

/// Load configuration, from an explicit file when given.
pub fn load_config(explicit: Option<&Path>) -> Result<AddonsConfig> {
    let provider = ConfigProvider::new()?;
    let provider = match explicit {
        Some(path) => provider.with_file(path),
        None => provider,
    };
    Ok(provider.load()?)
}

/// Read addon definitions from YAML or JSON.
pub fn read_addons(path: &Path) -> Result<Vec<AddonDef>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading addon definitions from {}", path.display()))?;
    let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");
    let addons = if is_json {
        serde_json::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };
    Ok(addons)
}

/// Read a submission file; file paths become [`FileEntry`]s.
pub fn read_submissions(path: &Path) -> Result<Submissions> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading submission from {}", path.display()))?;
    let entries: HashMap<String, SubmissionEntry> = serde_json::from_str(&content)
        .with_context(|| format!("parsing submission {}", path.display()))?;

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    entries
        .into_iter()
        .map(|(field_name, entry)| {
            let file = entry
                .file
                .map(|file| {
                    let resolved = if file.is_absolute() {
                        file
                    } else {
                        base.join(file)
                    };
                    FileEntry::from_path(&resolved)
                        .with_context(|| format!("reading upload {}", resolved.display()))
                })
                .transpose()?;
            Ok((
                field_name,
                Submission {
                    value: entry.value,
                    file,
                },
            ))
        })
        .collect()
}

/// Validate the submission against the definitions and derive cart data.
///
/// The outer `Result` is for operational failures (unreadable files, bad
/// configuration); the inner one carries validation and upload errors.
pub fn run_check(config: &AddonsConfig, options: &CheckOptions) -> Result<CheckOutcome> {
    let addons = read_addons(&options.addons)?;
    let submissions = read_submissions(&options.submission)?;
    debug!(
        addons = addons.len(),
        submissions = submissions.len(),
        "checking submission"
    );

    let uploader = FilesystemUploader::new(UploadDir::from(&config.upload));
    let limit = MaxUploadSize::from(config);
    let sanitizer = PlainTextSanitizer::new();
    let env = FieldEnv::new(
        &limit,
        &uploader,
        &sanitizer,
        CustomerId::new(&options.customer_id),
    )
    .configured(config);
    let env = if options.dry_run { env.dry_run(true) } else { env };

    let outcome = evaluate_addons(&addons, &submissions, &env, &options.pricing);
    if let Err(errors) = &outcome {
        for error in errors.errors() {
            warn!(severity = %error.severity(), addon = error.addon_name(), "{error}");
        }
    }
    Ok(outcome)
}

/// Where files for `customer_id` are stored under the configured location.
pub fn upload_dir_for(config: &AddonsConfig, customer_id: &str) -> UploadDir {
    customer_upload_dir(
        UploadDir::from(&config.upload),
        &CustomerId::new(customer_id),
    )
}
