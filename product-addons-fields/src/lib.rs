//! Addon field validation and cart item data derivation
//!
//! An addon is a customer-facing input attached to a purchasable item: a
//! checkbox list, a radio group, a file upload, a free-text engraving and so
//! on. At checkout each submitted value goes through two steps:
//!
//! 1. [`AddonField::validate`] decides whether the submission is admissible
//! 2. [`AddonField::cart_item_data`] turns it into zero or more priced
//!    [`CartItemData`] records
//!
//! # Architecture
//!
//! - **Definitions are input**: [`AddonDef`] comes from a catalog loader and
//!   is never mutated here
//! - **One variant per input kind**: [`Field`] is chosen from the addon's
//!   [`AddonType`] when it is constructed
//! - **Collaborators are injected**: size policy, uploader, sanitizer and the
//!   customer identifier travel in a [`FieldEnv`]; there is no global state
//! - **Tolerant pricing**: malformed amounts price at zero instead of failing

pub mod cart;
pub mod collaborators;
pub mod error;
pub mod field;
pub mod form;
pub mod price;
pub mod submission;
pub mod types;
pub mod upload_dir;
pub mod uploader;

pub use cart::CartItemData;
pub use collaborators::{
    CustomerId, MaxUploadSize, PathRewriter, SizePolicy, StoredUpload, UploadError, Uploader,
};
pub use error::{AddonError, AddonErrors, Result};
pub use field::{
    AddonField, CustomPriceField, Field, FieldEnv, FileUploadField, HeadingField,
    InputMultiplierField, ListField, TextField,
};
pub use form::{evaluate_addons, Submissions};
pub use price::{coerce_amount, parse_amount, resolve_price, Amount, PriceContext, PriceType};
pub use submission::{FileEntry, Submission, SubmittedValue};
pub use types::{AddonDef, AddonOption, AddonType, Restrictions};
pub use upload_dir::{customer_hash, customer_upload_dir, UploadDir, ADDON_UPLOADS_DIR};
pub use uploader::FilesystemUploader;
