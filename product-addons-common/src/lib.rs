//! # Product Addons Common
//!
//! Foundational pieces shared by the product addon crates:
//!
//! - [`error`] - severity classification
//! - [`logging`] - YAML pretty-printing wrapper for tracing output
//! - [`sanitize`] - free-text sanitizing and slug normalization
//!
//! Nothing in here knows about addons, fields or carts; the domain lives in
//! `product-addons-fields`.

pub mod error;
pub mod logging;
pub mod sanitize;

pub use error::{ErrorSeverity, Severity};
pub use logging::Pretty;
pub use sanitize::{slugify, PlainTextSanitizer, TextSanitizer};
