//! Product addon configuration using Figment
//!
//! Settings that shape how addon fields behave at checkout: the upload size
//! limit, dry-run mode, strict handling of nested list submissions, and the
//! base upload location.
//!
//! # Precedence
//!
//! Later sources override earlier ones:
//!
//! 1. Compiled defaults ([`AddonsConfig::default`])
//! 2. A config file: `product-addons.{toml,yaml,yml,json}` in the search
//!    directory, or an explicit path
//! 3. Environment variables prefixed `PRODUCT_ADDONS_`, nested keys split on `__`
//!
//! ```no_run
//! use product_addons_config::load_configuration;
//!
//! let config = load_configuration()?;
//! println!("uploads capped at {} bytes", config.max_upload_bytes);
//! # Ok::<(), product_addons_config::ConfigError>(())
//! ```
//!
//! ## Example TOML Configuration
//!
//! ```toml
//! max_upload_bytes = 4194304
//! dry_run = false
//! strict_list_nesting = true
//!
//! [upload]
//! path = "/var/www/uploads"
//! url = "https://shop.example.com/uploads"
//! ```

pub mod error;
pub mod provider;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::{ConfigError, ConfigResult};
pub use provider::{ConfigProvider, CONFIG_FILE_STEM, ENV_PREFIX};
pub use types::{AddonsConfig, UploadLocation, DEFAULT_MAX_UPLOAD_BYTES};

/// Load configuration from the current directory and environment.
pub fn load_configuration() -> ConfigResult<AddonsConfig> {
    ConfigProvider::new()?.load()
}
