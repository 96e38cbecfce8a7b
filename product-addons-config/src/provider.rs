//! Configuration provider using Figment

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use tracing::{debug, trace};

use crate::error::{ConfigError, ConfigResult};
use crate::types::AddonsConfig;

/// File name (without extension) searched for in the config directory.
pub const CONFIG_FILE_STEM: &str = "product-addons";

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "PRODUCT_ADDONS_";

const EXTENSIONS: [&str; 4] = ["toml", "yaml", "yml", "json"];

/// Loads [`AddonsConfig`] from defaults, a config file and the environment.
///
/// Nothing is cached; every `load` reads the sources again.
#[derive(Debug, Clone)]
pub struct ConfigProvider {
    search_dir: PathBuf,
    explicit_file: Option<PathBuf>,
}

impl ConfigProvider {
    /// Provider that searches the current working directory.
    pub fn new() -> ConfigResult<Self> {
        let cwd = std::env::current_dir().map_err(|_| ConfigError::CurrentDirectoryNotFound)?;
        Ok(Self::in_dir(cwd))
    }

    /// Provider that searches `dir` for `product-addons.*`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            search_dir: dir.into(),
            explicit_file: None,
        }
    }

    /// Use exactly this file instead of searching. The file must exist.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit_file = Some(path.into());
        self
    }

    /// Load and validate the configuration.
    pub fn load(&self) -> ConfigResult<AddonsConfig> {
        let config: AddonsConfig = self.build_figment()?.extract()?;
        config.validate()?;

        debug!(
            max_upload_bytes = config.max_upload_bytes,
            dry_run = config.dry_run,
            strict_list_nesting = config.strict_list_nesting,
            "loaded addons configuration"
        );
        Ok(config)
    }

    /// Build the figment with all sources in precedence order.
    fn build_figment(&self) -> ConfigResult<Figment> {
        let mut figment = Figment::from(Serialized::defaults(AddonsConfig::default()));

        if let Some(file) = self.config_file()? {
            trace!("Loading config file: {}", file.display());
            figment = figment.merge(file_provider(&file)?);
        }

        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    fn config_file(&self) -> ConfigResult<Option<PathBuf>> {
        if let Some(path) = &self.explicit_file {
            if !path.is_file() {
                return Err(ConfigError::FileNotFound { path: path.clone() });
            }
            return Ok(Some(path.clone()));
        }

        Ok(EXTENSIONS
            .iter()
            .map(|ext| self.search_dir.join(format!("{CONFIG_FILE_STEM}.{ext}")))
            .find(|candidate| candidate.is_file()))
    }
}

fn file_provider(path: &Path) -> ConfigResult<Figment> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    match ext.as_str() {
        "toml" => Ok(Figment::from(Toml::file(path))),
        "yaml" | "yml" => Ok(Figment::from(Yaml::file(path))),
        "json" => Ok(Figment::from(Json::file(path))),
        other => Err(ConfigError::UnsupportedFormat {
            format: other.to_string(),
        }),
    }
}
