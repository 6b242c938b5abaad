//! Site configuration management for `appbadge.toml`.
//!
//! # Sections
//!
//! | Section      | Purpose                                        |
//! |--------------|------------------------------------------------|
//! | `[serve]`    | Page server (interface, port)                  |
//! | `[build]`    | HTML minification, badge asset directory       |
//! | `[stores]`   | Store links, badge image paths, alt text       |
//! | `[i18n]`     | Optional translation table override            |
//! | `[[routes]]` | URL paths and their page variant               |
//!
//! # Example
//!
//! ```toml
//! [serve]
//! port = 8080
//!
//! [stores]
//! apple_url = "https://apps.apple.com/app/id0000000000"
//!
//! [[routes]]
//! path = "/"
//! localized = true
//! delay_ms = 0
//! ```

mod build;
pub mod defaults;
mod error;
mod i18n;
mod route;
mod serve;
mod stores;

use error::ConfigError;
pub use route::RouteConfig;
pub use stores::StoreConfig;

use build::BuildConfig;
use i18n::I18nConfig;
use serve::ServeConfig;

use crate::{
    cli::{Cli, Commands},
    i18n::Translations,
};
use anyhow::{Context, Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashSet,
    fs,
    net::IpAddr,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing appbadge.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Project root (set after loading)
    #[serde(skip)]
    pub root: Option<PathBuf>,

    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Page server settings
    #[serde(default)]
    pub serve: ServeConfig,

    /// Output post-processing and assets
    #[serde(default)]
    pub build: BuildConfig,

    /// App store badges
    #[serde(default)]
    pub stores: StoreConfig,

    /// Localization data source
    #[serde(default)]
    pub i18n: I18nConfig,

    /// Served pages
    #[serde(default = "defaults::routes::all")]
    #[educe(Default = defaults::routes::all())]
    pub routes: Vec<RouteConfig>,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Load config for the given CLI invocation.
    ///
    /// A missing file yields the defaults; `init` decides separately whether
    /// that is acceptable.
    pub fn load(cli: &Cli) -> Result<Self> {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        let config_path = root.join(&cli.config);

        let mut config = if config_path.exists() {
            Self::from_path(&config_path)
                .with_context(|| format!("Failed to load {}", config_path.display()))?
        } else {
            Self::default()
        };
        config.update_with_cli(cli);
        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let base = cli.root.clone().unwrap_or_else(|| self.get_root().to_owned());
        let root = match &cli.command {
            Commands::Init { name: Some(name) } => base.join(name),
            _ => base,
        };

        let root = Self::normalize_path(&root);
        self.config_path = Self::normalize_path(&root.join(&cli.config));
        self.build.assets = Self::normalize_path(&root.join(&self.build.assets));
        if let Some(path) = &self.i18n.translations {
            self.i18n.translations = Some(Self::normalize_path(&root.join(path)));
        }
        self.root = Some(root);

        match &cli.command {
            Commands::Serve {
                interface,
                port,
                minify,
            } => {
                Self::update_option(&mut self.serve.interface, interface.as_ref());
                Self::update_option(&mut self.serve.port, port.as_ref());
                Self::update_option(&mut self.build.minify, minify.as_ref());
            }
            Commands::Render { minify, .. } => {
                Self::update_option(&mut self.build.minify, minify.as_ref());
            }
            _ => {}
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Route serving `path`, ignoring a trailing slash.
    pub fn route(&self, path: &str) -> Option<&RouteConfig> {
        let wanted = Self::trim_route(path);
        self.routes
            .iter()
            .find(|route| Self::trim_route(&route.path) == wanted)
    }

    fn trim_route(path: &str) -> &str {
        match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        }
    }

    /// Translation table: the configured file, or the embedded default.
    pub fn translations(&self) -> Result<Translations> {
        match &self.i18n.translations {
            Some(path) => Translations::from_path(path)
                .with_context(|| format!("Failed to load translations from {}", path.display())),
            None => Ok(Translations::embedded().clone()),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.serve.interface.parse::<IpAddr>().is_err() {
            bail!(ConfigError::Validation(format!(
                "[serve.interface] `{}` is not an IP address",
                self.serve.interface
            )));
        }

        if self.serve.workers == 0 {
            bail!(ConfigError::Validation(
                "[serve.workers] must be at least 1".into()
            ));
        }

        for (field, url) in [
            ("[stores.apple_url]", &self.stores.apple_url),
            ("[stores.google_url]", &self.stores.google_url),
        ] {
            if !url.starts_with("http") {
                bail!(ConfigError::Validation(format!(
                    "{field} must start with http:// or https://"
                )));
            }
        }

        if self.routes.is_empty() {
            bail!(ConfigError::Validation(
                "[[routes]] must declare at least one page".into()
            ));
        }

        let mut seen = HashSet::new();
        for route in &self.routes {
            if !route.path.starts_with('/') {
                bail!(ConfigError::Validation(format!(
                    "[[routes]] path `{}` must start with `/`",
                    route.path
                )));
            }
            if !seen.insert(Self::trim_route(&route.path)) {
                bail!(ConfigError::Validation(format!(
                    "[[routes]] path `{}` is declared twice",
                    route.path
                )));
            }
        }

        if let Some(path) = &self.i18n.translations
            && !path.is_file()
        {
            bail!(ConfigError::Validation(format!(
                "[i18n.translations] `{}` not found",
                path.display()
            )));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
