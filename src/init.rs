//! Site initialization module.
//!
//! Creates a new site with the default configuration and badge assets.

use crate::{
    assets::{APP_STORE_SVG, PLAY_STORE_SVG},
    config::SiteConfig,
    log,
};
use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

/// Create a new site with default structure
///
/// Fails if the config file already exists; existing badge files are kept.
pub fn new_site(config: &SiteConfig) -> Result<()> {
    let root = config.get_root();

    fs::create_dir_all(root).with_context(|| format!("Failed to create {}", root.display()))?;
    init_default_config(&config.config_path)?;
    init_assets(&config.build.assets)?;

    log!("init"; "created {}", root.display());
    Ok(())
}

/// Write default configuration file
fn init_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!(
            "Config file `{}` already exists. Remove it manually or init in a different path.",
            path.display()
        );
    }
    let content = toml::to_string_pretty(&SiteConfig::default())?;
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Copy the embedded badges into the assets directory, keeping existing files
fn init_assets(assets: &Path) -> Result<()> {
    fs::create_dir_all(assets)
        .with_context(|| format!("Failed to create {}", assets.display()))?;

    for (name, content) in [("appstore.svg", APP_STORE_SVG), ("playstore.svg", PLAY_STORE_SVG)] {
        let path = assets.join(name);
        if !path.exists() {
            fs::write(&path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
    }
    Ok(())
}
