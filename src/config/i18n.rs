//! `[i18n]` section configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[i18n]` section in appbadge.toml.
///
/// # Example
/// ```toml
/// [i18n]
/// translations = "translation.json"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct I18nConfig {
    /// JSON translation table replacing the embedded one, relative to root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translations: Option<PathBuf>,
}
