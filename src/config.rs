//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults (eBKP-H 2020)
//! 2. Global config: `$XDG_CONFIG_HOME/rsclass/rsclass.toml`
//! 3. Local config: `./.rsclass.toml` (working directory)
//! 4. Environment variables: `RSCLASS_*` prefix
//!
//! CLI flags override everything, applied by the command layer.

use std::path::{Path, PathBuf};

use config::{Config, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::error::ApplicationError;
use crate::domain::entities::SchemeMeta;

/// Raw scheme metadata for intermediate parsing (fields are Option to
/// distinguish "not specified, inherit" from explicit values).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSchemeMeta {
    pub source: Option<String>,
    pub edition: Option<String>,
    pub edition_date: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub reference_tokens: Option<Vec<String>>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub out_dir: Option<PathBuf>,
    #[serde(default)]
    pub scheme: RawSchemeMeta,
}

/// Unified configuration for rsclass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory for generated reference files (default: ".")
    pub out_dir: PathBuf,
    /// Classification scheme metadata
    pub scheme: SchemeMeta,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
            scheme: SchemeMeta::default(),
        }
    }
}

/// Get the XDG config directory for rsclass.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "rsclass").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("rsclass.toml"))
}

/// Get the path to the local config file in a working directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".rsclass.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: config::ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Merge overlay config onto self: overlay wins where specified,
    /// otherwise the base value is kept.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        let scheme = &overlay.scheme;
        Self {
            out_dir: overlay
                .out_dir
                .clone()
                .unwrap_or_else(|| self.out_dir.clone()),
            scheme: SchemeMeta {
                source: scheme
                    .source
                    .clone()
                    .unwrap_or_else(|| self.scheme.source.clone()),
                edition: scheme
                    .edition
                    .clone()
                    .unwrap_or_else(|| self.scheme.edition.clone()),
                edition_date: scheme
                    .edition_date
                    .clone()
                    .unwrap_or_else(|| self.scheme.edition_date.clone()),
                name: scheme
                    .name
                    .clone()
                    .unwrap_or_else(|| self.scheme.name.clone()),
                description: scheme
                    .description
                    .clone()
                    .unwrap_or_else(|| self.scheme.description.clone()),
                reference_tokens: scheme
                    .reference_tokens
                    .clone()
                    .unwrap_or_else(|| self.scheme.reference_tokens.clone()),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// `config_path` (from `--config`) replaces the local-config step and
    /// must exist; the global and local files are optional.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        match config_path {
            Some(explicit) => {
                let raw = load_raw_settings(explicit)?;
                current = current.merge_with(&raw);
            }
            None => {
                let local_path = local_config_path(Path::new("."));
                if local_path.exists() {
                    let raw = load_raw_settings(&local_path)?;
                    current = current.merge_with(&raw);
                }
            }
        }

        current = Self::apply_env_overrides(current)?;
        Ok(current)
    }

    /// Apply RSCLASS_* environment variables as explicit overrides.
    ///
    /// `RSCLASS_SCHEME__NAME=...` maps to `scheme.name`; tokens are
    /// comma-separated.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let builder = Config::builder().add_source(
            Environment::with_prefix("RSCLASS")
                .separator("__")
                .list_separator(","),
        );
        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("out_dir") {
            settings.out_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("scheme.source") {
            settings.scheme.source = val;
        }
        if let Ok(val) = config.get_string("scheme.edition") {
            settings.scheme.edition = val;
        }
        if let Ok(val) = config.get_string("scheme.edition_date") {
            settings.scheme.edition_date = val;
        }
        if let Ok(val) = config.get_string("scheme.name") {
            settings.scheme.name = val;
        }
        if let Ok(val) = config.get_string("scheme.description") {
            settings.scheme.description = val;
        }
        if let Ok(val) = config.get::<Vec<String>>("scheme.reference_tokens") {
            settings.scheme.reference_tokens = val;
        }

        Ok(settings)
    }

    /// Generate a commented config template with the compiled defaults.
    pub fn template() -> String {
        let defaults = Self::default();
        format!(
            r#"# rsclass configuration
# Values here override the compiled defaults; RSCLASS_* env vars override this file.

# Directory for generated reference files
out_dir = "{}"

[scheme]
source = "{}"
edition = "{}"
edition_date = "{}"
name = "{}"
description = "{}"
reference_tokens = [{}]
"#,
            defaults.out_dir.display(),
            defaults.scheme.source,
            defaults.scheme.edition,
            defaults.scheme.edition_date,
            defaults.scheme.name,
            defaults.scheme.description,
            defaults
                .scheme
                .reference_tokens
                .iter()
                .map(|t| format!("\"{}\"", t))
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_ebkp_h_2020() {
        let settings = Settings::default();
        assert_eq!(settings.scheme.source, "CRB");
        assert_eq!(settings.scheme.edition, "2020");
        assert_eq!(settings.out_dir, PathBuf::from("."));
    }

    #[test]
    fn test_merge_overlay_wins_where_specified() {
        let base = Settings::default();
        let overlay = RawSettings {
            out_dir: None,
            scheme: RawSchemeMeta {
                name: Some("SfB".to_string()),
                ..Default::default()
            },
        };
        let merged = base.merge_with(&overlay);
        assert_eq!(merged.scheme.name, "SfB");
        // Unspecified fields inherit the base
        assert_eq!(merged.scheme.source, "CRB");
    }

    #[test]
    fn test_template_round_trips_through_toml() {
        let raw: RawSettings = toml::from_str(&Settings::template()).unwrap();
        let merged = Settings::default().merge_with(&raw);
        assert_eq!(merged, Settings::default());
    }
}
