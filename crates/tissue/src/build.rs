//! Site build command.

use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::Deserialize;
use tissue_static::config::{DEFAULT_BASE_URL, DEFAULT_TEMPLATE};
use tissue_static::{SiteConfig, StaticBuilder, TracingSink};

/// Configuration file structure (tissue.toml).
#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    site: SiteSettings,
}

#[derive(Debug, Deserialize)]
struct SiteSettings {
    #[serde(default = "default_base_url")]
    base_url: String,
    #[serde(default = "default_template")]
    default_template: String,
    /// Fail the build on duplicate permalinks
    #[serde(default)]
    strict_permalinks: bool,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            default_template: default_template(),
            strict_permalinks: false,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_template() -> String {
    DEFAULT_TEMPLATE.to_string()
}

/// Load configuration from the config file if it exists.
/// Returns an error if the config file exists but is malformed.
fn load_config(config_path: &Path) -> Result<ConfigFile> {
    if config_path.exists() {
        let content = fs::read_to_string(config_path).map_err(|e| {
            anyhow::anyhow!("Failed to read {}: {}", config_path.display(), e)
        })?;
        let config = parse_config(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse {}: {}", config_path.display(), e)
        })?;
        tracing::info!("Loaded config from {}", config_path.display());
        return Ok(config);
    }
    Ok(ConfigFile::default())
}

fn parse_config(content: &str) -> Result<ConfigFile, toml::de::Error> {
    toml::from_str(content)
}

/// Run the build.
pub fn run(root: &Path, config_path: &Path) -> Result<()> {
    tracing::info!("Building site in {}...", root.display());

    let file_config = load_config(&root.join(config_path))?;

    let config = SiteConfig {
        base_url: file_config.site.base_url,
        default_template: file_config.site.default_template,
        strict_permalinks: file_config.site.strict_permalinks,
        ..SiteConfig::from_root(root)
    };

    let result = StaticBuilder::new(config).build(&mut TracingSink)?;

    tracing::info!(
        "Built {} pages ({} rejected, {} duplicate permalinks) in {}ms",
        result.pages,
        result.rejected,
        result.collisions,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
