//! Site layout and build settings.

use std::path::{Path, PathBuf};

/// Template used by pages that do not name one.
pub const DEFAULT_TEMPLATE: &str = "template_default.html";

/// Base URL used for sitemap entries when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://example.com";

/// File name of the generated search index.
pub const SEARCH_INDEX_FILE: &str = "search_index.json";

/// File name of the generated sitemap.
pub const SITEMAP_FILE: &str = "sitemap.xml";

/// Directory under the output root that receives the static assets.
pub const STATIC_OUTPUT_DIR: &str = "static";

/// Configuration for building a site.
///
/// Constructed once and handed to every stage, so several builds can run in
/// one process without sharing state.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Markdown document tree
    pub markdown_dir: PathBuf,

    /// Template root
    pub templates_dir: PathBuf,

    /// Flat directory of markdown fragments pre-rendered into the template root
    pub partials_dir: PathBuf,

    /// Static assets copied verbatim
    pub static_dir: PathBuf,

    /// Output directory, recreated on every build
    pub output_dir: PathBuf,

    /// Base URL for sitemap entries
    pub base_url: String,

    /// Template for pages that do not declare one
    pub default_template: String,

    /// Abort the build on duplicate permalinks instead of skipping the later pages
    pub strict_permalinks: bool,
}

impl SiteConfig {
    /// Derive the standard layout under a site root.
    ///
    /// ```text
    /// root/
    /// ├── markdown/              # documents
    /// ├── templates/
    /// │   └── partialsource/     # optional fragments
    /// ├── static/                # optional assets
    /// └── public/                # output
    /// ```
    pub fn from_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let templates_dir = root.join("templates");

        Self {
            markdown_dir: root.join("markdown"),
            partials_dir: templates_dir.join("partialsource"),
            templates_dir,
            static_dir: root.join("static"),
            output_dir: root.join("public"),
            base_url: DEFAULT_BASE_URL.to_string(),
            default_template: DEFAULT_TEMPLATE.to_string(),
            strict_permalinks: false,
        }
    }

    /// Set the base URL for sitemap entries.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Where static assets land in the output.
    pub fn static_output_dir(&self) -> PathBuf {
        self.output_dir.join(STATIC_OUTPUT_DIR)
    }

    pub fn search_index_path(&self) -> PathBuf {
        self.output_dir.join(SEARCH_INDEX_FILE)
    }

    pub fn sitemap_path(&self) -> PathBuf {
        self.output_dir.join(SITEMAP_FILE)
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::from_root(".")
    }
}
