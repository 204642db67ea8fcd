//! Static site builder.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::assets::copy_static;
use crate::audit::audit_permalinks;
use crate::config::SiteConfig;
use crate::diagnostics::DiagnosticSink;
use crate::loader::load_documents;
use crate::page::PageIndex;
use crate::partials::prerender_partials;
use crate::render::render_pages;
use crate::search::write_search_index;
use crate::sitemap::write_sitemap;
use crate::templates::TemplateEngine;

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages written
    pub pages: usize,

    /// Number of documents left out of the index
    pub rejected: usize,

    /// Number of permalink collisions found
    pub collisions: usize,

    /// Number of partials pre-rendered
    pub partials: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that abort a build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Markdown directory not found: {}", .0.display())]
    MissingSourceDir(PathBuf),

    #[error(
        "Refusing to clean output directory {}: it contains {}",
        output.display(),
        input.display()
    )]
    UnsafeOutputDir { output: PathBuf, input: PathBuf },

    #[error("Failed to render {permalink} with template '{template}': {source}")]
    TemplateError {
        permalink: String,
        template: String,
        #[source]
        source: minijinja::Error,
    },

    #[error("Permalink '{permalink}' of '{title}' points outside the output directory")]
    UnsafePermalink { permalink: String, title: String },

    #[error("Found {count} duplicate permalink(s), first at {permalink}")]
    DuplicatePermalinks { count: usize, permalink: String },

    #[error("Failed to read {}: {source}", path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize search index: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// Write a file, creating its parent directories.
pub(crate) fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> Result<(), BuildError> {
    let write_error = |source| BuildError::WriteError {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_error)?;
    }

    fs::write(path, contents).map_err(write_error)
}

/// Static site builder.
pub struct StaticBuilder {
    config: SiteConfig,
}

impl StaticBuilder {
    /// Create a new static builder.
    pub fn new(config: SiteConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Build the static site.
    ///
    /// Runs every stage to completion before the next starts. Invalid
    /// documents and non-strict permalink collisions are reported to `sink`
    /// without failing the build; anything else stops it where it happened.
    pub fn build(&self, sink: &mut dyn DiagnosticSink) -> Result<BuildResult, BuildError> {
        let start = Instant::now();
        let config = &self.config;

        if !config.markdown_dir.is_dir() {
            return Err(BuildError::MissingSourceDir(config.markdown_dir.clone()));
        }

        self.prepare_output_dir()?;

        // Partials must exist before any page template includes them.
        let partials = prerender_partials(config, sink)?;

        copy_static(config, sink)?;

        let engine = TemplateEngine::new(&config.templates_dir);

        let index = PageIndex::build(
            load_documents(&config.markdown_dir),
            &config.default_template,
            sink,
        );

        let audit = audit_permalinks(&index, sink);
        if let Some(position) = audit.unsafe_pages().next() {
            let page = &index.pages()[position];
            return Err(BuildError::UnsafePermalink {
                permalink: page.permalink.clone(),
                title: page.title.clone(),
            });
        }
        if config.strict_permalinks {
            if let Some(first) = audit.collisions().first() {
                return Err(BuildError::DuplicatePermalinks {
                    count: audit.collisions().len(),
                    permalink: first.permalink.clone(),
                });
            }
        }

        let pages = render_pages(&engine, &index, &audit, &config.output_dir, sink)?;

        write_search_index(&index, &config.search_index_path(), sink)?;

        write_sitemap(
            &index,
            &audit,
            &config.base_url,
            &config.sitemap_path(),
            sink,
        )?;

        let duration = start.elapsed();

        Ok(BuildResult {
            pages,
            rejected: index.rejected(),
            collisions: audit.collisions().len(),
            partials,
            duration_ms: duration.as_millis() as u64,
            output_dir: config.output_dir.clone(),
        })
    }

    /// Delete and recreate the output directory.
    ///
    /// Refuses when the output directory holds one of the inputs.
    fn prepare_output_dir(&self) -> Result<(), BuildError> {
        let config = &self.config;
        let output = absolute(&config.output_dir);

        for input in [&config.markdown_dir, &config.templates_dir, &config.static_dir] {
            if absolute(input).starts_with(&output) {
                return Err(BuildError::UnsafeOutputDir {
                    output: config.output_dir.clone(),
                    input: input.clone(),
                });
            }
        }

        match fs::remove_dir_all(&config.output_dir) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(BuildError::WriteError {
                    path: config.output_dir.clone(),
                    source: e,
                })
            }
        }

        fs::create_dir_all(&config.output_dir).map_err(|e| BuildError::WriteError {
            path: config.output_dir.clone(),
            source: e,
        })
    }
}

fn absolute(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
