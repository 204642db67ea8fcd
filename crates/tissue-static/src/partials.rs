//! Partial pre-rendering.
//!
//! Markdown fragments in the partial source directory become HTML templates
//! in the template root, where page templates can `{% include %}` them.

use std::fs;
use std::path::PathBuf;

use tissue_md::render_html;

use crate::builder::{write_file, BuildError};
use crate::config::SiteConfig;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::loader::is_markup;

/// Prefix of pre-rendered partial templates.
pub const PARTIAL_PREFIX: &str = "partial_";

/// Template name a partial source is rendered to: `footer.md` becomes
/// `partial_footer.html`.
pub fn partial_template_name(stem: &str) -> String {
    format!("{}{}.html", PARTIAL_PREFIX, stem)
}

/// Render every markdown fragment in the partial source directory.
///
/// Only the top level of the directory is scanned. Does nothing when the
/// directory does not exist. Returns the number of partials written.
pub fn prerender_partials(
    config: &SiteConfig,
    sink: &mut dyn DiagnosticSink,
) -> Result<usize, BuildError> {
    let source_dir = &config.partials_dir;

    if !source_dir.is_dir() {
        sink.report(Diagnostic::NoPartials {
            path: source_dir.clone(),
        });
        return Ok(0);
    }

    let read_error = |source| BuildError::ReadError {
        path: source_dir.clone(),
        source,
    };

    let mut sources: Vec<PathBuf> = fs::read_dir(source_dir)
        .map_err(read_error)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_error)?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_markup(path))
        .collect();
    sources.sort();

    for source in &sources {
        let markdown = fs::read_to_string(source).map_err(|e| BuildError::ReadError {
            path: source.clone(),
            source: e,
        })?;

        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = partial_template_name(&stem);

        write_file(&config.templates_dir.join(&name), render_html(&markdown))?;

        sink.report(Diagnostic::PartialRendered { path: name.into() });
    }

    Ok(sources.len())
}
