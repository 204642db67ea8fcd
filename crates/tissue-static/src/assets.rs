//! Static asset copying.

use std::fs;

use walkdir::WalkDir;

use crate::builder::BuildError;
use crate::config::SiteConfig;
use crate::diagnostics::{Diagnostic, DiagnosticSink};

/// Copy the static tree into the output directory.
///
/// A missing static directory is not an error. Returns the number of files
/// copied.
pub fn copy_static(config: &SiteConfig, sink: &mut dyn DiagnosticSink) -> Result<usize, BuildError> {
    let source = &config.static_dir;

    if !source.is_dir() {
        sink.report(Diagnostic::NoStatic {
            path: source.clone(),
        });
        return Ok(0);
    }

    let target = config.static_output_dir();
    let mut files = 0;

    for entry in WalkDir::new(source).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| BuildError::ReadError {
            path: e.path().unwrap_or(source.as_path()).to_path_buf(),
            source: e.into(),
        })?;

        let relative = entry.path().strip_prefix(source).unwrap_or(entry.path());
        let dest = target.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest).map_err(|e| BuildError::WriteError {
                path: dest.clone(),
                source: e,
            })?;
        } else {
            fs::copy(entry.path(), &dest).map_err(|e| BuildError::WriteError {
                path: dest.clone(),
                source: e,
            })?;
            files += 1;
        }
    }

    sink.report(Diagnostic::StaticCopied {
        from: source.clone(),
        to: target,
        files,
    });

    Ok(files)
}
