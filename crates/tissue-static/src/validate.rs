//! Front-matter schema checks.

use std::path::Path;

use tissue_md::Metadata;

use crate::diagnostics::{Diagnostic, DiagnosticSink};

/// Keys every document must declare.
pub const REQUIRED_KEYS: [&str; 4] = ["title", "desc", "image", "template"];

/// Keys a document may declare.
pub const OPTIONAL_KEYS: [&str; 3] = ["permalink", "pages_exclude", "groups"];

/// Whether a key belongs to the schema.
pub fn is_known_key(key: &str) -> bool {
    REQUIRED_KEYS.contains(&key) || OPTIONAL_KEYS.contains(&key)
}

/// Check a document's metadata against the schema.
///
/// Missing required keys make the document invalid. Unknown keys only draw a
/// warning. Returns whether the document may be indexed.
pub fn validate_metadata(metadata: &Metadata, path: &Path, sink: &mut dyn DiagnosticSink) -> bool {
    let missing: Vec<String> = REQUIRED_KEYS
        .iter()
        .filter(|key| !metadata.contains_key(key))
        .map(|key| key.to_string())
        .collect();

    let unknown: Vec<String> = metadata
        .keys()
        .filter(|key| !is_known_key(key))
        .map(str::to_owned)
        .collect();

    if !missing.is_empty() {
        sink.report(Diagnostic::MissingKeys {
            path: path.to_path_buf(),
            keys: missing.clone(),
        });
    }

    if !unknown.is_empty() {
        sink.report(Diagnostic::UnknownKeys {
            path: path.to_path_buf(),
            keys: unknown,
        });
    }

    missing.is_empty()
}
