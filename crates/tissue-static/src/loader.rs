//! Document discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use tissue_md::{parse_document, FrontmatterError, Metadata};

/// Extension of markdown documents and partial sources.
pub const MARKUP_EXTENSION: &str = "md";

/// A source document before validation.
#[derive(Debug, Clone)]
pub struct Document {
    /// Front-matter values
    pub metadata: Metadata,

    /// Raw markdown body
    pub body: String,

    /// Path relative to the markdown root
    pub source_path: PathBuf,
}

/// Errors that can occur while loading a single document.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to walk {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Frontmatter {
        path: PathBuf,
        #[source]
        source: FrontmatterError,
    },
}

impl LoadError {
    /// Path of the entry that failed to load.
    pub fn path(&self) -> &Path {
        match self {
            Self::Walk { path, .. } | Self::Read { path, .. } | Self::Frontmatter { path, .. } => {
                path
            }
        }
    }
}

/// Whether a path names a markdown file.
pub fn is_markup(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(MARKUP_EXTENSION)
}

/// Lazily load every markdown document under `root`.
///
/// Entries are visited sorted by file name, so the sequence is the same on
/// every run.
pub fn load_documents<'a>(
    root: &'a Path,
) -> impl Iterator<Item = Result<Document, LoadError>> + 'a {
    WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(move |entry| {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().unwrap_or(root).to_path_buf();
                    return Some(Err(LoadError::Walk { path, source: e }));
                }
            };

            if !entry.file_type().is_file() || !is_markup(entry.path()) {
                return None;
            }

            Some(load_document(root, entry.path()))
        })
}

/// Load one document, recording its path relative to `root`.
pub fn load_document(root: &Path, path: &Path) -> Result<Document, LoadError> {
    let relative_path = path.strip_prefix(root).unwrap_or(path).to_path_buf();

    let source = fs::read_to_string(path).map_err(|e| LoadError::Read {
        path: relative_path.clone(),
        source: e,
    })?;

    let doc = parse_document(&source).map_err(|e| LoadError::Frontmatter {
        path: relative_path.clone(),
        source: e,
    })?;

    Ok(Document {
        metadata: doc.metadata,
        body: doc.body,
        source_path: relative_path,
    })
}
