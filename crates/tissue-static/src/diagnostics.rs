//! Build diagnostics.
//!
//! Stages never print. They report [`Diagnostic`]s to a [`DiagnosticSink`]
//! handed in by the caller: the CLI forwards them to `tracing`, tests collect
//! them in memory.

use std::fmt;
use std::path::PathBuf;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
    /// Per-file progress, shown with `--verbose`
    Debug,
}

/// Something worth telling the user about during a build.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A document lacks required front-matter keys and was skipped.
    MissingKeys { path: PathBuf, keys: Vec<String> },

    /// A document declares keys outside the schema.
    UnknownKeys { path: PathBuf, keys: Vec<String> },

    /// A document could not be read or its front-matter could not be parsed.
    Unreadable { path: PathBuf, message: String },

    /// A flag was given a value that is not a boolean; it reads as false.
    NotABoolean { path: PathBuf, key: String },

    /// A declared permalink does not start with `/`.
    UnrootedPermalink { path: PathBuf, permalink: String },

    /// Two pages map to the same output file; the later one is not rendered.
    DuplicatePermalink {
        permalink: String,
        path: PathBuf,
        original: String,
        duplicate: String,
    },

    /// A page targets a file the build writes itself and is not rendered.
    ReservedPermalink {
        permalink: String,
        title: String,
        path: PathBuf,
    },

    PartialRendered { path: PathBuf },

    NoPartials { path: PathBuf },

    StaticCopied { from: PathBuf, to: PathBuf, files: usize },

    NoStatic { path: PathBuf },

    PageRendered { path: PathBuf },

    SearchIndexWritten { pages: usize },

    SitemapWritten { urls: usize },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Self::MissingKeys { .. }
            | Self::Unreadable { .. }
            | Self::DuplicatePermalink { .. }
            | Self::ReservedPermalink { .. } => Severity::Error,
            Self::UnknownKeys { .. } | Self::NotABoolean { .. } | Self::UnrootedPermalink { .. } => {
                Severity::Warning
            }
            Self::PageRendered { .. } | Self::PartialRendered { .. } | Self::StaticCopied { .. } => {
                Severity::Debug
            }
            _ => Severity::Info,
        }
    }

    /// Short symbolic tag identifying the kind of diagnostic.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::MissingKeys { .. } => "missing-keys",
            Self::UnknownKeys { .. } => "unknown-keys",
            Self::Unreadable { .. } => "unreadable",
            Self::NotABoolean { .. } => "not-a-boolean",
            Self::UnrootedPermalink { .. } => "unrooted-permalink",
            Self::DuplicatePermalink { .. } => "duplicate-permalink",
            Self::ReservedPermalink { .. } => "reserved-permalink",
            Self::PartialRendered { .. } => "partial",
            Self::NoPartials { .. } => "no-partials",
            Self::StaticCopied { .. } => "static",
            Self::NoStatic { .. } => "no-static",
            Self::PageRendered { .. } => "rendered",
            Self::SearchIndexWritten { .. } => "search-index",
            Self::SitemapWritten { .. } => "sitemap",
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingKeys { path, keys } => write!(
                f,
                "{} is missing required keys: {}",
                path.display(),
                keys.join(", ")
            ),
            Self::UnknownKeys { path, keys } => {
                write!(f, "{} has unknown keys: {}", path.display(), keys.join(", "))
            }
            Self::Unreadable { message, .. } => f.write_str(message),
            Self::NotABoolean { path, key } => write!(
                f,
                "{}: '{}' is not a boolean, treating it as false",
                path.display(),
                key
            ),
            Self::UnrootedPermalink { path, permalink } => write!(
                f,
                "{}: permalink '{}' does not start with '/'",
                path.display(),
                permalink
            ),
            Self::DuplicatePermalink {
                permalink,
                path,
                original,
                duplicate,
            } => write!(
                f,
                "Duplicate permalink found: '{}' and '{}' -> {} ({}), skipping '{}'",
                original,
                duplicate,
                permalink,
                path.display(),
                duplicate
            ),
            Self::ReservedPermalink {
                permalink,
                title,
                path,
            } => write!(
                f,
                "Skipped '{}': {} would overwrite {}",
                title,
                permalink,
                path.display()
            ),
            Self::PartialRendered { path } => write!(f, "Pre-rendered: {}", path.display()),
            Self::NoPartials { path } => {
                write!(f, "No partial sources found at {}", path.display())
            }
            Self::StaticCopied { from, to, files } => write!(
                f,
                "Copied {} static files from {} to {}",
                files,
                from.display(),
                to.display()
            ),
            Self::NoStatic { path } => {
                write!(f, "No static directory found at {}", path.display())
            }
            Self::PageRendered { path } => write!(f, "Rendered page: {}", path.display()),
            Self::SearchIndexWritten { pages } => {
                write!(f, "search_index.json written with {} pages", pages)
            }
            Self::SitemapWritten { urls } => write!(f, "sitemap.xml written with {} URLs", urls),
        }
    }
}

/// Receives diagnostics from build stages.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to `tracing` at the matching level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        let tag = diagnostic.tag();
        match diagnostic.severity() {
            Severity::Error => tracing::error!(tag, "{}", diagnostic),
            Severity::Warning => tracing::warn!(tag, "{}", diagnostic),
            Severity::Info => tracing::info!(tag, "{}", diagnostic),
            Severity::Debug => tracing::debug!(tag, "{}", diagnostic),
        }
    }
}

/// Keeps every diagnostic in memory.
#[derive(Debug, Default)]
pub struct Collector {
    diagnostics: Vec<Diagnostic>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Diagnostics with the given tag.
    pub fn tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Diagnostic> + 'a {
        self.diagnostics.iter().filter(move |d| d.tag() == tag)
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity() == severity)
            .count()
    }
}

impl DiagnosticSink for Collector {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}
