//! Static site builder for tissue.
//!
//! Builds a static site from a tree of markdown documents with YAML
//! front-matter. The pipeline runs in one direction: documents are loaded and
//! validated, indexed into page records, audited for permalink collisions,
//! rendered through templates, and summarized into a search index and a
//! sitemap.

pub mod assets;
pub mod audit;
pub mod builder;
pub mod config;
pub mod diagnostics;
pub mod loader;
pub mod page;
pub mod partials;
pub mod render;
pub mod search;
pub mod sitemap;
pub mod templates;
pub mod validate;

pub use audit::{audit_permalinks, Collision, PermalinkAudit};
pub use builder::{BuildError, BuildResult, StaticBuilder};
pub use config::SiteConfig;
pub use diagnostics::{Collector, Diagnostic, DiagnosticSink, Severity, TracingSink};
pub use loader::{load_documents, Document, LoadError};
pub use page::{PageIndex, PageRecord};
pub use templates::TemplateEngine;
