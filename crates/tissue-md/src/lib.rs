//! Markdown documents with YAML front-matter.
//!
//! This crate splits a source document into its front-matter metadata and
//! markdown body, models metadata values as a small tagged type, and renders
//! markdown to HTML.

pub mod frontmatter;
pub mod metadata;
pub mod parser;

pub use frontmatter::{extract_frontmatter, FrontmatterError};
pub use metadata::{MetaValue, Metadata};
pub use parser::{parse_document, render_html, ParsedDoc};
