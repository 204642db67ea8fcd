//! Markdown document parser.

use pulldown_cmark::{html, Options, Parser};

use crate::frontmatter::{extract_frontmatter, FrontmatterError};
use crate::metadata::Metadata;

/// A parsed markdown document.
#[derive(Debug, Clone)]
pub struct ParsedDoc {
    /// Parsed frontmatter, empty when the document has none
    pub metadata: Metadata,

    /// Markdown content (without frontmatter)
    pub body: String,
}

impl ParsedDoc {
    /// Render the body to HTML.
    pub fn render_html(&self) -> String {
        render_html(&self.body)
    }
}

/// Parse a markdown document into metadata and body.
pub fn parse_document(source: &str) -> Result<ParsedDoc, FrontmatterError> {
    let (metadata, body) = extract_frontmatter(source)?;

    Ok(ParsedDoc {
        metadata,
        body: body.to_string(),
    })
}

/// Render markdown to HTML.
pub fn render_html(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;

    let parser = Parser::new_ext(markdown, options);

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    html_output
}
