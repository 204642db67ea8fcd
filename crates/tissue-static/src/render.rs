//! Page rendering.

use std::path::{Path, PathBuf};

use crate::audit::PermalinkAudit;
use crate::builder::{write_file, BuildError};
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::page::PageIndex;
use crate::templates::TemplateEngine;

/// File name written for permalinks without an extension.
pub const INDEX_FILE: &str = "index.html";

/// Output file for a permalink, relative to the output root.
///
/// `/foo/` maps to `foo/index.html`, `/feed.xml` to `feed.xml` and `/` to
/// `index.html`. Returns `None` for permalinks with `.` or `..` segments.
pub fn output_path(permalink: &str) -> Option<PathBuf> {
    let mut path = PathBuf::new();

    for segment in permalink.split('/').filter(|s| !s.is_empty()) {
        if segment == "." || segment == ".." {
            return None;
        }
        path.push(segment);
    }

    if path.extension().is_none() {
        path.push(INDEX_FILE);
    }

    Some(path)
}

/// Render every page to the output directory.
///
/// Writes each page to the output file the audit resolved for it. Shadowed
/// pages are skipped; the audit already reported them. Stops at the first page whose template cannot be resolved or rendered.
/// Returns the number of pages written.
pub fn render_pages(
    engine: &TemplateEngine,
    index: &PageIndex,
    audit: &PermalinkAudit,
    output_dir: &Path,
    sink: &mut dyn DiagnosticSink,
) -> Result<usize, BuildError> {
    let mut written = 0;

    for (position, page) in index.iter().enumerate() {
        if audit.is_shadowed(position) {
            continue;
        }

        let relative = audit.target(position).ok_or_else(|| BuildError::UnsafePermalink {
            permalink: page.permalink.clone(),
            title: page.title.clone(),
        })?;

        let html = engine
            .render_page(page, index)
            .map_err(|e| BuildError::TemplateError {
                permalink: page.permalink.clone(),
                template: page.template.clone(),
                source: e,
            })?;

        write_file(&output_dir.join(relative), html)?;
        written += 1;

        sink.report(Diagnostic::PageRendered {
            path: relative.to_path_buf(),
        });
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::audit_permalinks;
    use crate::diagnostics::Collector;
    use crate::page::PageRecord;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn page(title: &str, permalink: &str) -> PageRecord {
        PageRecord {
            content: format!("<p>{}</p>", title),
            title: title.to_string(),
            desc: String::new(),
            image: String::new(),
            permalink: permalink.to_string(),
            template: "page.html".to_string(),
            groups: vec!["root".to_string()],
            pages_exclude: false,
            source_path: Default::default(),
        }
    }

    #[test]
    fn maps_permalinks_to_files() {
        assert_eq!(output_path("/foo/"), Some(PathBuf::from("foo/index.html")));
        assert_eq!(output_path("/blog/post1/"), Some(PathBuf::from("blog/post1/index.html")));
        assert_eq!(output_path("/feed.xml"), Some(PathBuf::from("feed.xml")));
        assert_eq!(output_path("/"), Some(PathBuf::from("index.html")));
        assert_eq!(output_path("no-slash"), Some(PathBuf::from("no-slash/index.html")));
    }

    #[test]
    fn rejects_escaping_permalinks() {
        assert_eq!(output_path("/../etc/"), None);
        assert_eq!(output_path("/a/./b/"), None);
    }

    #[test]
    fn writes_pages_and_skips_shadowed() {
        let temp = tempdir().unwrap();
        let templates = temp.path().join("templates");
        let out = temp.path().join("public");
        fs::create_dir_all(&templates).unwrap();
        fs::write(templates.join("page.html"), "{{ content }}").unwrap();

        let index = PageIndex::from_pages(vec![
            page("First", "/same/"),
            page("Second", "/same"),
            page("Feed", "/feed.xml"),
        ]);
        let mut sink = Collector::new();
        let audit = audit_permalinks(&index, &mut sink);

        let written =
            render_pages(&TemplateEngine::new(&templates), &index, &audit, &out, &mut sink)
                .unwrap();

        assert_eq!(written, 2);
        assert_eq!(
            fs::read_to_string(out.join("same/index.html")).unwrap(),
            "<p>First</p>"
        );
        assert_eq!(fs::read_to_string(out.join("feed.xml")).unwrap(), "<p>Feed</p>");
        assert_eq!(sink.tagged("duplicate-permalink").count(), 1);
        assert_eq!(sink.tagged("rendered").count(), 2);
    }

    #[test]
    fn unsafe_permalink_is_fatal() {
        let temp = tempdir().unwrap();
        let index = PageIndex::from_pages(vec![page("Escape", "/../outside/")]);
        let mut sink = Collector::new();
        let audit = audit_permalinks(&index, &mut sink);

        let err = render_pages(
            &TemplateEngine::new(temp.path()),
            &index,
            &audit,
            &temp.path().join("public"),
            &mut sink,
        )
        .unwrap_err();

        assert!(matches!(err, BuildError::UnsafePermalink { .. }));
    }
}
