//! Search index generation.

use std::path::Path;

use crate::builder::{write_file, BuildError};
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::page::{PageIndex, PageRecord};

/// Write every page not marked `pages_exclude` as a JSON array.
///
/// Returns the number of pages written.
pub fn write_search_index(
    index: &PageIndex,
    path: &Path,
    sink: &mut dyn DiagnosticSink,
) -> Result<usize, BuildError> {
    let pages: Vec<&PageRecord> = index.searchable().collect();

    let json = serde_json::to_string_pretty(&pages)?;
    write_file(path, json)?;

    sink.report(Diagnostic::SearchIndexWritten { pages: pages.len() });

    Ok(pages.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Collector;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn page(title: &str, pages_exclude: bool) -> PageRecord {
        PageRecord {
            content: "<p>x</p>".to_string(),
            title: title.to_string(),
            desc: "d".to_string(),
            image: "i".to_string(),
            permalink: format!("/{}/", title),
            template: "t.html".to_string(),
            groups: vec!["root".to_string()],
            pages_exclude,
            source_path: format!("{}.md", title).into(),
        }
    }

    #[test]
    fn leaves_out_excluded_pages() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("search_index.json");
        let index = PageIndex::from_pages(vec![page("shown", false), page("hidden", true)]);

        let mut sink = Collector::new();
        let count = write_search_index(&index, &path, &mut sink).unwrap();

        assert_eq!(count, 1);
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{
                "content": "<p>x</p>",
                "title": "shown",
                "desc": "d",
                "image": "i",
                "permalink": "/shown/",
                "template": "t.html",
                "groups": ["root"],
                "pages_exclude": false,
            }])
        );
        assert_eq!(
            sink.diagnostics(),
            &[Diagnostic::SearchIndexWritten { pages: 1 }]
        );
    }

    #[test]
    fn empty_index_writes_empty_array() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("search_index.json");

        write_search_index(&PageIndex::default(), &path, &mut Collector::new()).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }
}
