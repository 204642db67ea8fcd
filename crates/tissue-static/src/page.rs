//! Page records and the page index.

use std::path::{Component, Path, PathBuf};

use serde::{Serialize, Serializer};

use tissue_md::{render_html, MetaValue};

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::loader::{Document, LoadError};
use crate::validate::validate_metadata;

/// Section name of documents sitting directly in the markdown root.
pub const ROOT_SECTION: &str = "root";

/// A page ready to render.
///
/// Serializes with a fixed key set; this is both the template context of the
/// page and its entry in the search index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageRecord {
    /// Body rendered to HTML
    pub content: String,

    pub title: String,

    pub desc: String,

    pub image: String,

    /// Canonical URL path, starting with `/`
    pub permalink: String,

    /// Template name relative to the template root
    pub template: String,

    /// Section name first, then declared groups
    pub groups: Vec<String>,

    /// Leave the page out of the search index and sitemap
    pub pages_exclude: bool,

    /// Source document, relative to the markdown root
    #[serde(skip)]
    pub source_path: PathBuf,
}

impl PageRecord {
    /// Build a record from a validated document.
    pub fn from_document(
        doc: &Document,
        default_template: &str,
        sink: &mut dyn DiagnosticSink,
    ) -> Self {
        let metadata = &doc.metadata;
        let text = |key: &str| metadata.get(key).map(MetaValue::to_text).unwrap_or_default();

        let permalink = match metadata.get("permalink").map(MetaValue::to_text) {
            Some(permalink) if !permalink.is_empty() => {
                if !permalink.starts_with('/') {
                    sink.report(Diagnostic::UnrootedPermalink {
                        path: doc.source_path.clone(),
                        permalink: permalink.clone(),
                    });
                }
                permalink
            }
            _ => derive_permalink(&doc.source_path),
        };

        let template = Some(text("template"))
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| default_template.to_string());

        let mut groups = vec![section_name(&doc.source_path)];
        if let Some(declared) = metadata.get("groups") {
            groups.extend(declared.to_list());
        }

        let pages_exclude = match metadata.get("pages_exclude") {
            None => false,
            Some(value) => value.as_bool().unwrap_or_else(|| {
                sink.report(Diagnostic::NotABoolean {
                    path: doc.source_path.clone(),
                    key: "pages_exclude".to_string(),
                });
                false
            }),
        };

        Self {
            content: render_html(&doc.body),
            title: text("title"),
            desc: text("desc"),
            image: text("image"),
            permalink,
            template,
            groups,
            pages_exclude,
            source_path: doc.source_path.clone(),
        }
    }
}

/// Permalink of a document that does not declare one.
///
/// `blog/post1.md` becomes `/blog/post1/`, with forward slashes on every
/// platform.
pub fn derive_permalink(source_path: &Path) -> String {
    let stem = source_path.with_extension("");
    let parts: Vec<_> = stem
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect();

    format!("/{}/", parts.join("/"))
}

/// Name of the directory holding a document, or [`ROOT_SECTION`].
pub fn section_name(source_path: &Path) -> String {
    source_path
        .parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| ROOT_SECTION.to_string())
}

/// Every valid page of a build, in load order.
///
/// Built once and only read afterwards.
#[derive(Debug, Default)]
pub struct PageIndex {
    pages: Vec<PageRecord>,
    rejected: usize,
}

impl PageIndex {
    /// Validate and index loaded documents.
    ///
    /// Documents that fail to load or miss required keys are reported and
    /// left out.
    pub fn build<I>(documents: I, default_template: &str, sink: &mut dyn DiagnosticSink) -> Self
    where
        I: IntoIterator<Item = Result<Document, LoadError>>,
    {
        let mut index = Self::default();

        for document in documents {
            let doc = match document {
                Ok(doc) => doc,
                Err(e) => {
                    sink.report(Diagnostic::Unreadable {
                        path: e.path().to_path_buf(),
                        message: e.to_string(),
                    });
                    index.rejected += 1;
                    continue;
                }
            };

            if !validate_metadata(&doc.metadata, &doc.source_path, sink) {
                index.rejected += 1;
                continue;
            }

            index
                .pages
                .push(PageRecord::from_document(&doc, default_template, sink));
        }

        index
    }

    pub fn from_pages(pages: Vec<PageRecord>) -> Self {
        Self { pages, rejected: 0 }
    }

    pub fn pages(&self) -> &[PageRecord] {
        &self.pages
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PageRecord> {
        self.pages.iter()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Number of documents left out of the index.
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    /// Pages that belong in the search index.
    pub fn searchable(&self) -> impl Iterator<Item = &PageRecord> {
        self.pages.iter().filter(|page| !page.pages_exclude)
    }
}

impl Serialize for PageIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.pages.serialize(serializer)
    }
}

impl<'a> IntoIterator for &'a PageIndex {
    type Item = &'a PageRecord;
    type IntoIter = std::slice::Iter<'a, PageRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Collector;
    use pretty_assertions::assert_eq;
    use tissue_md::Metadata;

    fn document(path: &str, extra: &[(&str, MetaValue)]) -> Document {
        let mut metadata: Metadata = [
            ("title", "Post One"),
            ("desc", "First"),
            ("image", "/static/one.png"),
            ("template", "post.html"),
        ]
        .into_iter()
        .collect();
        for (key, value) in extra {
            metadata.insert(*key, value.clone());
        }

        Document {
            metadata,
            body: "Hello *world*".to_string(),
            source_path: PathBuf::from(path),
        }
    }

    #[test]
    fn derives_permalink_from_path() {
        assert_eq!(derive_permalink(Path::new("blog/post1.md")), "/blog/post1/");
        assert_eq!(derive_permalink(Path::new("about.md")), "/about/");
        assert_eq!(derive_permalink(Path::new("a/b/c.d.md")), "/a/b/c.d/");
    }

    #[test]
    fn section_is_parent_directory_or_root() {
        assert_eq!(section_name(Path::new("blog/post1.md")), "blog");
        assert_eq!(section_name(Path::new("a/b/c.md")), "b");
        assert_eq!(section_name(Path::new("about.md")), "root");
    }

    #[test]
    fn builds_record_for_nested_document() {
        let mut sink = Collector::new();
        let doc = document("blog/post1.md", &[("groups", MetaValue::from("featured"))]);

        let page = PageRecord::from_document(&doc, "template_default.html", &mut sink);

        assert_eq!(page.permalink, "/blog/post1/");
        assert_eq!(page.groups, vec!["blog".to_string(), "featured".to_string()]);
        assert_eq!(page.template, "post.html");
        assert_eq!(page.title, "Post One");
        assert!(!page.pages_exclude);
        assert!(page.content.contains("<em>world</em>"));
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn declared_permalink_wins() {
        let mut sink = Collector::new();
        let doc = document("blog/post1.md", &[("permalink", MetaValue::from("/feed.xml"))]);

        let page = PageRecord::from_document(&doc, "template_default.html", &mut sink);

        assert_eq!(page.permalink, "/feed.xml");
    }

    #[test]
    fn empty_permalink_falls_back_to_derived() {
        let mut sink = Collector::new();
        let doc = document("notes.md", &[("permalink", MetaValue::Null)]);

        let page = PageRecord::from_document(&doc, "template_default.html", &mut sink);

        assert_eq!(page.permalink, "/notes/");
    }

    #[test]
    fn unrooted_permalink_is_kept_with_warning() {
        let mut sink = Collector::new();
        let doc = document("notes.md", &[("permalink", MetaValue::from("notes/"))]);

        let page = PageRecord::from_document(&doc, "template_default.html", &mut sink);

        assert_eq!(page.permalink, "notes/");
        assert_eq!(sink.tagged("unrooted-permalink").count(), 1);
    }

    #[test]
    fn malformed_groups_are_dropped() {
        let mut sink = Collector::new();
        let doc = document("x.md", &[("groups", MetaValue::Number("3".to_string()))]);

        let page = PageRecord::from_document(&doc, "template_default.html", &mut sink);

        assert_eq!(page.groups, vec!["root".to_string()]);
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn non_boolean_exclusion_reads_as_false() {
        let mut sink = Collector::new();
        let doc = document("x.md", &[("pages_exclude", MetaValue::from("yes"))]);

        let page = PageRecord::from_document(&doc, "template_default.html", &mut sink);

        assert!(!page.pages_exclude);
        assert_eq!(sink.tagged("not-a-boolean").count(), 1);
    }

    #[test]
    fn empty_template_uses_default() {
        let mut sink = Collector::new();
        let doc = document("x.md", &[("template", MetaValue::from(""))]);

        let page = PageRecord::from_document(&doc, "template_default.html", &mut sink);

        assert_eq!(page.template, "template_default.html");
    }

    #[test]
    fn index_skips_invalid_documents() {
        let mut sink = Collector::new();
        let mut incomplete = document("blog/broken.md", &[]);
        incomplete.metadata = [("title", "Broken")].into_iter().collect();

        let index = PageIndex::build(
            vec![
                Ok(document("blog/post1.md", &[])),
                Ok(incomplete),
                Ok(document("about.md", &[("pages_exclude", MetaValue::from(true))])),
            ],
            "template_default.html",
            &mut sink,
        );

        assert_eq!(index.len(), 2);
        assert_eq!(index.rejected(), 1);
        assert_eq!(index.searchable().count(), 1);
        assert_eq!(index.pages()[0].groups, vec!["blog".to_string()]);
        assert_eq!(sink.tagged("missing-keys").count(), 1);
    }

    #[test]
    fn serializes_with_stable_keys() {
        let mut sink = Collector::new();
        let page = PageRecord::from_document(&document("a.md", &[]), "t.html", &mut sink);

        let json = serde_json::to_value(&page).unwrap();
        let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort();

        assert_eq!(
            keys,
            vec![
                "content",
                "desc",
                "groups",
                "image",
                "pages_exclude",
                "permalink",
                "template",
                "title",
            ]
        );
    }
}
