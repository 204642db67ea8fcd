//! Template engine for rendering pages.

use std::path::Path;

use minijinja::{AutoEscape, Environment, Value};
use serde::Serialize;

use crate::page::{PageIndex, PageRecord};

/// Context handed to a page template: every page field at the top level plus
/// the whole index as `all_pages`.
#[derive(Debug, Serialize)]
struct PageContext<'a> {
    #[serde(flatten)]
    page: &'a PageRecord,
    all_pages: &'a PageIndex,
}

/// Template engine using minijinja.
///
/// Templates are looked up by path relative to the template root, so
/// `{% extends %}` and `{% include %}` resolve the same way page templates do.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create an engine loading templates from `templates_dir`.
    pub fn new(templates_dir: &Path) -> Self {
        let mut env = Environment::new();
        env.set_loader(minijinja::path_loader(templates_dir));

        // Page content and partials are already HTML.
        env.set_auto_escape_callback(|_| AutoEscape::None);

        env.add_filter("in_group", in_group);

        Self { env }
    }

    /// Render a page with its named template.
    pub fn render_page(
        &self,
        page: &PageRecord,
        all_pages: &PageIndex,
    ) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(&page.template)?;

        tmpl.render(PageContext { page, all_pages })
    }
}

/// Keep the pages listing `group` in their `groups`.
///
/// `{% for p in all_pages | in_group("blog") %}`
fn in_group(pages: Vec<Value>, group: &str) -> Vec<Value> {
    pages
        .into_iter()
        .filter(|page| {
            page.get_attr("groups")
                .ok()
                .and_then(|groups| groups.try_iter().ok())
                .is_some_and(|mut groups| groups.any(|g| g.as_str() == Some(group)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn page(title: &str, permalink: &str, template: &str) -> PageRecord {
        PageRecord {
            content: "<p>Hello world</p>".to_string(),
            title: title.to_string(),
            desc: "A page".to_string(),
            image: "/static/a.png".to_string(),
            permalink: permalink.to_string(),
            template: template.to_string(),
            groups: vec!["blog".to_string(), "featured".to_string()],
            pages_exclude: false,
            source_path: Default::default(),
        }
    }

    #[test]
    fn renders_page_fields_unescaped() {
        let temp = tempdir().unwrap();
        fs::write(
            temp.path().join("page.html"),
            "<title>{{ title }}</title>{{ content }}<p>{{ groups | join(',') }}</p>",
        )
        .unwrap();

        let engine = TemplateEngine::new(temp.path());
        let index = PageIndex::from_pages(vec![page("Button", "/button/", "page.html")]);

        let html = engine.render_page(&index.pages()[0], &index).unwrap();

        assert!(html.contains("<title>Button</title>"));
        assert!(html.contains("<p>Hello world</p>"));
        assert!(html.contains("<p>blog,featured</p>"));
    }

    #[test]
    fn exposes_all_pages() {
        let temp = tempdir().unwrap();
        fs::write(
            temp.path().join("list.html"),
            "{% for p in all_pages %}[{{ p.permalink }}]{% endfor %}",
        )
        .unwrap();

        let engine = TemplateEngine::new(temp.path());
        let index = PageIndex::from_pages(vec![
            page("One", "/one/", "list.html"),
            page("Two", "/two/", "list.html"),
        ]);

        let html = engine.render_page(&index.pages()[1], &index).unwrap();

        assert_eq!(html, "[/one/][/two/]");
    }

    #[test]
    fn lists_pages_of_one_group() {
        let temp = tempdir().unwrap();
        fs::write(
            temp.path().join("list.html"),
            "{% for p in all_pages | in_group('news') %}[{{ p.title }}]{% endfor %}",
        )
        .unwrap();

        let mut news = page("Launch", "/launch/", "list.html");
        news.groups = vec!["root".to_string(), "news".to_string()];
        let engine = TemplateEngine::new(temp.path());
        let index = PageIndex::from_pages(vec![
            page("One", "/one/", "list.html"),
            news,
            page("Two", "/two/", "list.html"),
        ]);

        let html = engine.render_page(&index.pages()[0], &index).unwrap();

        assert_eq!(html, "[Launch]");
    }

    #[test]
    fn supports_inheritance_and_includes() {
        let temp = tempdir().unwrap();
        fs::write(
            temp.path().join("base.html"),
            "<main>{% block body %}{% endblock %}</main>{% include 'partial_footer.html' %}",
        )
        .unwrap();
        fs::write(temp.path().join("partial_footer.html"), "<footer>bye</footer>").unwrap();
        fs::write(
            temp.path().join("post.html"),
            "{% extends 'base.html' %}{% block body %}{{ title }}{% endblock %}",
        )
        .unwrap();

        let engine = TemplateEngine::new(temp.path());
        let index = PageIndex::from_pages(vec![page("Post", "/post/", "post.html")]);

        let html = engine.render_page(&index.pages()[0], &index).unwrap();

        assert_eq!(html, "<main>Post</main><footer>bye</footer>");
    }

    #[test]
    fn unknown_template_is_an_error() {
        let temp = tempdir().unwrap();
        let engine = TemplateEngine::new(temp.path());
        let index = PageIndex::from_pages(vec![page("Lost", "/lost/", "missing.html")]);

        let err = engine.render_page(&index.pages()[0], &index).unwrap_err();

        assert_eq!(err.kind(), minijinja::ErrorKind::TemplateNotFound);
    }
}
