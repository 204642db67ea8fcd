//! Permalink collision detection.
//!
//! Pages are compared by the file they would be written to, not by the
//! permalink text: `/about`, `/about/` and `/about/index.html` all land on
//! `about/index.html`.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::config::{SEARCH_INDEX_FILE, SITEMAP_FILE, STATIC_OUTPUT_DIR};
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::page::PageIndex;
use crate::render::output_path;

/// Two pages writing the same output file. Positions index into the page
/// index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    /// Permalink of the later page
    pub permalink: String,
    /// Output file both pages map to, relative to the output root
    pub path: PathBuf,
    /// The page that owns the file
    pub original: usize,
    /// A later page claiming it again
    pub duplicate: usize,
}

/// Outcome of auditing a page index.
///
/// Holds the output file of every page. The first page for each file owns
/// it; every later claimant is shadowed, as is any page aimed at a file the
/// build writes itself.
#[derive(Debug, Default)]
pub struct PermalinkAudit {
    targets: Vec<Option<PathBuf>>,
    collisions: Vec<Collision>,
    reserved: Vec<usize>,
    shadowed: HashSet<usize>,
}

impl PermalinkAudit {
    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    /// Positions of pages whose permalink targets a generated artifact or
    /// the static asset tree.
    pub fn reserved(&self) -> &[usize] {
        &self.reserved
    }

    /// Positions of pages whose permalink escapes the output directory.
    pub fn unsafe_pages(&self) -> impl Iterator<Item = usize> + '_ {
        self.targets
            .iter()
            .enumerate()
            .filter(|(_, target)| target.is_none())
            .map(|(position, _)| position)
    }

    pub fn is_clean(&self) -> bool {
        self.collisions.is_empty() && self.reserved.is_empty()
    }

    /// Output file of the page at `position`, relative to the output root.
    pub fn target(&self, position: usize) -> Option<&Path> {
        self.targets.get(position)?.as_deref()
    }

    /// Whether the page at `position` must not be written.
    pub fn is_shadowed(&self, position: usize) -> bool {
        self.shadowed.contains(&position)
    }
}

/// Whether an output file belongs to the build itself rather than a page.
pub fn is_reserved(path: &Path) -> bool {
    path == Path::new(SEARCH_INDEX_FILE)
        || path == Path::new(SITEMAP_FILE)
        || path.starts_with(STATIC_OUTPUT_DIR)
}

/// Map every page to its output file and find the pages sharing one.
///
/// Reports one diagnostic per later claimant and per page aimed at a
/// reserved file. Never changes the index.
pub fn audit_permalinks(index: &PageIndex, sink: &mut dyn DiagnosticSink) -> PermalinkAudit {
    let pages = index.pages();
    let mut audit = PermalinkAudit {
        targets: pages.iter().map(|page| output_path(&page.permalink)).collect(),
        ..Default::default()
    };
    let mut owners: HashMap<&Path, usize> = HashMap::new();

    for (position, page) in pages.iter().enumerate() {
        let Some(path) = audit.targets[position].as_deref() else {
            continue;
        };

        if is_reserved(path) {
            sink.report(Diagnostic::ReservedPermalink {
                permalink: page.permalink.clone(),
                title: page.title.clone(),
                path: path.to_path_buf(),
            });
            audit.reserved.push(position);
            audit.shadowed.insert(position);
            continue;
        }

        let Some(&original) = owners.get(path) else {
            owners.insert(path, position);
            continue;
        };

        sink.report(Diagnostic::DuplicatePermalink {
            permalink: page.permalink.clone(),
            path: path.to_path_buf(),
            original: pages[original].title.clone(),
            duplicate: page.title.clone(),
        });

        audit.collisions.push(Collision {
            permalink: page.permalink.clone(),
            path: path.to_path_buf(),
            original,
            duplicate: position,
        });
        audit.shadowed.insert(position);
    }

    audit
}
