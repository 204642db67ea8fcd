//! Frontmatter extraction and parsing.

use serde_yaml::Value;

use crate::metadata::{MetaValue, Metadata};

const FENCE: &str = "---";

/// Extract frontmatter from a markdown document.
///
/// Returns the parsed metadata and the remaining content after the
/// frontmatter block. A document whose first line is not `---` has empty
/// metadata and is returned whole. The block closes at the next line that
/// is exactly `---`, trailing whitespace aside.
pub fn extract_frontmatter(source: &str) -> Result<(Metadata, &str), FrontmatterError> {
    let trimmed = source.trim_start();

    let open_line = trimmed.split_inclusive('\n').next().unwrap_or_default();
    if !is_fence(open_line) {
        return Ok((Metadata::new(), source));
    }

    let after_open = &trimmed[open_line.len()..];
    let mut offset = 0;

    for line in after_open.split_inclusive('\n') {
        if is_fence(line) {
            let yaml_content = after_open[..offset].trim();
            let remaining = &after_open[offset + line.len()..];
            return Ok((parse_yaml(yaml_content)?, remaining.trim_start()));
        }
        offset += line.len();
    }

    Err(FrontmatterError::Unclosed)
}

fn is_fence(line: &str) -> bool {
    line.trim_end() == FENCE
}

fn parse_yaml(yaml: &str) -> Result<Metadata, FrontmatterError> {
    if yaml.is_empty() {
        return Ok(Metadata::new());
    }

    let value: Value =
        serde_yaml::from_str(yaml).map_err(|e| FrontmatterError::InvalidYaml(e.to_string()))?;

    let mapping = match value {
        Value::Mapping(mapping) => mapping,
        Value::Null => return Ok(Metadata::new()),
        _ => return Err(FrontmatterError::NotAMapping),
    };

    let mut metadata = Metadata::new();
    for (key, value) in mapping {
        let key = match key {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            other => return Err(FrontmatterError::InvalidKey(format!("{:?}", other))),
        };
        metadata.insert(key, MetaValue::from(value));
    }

    Ok(metadata)
}

/// Errors that can occur when parsing frontmatter.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("Unclosed frontmatter block - missing closing ---")]
    Unclosed,

    #[error("Invalid YAML in frontmatter: {0}")]
    InvalidYaml(String),

    #[error("Frontmatter must be a mapping of keys to values")]
    NotAMapping,

    #[error("Frontmatter key must be a scalar, found {0}")]
    InvalidKey(String),
}
