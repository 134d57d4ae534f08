// ```yaml 區塊為模組的 metadata，其餘為內容

use serde_yaml::Value;
use std::collections::BTreeMap;

const OPENING_FENCE: &str = "```yaml";
const CLOSING_FENCE: &str = "```";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FenceState {
    Body,
    /// `opened_at` is the line index of the opening fence, `metadata_mark`
    /// the metadata length before this block started.
    Metadata { opened_at: usize, metadata_mark: usize },
}

/// Raw result of the line scan, before the metadata is parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitDocument {
    pub metadata: String,
    pub body: String,
}

/// Partitions `content` into fenced metadata lines and body lines.
///
/// An opening fence with no matching close is not metadata: the fence line
/// and everything after it stay in the body.
pub fn split_frontmatter(content: &str) -> SplitDocument {
    let lines: Vec<&str> = content.split('\n').collect();
    let mut metadata: Vec<&str> = Vec::new();
    let mut body: Vec<&str> = Vec::new();
    let mut state = FenceState::Body;

    for (index, &line) in lines.iter().enumerate() {
        let marker = line.trim();
        match state {
            FenceState::Body if marker == OPENING_FENCE => {
                state = FenceState::Metadata {
                    opened_at: index,
                    metadata_mark: metadata.len(),
                };
            }
            FenceState::Body => body.push(line),
            FenceState::Metadata { .. } if marker == CLOSING_FENCE => {
                state = FenceState::Body;
            }
            FenceState::Metadata { .. } => metadata.push(line),
        }
    }

    if let FenceState::Metadata {
        opened_at,
        metadata_mark,
    } = state
    {
        tracing::warn!(
            "Unterminated ```yaml block at line {}, treating it as body text",
            opened_at + 1
        );
        metadata.truncate(metadata_mark);
        body.extend_from_slice(&lines[opened_at..]);
    }

    SplitDocument {
        metadata: metadata.join("\n"),
        body: body.join("\n"),
    }
}

/// Flat string-keyed metadata mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontmatter {
    values: BTreeMap<String, Value>,
}

impl Frontmatter {
    /// Scalar value rendered as text. Empty strings count as absent.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.values.get(key)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn integer(&self, key: &str) -> Option<i64> {
        match self.values.get(key)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Parses the metadata buffer. Never fails: anything that is not a YAML
/// mapping yields an empty `Frontmatter`.
pub fn parse_frontmatter(metadata: &str) -> Frontmatter {
    if metadata.trim().is_empty() {
        return Frontmatter::default();
    }

    let mapping = match serde_yaml::from_str::<Value>(metadata) {
        Ok(Value::Mapping(mapping)) => mapping,
        Ok(Value::Null) => return Frontmatter::default(),
        Ok(_) => {
            tracing::debug!("Frontmatter is not a mapping, ignoring it");
            return Frontmatter::default();
        }
        Err(e) => {
            tracing::warn!("Failed to parse frontmatter, using defaults: {}", e);
            return Frontmatter::default();
        }
    };

    let values = mapping
        .into_iter()
        .filter_map(|(key, value)| match key {
            Value::String(key) => Some((key, value)),
            _ => None,
        })
        .collect();

    Frontmatter { values }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_extracts_fenced_metadata() {
        let content = "```yaml\ntitle: Intro\norder: 1\n```\n# Heading\ntext";
        let split = split_frontmatter(content);

        assert_eq!(split.metadata, "title: Intro\norder: 1");
        assert_eq!(split.body, "# Heading\ntext");
    }

    #[test]
    fn test_split_without_fence_keeps_whole_body() {
        let content = "# Heading\n\n### Lecture 1: A\n";
        let split = split_frontmatter(content);

        assert!(split.metadata.is_empty());
        assert_eq!(split.body, content);
    }

    #[test]
    fn test_split_keeps_text_before_fence_in_order() {
        let content = "preface\n  ```yaml  \ntitle: X\n```\nafter";
        let split = split_frontmatter(content);

        assert_eq!(split.metadata, "title: X");
        assert_eq!(split.body, "preface\nafter");
    }

    #[test]
    fn test_plain_code_fence_outside_metadata_is_body() {
        let content = "```\nlet x = 1;\n```";
        let split = split_frontmatter(content);

        assert!(split.metadata.is_empty());
        assert_eq!(split.body, content);
    }

    #[test]
    fn test_second_yaml_block_appends_metadata() {
        let content = "```yaml\ntitle: A\n```\nbody\n```yaml\norder: 3\n```";
        let split = split_frontmatter(content);

        assert_eq!(split.metadata, "title: A\norder: 3");
        assert_eq!(split.body, "body");
    }

    #[test]
    fn test_unterminated_fence_returns_lines_to_body() {
        let content = "```yaml\ntitle: A\n```\nbody\n```yaml\norder: 3\n### Lecture 1: Lost?";
        let split = split_frontmatter(content);

        assert_eq!(split.metadata, "title: A");
        assert_eq!(split.body, "body\n```yaml\norder: 3\n### Lecture 1: Lost?");
    }

    #[test]
    fn test_crlf_fences_are_recognized() {
        let content = "```yaml\r\ntitle: A\r\n```\r\nbody";
        let split = split_frontmatter(content);

        assert_eq!(split.metadata, "title: A\r");
        assert_eq!(split.body, "body");
        assert_eq!(parse_frontmatter(&split.metadata).text("title").as_deref(), Some("A"));
    }

    #[test]
    fn test_parse_frontmatter_reads_scalars() {
        let fm = parse_frontmatter("title: \"B\"\ndescription: Basics\norder: 2");

        assert_eq!(fm.len(), 3);
        assert_eq!(fm.text("title").as_deref(), Some("B"));
        assert_eq!(fm.text("description").as_deref(), Some("Basics"));
        assert_eq!(fm.integer("order"), Some(2));
    }

    #[test]
    fn test_parse_frontmatter_fails_soft() {
        assert!(parse_frontmatter("").is_empty());
        assert!(parse_frontmatter("title: [unclosed").is_empty());
        assert!(parse_frontmatter("- just\n- a list").is_empty());
        assert!(parse_frontmatter("~").is_empty());
    }

    #[test]
    fn test_integer_accepts_numeric_strings_only() {
        let fm = parse_frontmatter("a: \" 7 \"\nb: seven\nc: 1.5");

        assert_eq!(fm.integer("a"), Some(7));
        assert_eq!(fm.integer("b"), None);
        assert_eq!(fm.integer("c"), None);
        assert_eq!(fm.integer("missing"), None);
    }

    #[test]
    fn test_text_treats_empty_string_as_absent() {
        let fm = parse_frontmatter("title: \"\"\nnum: 12\nflag: true\nlist: [1]");

        assert_eq!(fm.text("title"), None);
        assert_eq!(fm.text("num").as_deref(), Some("12"));
        assert_eq!(fm.text("flag").as_deref(), Some("true"));
        assert_eq!(fm.text("list"), None);
    }
}
