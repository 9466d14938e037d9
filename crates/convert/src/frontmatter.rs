//! YAML frontmatter framing shared by every artifact adapter.
//!
//! A document that starts with a line consisting solely of `---` carries a
//! YAML block up to the next `---` line; everything after the closing
//! delimiter is the body. At most one blank line directly after the closing
//! delimiter is treated as framing and stripped. Documents without an opening
//! delimiter, or with an opening delimiter that is never closed, are all body.
//!
//! ```
//! use skillport_convert::frontmatter::{parse_frontmatter, render_frontmatter};
//! use std::collections::BTreeMap;
//!
//! let parsed = parse_frontmatter::<BTreeMap<String, String>>(
//!     "---\nname: demo\n---\n\n# Demo\n",
//! )
//! .unwrap();
//! assert_eq!(parsed.front_matter["name"], "demo");
//! assert_eq!(parsed.body, "# Demo\n");
//!
//! let text = render_frontmatter(&parsed.front_matter, &parsed.body).unwrap();
//! assert_eq!(text, "---\nname: demo\n---\n\n# Demo\n");
//! ```

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

const DELIMITER: &str = "---";

/// Result of splitting and parsing a document.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    /// Parsed front matter, or `T::default()` when the document has none.
    pub front_matter: T,
    /// Everything after the closing delimiter, verbatim.
    pub body: String,
    /// Whether a delimited block was present.
    pub has_front_matter: bool,
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end_matches(['\r', '\n']) == DELIMITER
}

/// Returns true when the first line of `content` is exactly `---`.
pub fn has_frontmatter(content: &str) -> bool {
    let first = content.split_inclusive('\n').next().unwrap_or("");
    is_delimiter(first)
}

/// Splits `content` into `(yaml, body)` when it is framed with `---` lines.
pub fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let first = content.split_inclusive('\n').next()?;
    if !is_delimiter(first) || !first.ends_with('\n') {
        return None;
    }

    let rest = &content[first.len()..];
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if is_delimiter(line) {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((yaml, strip_one_blank_line(body)));
        }
        offset += line.len();
    }

    None
}

fn strip_one_blank_line(body: &str) -> &str {
    body.strip_prefix("\r\n")
        .or_else(|| body.strip_prefix('\n'))
        .unwrap_or(body)
}

/// Parses the front matter of `content` into `T`.
///
/// An empty block yields `T::default()`. Malformed YAML is an error.
pub fn parse_frontmatter<T>(content: &str) -> Result<Parsed<T>>
where
    T: DeserializeOwned + Default,
{
    let Some((yaml, body)) = split_frontmatter(content) else {
        return Ok(Parsed {
            front_matter: T::default(),
            body: content.to_string(),
            has_front_matter: false,
        });
    };

    let front_matter = if yaml.trim().is_empty() {
        T::default()
    } else {
        serde_yaml::from_str(yaml).map_err(Error::frontmatter)?
    };

    Ok(Parsed {
        front_matter,
        body: body.to_string(),
        has_front_matter: true,
    })
}

/// Parses the front matter into a generic YAML mapping.
pub fn parse_mapping(content: &str) -> Result<Parsed<serde_yaml::Mapping>> {
    parse_frontmatter(content)
}

fn to_yaml<T: Serialize>(front_matter: &T) -> Result<Option<String>> {
    let value = serde_yaml::to_value(front_matter)?;
    let empty = match &value {
        serde_yaml::Value::Null => true,
        serde_yaml::Value::Mapping(map) => map.is_empty(),
        _ => false,
    };
    if empty {
        return Ok(None);
    }
    Ok(Some(serde_yaml::to_string(&value)?))
}

/// Renders `front_matter` between `---` lines, then a blank line and `body`.
///
/// The blank line and body are omitted when the body is empty.
pub fn render_frontmatter<T: Serialize>(front_matter: &T, body: &str) -> Result<String> {
    let yaml = to_yaml(front_matter)?.unwrap_or_default();
    let mut out = String::with_capacity(yaml.len() + body.len() + 10);
    out.push_str(DELIMITER);
    out.push('\n');
    out.push_str(&yaml);
    if !yaml.is_empty() && !yaml.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(DELIMITER);
    out.push('\n');
    if !body.is_empty() {
        out.push('\n');
        out.push_str(body);
    }
    Ok(out)
}

/// Like [`render_frontmatter`], but emits the bare body when there is no
/// metadata to write.
pub fn render_optional_frontmatter<T: Serialize>(front_matter: &T, body: &str) -> Result<String> {
    if to_yaml(front_matter)?.is_none() {
        return Ok(body.to_string());
    }
    render_frontmatter(front_matter, body)
}

/// Lenient deserializers for front-matter fields written by hand.
pub(crate) mod de {
    use serde::de::{Deserializer, Error as _};
    use serde::Deserialize;
    use serde_yaml::Value;

    fn scalar_to_string<E: serde::de::Error>(value: Value) -> Result<Option<String>, E> {
        match value {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s)),
            Value::Number(n) => Ok(Some(n.to_string())),
            Value::Bool(b) => Ok(Some(b.to_string())),
            other => Err(E::custom(format!("expected a scalar, found {other:?}"))),
        }
    }

    /// A string field that tolerates numbers and booleans (`version: 1.0`).
    pub fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        scalar_to_string(Value::deserialize(d)?)
    }

    /// Like [`opt_string`] with `null` mapped to an empty string.
    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(opt_string(d)?.unwrap_or_default())
    }

    /// A list that may also be written as a comma-separated string.
    pub fn string_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        match Value::deserialize(d)? {
            Value::Null => Ok(Vec::new()),
            Value::Sequence(items) => items
                .into_iter()
                .filter_map(|item| scalar_to_string::<D::Error>(item).transpose())
                .collect(),
            Value::String(s) => Ok(split_list(&s)),
            other => Err(D::Error::custom(format!(
                "expected a list or string, found {other:?}"
            ))),
        }
    }

    /// A comma-joined glob string that may also be written as a list.
    pub fn glob_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let globs = string_list(d)?;
        if globs.is_empty() {
            Ok(None)
        } else {
            Ok(Some(globs.join(",")))
        }
    }

    pub fn split_list(s: &str) -> Vec<String> {
        s.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
    struct Sample {
        #[serde(default, skip_serializing_if = "String::is_empty")]
        name: String,
        #[serde(
            default,
            deserialize_with = "de::opt_string",
            skip_serializing_if = "Option::is_none"
        )]
        version: Option<String>,
        #[serde(
            default,
            deserialize_with = "de::string_list",
            skip_serializing_if = "Vec::is_empty"
        )]
        tools: Vec<String>,
    }

    #[test]
    fn test_has_frontmatter() {
        assert!(has_frontmatter("---\nname: test\n---\n# Content"));
        assert!(has_frontmatter("---\r\nname: test\r\n---\r\n"));
        assert!(!has_frontmatter("  ---\nname: test\n---\n"));
        assert!(!has_frontmatter("# No frontmatter"));
        assert!(!has_frontmatter("----\nname: x\n----\n"));
    }

    #[test]
    fn test_split_frontmatter() {
        let (yaml, body) = split_frontmatter("---\nname: test\n---\n# Heading\nBody").unwrap();
        assert_eq!(yaml, "name: test\n");
        assert_eq!(body, "# Heading\nBody");
    }

    #[test]
    fn test_split_strips_only_one_blank_line() {
        let (_, body) = split_frontmatter("---\nname: a\n---\n\n\nBody\n").unwrap();
        assert_eq!(body, "\nBody\n");
    }

    #[test]
    fn test_split_crlf() {
        let (yaml, body) = split_frontmatter("---\r\nname: a\r\n---\r\n\r\nBody").unwrap();
        assert_eq!(yaml, "name: a\r\n");
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_split_unclosed_is_all_body() {
        assert!(split_frontmatter("---\nname: a\nno closing\n").is_none());
        let parsed = parse_frontmatter::<Sample>("---\nname: a\n").unwrap();
        assert!(!parsed.has_front_matter);
        assert_eq!(parsed.body, "---\nname: a\n");
    }

    #[test]
    fn test_horizontal_rule_in_body_is_not_a_delimiter() {
        let content = "# Title\n\n---\n\nMore";
        let parsed = parse_frontmatter::<Sample>(content).unwrap();
        assert!(!parsed.has_front_matter);
        assert_eq!(parsed.body, content);
    }

    #[test]
    fn test_parse_frontmatter() {
        let parsed =
            parse_frontmatter::<Sample>("---\nname: my-skill\nversion: 1.0\n---\n# My Skill")
                .unwrap();
        assert!(parsed.has_front_matter);
        assert_eq!(parsed.front_matter.name, "my-skill");
        assert_eq!(parsed.front_matter.version.as_deref(), Some("1.0"));
        assert_eq!(parsed.body, "# My Skill");
    }

    #[test]
    fn test_parse_empty_block_is_default() {
        let parsed = parse_frontmatter::<Sample>("---\n---\nBody").unwrap();
        assert!(parsed.has_front_matter);
        assert_eq!(parsed.front_matter, Sample::default());
        assert_eq!(parsed.body, "Body");
    }

    #[test]
    fn test_parse_malformed_yaml_is_error() {
        let err = parse_frontmatter::<Sample>("---\nname: [unclosed\n---\nBody").unwrap_err();
        assert!(matches!(err, Error::Frontmatter { .. }));
    }

    #[test]
    fn test_parse_mapping() {
        let parsed = parse_mapping("---\nname: x\nextra: 3\n---\n").unwrap();
        assert_eq!(parsed.front_matter.len(), 2);
        assert_eq!(parsed.body, "");
    }

    #[test]
    fn test_string_list_accepts_comma_string() {
        let parsed =
            parse_frontmatter::<Sample>("---\ntools: Read, Grep ,Bash\n---\n").unwrap();
        assert_eq!(parsed.front_matter.tools, vec!["Read", "Grep", "Bash"]);
    }

    #[test]
    fn test_render_frontmatter() {
        let sample = Sample {
            name: "demo".into(),
            version: None,
            tools: vec!["Read".into()],
        };
        let text = render_frontmatter(&sample, "# Body\n").unwrap();
        assert_eq!(text, "---\nname: demo\ntools:\n- Read\n---\n\n# Body\n");
    }

    #[test]
    fn test_render_omits_empty_body() {
        let sample = Sample {
            name: "demo".into(),
            ..Default::default()
        };
        assert_eq!(
            render_frontmatter(&sample, "").unwrap(),
            "---\nname: demo\n---\n"
        );
    }

    #[test]
    fn test_render_optional_without_metadata_is_plain_body() {
        let text = render_optional_frontmatter(&Sample::default(), "Just text\n").unwrap();
        assert_eq!(text, "Just text\n");
    }

    #[test]
    fn test_render_then_parse_keeps_body() {
        let sample = Sample {
            name: "demo".into(),
            version: Some("2.1.0".into()),
            tools: Vec::new(),
        };
        let body = "\nleading blank line kept\n\ntrailing\n";
        let text = render_frontmatter(&sample, body).unwrap();
        let parsed = parse_frontmatter::<Sample>(&text).unwrap();
        assert_eq!(parsed.front_matter, sample);
        assert_eq!(parsed.body, body);
    }
}
