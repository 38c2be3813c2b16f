//! XML codec for the two feature-list dialects
//!
//! Decoding streams the document with `quick_xml` and never fails on the
//! degrading entry points: a malformed file is logged and read as an empty
//! list. Encoding is deterministic apart from the trailing generated-by
//! comment, which decoders skip.

mod app;
mod oplus;

pub use app::{decode_app_features, encode_app_features, try_decode_app_features};
pub use oplus::{decode_oplus_features, encode_oplus_features, try_decode_oplus_features};

use crate::error::{Error, Result};
use chrono::Utc;
use quick_xml::escape::escape;
use quick_xml::events::BytesStart;
use std::collections::HashSet;

const XML_HEADER: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;
const INDENT: &str = "    ";

/// Provenance written as the trailing comment of generated files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedBy {
    /// Tool name shown in the comment
    pub tool: String,
    /// Generation time, milliseconds since the Unix epoch
    pub at_millis: i64,
}

impl GeneratedBy {
    /// Stamp with the current time
    pub fn now(tool: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            at_millis: Utc::now().timestamp_millis(),
        }
    }

    /// Stamp with a fixed time
    pub fn at(tool: impl Into<String>, at_millis: i64) -> Self {
        Self {
            tool: tool.into(),
            at_millis,
        }
    }

    fn comment(&self) -> String {
        // "--" is not allowed inside an XML comment
        let tool = self.tool.replace("--", "-");
        format!("<!-- Generated by {tool} at {} -->", self.at_millis)
    }
}

fn xml_error(err: impl std::fmt::Display) -> Error {
    Error::Xml(err.to_string())
}

/// Look up and unescape one attribute of a start tag
fn attribute(start: &BytesStart<'_>, key: &str) -> Result<Option<String>> {
    for attr in start.attributes() {
        let attr = attr.map_err(xml_error)?;
        if attr.key.as_ref() == key.as_bytes() {
            let value = attr.unescape_value().map_err(xml_error)?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// Render ` key="value"` with the value escaped
fn push_attribute(out: &mut String, key: &str, value: &str) {
    out.push(' ');
    out.push_str(key);
    out.push_str("=\"");
    out.push_str(&escape(value));
    out.push('"');
}

/// Keeps the first occurrence of each name
#[derive(Debug, Default)]
struct NameSet(HashSet<String>);

impl NameSet {
    fn first_sighting(&mut self, name: &str) -> bool {
        if self.0.contains(name) {
            tracing::debug!(name, "dropping duplicate feature declaration");
            false
        } else {
            self.0.insert(name.to_string());
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_format() {
        let stamp = GeneratedBy::at("feature-overlay", 1_700_000_000_000);
        assert_eq!(
            stamp.comment(),
            "<!-- Generated by feature-overlay at 1700000000000 -->"
        );
    }

    #[test]
    fn test_comment_strips_double_dash() {
        let stamp = GeneratedBy::at("a--b", 1);
        assert_eq!(stamp.comment(), "<!-- Generated by a-b at 1 -->");
    }

    #[test]
    fn test_push_attribute_escapes_specials() {
        let mut out = String::new();
        push_attribute(&mut out, "args", r#"a&b"<c>"#);
        assert_eq!(out, r#" args="a&amp;b&quot;&lt;c&gt;""#);
    }
}
