//! `<extend_features>` / `<app_feature>` dialect

use super::{GeneratedBy, INDENT, NameSet, XML_HEADER, attribute, push_attribute, xml_error};
use crate::error::{Error, Result};
use crate::types::{AppFeature, SubNode};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::warn;

const ROOT_TAG: &str = "extend_features";
const FEATURE_TAG: &[u8] = b"app_feature";

/// Sub-elements are the typed lists nested in a feature (`StringList`, ...)
fn is_sub_node_tag(tag: &[u8]) -> bool {
    std::str::from_utf8(tag).is_ok_and(SubNode::is_valid_kind)
}

/// Decode app features, reading malformed XML as an empty list
pub fn decode_app_features(xml: &str) -> Vec<AppFeature> {
    try_decode_app_features(xml).unwrap_or_else(|e| {
        warn!(error = %e, "malformed app feature XML, treating as empty");
        Vec::new()
    })
}

/// Decode app features, failing on malformed XML
///
/// Features with a missing or empty name are skipped, and only the first
/// declaration of each name is kept. Unknown elements are ignored.
pub fn try_decode_app_features(xml: &str) -> Result<Vec<AppFeature>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut features = Vec::new();
    let mut seen = NameSet::default();
    // Feature whose start tag is open; sub-nodes accumulate here until its end tag
    let mut open: Option<AppFeature> = None;
    let mut inside_feature = false;
    let mut depth = 0usize;

    let mut seal = |feature: AppFeature, features: &mut Vec<AppFeature>| {
        if seen.first_sighting(&feature.name) {
            features.push(feature);
        }
    };

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(start) => {
                depth += 1;
                let tag = start.name();
                if tag.as_ref() == FEATURE_TAG {
                    if let Some(previous) = open.take() {
                        seal(previous, &mut features);
                    }
                    open = begin_feature(&start)?;
                    inside_feature = true;
                } else if inside_feature && is_sub_node_tag(tag.as_ref()) {
                    push_sub_node(open.as_mut(), &start)?;
                }
            }
            Event::Empty(start) => {
                let tag = start.name();
                if tag.as_ref() == FEATURE_TAG {
                    if let Some(feature) = begin_feature(&start)? {
                        seal(feature, &mut features);
                    }
                } else if inside_feature && is_sub_node_tag(tag.as_ref()) {
                    push_sub_node(open.as_mut(), &start)?;
                }
            }
            Event::End(end) => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| Error::Xml("unbalanced end tag".to_string()))?;
                if end.name().as_ref() == FEATURE_TAG {
                    if let Some(feature) = open.take() {
                        seal(feature, &mut features);
                    }
                    inside_feature = false;
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth != 0 {
        return Err(Error::Xml("unclosed element at end of document".to_string()));
    }

    Ok(features)
}

fn begin_feature(start: &BytesStart<'_>) -> Result<Option<AppFeature>> {
    let Some(name) = attribute(start, "name")?.filter(|n| !n.is_empty()) else {
        return Ok(None);
    };
    Ok(Some(AppFeature {
        name,
        args: attribute(start, "args")?,
        sub_nodes: Vec::new(),
    }))
}

fn push_sub_node(feature: Option<&mut AppFeature>, start: &BytesStart<'_>) -> Result<()> {
    let Some(feature) = feature else {
        return Ok(());
    };
    let kind = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    feature.sub_nodes.push(SubNode {
        kind,
        name: attribute(start, "name")?,
        args: attribute(start, "args")?.unwrap_or_default(),
    });
    Ok(())
}

/// Encode app features as an `<extend_features>` document
///
/// Entries the decoder would not read back are left out: features with an
/// empty name, and sub-nodes whose type is not a valid `...List` tag.
pub fn encode_app_features(features: &[AppFeature], generated_by: &GeneratedBy) -> String {
    let mut out = String::new();
    out.push_str(XML_HEADER);
    out.push('\n');
    out.push_str(&format!("<{ROOT_TAG}>\n"));

    for feature in features {
        if feature.name.is_empty() {
            warn!("not writing app feature with empty name");
            continue;
        }
        let sub_nodes: Vec<&SubNode> = feature
            .sub_nodes
            .iter()
            .filter(|node| {
                let valid = SubNode::is_valid_kind(&node.kind);
                if !valid {
                    warn!(feature = %feature.name, kind = %node.kind, "not writing invalid sub-node");
                }
                valid
            })
            .collect();

        out.push_str(INDENT);
        out.push_str("<app_feature");
        push_attribute(&mut out, "name", &feature.name);
        if let Some(args) = &feature.args {
            push_attribute(&mut out, "args", args);
        }

        if sub_nodes.is_empty() {
            out.push_str("/>\n");
            continue;
        }

        out.push_str(">\n");
        for node in sub_nodes {
            out.push_str(INDENT);
            out.push_str(INDENT);
            out.push('<');
            out.push_str(&node.kind);
            if let Some(name) = &node.name {
                push_attribute(&mut out, "name", name);
            }
            push_attribute(&mut out, "args", &node.args);
            out.push_str("/>\n");
        }
        out.push_str(INDENT);
        out.push_str("</app_feature>\n");
    }

    out.push_str(&format!("</{ROOT_TAG}>\n"));
    out.push_str(&generated_by.comment());
    out.push('\n');
    out
}
