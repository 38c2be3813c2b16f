//! `<oplus-config>` dialect

use super::{GeneratedBy, INDENT, NameSet, XML_HEADER, attribute, push_attribute, xml_error};
use crate::error::{Error, Result};
use crate::types::OplusFeature;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::warn;

const ROOT_TAG: &str = "oplus-config";
const STANDARD_TAG: &str = "oplus-feature";
const UNAVAILABLE_TAG: &str = "unavailable-oplus-feature";

/// Decode oplus features, reading malformed XML as an empty list
pub fn decode_oplus_features(xml: &str) -> Vec<OplusFeature> {
    try_decode_oplus_features(xml).unwrap_or_else(|e| {
        warn!(error = %e, "malformed oplus feature XML, treating as empty");
        Vec::new()
    })
}

/// Decode oplus features, failing on malformed XML
///
/// Only direct children of the root element are classified. A name keeps
/// its first declaration, whichever variant that was.
pub fn try_decode_oplus_features(xml: &str) -> Result<Vec<OplusFeature>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut features = Vec::new();
    let mut seen = NameSet::default();
    let mut depth = 0usize;

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(start) => {
                if depth == 1 {
                    classify(&start, &mut seen, &mut features)?;
                }
                depth += 1;
            }
            Event::Empty(start) if depth == 1 => {
                classify(&start, &mut seen, &mut features)?;
            }
            Event::End(_) => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| Error::Xml("unbalanced end tag".to_string()))?;
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

fn classify(
    start: &BytesStart<'_>,
    seen: &mut NameSet,
    features: &mut Vec<OplusFeature>,
) -> Result<()> {
    let make: fn(String) -> OplusFeature = match start.name().as_ref() {
        tag if tag == STANDARD_TAG.as_bytes() => OplusFeature::Standard,
        tag if tag == UNAVAILABLE_TAG.as_bytes() => OplusFeature::Unavailable,
        _ => return Ok(()),
    };
    let Some(name) = attribute(start, "name")?.filter(|n| !n.is_empty()) else {
        return Ok(());
    };
    if seen.first_sighting(&name) {
        features.push(make(name));
    }
    Ok(())
}

/// Encode oplus features as an `<oplus-config>` document
///
/// Features with an empty name are left out; the decoder would skip them.
pub fn encode_oplus_features(features: &[OplusFeature], generated_by: &GeneratedBy) -> String {
    let mut out = String::new();
    out.push_str(XML_HEADER);
    out.push('\n');
    out.push_str(&format!("<{ROOT_TAG}>\n"));

    for feature in features {
        if feature.name().is_empty() {
            warn!("not writing oplus feature with empty name");
            continue;
        }
        let tag = match feature {
            OplusFeature::Standard(_) => STANDARD_TAG,
            OplusFeature::Unavailable(_) => UNAVAILABLE_TAG,
        };
        out.push_str(INDENT);
        out.push('<');
        out.push_str(tag);
        push_attribute(&mut out, "name", feature.name());
        out.push_str("/>\n");
    }

    out.push_str(&format!("</{ROOT_TAG}>\n"));
    out.push_str(&generated_by.comment());
    out.push('\n');
    out
}
