// crates/dobiss-can-config/src/resolver/output.rs

use super::Indexes;
use crate::log::{ParseContext, cfg_trace};
use crate::model::{
    ADDRESS, DISPLAY_NAME, Document, GROUP, GROUP_NAME, MAX_DIM, NodeIndex, OUTPUT_ID, PARENT,
};
use crate::types::{DEFAULT_MAX_LEVEL, OutputKind, OutputRecord, SkipReason, SkippedOutput};

/// Extracts one output candidate, or reports why it was skipped.
pub(super) fn extract_output(
    document: &Document,
    indexes: &Indexes<'_>,
    index: NodeIndex,
    kind: OutputKind,
    ctx: &ParseContext<'_>,
) -> Result<OutputRecord, SkippedOutput> {
    let element = document.node(index);
    let own_name = document.child_text(index, DISPLAY_NAME);
    let skip = |reason| SkippedOutput {
        kind,
        name: own_name.map(String::from),
        reason,
    };

    let id_node = document
        .child(index, OUTPUT_ID)
        .ok_or_else(|| skip(SkipReason::MissingIndex))?;
    let id_text = document.node(id_node).text.as_str();
    let output_index =
        parse_unsigned(id_text).ok_or_else(|| skip(SkipReason::InvalidIndex(id_text.trim().into())))?;

    let name = match own_name {
        Some(name) => name,
        None => {
            let name = element
                .identifier()
                .and_then(|id| indexes.names.get(id).copied())
                .ok_or_else(|| skip(SkipReason::MissingName))?;
            cfg_trace!(*ctx, "Output {} takes its name '{}' from a subject", output_index, name);
            name
        }
    };

    let parent = document
        .child(index, PARENT)
        .ok_or_else(|| skip(SkipReason::MissingParent))?;
    let module = follow_reference(document, indexes, parent)
        .map_err(|target| skip(SkipReason::UnresolvedParent(target.into())))?;
    let address_node = document
        .child(module, ADDRESS)
        .ok_or_else(|| skip(SkipReason::MissingAddress))?;
    let address_text = document.node(address_node).text.as_str();
    let module_address = parse_unsigned(address_text)
        .filter(|&address| address > 0)
        .ok_or_else(|| skip(SkipReason::InvalidAddress(address_text.trim().into())))?;

    // Area is best effort; any gap just leaves it unset.
    let area = document.child(index, GROUP).and_then(|group| {
        match follow_reference(document, indexes, group) {
            Ok(group) => document.child_text(group, GROUP_NAME).map(String::from),
            Err(target) => {
                cfg_trace!(*ctx, "Output '{}' has an unresolved group {}", name, target);
                None
            }
        }
    });

    let max_level = match kind {
        OutputKind::Dimmer => document
            .child_text(index, MAX_DIM)
            .and_then(parse_level)
            .unwrap_or(DEFAULT_MAX_LEVEL),
        OutputKind::Relay | OutputKind::ZeroToTenVolt => DEFAULT_MAX_LEVEL,
    };

    Ok(OutputRecord {
        name: name.to_string(),
        module_address,
        output_index,
        module_type: kind.module_type(),
        output_kind: kind,
        area,
        max_level,
    })
}

/// Returns the element a `z:Ref` points at, or `index` itself when the
/// element is inline. An unknown target is returned as the error.
fn follow_reference<'d>(
    document: &'d Document,
    indexes: &Indexes<'_>,
    index: NodeIndex,
) -> Result<NodeIndex, &'d str> {
    match document.node(index).reference() {
        Some(target) => indexes.ids.get(target).copied().ok_or(target),
        None => Ok(index),
    }
}

fn parse_unsigned(text: &str) -> Option<u32> {
    text.trim().parse().ok()
}

/// Dim ceiling in percent; out-of-range values are clamped.
fn parse_level(text: &str) -> Option<u8> {
    text.trim()
        .parse::<i64>()
        .ok()
        .map(|level| level.clamp(0, i64::from(DEFAULT_MAX_LEVEL)) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unsigned() {
        assert_eq!(parse_unsigned(" 12\n"), Some(12));
        assert_eq!(parse_unsigned("0"), Some(0));
        assert_eq!(parse_unsigned("-1"), None);
        assert_eq!(parse_unsigned("3a"), None);
        assert_eq!(parse_unsigned(""), None);
    }

    #[test]
    fn test_parse_level_clamps() {
        assert_eq!(parse_level("80"), Some(80));
        assert_eq!(parse_level("250"), Some(100));
        assert_eq!(parse_level("-5"), Some(0));
        assert_eq!(parse_level("max"), None);
    }
}
