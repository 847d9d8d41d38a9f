// crates/dobiss-can-config/src/resolver/mod.rs

//! Turns a document arena into output records.
//!
//! Indexes are built over the whole document before any output is extracted,
//! so a `z:Ref` may point at an element that appears earlier or later.

use crate::log::{ParseContext, cfg_debug, cfg_trace, cfg_warn};
use crate::model::{DATA_NS, DISPLAY_NAME, Document, NodeIndex, OUTPUT, SUBJECT};
use crate::types::{OutputKind, ParsedConfig};
use std::collections::BTreeMap;

mod output;

/// Read-only lookups built once per document.
pub(crate) struct Indexes<'d> {
    /// `z:Id` -> element. A repeated identifier maps to its last occurrence.
    pub ids: BTreeMap<&'d str, NodeIndex>,
    /// `z:Id` of a `_subject` -> its `_displayName`.
    pub names: BTreeMap<&'d str, &'d str>,
}

/// Resolves every output candidate in `document`, accumulating records and
/// skip diagnostics.
pub(crate) fn resolve_outputs(document: &Document, ctx: &ParseContext<'_>) -> ParsedConfig {
    // --- Pass 1: Build indexes ---
    let indexes = build_indexes(document, ctx);
    cfg_trace!(
        *ctx,
        "Indexed {} identifiers, {} subject names",
        indexes.ids.len(),
        indexes.names.len()
    );

    // --- Pass 2: Extract records from candidates ---
    let parsed = collect_candidates(document).into_iter().fold(
        ParsedConfig::default(),
        |mut parsed, (index, kind)| {
            match output::extract_output(document, &indexes, index, kind, ctx) {
                Ok(record) => parsed.outputs.push(record),
                Err(skipped) => {
                    cfg_warn!(
                        *ctx,
                        "Skipped {} '{}': {}",
                        skipped.kind.variant_tag(),
                        skipped.name.as_deref().unwrap_or("<unnamed>"),
                        skipped.reason
                    );
                    parsed.skipped.push(skipped);
                }
            }
            parsed
        },
    );

    cfg_debug!(
        *ctx,
        "Parsed {} outputs, skipped {}",
        parsed.outputs.len(),
        parsed.skipped_count()
    );
    for (kind, count) in parsed.skipped_by_kind() {
        cfg_debug!(*ctx, "Skipped {} x{}", kind.variant_tag(), count);
    }

    parsed
}

fn build_indexes<'d>(document: &'d Document, ctx: &ParseContext<'_>) -> Indexes<'d> {
    let mut ids = BTreeMap::new();
    let mut names = BTreeMap::new();

    for (index, element) in document.iter() {
        let Some(id) = element.identifier() else {
            continue;
        };
        ids.insert(id, index);

        if element.is(DATA_NS, SUBJECT) {
            if let Some(name) = document.child_text(index, DISPLAY_NAME) {
                cfg_trace!(*ctx, "Subject {} is named '{}'", id, name);
                names.insert(id, name);
            }
        }
    }

    Indexes { ids, names }
}

/// Output candidates in encounter order: every `Output` declaration first,
/// then every `_subject` defined inline. Elements whose `i:type` is not one
/// of the three output variants are not candidates.
fn collect_candidates(document: &Document) -> Vec<(NodeIndex, OutputKind)> {
    let tagged = |name: &'static str| {
        document
            .iter()
            .filter(move |&(index, element)| index != document.root && element.is(DATA_NS, name))
            .filter_map(|(index, element)| {
                element
                    .variant_tag()
                    .and_then(OutputKind::from_variant_tag)
                    .map(|kind| (index, kind))
            })
    };

    tagged(OUTPUT).chain(tagged(SUBJECT)).collect()
}
