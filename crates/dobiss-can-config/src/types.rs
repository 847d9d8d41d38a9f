// crates/dobiss-can-config/src/types.rs

//! Public, ergonomic data structures produced from a `config.dobiss` file.

use dobiss_can::ModuleType;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Default dim ceiling, in percent.
pub const DEFAULT_MAX_LEVEL: u8 = 100;

// --- Output Kind ---

/// The three output variants the export file can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OutputKind {
    #[serde(rename = "relay")]
    Relay,
    #[serde(rename = "dimmer")]
    Dimmer,
    #[serde(rename = "0-10v")]
    ZeroToTenVolt,
}

impl OutputKind {
    /// Maps an `i:type` variant tag (`OutputRelais`, `OutputDim`,
    /// `Output0To10V`) to its kind. Any other tag is not an output.
    pub fn from_variant_tag(tag: &str) -> Option<Self> {
        match tag {
            "OutputRelais" => Some(OutputKind::Relay),
            "OutputDim" => Some(OutputKind::Dimmer),
            "Output0To10V" => Some(OutputKind::ZeroToTenVolt),
            _ => None,
        }
    }

    /// The `i:type` tag of this kind.
    pub const fn variant_tag(self) -> &'static str {
        match self {
            OutputKind::Relay => "OutputRelais",
            OutputKind::Dimmer => "OutputDim",
            OutputKind::ZeroToTenVolt => "Output0To10V",
        }
    }

    /// The module family hosting this kind of output.
    pub const fn module_type(self) -> ModuleType {
        match self {
            OutputKind::Relay => ModuleType::Relay,
            OutputKind::Dimmer => ModuleType::Dimmer,
            OutputKind::ZeroToTenVolt => ModuleType::ZeroToTenVolt,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            OutputKind::Relay => "relay",
            OutputKind::Dimmer => "dimmer",
            OutputKind::ZeroToTenVolt => "0-10v",
        }
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- Output Record ---

/// One addressable output found in the export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    /// Display name; never empty.
    pub name: String,
    /// 1-indexed bus address of the hosting module.
    pub module_address: u32,
    /// 0-indexed position of the output on its module.
    pub output_index: u32,
    pub module_type: ModuleType,
    /// Always consistent with `module_type`.
    pub output_kind: OutputKind,
    /// Group (room) label, when the output belongs to one.
    pub area: Option<String>,
    /// Dim ceiling in percent. Only meaningful for dimmers; 100 otherwise.
    /// A `VMax` outside 0..=100 is clamped into that range, and a missing or
    /// non-numeric one gives 100.
    pub max_level: u8,
}

impl OutputRecord {
    /// The `(module_address, output_index)` pair identifying the output on the bus.
    pub fn key(&self) -> (u32, u32) {
        (self.module_address, self.output_index)
    }

    /// The `"<module>_<output>"` key used when selecting outputs to import.
    pub fn selection_key(&self) -> String {
        format!("{}_{}", self.module_address, self.output_index)
    }
}

impl fmt::Display for OutputRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (M{} O{} {})",
            self.name, self.module_address, self.output_index, self.output_kind
        )?;
        if let Some(area) = &self.area {
            write!(f, " [{}]", area)?;
        }
        Ok(())
    }
}

// --- Skip Diagnostics ---

/// Why a candidate output did not produce a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No `ID` element.
    MissingIndex,
    /// The `ID` text is not a non-negative integer.
    InvalidIndex(String),
    /// Neither a `_displayName` nor a name from an enclosing subject.
    MissingName,
    /// No `Parent` element.
    MissingParent,
    /// The parent's `z:Ref` does not match any `z:Id` in the document.
    UnresolvedParent(String),
    /// The parent module has no `Address` element.
    MissingAddress,
    /// The `Address` text is not a positive integer.
    InvalidAddress(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingIndex => write!(f, "missing ID"),
            SkipReason::InvalidIndex(v) => write!(f, "invalid output ID: {}", v),
            SkipReason::MissingName => write!(f, "missing name"),
            SkipReason::MissingParent => write!(f, "missing Parent element"),
            SkipReason::UnresolvedParent(r) => write!(f, "unresolved Parent reference: {}", r),
            SkipReason::MissingAddress => write!(f, "missing module Address"),
            SkipReason::InvalidAddress(v) => write!(f, "invalid module address: {}", v),
        }
    }
}

/// A candidate output that was omitted from the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedOutput {
    pub kind: OutputKind,
    /// The candidate's own `_displayName`, when it has one.
    pub name: Option<String>,
    pub reason: SkipReason,
}

// --- Parse Result ---

/// Everything extracted from one document.
///
/// An empty `outputs` list with `Ok` means the document was valid but
/// contained no usable outputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedConfig {
    /// Records in encounter order: declared `Output` elements first, then
    /// outputs defined inline as `_subject`.
    pub outputs: Vec<OutputRecord>,
    pub skipped: Vec<SkippedOutput>,
}

impl ParsedConfig {
    /// True if no usable output was found.
    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Number of skipped candidates per output kind.
    pub fn skipped_by_kind(&self) -> BTreeMap<OutputKind, usize> {
        let mut counts = BTreeMap::new();
        for skipped in &self.skipped {
            *counts.entry(skipped.kind).or_insert(0) += 1;
        }
        counts
    }

    /// `(module_address, output_index)` pairs carried by more than one
    /// record, in order of first appearance. Nothing is removed.
    pub fn duplicate_keys(&self) -> Vec<(u32, u32)> {
        let mut seen = BTreeSet::new();
        let mut reported = BTreeSet::new();
        let mut duplicates = Vec::new();
        for key in self.outputs.iter().map(OutputRecord::key) {
            if !seen.insert(key) && reported.insert(key) {
                duplicates.push(key);
            }
        }
        duplicates
    }

    /// Builds light entries for the outputs whose selection key is listed,
    /// keeping record order.
    pub fn light_entries<S: AsRef<str>>(&self, selected: &[S]) -> Vec<LightEntry> {
        let selected: BTreeSet<&str> = selected.iter().map(AsRef::as_ref).collect();
        self.outputs
            .iter()
            .filter(|o| selected.contains(o.selection_key().as_str()))
            .map(LightEntry::from)
            .collect()
    }
}

// --- Light Entry ---

/// The flat configuration entry persisted for one imported light.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightEntry {
    pub name: String,
    pub module: u32,
    /// Output index on the module.
    pub relay: u32,
    pub module_type: ModuleType,
    pub area: Option<String>,
}

impl From<&OutputRecord> for LightEntry {
    fn from(record: &OutputRecord) -> Self {
        Self {
            name: record.name.clone(),
            module: record.module_address,
            relay: record.output_index,
            module_type: record.module_type,
            area: record.area.clone(),
        }
    }
}
