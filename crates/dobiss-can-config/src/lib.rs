// src/lib.rs

#![doc = "Parses Dobiss Ambiance `config.dobiss` export files."]
#![doc = ""]
#![doc = "The export is an object graph serialized as XML, where elements can point"]
#![doc = "at each other through `z:Id` / `z:Ref` attributes. This library resolves"]
#![doc = "those references and produces a flat list of addressable outputs."]
#![doc = ""]
#![doc = "It supports:"]
#![doc = "- `load_config_from_str` / `load_config_from_slice`: Parsing in-memory documents."]
#![doc = "- `load_config_from_reader` / `load_config_from_file`: Parsing from I/O sources."]
#![doc = "- `ParsedConfig::light_entries`: Building the persisted entries for selected outputs."]

// --- Crate Modules ---

mod error;
mod log;
mod model;
mod parser;
mod resolver;
mod types;

// --- Public API Re-exports ---

pub use dobiss_can::ModuleType;
pub use error::ConfigError;
pub use parser::{
    load_config_from_file, load_config_from_reader, load_config_from_slice, load_config_from_str,
};
pub use types::{
    DEFAULT_MAX_LEVEL, LightEntry, OutputKind, OutputRecord, ParsedConfig, SkipReason,
    SkippedOutput,
};
