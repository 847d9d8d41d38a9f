// crates/dobiss-can-config/src/parser.rs

use crate::error::ConfigError;
use crate::log::{ParseContext, cfg_debug};
use crate::model::{Attribute, Document, Element, NodeIndex};
use crate::resolver;
use crate::types::ParsedConfig;
use quick_xml::NsReader;
use quick_xml::encoding::Decoder;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, BytesStart, Event};
use quick_xml::name::{NamespaceError, ResolveResult};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Parses a `config.dobiss` document held in a string slice.
///
/// # Errors
/// Returns a `ConfigError` if the document is not well-formed XML. Outputs
/// that cannot be extracted are not errors; they are listed in
/// [`ParsedConfig::skipped`].
pub fn load_config_from_str(xml_content: &str) -> Result<ParsedConfig, ConfigError> {
    load_internal(xml_content.as_bytes(), "<str>")
}

/// Parses a `config.dobiss` document from raw bytes.
///
/// # Errors
/// Returns a `ConfigError` if the bytes are not well-formed XML.
pub fn load_config_from_slice(bytes: &[u8]) -> Result<ParsedConfig, ConfigError> {
    load_internal(bytes, "<bytes>")
}

/// Parses a `config.dobiss` document from any buffered reader.
///
/// # Errors
/// Returns a `ConfigError` if reading fails or the content is not
/// well-formed XML.
pub fn load_config_from_reader<R: BufRead>(reader: R) -> Result<ParsedConfig, ConfigError> {
    load_internal(reader, "<reader>")
}

/// Opens and parses a `config.dobiss` file.
///
/// # Errors
/// Returns [`ConfigError::Io`] if the file cannot be opened, or any other
/// `ConfigError` if its content is not well-formed XML.
pub fn load_config_from_file<P: AsRef<Path>>(path: P) -> Result<ParsedConfig, ConfigError> {
    let path = path.as_ref();
    let source = path.display().to_string();
    let file = File::open(path)?;
    load_internal(BufReader::new(file), &source)
}

fn load_internal<R: BufRead>(reader: R, source: &str) -> Result<ParsedConfig, ConfigError> {
    let ctx = ParseContext { source };

    // 1. Read the whole document into the node arena.
    let document = read_document(reader)?;
    cfg_debug!(ctx, "Read {} elements", document.nodes.len());

    // 2. Index, collect and extract.
    Ok(resolver::resolve_outputs(&document, &ctx))
}

/// Reads a complete, well-formed document into a [`Document`] arena.
pub(crate) fn read_document<R: BufRead>(source: R) -> Result<Document, ConfigError> {
    let mut reader = NsReader::from_reader(source);
    let mut builder = DocumentBuilder::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let element = read_element(&reader, &e)?;
                builder.open(element)?;
            }
            Event::Empty(e) => {
                let element = read_element(&reader, &e)?;
                builder.open(element)?;
                builder.close();
            }
            // Mismatched end tags are rejected by the reader itself.
            Event::End(_) => builder.close(),
            Event::Text(e) => builder.text(&e.xml_content()?)?,
            Event::CData(e) => builder.text(&e.xml_content()?)?,
            Event::GeneralRef(e) => builder.text(&resolve_entity(&e)?)?,
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctype.
            _ => {}
        }
        buf.clear();
    }

    builder.finish()
}

/// Converts a start tag into an [`Element`] with resolved namespaces.
fn read_element<R>(reader: &NsReader<R>, start: &BytesStart<'_>) -> Result<Element, ConfigError> {
    let decoder = reader.decoder();
    let (namespace, local_name) = reader.resolve_element(start.name());

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let (attr_namespace, attr_local) = reader.resolve_attribute(attr.key);
        attributes.push(Attribute {
            namespace: namespace_uri(attr_namespace, decoder)?,
            local_name: decoder.decode(attr_local.as_ref())?.into_owned(),
            value: attr.unescape_value()?.into_owned(),
        });
    }

    Ok(Element {
        namespace: namespace_uri(namespace, decoder)?,
        local_name: decoder.decode(local_name.as_ref())?.into_owned(),
        attributes,
        ..Default::default()
    })
}

fn namespace_uri(result: ResolveResult<'_>, decoder: Decoder) -> Result<Option<String>, ConfigError> {
    match result {
        ResolveResult::Bound(ns) => Ok(Some(decoder.decode(ns.as_ref())?.into_owned())),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => {
            Err(quick_xml::Error::from(NamespaceError::UnknownPrefix(prefix)).into())
        }
    }
}

/// Expands a character reference or one of the five predefined entities.
fn resolve_entity(reference: &BytesRef<'_>) -> Result<String, ConfigError> {
    if let Some(ch) = reference.resolve_char_ref()? {
        return Ok(ch.to_string());
    }
    let name = reference.decode()?;
    match resolve_predefined_entity(&name) {
        Some(value) => Ok(value.to_string()),
        None => Err(ConfigError::UnknownEntity {
            entity: name.into_owned(),
        }),
    }
}

/// Accumulates elements into the arena while tracking the open-element stack.
#[derive(Default)]
struct DocumentBuilder {
    nodes: Vec<Element>,
    open: Vec<NodeIndex>,
    root: Option<NodeIndex>,
}

impl DocumentBuilder {
    fn open(&mut self, element: Element) -> Result<(), ConfigError> {
        let index = self.nodes.len();
        match self.open.last() {
            Some(&parent) => {
                self.nodes[parent].children.push(index);
            }
            None if self.root.is_some() => {
                return Err(ConfigError::MultipleRootElements {
                    element: element.local_name,
                });
            }
            None => self.root = Some(index),
        }
        self.nodes.push(element);
        self.open.push(index);
        Ok(())
    }

    fn close(&mut self) {
        self.open.pop();
    }

    /// Appends character data to the innermost open element. Outside the
    /// root element only whitespace (and a byte order mark) is allowed.
    fn text(&mut self, text: &str) -> Result<(), ConfigError> {
        match self.open.last() {
            Some(&current) => self.nodes[current].text.push_str(text),
            None => {
                let stray = text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
                if !stray.is_empty() {
                    return Err(ConfigError::TextOutsideRoot {
                        text: stray.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    fn finish(self) -> Result<Document, ConfigError> {
        if let Some(&unclosed) = self.open.last() {
            return Err(ConfigError::UnclosedElement {
                element: self.nodes[unclosed].local_name.clone(),
            });
        }
        let root = self.root.ok_or(ConfigError::MissingRootElement)?;
        Ok(Document {
            nodes: self.nodes,
            root,
        })
    }
}
