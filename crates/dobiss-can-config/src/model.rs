//! Internal arena representation of a parsed `config.dobiss` document.
//!
//! The export is a .NET data-contract serialization: any element may carry a
//! document-local `z:Id`, and any other element may stand in for it with a
//! `z:Ref`. Elements are stored in one `Vec` in document order and refer to
//! each other by index, so references are plain lookups.

/// Namespace of the domain data elements (`Output`, `Parent`, `Address`, ...).
pub(crate) const DATA_NS: &str = "http://schemas.datacontract.org/2004/07/AmbianceUI.Data";

/// Namespace of the `type` attribute selecting a concrete variant.
pub(crate) const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Namespace of the serializer's `Id` / `Ref` attributes.
pub(crate) const SERIALIZATION_NS: &str = "http://schemas.microsoft.com/2003/10/Serialization/";

// --- Element and attribute names ---

pub(crate) const OUTPUT: &str = "Output";
pub(crate) const SUBJECT: &str = "_subject";
pub(crate) const DISPLAY_NAME: &str = "_displayName";
pub(crate) const OUTPUT_ID: &str = "ID";
pub(crate) const PARENT: &str = "Parent";
pub(crate) const ADDRESS: &str = "Address";
pub(crate) const GROUP: &str = "_group";
pub(crate) const GROUP_NAME: &str = "DisplayName";
pub(crate) const MAX_DIM: &str = "VMax";

const ATTR_TYPE: &str = "type";
const ATTR_ID: &str = "Id";
const ATTR_REF: &str = "Ref";

/// Position of an element in [`Document::nodes`].
pub(crate) type NodeIndex = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Attribute {
    /// Resolved namespace URI; `None` for unprefixed attributes.
    pub namespace: Option<String>,
    pub local_name: String,
    pub value: String,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Element {
    /// Resolved namespace URI; `None` when unbound.
    pub namespace: Option<String>,
    pub local_name: String,
    pub attributes: Vec<Attribute>,
    /// Character data directly inside this element.
    pub text: String,
    pub children: Vec<NodeIndex>,
}

impl Element {
    /// True if this element has the given namespace and local name.
    pub fn is(&self, namespace: &str, local_name: &str) -> bool {
        self.local_name == local_name && self.namespace.as_deref() == Some(namespace)
    }

    pub fn attribute(&self, namespace: &str, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.local_name == local_name && a.namespace.as_deref() == Some(namespace))
            .map(|a| a.value.as_str())
    }

    /// The document-local `z:Id`, if present and non-empty.
    pub fn identifier(&self) -> Option<&str> {
        self.attribute(SERIALIZATION_NS, ATTR_ID)
            .filter(|id| !id.is_empty())
    }

    /// The `z:Ref` pointer, if present and non-empty.
    pub fn reference(&self) -> Option<&str> {
        self.attribute(SERIALIZATION_NS, ATTR_REF)
            .filter(|id| !id.is_empty())
    }

    /// The `i:type` variant tag with any `prefix:` removed.
    pub fn variant_tag(&self) -> Option<&str> {
        self.attribute(XSI_NS, ATTR_TYPE)
            .map(|tag| tag.rsplit(':').next().unwrap_or(tag))
    }

    /// The element text, or `None` when it is empty or only whitespace.
    pub fn non_blank_text(&self) -> Option<&str> {
        if self.text.trim().is_empty() {
            None
        } else {
            Some(self.text.as_str())
        }
    }
}

/// A whole document. `nodes[root]` is the root element and every index
/// stored in an element is valid for `nodes`.
#[derive(Debug, Clone)]
pub(crate) struct Document {
    pub nodes: Vec<Element>,
    pub root: NodeIndex,
}

impl Document {
    pub fn node(&self, index: NodeIndex) -> &Element {
        &self.nodes[index]
    }

    /// All elements in document (pre-)order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, &Element)> + '_ {
        self.nodes.iter().enumerate()
    }

    /// First direct child in the data namespace with the given local name.
    pub fn child(&self, index: NodeIndex, local_name: &str) -> Option<NodeIndex> {
        self.nodes[index]
            .children
            .iter()
            .copied()
            .find(|&c| self.nodes[c].is(DATA_NS, local_name))
    }

    /// Non-blank text of the first matching direct child.
    pub fn child_text(&self, index: NodeIndex, local_name: &str) -> Option<&str> {
        self.child(index, local_name)
            .and_then(|c| self.nodes[c].non_blank_text())
    }
}
