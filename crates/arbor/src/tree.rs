//! The live element tree diffs are applied to.
//!
//! An [`Element`] carries plain properties (JSON values), an attribute map, a
//! token set of classes, a style map and an ordered list of children. Child
//! slots hold either a real element or a [`Node::Placeholder`] reserving the
//! position, so a child's index in a path always equals its physical index.
//!
//! Four field names select structured parts of an element instead of a
//! property: [`CHILD_NODES`], [`ATTRIBUTES`], [`CLASS_LIST`] and [`STYLE`].

use indexmap::{IndexMap, IndexSet};
use serde_json::Value;

use crate::resolve::{lookup, Property};

/// Field selecting the ordered child list.
pub const CHILD_NODES: &str = "childNodes";
/// Field selecting the attribute map.
pub const ATTRIBUTES: &str = "attributes";
/// Field selecting the class token set.
pub const CLASS_LIST: &str = "classList";
/// Field selecting the style map.
pub const STYLE: &str = "style";

/// Kind of the root element built by [`Element::document`].
pub const DOCUMENT_KIND: &str = "#document";

pub type AttributeMap = IndexMap<String, String>;
pub type TokenSet = IndexSet<String>;
pub type StyleMap = IndexMap<String, String>;

/// True for field names that address a structured part of an element.
pub fn is_structural(field: &str) -> bool {
    matches!(field, CHILD_NODES | ATTRIBUTES | CLASS_LIST | STYLE)
}

/// A slot in an ordered child list.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    /// Stand-in keeping later siblings at their logical index.
    Placeholder,
}

impl Node {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Node::Placeholder)
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Placeholder => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Placeholder => None,
        }
    }
}

/// An element of the live tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub kind: String,
    pub props: IndexMap<String, Value>,
    pub attributes: AttributeMap,
    pub class_list: TokenSet,
    pub style: StyleMap,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    /// An empty root element.
    pub fn document() -> Self {
        Self::new(DOCUMENT_KIND)
    }

    pub fn with_prop(mut self, name: impl Into<String>, value: Value) -> Self {
        self.props.insert(name.into(), value);
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children.get(index)
    }

    /// Reads the location at `path` without creating anything.
    ///
    /// # Example
    ///
    /// ```
    /// use arbor::tree::Element;
    /// use serde_json::json;
    ///
    /// let doc = Element::document().with_child(Element::new("p").with_prop("innerText", json!("hi")));
    /// let text = doc.get("childNodes.0.innerText").and_then(|p| p.as_value());
    /// assert_eq!(text, Some(&json!("hi")));
    /// ```
    pub fn get(&self, path: &str) -> Option<Property<'_>> {
        lookup(self, path)
    }

    /// Iterates over this element and all element descendants, depth-first
    /// (pre-order). Placeholders are skipped.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Number of placeholders anywhere below this element.
    pub fn placeholder_count(&self) -> usize {
        self.descendants()
            .map(|el| el.children.iter().filter(|c| c.is_placeholder()).count())
            .sum()
    }
}

/// Pre-order iterator returned by [`Element::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let el = self.stack.pop()?;
        // Reverse so the first child is popped first.
        for child in el.children.iter().rev() {
            if let Node::Element(child) = child {
                self.stack.push(child);
            }
        }
        Some(el)
    }
}

/// String form of a value stored in an attribute or style entry.
///
/// Strings are taken as-is, `null` becomes the empty string and anything
/// else is written as JSON text.
pub fn to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
