//! Turns a path into a location inside the live tree.
//!
//! Walking starts from a [`Context`] (normally the root element) and consumes
//! one component per step. What a component means depends on the kind of the
//! current context:
//!
//! | context      | component           | step                                   |
//! |--------------|---------------------|----------------------------------------|
//! | `Element`    | field name          | structured field or property value     |
//! | `Children`   | `index` / `index:tag` | child element, created on demand     |
//! | `Attributes` | attribute name      | terminal only                          |
//! | `Tokens`     | token               | terminal only                          |
//! | `Style`      | style key           | terminal only                          |
//! | `Generic`    | object key / index  | nested JSON value                      |
//!
//! [`resolve`] walks every component but the last and returns a [`Handle`]
//! pairing the owning context with the final key; [`Handle::set`] and
//! [`Handle::delete`] apply the change there. Ordinary unresolved paths are
//! reported as [`ResolveError`] values, never panics.

use std::fmt;

use arbor_path::{components, validate_path, ListStep, PathError};
use serde_json::Value;
use thiserror::Error;
use tracing::trace;

use crate::tree::{
    is_structural, to_text, AttributeMap, Element, Node, StyleMap, TokenSet, ATTRIBUTES,
    CHILD_NODES, CLASS_LIST, STYLE,
};

// ── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Nothing exists at the component and the walk may not create it.
    #[error("MISSING: {0}")]
    Missing(String),
    /// An empty list slot or placeholder needs `index:tag` to be created.
    #[error("NEEDS_TAG: {0}")]
    NeedsTag(String),
    #[error("INVALID_PATH: {0}")]
    Path(#[from] PathError),
    /// Structured element fields can be walked through but not replaced.
    #[error("NOT_ASSIGNABLE: {0}")]
    NotAssignable(String),
    /// Reaching the list slot would take more than [`MAX_LIST_PADDING`]
    /// placeholders.
    #[error("PADDING_LIMIT: {0}")]
    PaddingLimit(String),
    #[error("UNSUPPORTED: {component} in {context}")]
    Unsupported {
        context: ContextKind,
        component: String,
    },
}

/// Most placeholders one list step may insert ahead of the new element.
pub const MAX_LIST_PADDING: usize = 4096;

// ── Context ─────────────────────────────────────────────────────────────────

/// Whether a walk may materialize missing list children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Create tagged list children and replace tagged placeholders.
    Create,
    /// Only follow what already exists.
    Existing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextKind {
    Element,
    Children,
    Attributes,
    Tokens,
    Style,
    Generic,
}

impl fmt::Display for ContextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContextKind::Element => "element",
            ContextKind::Children => "children",
            ContextKind::Attributes => "attributes",
            ContextKind::Tokens => "tokens",
            ContextKind::Style => "style",
            ContextKind::Generic => "value",
        };
        f.write_str(name)
    }
}

/// A mutable position in the tree, tagged by what kind of container it is.
#[derive(Debug)]
pub enum Context<'a> {
    Element(&'a mut Element),
    Children(&'a mut Vec<Node>),
    Attributes(&'a mut AttributeMap),
    Tokens(&'a mut TokenSet),
    Style(&'a mut StyleMap),
    Generic(&'a mut Value),
}

impl<'a> Context<'a> {
    pub fn kind(&self) -> ContextKind {
        match self {
            Context::Element(_) => ContextKind::Element,
            Context::Children(_) => ContextKind::Children,
            Context::Attributes(_) => ContextKind::Attributes,
            Context::Tokens(_) => ContextKind::Tokens,
            Context::Style(_) => ContextKind::Style,
            Context::Generic(_) => ContextKind::Generic,
        }
    }

    /// Borrows the same position for a shorter lifetime, so one resolved
    /// context can serve several walks in turn.
    pub fn reborrow(&mut self) -> Context<'_> {
        match self {
            Context::Element(el) => Context::Element(&mut **el),
            Context::Children(children) => Context::Children(&mut **children),
            Context::Attributes(attrs) => Context::Attributes(&mut **attrs),
            Context::Tokens(tokens) => Context::Tokens(&mut **tokens),
            Context::Style(style) => Context::Style(&mut **style),
            Context::Generic(value) => Context::Generic(&mut **value),
        }
    }

    fn unsupported(&self, component: &str) -> ResolveError {
        ResolveError::Unsupported {
            context: self.kind(),
            component: component.to_string(),
        }
    }

    /// Moves one component deeper.
    pub fn descend(self, component: &str, mode: Mode) -> Result<Context<'a>, ResolveError> {
        match self {
            Context::Element(el) => field(el, component),
            Context::Children(children) => {
                let step = ListStep::parse(component)?;
                child(children, step, mode, component).map(Context::Element)
            }
            Context::Generic(value) => match value {
                Value::Object(map) => map
                    .get_mut(component)
                    .map(Context::Generic)
                    .ok_or_else(|| ResolveError::Missing(component.to_string())),
                Value::Array(items) => {
                    let step = ListStep::parse(component)?;
                    items
                        .get_mut(step.index)
                        .map(Context::Generic)
                        .ok_or_else(|| ResolveError::Missing(component.to_string()))
                }
                _ => Err(ResolveError::Unsupported {
                    context: ContextKind::Generic,
                    component: component.to_string(),
                }),
            },
            other => Err(other.unsupported(component)),
        }
    }

    /// Assigns `value` at `key` inside this context.
    pub fn set(self, key: &str, value: Value) -> Result<(), ResolveError> {
        match self {
            Context::Element(el) => {
                if is_structural(key) {
                    return Err(ResolveError::NotAssignable(key.to_string()));
                }
                el.props.insert(key.to_string(), value);
                Ok(())
            }
            // The slot is the target: materializing it is the whole effect.
            Context::Children(children) => {
                let step = ListStep::parse(key)?;
                child(children, step, Mode::Create, key).map(|_| ())
            }
            Context::Attributes(attrs) => {
                attrs.insert(key.to_string(), to_text(&value));
                Ok(())
            }
            Context::Tokens(tokens) => {
                tokens.insert(key.to_string());
                Ok(())
            }
            Context::Style(style) => {
                style.insert(key.to_string(), to_text(&value));
                Ok(())
            }
            Context::Generic(target) => match target {
                Value::Object(map) => {
                    map.insert(key.to_string(), value);
                    Ok(())
                }
                Value::Array(items) => {
                    let step = ListStep::parse(key)?;
                    match items.get_mut(step.index) {
                        Some(slot) => {
                            *slot = value;
                            Ok(())
                        }
                        None => Err(ResolveError::Missing(key.to_string())),
                    }
                }
                _ => Err(ResolveError::Unsupported {
                    context: ContextKind::Generic,
                    component: key.to_string(),
                }),
            },
        }
    }

    /// Removes `key` from this context. Removing something already absent
    /// succeeds.
    pub fn delete(self, key: &str) -> Result<(), ResolveError> {
        match self {
            Context::Element(el) => {
                if is_structural(key) {
                    return Err(ResolveError::NotAssignable(key.to_string()));
                }
                el.props.shift_remove(key);
                Ok(())
            }
            Context::Children(children) => {
                let step = ListStep::parse(key)?;
                // Slots are never removed, only vacated.
                if let Some(slot) = children.get_mut(step.index) {
                    *slot = Node::Placeholder;
                }
                Ok(())
            }
            Context::Attributes(attrs) => {
                attrs.shift_remove(key);
                Ok(())
            }
            Context::Tokens(tokens) => {
                tokens.shift_remove(key);
                Ok(())
            }
            Context::Style(style) => {
                style.shift_remove(key);
                Ok(())
            }
            Context::Generic(Value::Object(map)) => {
                map.remove(key);
                Ok(())
            }
            // Array slots are nulled, never removed, so later indices hold.
            Context::Generic(Value::Array(items)) => {
                let step = ListStep::parse(key)?;
                if let Some(slot) = items.get_mut(step.index) {
                    *slot = Value::Null;
                }
                Ok(())
            }
            Context::Generic(_) => Err(ResolveError::Unsupported {
                context: ContextKind::Generic,
                component: key.to_string(),
            }),
        }
    }
}

fn field<'a>(el: &'a mut Element, name: &str) -> Result<Context<'a>, ResolveError> {
    Ok(match name {
        CHILD_NODES => Context::Children(&mut el.children),
        ATTRIBUTES => Context::Attributes(&mut el.attributes),
        CLASS_LIST => Context::Tokens(&mut el.class_list),
        STYLE => Context::Style(&mut el.style),
        _ => Context::Generic(
            el.props
                .get_mut(name)
                .ok_or_else(|| ResolveError::Missing(name.to_string()))?,
        ),
    })
}

/// Finds the element at `step.index`, creating it when allowed.
///
/// An existing element is returned regardless of the tag. A placeholder is
/// replaced by a new element of kind `tag`. A slot past the end is reached by
/// padding with placeholders and appending the new element.
fn child<'a>(
    children: &'a mut Vec<Node>,
    step: ListStep<'_>,
    mode: Mode,
    component: &str,
) -> Result<&'a mut Element, ResolveError> {
    let tag = match mode {
        Mode::Create => step.tag,
        Mode::Existing => None,
    };
    let missing = || match mode {
        Mode::Create => ResolveError::NeedsTag(component.to_string()),
        Mode::Existing => ResolveError::Missing(component.to_string()),
    };

    if step.index < children.len() {
        if children[step.index].is_placeholder() {
            let tag = tag.ok_or_else(missing)?;
            children[step.index] = Node::Element(Element::new(tag));
        }
    } else {
        let tag = tag.ok_or_else(missing)?;
        if step.index - children.len() > MAX_LIST_PADDING {
            return Err(ResolveError::PaddingLimit(component.to_string()));
        }
        if children.len() < step.index {
            trace!(from = children.len(), to = step.index, "padding child list with placeholders");
            children.resize_with(step.index, || Node::Placeholder);
        }
        children.push(Node::Element(Element::new(tag)));
    }

    children
        .get_mut(step.index)
        .and_then(Node::as_element_mut)
        .ok_or_else(missing)
}

// ── Walking ─────────────────────────────────────────────────────────────────

/// The owning context of a path's last component, and that component.
#[derive(Debug)]
pub struct Handle<'a, 'p> {
    pub context: Context<'a>,
    pub key: &'p str,
}

impl Handle<'_, '_> {
    pub fn set(self, value: Value) -> Result<(), ResolveError> {
        self.context.set(self.key, value)
    }

    pub fn delete(self) -> Result<(), ResolveError> {
        self.context.delete(self.key)
    }
}

/// Walks `path` from `context`, stopping before its last component.
///
/// # Errors
///
/// `ResolveError::Path` for malformed paths, otherwise whatever
/// [`Context::descend`] reports for the first component that cannot be
/// followed.
pub fn resolve<'a, 'p>(
    context: Context<'a>,
    path: &'p str,
    mode: Mode,
) -> Result<Handle<'a, 'p>, ResolveError> {
    validate_path(path)?;
    let (parent, key) = match path.rsplit_once(arbor_path::SEPARATOR) {
        Some((parent, key)) => (Some(parent), key),
        None => (None, path),
    };
    let mut context = context;
    if let Some(parent) = parent {
        for component in components(parent) {
            context = context.descend(component, mode)?;
        }
    }
    Ok(Handle { context, key })
}

/// Walks every component of `path` from `context`.
pub fn resolve_context<'a>(
    context: Context<'a>,
    path: &str,
    mode: Mode,
) -> Result<Context<'a>, ResolveError> {
    validate_path(path)?;
    let mut context = context;
    for component in components(path) {
        context = context.descend(component, mode)?;
    }
    Ok(context)
}

/// Resolves `path` from `context`, creating missing list children, and
/// assigns `value` there.
pub fn set_at(context: Context<'_>, path: &str, value: Value) -> Result<(), ResolveError> {
    resolve(context, path, Mode::Create)?.set(value)
}

/// Resolves `path` from `context` without creating anything and removes the
/// target.
pub fn delete_at(context: Context<'_>, path: &str) -> Result<(), ResolveError> {
    resolve(context, path, Mode::Existing)?.delete()
}

// ── Read-only lookup ────────────────────────────────────────────────────────

/// A read-only view of a location in the tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Property<'a> {
    Element(&'a Element),
    Placeholder,
    Children(&'a [Node]),
    Attributes(&'a AttributeMap),
    Tokens(&'a TokenSet),
    Style(&'a StyleMap),
    Value(&'a Value),
    /// An attribute or style entry.
    Text(&'a str),
    /// A token present in a token set.
    Token(&'a str),
}

impl<'a> Property<'a> {
    pub fn as_element(&self) -> Option<&'a Element> {
        match *self {
            Property::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn as_value(&self) -> Option<&'a Value> {
        match *self {
            Property::Value(value) => Some(value),
            _ => None,
        }
    }

    /// String content of attribute, style, token and string property values.
    pub fn as_str(&self) -> Option<&'a str> {
        match *self {
            Property::Text(s) | Property::Token(s) => Some(s),
            Property::Value(Value::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    fn child(self, component: &str) -> Option<Property<'a>> {
        match self {
            Property::Element(el) => Some(match component {
                CHILD_NODES => Property::Children(&el.children),
                ATTRIBUTES => Property::Attributes(&el.attributes),
                CLASS_LIST => Property::Tokens(&el.class_list),
                STYLE => Property::Style(&el.style),
                _ => Property::Value(el.props.get(component)?),
            }),
            Property::Children(children) => {
                let step = ListStep::parse(component).ok()?;
                match children.get(step.index)? {
                    Node::Element(el) => Some(Property::Element(el)),
                    Node::Placeholder => Some(Property::Placeholder),
                }
            }
            Property::Attributes(attrs) => attrs.get(component).map(|s| Property::Text(s)),
            Property::Style(style) => style.get(component).map(|s| Property::Text(s)),
            Property::Tokens(tokens) => tokens.get(component).map(|s| Property::Token(s)),
            Property::Value(Value::Object(map)) => map.get(component).map(Property::Value),
            Property::Value(Value::Array(items)) => {
                let step = ListStep::parse(component).ok()?;
                items.get(step.index).map(Property::Value)
            }
            _ => None,
        }
    }
}

/// Reads the location at `path` below `root`.
pub fn lookup<'a>(root: &'a Element, path: &str) -> Option<Property<'a>> {
    validate_path(path).ok()?;
    let mut current = Property::Element(root);
    for component in components(path) {
        current = current.child(component)?;
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc() -> Element {
        Element::document()
    }

    #[test]
    fn set_plain_property() {
        let mut root = doc();
        set_at(Context::Element(&mut root), "title", json!("Home")).unwrap();
        assert_eq!(root.props.get("title"), Some(&json!("Home")));
    }

    #[test]
    fn list_step_creates_tagged_child() {
        let mut root = doc();
        set_at(Context::Element(&mut root), "childNodes.0:p.innerText", json!("x")).unwrap();
        let p = root.child(0).and_then(Node::as_element).unwrap();
        assert_eq!(p.kind, "p");
        assert_eq!(p.props.get("innerText"), Some(&json!("x")));
    }

    #[test]
    fn list_step_pads_with_placeholders() {
        let mut root = doc();
        set_at(Context::Element(&mut root), "childNodes.3:li.id", json!(1)).unwrap();
        assert_eq!(root.children.len(), 4);
        assert!(root.children[..3].iter().all(Node::is_placeholder));
        assert_eq!(root.children[3].as_element().map(|e| e.kind.as_str()), Some("li"));
    }

    #[test]
    fn list_step_without_tag_cannot_create() {
        let mut root = doc();
        let err = set_at(Context::Element(&mut root), "childNodes.0.id", json!(1)).unwrap_err();
        assert_eq!(err, ResolveError::NeedsTag("0".into()));
        assert!(root.children.is_empty());
    }

    #[test]
    fn existing_child_ignores_tag() {
        let mut root = doc().with_child(Element::new("div"));
        set_at(Context::Element(&mut root), "childNodes.0:span.id", json!("a")).unwrap();
        let el = root.child(0).and_then(Node::as_element).unwrap();
        assert_eq!(el.kind, "div");
        assert_eq!(el.props.get("id"), Some(&json!("a")));
    }

    #[test]
    fn placeholder_replaced_only_with_tag() {
        let mut root = doc();
        root.children.push(Node::Placeholder);
        assert_eq!(
            set_at(Context::Element(&mut root), "childNodes.0.id", json!(1)),
            Err(ResolveError::NeedsTag("0".into()))
        );
        set_at(Context::Element(&mut root), "childNodes.0:em.id", json!(1)).unwrap();
        assert_eq!(root.child(0).and_then(Node::as_element).map(|e| e.kind.as_str()), Some("em"));
    }

    #[test]
    fn existing_mode_never_creates() {
        let mut root = doc();
        root.children.push(Node::Placeholder);
        let err = resolve_context(Context::Element(&mut root), "childNodes.0:div", Mode::Existing)
            .unwrap_err();
        assert_eq!(err, ResolveError::Missing("0:div".into()));
        let err = resolve_context(Context::Element(&mut root), "childNodes.1:div", Mode::Existing)
            .unwrap_err();
        assert_eq!(err, ResolveError::Missing("1:div".into()));
        assert_eq!(root.children.len(), 1);
    }

    #[test]
    fn attribute_style_and_token_contexts() {
        let mut root = doc().with_child(Element::new("a"));
        let mut ctx = Context::Element(&mut root);
        set_at(ctx.reborrow(), "childNodes.0.attributes.href", json!("/home")).unwrap();
        set_at(ctx.reborrow(), "childNodes.0.style.color", json!("red")).unwrap();
        set_at(ctx.reborrow(), "childNodes.0.classList.active", json!(true)).unwrap();
        set_at(ctx.reborrow(), "childNodes.0.attributes.tabindex", json!(0)).unwrap();

        let a = root.child(0).and_then(Node::as_element).unwrap();
        assert_eq!(a.attributes.get("href").map(String::as_str), Some("/home"));
        assert_eq!(a.attributes.get("tabindex").map(String::as_str), Some("0"));
        assert_eq!(a.style.get("color").map(String::as_str), Some("red"));
        assert!(a.class_list.contains("active"));
    }

    #[test]
    fn terminal_contexts_do_not_descend() {
        let mut root = doc().with_attribute("id", "x");
        let err = set_at(Context::Element(&mut root), "attributes.id.value", json!(1)).unwrap_err();
        assert_eq!(
            err,
            ResolveError::Unsupported {
                context: ContextKind::Attributes,
                component: "id".into()
            }
        );
    }

    #[test]
    fn structural_fields_are_not_assignable() {
        let mut root = doc();
        assert_eq!(
            set_at(Context::Element(&mut root), "style", json!("color: red")),
            Err(ResolveError::NotAssignable("style".into()))
        );
        assert_eq!(
            delete_at(Context::Element(&mut root), "childNodes"),
            Err(ResolveError::NotAssignable("childNodes".into()))
        );
    }

    #[test]
    fn generic_values_nest() {
        let mut root = doc().with_prop("dataset", json!({"user": {"name": "a"}, "ids": [1, 2]}));
        let mut ctx = Context::Element(&mut root);
        set_at(ctx.reborrow(), "dataset.user.name", json!("b")).unwrap();
        set_at(ctx.reborrow(), "dataset.ids.1", json!(5)).unwrap();
        assert_eq!(
            set_at(ctx.reborrow(), "dataset.ids.7", json!(5)),
            Err(ResolveError::Missing("7".into()))
        );
        delete_at(ctx.reborrow(), "dataset.user.name").unwrap();
        assert_eq!(root.props.get("dataset"), Some(&json!({"user": {}, "ids": [1, 5]})));
    }

    #[test]
    fn delete_array_item_nulls_the_slot() {
        let mut root = doc().with_prop("ids", json!([1, 2, 3]));
        let mut ctx = Context::Element(&mut root);
        delete_at(ctx.reborrow(), "ids.1").unwrap();
        // Out of range is a no-op.
        delete_at(ctx.reborrow(), "ids.9").unwrap();
        assert_eq!(
            delete_at(ctx.reborrow(), "ids.first"),
            Err(ResolveError::Path(PathError::InvalidIndex("first".into())))
        );
        assert_eq!(root.props.get("ids"), Some(&json!([1, null, 3])));
    }

    #[test]
    fn far_list_index_is_rejected() {
        let mut root = doc();
        let path = format!("childNodes.{}:li.id", usize::MAX);
        assert_eq!(
            set_at(Context::Element(&mut root), &path, json!(1)),
            Err(ResolveError::PaddingLimit(format!("{}:li", usize::MAX)))
        );
        let path = format!("childNodes.{}:li", MAX_LIST_PADDING + 1);
        assert!(matches!(
            set_at(Context::Element(&mut root), &path, Value::Null),
            Err(ResolveError::PaddingLimit(_))
        ));
        assert!(root.children.is_empty());

        let path = format!("childNodes.{MAX_LIST_PADDING}:li");
        set_at(Context::Element(&mut root), &path, Value::Null).unwrap();
        assert_eq!(root.children.len(), MAX_LIST_PADDING + 1);
    }

    #[test]
    fn missing_property_is_not_created() {
        let mut root = doc();
        assert_eq!(
            set_at(Context::Element(&mut root), "dataset.user", json!(1)),
            Err(ResolveError::Missing("dataset".into()))
        );
    }

    #[test]
    fn delete_child_leaves_placeholder() {
        let mut root = doc()
            .with_child(Element::new("li"))
            .with_child(Element::new("li"))
            .with_child(Element::new("li"));
        delete_at(Context::Element(&mut root), "childNodes.1").unwrap();
        assert_eq!(root.children.len(), 3);
        assert!(root.children[1].is_placeholder());
        // Out of range is a no-op.
        delete_at(Context::Element(&mut root), "childNodes.9").unwrap();
        assert_eq!(root.children.len(), 3);
    }

    #[test]
    fn delete_missing_entries_succeeds() {
        let mut root = doc();
        let mut ctx = Context::Element(&mut root);
        delete_at(ctx.reborrow(), "attributes.id").unwrap();
        delete_at(ctx.reborrow(), "classList.x").unwrap();
        delete_at(ctx.reborrow(), "style.color").unwrap();
        delete_at(ctx.reborrow(), "title").unwrap();
    }

    #[test]
    fn delete_below_missing_ancestor_fails() {
        let mut root = doc();
        assert_eq!(
            delete_at(Context::Element(&mut root), "childNodes.0.attributes.id"),
            Err(ResolveError::Missing("0".into()))
        );
    }

    #[test]
    fn malformed_paths() {
        let mut root = doc();
        assert_eq!(
            set_at(Context::Element(&mut root), "", json!(1)),
            Err(ResolveError::Path(PathError::Empty))
        );
        assert_eq!(
            set_at(Context::Element(&mut root), "childNodes.x:div.id", json!(1)),
            Err(ResolveError::Path(PathError::InvalidIndex("x:div".into())))
        );
    }

    #[test]
    fn lookup_reads_every_kind() {
        let mut root = doc();
        let mut ctx = Context::Element(&mut root);
        set_at(ctx.reborrow(), "childNodes.1:ul.classList.menu", json!(true)).unwrap();
        set_at(ctx.reborrow(), "childNodes.1:ul.attributes.role", json!("list")).unwrap();

        assert_eq!(root.get("childNodes.0"), Some(Property::Placeholder));
        assert_eq!(
            root.get("childNodes.1").and_then(|p| p.as_element()).map(|e| e.kind.as_str()),
            Some("ul")
        );
        assert_eq!(root.get("childNodes.1.classList.menu").and_then(|p| p.as_str()), Some("menu"));
        assert_eq!(root.get("childNodes.1.classList.other"), None);
        assert_eq!(root.get("childNodes.1.attributes.role").and_then(|p| p.as_str()), Some("list"));
        assert_eq!(root.get("childNodes.2"), None);
        assert_eq!(root.get(""), None);
    }

    #[test]
    fn reborrow_serves_several_walks() {
        let mut root = doc();
        let mut list = resolve_context(Context::Element(&mut root), "childNodes", Mode::Create).unwrap();
        set_at(list.reborrow(), "0:h1.innerText", json!("a")).unwrap();
        set_at(list.reborrow(), "2:p.innerText", json!("b")).unwrap();
        assert_eq!(root.children.len(), 3);
        assert_eq!(root.placeholder_count(), 1);
    }
}
