//! AST Snapshot - a normalized, location-free rendition of the tree
//!
//! The snapshot keeps node types, labels, the attributes that distinguish otherwise equal
//! nodes, and children. It deliberately drops locations: two parses of differently laid out
//! sources are structurally equal when their snapshots are equal. Every formatter except the
//! source printer consumes snapshots instead of walking the tree itself.
//!
//! Attribute maps are ordered so that serialized output is stable.

use super::elements::{
    Attribute, AttributeValue, Child, Closing, Element, EmbeddedExpression, Fragment, Markup,
    SourceFile,
};
use super::traits::AstNode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A snapshot of an AST node in a normalized, serializable form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AstSnapshot {
    /// The type of node (e.g., "Element", "Text", "Attribute")
    pub node_type: String,

    /// The primary label or text content of the node
    pub label: String,

    /// Additional attributes specific to the node type
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,

    /// Child nodes in the tree
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<AstSnapshot>,
}

impl AstSnapshot {
    pub fn new(node_type: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            label: label.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: AstSnapshot) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = AstSnapshot>) -> Self {
        self.children.extend(children);
        self
    }

    /// Number of nodes in this subtree, itself included
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(AstSnapshot::node_count).sum::<usize>()
    }
}

/// Snapshot of a whole source file
///
/// Imports and formal parameters become children of their own, ahead of the module body.
pub fn snapshot_from_source_file(file: &SourceFile) -> AstSnapshot {
    let mut snapshot = AstSnapshot::new(file.node_type(), file.module.name.clone());
    if let Some(package) = &file.package {
        snapshot = snapshot.with_attribute("package", package.name.clone());
    }

    for import in &file.imports {
        let mut node = AstSnapshot::new("Import", import.path.clone());
        if import.is_static {
            node = node.with_attribute("static", "true");
        }
        if import.wildcard {
            node = node.with_attribute("wildcard", "true");
        }
        snapshot.children.push(node);
    }

    let module = &file.module;
    let mut module_snapshot = AstSnapshot::new(module.node_type(), module.name.clone());
    for param in &module.parameters {
        let mut node =
            AstSnapshot::new("Parameter", param.name.clone()).with_attribute("type", param.ty.to_string());
        if param.is_final {
            node = node.with_attribute("final", "true");
        }
        module_snapshot.children.push(node);
    }
    module_snapshot.children.push(snapshot_from_markup(&module.body));
    snapshot.children.push(module_snapshot);

    snapshot
}

/// Snapshot of a markup value and everything nested in it
pub fn snapshot_from_markup(markup: &Markup) -> AstSnapshot {
    match markup {
        Markup::Element(element) => build_element_snapshot(element),
        Markup::Fragment(fragment) => build_fragment_snapshot(fragment),
    }
}

fn closing_name(closing: &Closing) -> &'static str {
    match closing {
        Closing::SelfClosing => "self-closing",
        Closing::Explicit(_) => "explicit",
        Closing::Implicit => "implicit",
    }
}

fn build_element_snapshot(element: &Element) -> AstSnapshot {
    let mut snapshot = AstSnapshot::new(element.node_type(), element.name.text())
        .with_attribute("closing", closing_name(&element.closing));
    if let Closing::Explicit(end) = &element.closing {
        let written = end.text();
        if written != element.name.text() {
            snapshot = snapshot.with_attribute("end-tag", written);
        }
    }
    snapshot.children.extend(element.attributes.iter().map(build_attribute_snapshot));
    snapshot.children.extend(element.children.iter().map(snapshot_from_child));
    snapshot
}

fn build_fragment_snapshot(fragment: &Fragment) -> AstSnapshot {
    AstSnapshot::new(fragment.node_type(), "").with_children(fragment.children.iter().map(snapshot_from_child))
}

/// Embedded expressions are labelled with their canonical source; nested markup follows as children
fn build_embedded_snapshot(node_type: &str, embedded: &EmbeddedExpression) -> AstSnapshot {
    AstSnapshot::new(node_type, embedded.expression.to_string())
        .with_children(embedded.expression.markup().into_iter().map(snapshot_from_markup))
}

fn build_attribute_snapshot(attribute: &Attribute) -> AstSnapshot {
    match attribute {
        Attribute::Named(named) => {
            let node = AstSnapshot::new(attribute.node_type(), named.name.text());
            match &named.value {
                None => node,
                Some(AttributeValue::String(value)) => {
                    let quote = value.quote.map(String::from).unwrap_or_default();
                    node.with_attribute("value", value.value.clone())
                        .with_attribute("quote", quote)
                }
                Some(AttributeValue::Expression(expr)) => {
                    node.with_child(build_embedded_snapshot("Expression", expr))
                }
                Some(AttributeValue::Markup(markup)) => node.with_child(snapshot_from_markup(markup)),
            }
        }
        Attribute::Spread(spread) => build_embedded_snapshot(attribute.node_type(), spread),
        // The message may mention offsets; the covered source is what identifies the node
        Attribute::Error(error) => AstSnapshot::new(attribute.node_type(), error.source.clone()),
    }
}

/// Snapshot of a single child
pub fn snapshot_from_child(child: &Child) -> AstSnapshot {
    match child {
        Child::Element(element) => build_element_snapshot(element),
        Child::Fragment(fragment) => build_fragment_snapshot(fragment),
        Child::Expression(expr) => build_embedded_snapshot(child.node_type(), expr),
        Child::Spread(spread) => build_embedded_snapshot(child.node_type(), spread),
        Child::Comment(comment) => AstSnapshot::new(child.node_type(), comment.text.clone()),
        Child::ErroneousEndTag(tag) => AstSnapshot::new(child.node_type(), tag.name.clone()),
        Child::Error(error) => AstSnapshot::new(child.node_type(), error.source.clone()),
        Child::Text(_) | Child::Entity(_) | Child::RawText(_) | Child::Doctype(_) => {
            AstSnapshot::new(child.node_type(), child.display_label())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jx::parsing::{parse_markup, parse_source};

    #[test]
    fn test_snapshot_ignores_layout() {
        let compact = parse_markup("<ul><li>a</li><li>b</li></ul>").unwrap().value;
        let spread_out = parse_markup("<ul>\n  <li> a </li>\n  <li>b</li>\n</ul>\n")
            .unwrap()
            .value;
        assert_ne!(compact, spread_out);
        assert_eq!(snapshot_from_markup(&compact), snapshot_from_markup(&spread_out));
    }

    #[test]
    fn test_element_snapshot_shape() {
        let markup = parse_markup(r#"<a href="/x" hidden {...rest}>go<br></a>"#).unwrap().value;
        let snapshot = snapshot_from_markup(&markup);
        assert_eq!(snapshot.node_type, "Element");
        assert_eq!(snapshot.label, "a");
        assert_eq!(snapshot.attributes["closing"], "explicit");

        let kinds: Vec<_> = snapshot.children.iter().map(|c| c.node_type.as_str()).collect();
        assert_eq!(kinds, vec!["Attribute", "Attribute", "SpreadAttribute", "Text", "Element"]);
        assert_eq!(snapshot.children[0].attributes["value"], "/x");
        assert_eq!(snapshot.children[0].attributes["quote"], "\"");
        assert!(snapshot.children[1].attributes.is_empty());
        assert_eq!(snapshot.children[2].label, "rest");
        assert_eq!(snapshot.children[4].attributes["closing"], "implicit");
        assert_eq!(snapshot.node_count(), 6);
    }

    #[test]
    fn test_end_tag_spelling_is_kept() {
        let markup = parse_markup("<DIV></div>").unwrap().value;
        let snapshot = snapshot_from_markup(&markup);
        assert_eq!(snapshot.attributes["end-tag"], "div");
    }

    #[test]
    fn test_source_file_snapshot() {
        let file = parse_source("package p; import a.*; M(final int n) { <></> }")
            .unwrap()
            .value;
        let snapshot = snapshot_from_source_file(&file);
        assert_eq!(snapshot.label, "M");
        assert_eq!(snapshot.attributes["package"], "p");
        assert_eq!(snapshot.children[0].node_type, "Import");
        assert_eq!(snapshot.children[0].attributes["wildcard"], "true");

        let module = &snapshot.children[1];
        assert_eq!(module.node_type, "Module");
        assert_eq!(module.children[0].attributes["type"], "int");
        assert_eq!(module.children[0].attributes["final"], "true");
        assert_eq!(module.children[1].node_type, "Fragment");
    }

    #[test]
    fn test_nested_markup_in_expression_is_a_child() {
        let markup = parse_markup("<p>{show ? <b/> : null}</p>").unwrap().value;
        let snapshot = snapshot_from_markup(&markup);
        let expression = &snapshot.children[0];
        assert_eq!(expression.node_type, "Expression");
        assert_eq!(expression.children.len(), 1);
        assert_eq!(expression.children[0].label, "b");
    }
}
