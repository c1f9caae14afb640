//! AST traits - uniform node access and traversal
//!
//! [AstNode] gives every node a type name, a one-line label and its location. [Visitor]
//! walks a tree in document order; `visit_*` runs before a node's contents are walked and
//! `leave_*` after. Markup nested in attribute values and in embedded expressions is walked
//! as well, right after the node that contains it.
//!
//! ```ignore
//! struct Tags(Vec<String>);
//!
//! impl Visitor for Tags {
//!     fn visit_element(&mut self, element: &Element) {
//!         self.0.push(element.name.text());
//!     }
//! }
//!
//! let mut tags = Tags(Vec::new());
//! file.accept(&mut tags);
//! ```

use super::elements::{
    Attribute, AttributeValue, Child, Closing, Comment, Doctype, Element, EmbeddedExpression,
    Entity, ErroneousEndTag, ErrorNode, Fragment, Markup, ModuleDeclaration, RawText,
    SourceFile, Text,
};
use super::range::{Position, Range};

/// Visitor over a jx tree. Every method defaults to doing nothing.
pub trait Visitor {
    fn visit_source_file(&mut self, _file: &SourceFile) {}
    fn visit_module(&mut self, _module: &ModuleDeclaration) {}

    fn visit_element(&mut self, _element: &Element) {}
    fn leave_element(&mut self, _element: &Element) {}
    fn visit_fragment(&mut self, _fragment: &Fragment) {}
    fn leave_fragment(&mut self, _fragment: &Fragment) {}
    fn visit_attribute(&mut self, _attribute: &Attribute) {}

    fn visit_text(&mut self, _text: &Text) {}
    fn visit_entity(&mut self, _entity: &Entity) {}
    fn visit_raw_text(&mut self, _raw: &RawText) {}
    fn visit_comment(&mut self, _comment: &Comment) {}
    fn visit_doctype(&mut self, _doctype: &Doctype) {}
    /// `{expr}` children and attribute values
    fn visit_expression(&mut self, _expression: &EmbeddedExpression) {}
    /// `{...expr}` children and attributes
    fn visit_spread(&mut self, _spread: &EmbeddedExpression) {}
    fn visit_erroneous_end_tag(&mut self, _tag: &ErroneousEndTag) {}
    fn visit_error(&mut self, _error: &ErrorNode) {}
}

/// Common interface for all AST nodes
pub trait AstNode {
    fn node_type(&self) -> &'static str;
    fn display_label(&self) -> String;
    fn location(&self) -> &Range;
    fn start_position(&self) -> Position {
        self.location().start
    }

    /// Accept a visitor for traversing this node and its contents
    fn accept(&self, visitor: &mut dyn Visitor);
}

fn walk_embedded(visitor: &mut dyn Visitor, embedded: &EmbeddedExpression) {
    for markup in embedded.expression.markup() {
        markup.accept(visitor);
    }
}

/// Visit every child in order
pub fn visit_children(visitor: &mut dyn Visitor, children: &[Child]) {
    for child in children {
        child.accept(visitor);
    }
}

impl AstNode for SourceFile {
    fn node_type(&self) -> &'static str {
        "SourceFile"
    }

    fn display_label(&self) -> String {
        match &self.package {
            Some(package) => format!("{}.{}", package.name, self.module.name),
            None => self.module.name.clone(),
        }
    }

    fn location(&self) -> &Range {
        &self.location
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_source_file(self);
        self.module.accept(visitor);
    }
}

impl AstNode for ModuleDeclaration {
    fn node_type(&self) -> &'static str {
        "Module"
    }

    fn display_label(&self) -> String {
        let parameters: Vec<String> = self
            .parameters
            .iter()
            .map(|param| format!("{} {}", param.ty, param.name))
            .collect();
        format!("{}({})", self.name, parameters.join(", "))
    }

    fn location(&self) -> &Range {
        &self.location
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_module(self);
        self.body.accept(visitor);
    }
}

impl AstNode for Markup {
    fn node_type(&self) -> &'static str {
        match self {
            Markup::Element(element) => element.node_type(),
            Markup::Fragment(fragment) => fragment.node_type(),
        }
    }

    fn display_label(&self) -> String {
        match self {
            Markup::Element(element) => element.display_label(),
            Markup::Fragment(fragment) => fragment.display_label(),
        }
    }

    fn location(&self) -> &Range {
        Markup::location(self)
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        match self {
            Markup::Element(element) => element.accept(visitor),
            Markup::Fragment(fragment) => fragment.accept(visitor),
        }
    }
}

impl AstNode for Element {
    fn node_type(&self) -> &'static str {
        "Element"
    }

    fn display_label(&self) -> String {
        match self.closing {
            Closing::SelfClosing => format!("<{}/>", self.name.text()),
            _ => format!("<{}>", self.name.text()),
        }
    }

    fn location(&self) -> &Range {
        &self.location
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_element(self);
        for attribute in &self.attributes {
            attribute.accept(visitor);
        }
        visit_children(visitor, &self.children);
        visitor.leave_element(self);
    }
}

impl AstNode for Fragment {
    fn node_type(&self) -> &'static str {
        "Fragment"
    }

    fn display_label(&self) -> String {
        format!("<> ({} children)", self.children.len())
    }

    fn location(&self) -> &Range {
        &self.location
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_fragment(self);
        visit_children(visitor, &self.children);
        visitor.leave_fragment(self);
    }
}

impl AstNode for Attribute {
    fn node_type(&self) -> &'static str {
        match self {
            Attribute::Named(_) => "Attribute",
            Attribute::Spread(_) => "SpreadAttribute",
            Attribute::Error(_) => "Error",
        }
    }

    fn display_label(&self) -> String {
        match self {
            Attribute::Named(named) => match &named.value {
                None => named.name.text(),
                Some(AttributeValue::String(value)) => {
                    format!("{}={}", named.name.text(), value.value)
                }
                Some(AttributeValue::Expression(expr)) => {
                    format!("{}={{{}}}", named.name.text(), expr.expression)
                }
                Some(AttributeValue::Markup(markup)) => {
                    format!("{}={}", named.name.text(), markup.display_label())
                }
            },
            Attribute::Spread(spread) => format!("...{}", spread.expression),
            Attribute::Error(error) => error.message.clone(),
        }
    }

    fn location(&self) -> &Range {
        Attribute::location(self)
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_attribute(self);
        match self {
            Attribute::Named(named) => match &named.value {
                Some(AttributeValue::Expression(expr)) => {
                    visitor.visit_expression(expr);
                    walk_embedded(visitor, expr);
                }
                Some(AttributeValue::Markup(markup)) => markup.accept(visitor),
                Some(AttributeValue::String(_)) | None => {}
            },
            Attribute::Spread(spread) => {
                visitor.visit_spread(spread);
                walk_embedded(visitor, spread);
            }
            Attribute::Error(error) => visitor.visit_error(error),
        }
    }
}

impl AstNode for Child {
    fn node_type(&self) -> &'static str {
        match self {
            Child::Text(_) => "Text",
            Child::Entity(_) => "Entity",
            Child::Element(element) => element.node_type(),
            Child::Fragment(fragment) => fragment.node_type(),
            Child::Expression(_) => "Expression",
            Child::Spread(_) => "Spread",
            Child::RawText(_) => "RawText",
            Child::Comment(_) => "Comment",
            Child::Doctype(_) => "Doctype",
            Child::ErroneousEndTag(_) => "ErroneousEndTag",
            Child::Error(_) => "Error",
        }
    }

    fn display_label(&self) -> String {
        match self {
            Child::Text(text) => text.text.clone(),
            Child::Entity(entity) => entity.raw.clone(),
            Child::Element(element) => element.display_label(),
            Child::Fragment(fragment) => fragment.display_label(),
            Child::Expression(expr) => format!("{{{}}}", expr.expression),
            Child::Spread(spread) => format!("{{...{}}}", spread.expression),
            Child::RawText(raw) => raw.text.clone(),
            Child::Comment(comment) => comment.text.trim().to_string(),
            Child::Doctype(doctype) => doctype.text.clone(),
            Child::ErroneousEndTag(tag) => format!("</{}>", tag.name),
            Child::Error(error) => error.message.clone(),
        }
    }

    fn location(&self) -> &Range {
        Child::location(self)
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        match self {
            Child::Text(text) => visitor.visit_text(text),
            Child::Entity(entity) => visitor.visit_entity(entity),
            Child::Element(element) => element.accept(visitor),
            Child::Fragment(fragment) => fragment.accept(visitor),
            Child::Expression(expr) => {
                visitor.visit_expression(expr);
                walk_embedded(visitor, expr);
            }
            Child::Spread(spread) => {
                visitor.visit_spread(spread);
                walk_embedded(visitor, spread);
            }
            Child::RawText(raw) => visitor.visit_raw_text(raw),
            Child::Comment(comment) => visitor.visit_comment(comment),
            Child::Doctype(doctype) => visitor.visit_doctype(doctype),
            Child::ErroneousEndTag(tag) => visitor.visit_erroneous_end_tag(tag),
            Child::Error(error) => visitor.visit_error(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jx::parsing::{parse_markup, parse_source};

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl Visitor for Recorder {
        fn visit_element(&mut self, element: &Element) {
            self.events.push(format!("+{}", element.name.text()));
        }
        fn leave_element(&mut self, element: &Element) {
            self.events.push(format!("-{}", element.name.text()));
        }
        fn visit_fragment(&mut self, _: &Fragment) {
            self.events.push("+<>".into());
        }
        fn leave_fragment(&mut self, _: &Fragment) {
            self.events.push("-<>".into());
        }
        fn visit_text(&mut self, text: &Text) {
            self.events.push(format!("'{}'", text.text));
        }
        fn visit_expression(&mut self, expr: &EmbeddedExpression) {
            self.events.push(format!("{{{}}}", expr.expression));
        }
    }

    #[test]
    fn test_visitor_order() {
        let markup = parse_markup("<ul><li>one</li><>two</></ul>").unwrap().value;
        let mut recorder = Recorder::default();
        markup.accept(&mut recorder);
        assert_eq!(
            recorder.events,
            vec!["+ul", "+li", "'one'", "-li", "+<>", "'two'", "-<>", "-ul"]
        );
    }

    #[test]
    fn test_visitor_reaches_nested_markup() {
        let markup = parse_markup("<p icon=<i/>>{ok ? <b/> : <s/>}</p>").unwrap().value;
        let mut recorder = Recorder::default();
        markup.accept(&mut recorder);
        let elements: Vec<_> = recorder
            .events
            .iter()
            .filter(|e| e.starts_with('+'))
            .cloned()
            .collect();
        assert_eq!(elements, vec!["+p", "+i", "+b", "+s"]);
    }

    #[test]
    fn test_source_file_labels() {
        let file = parse_source("package a.b; Card(String title) { <div/> }")
            .unwrap()
            .value;
        assert_eq!(file.node_type(), "SourceFile");
        assert_eq!(file.display_label(), "a.b.Card");
        assert_eq!(file.module.display_label(), "Card(String title)");
        assert_eq!(file.module.body.display_label(), "<div/>");
        assert_eq!(file.start_position(), Position::new(0, 0));
    }

    #[test]
    fn test_child_labels() {
        let markup = parse_markup("<p>a &amp; {x}<!-- c --></p>").unwrap().value;
        let labels: Vec<_> = markup
            .children()
            .iter()
            .map(|child| (child.node_type(), child.display_label()))
            .collect();
        assert_eq!(
            labels,
            vec![
                ("Text", "a".to_string()),
                ("Entity", "&amp;".to_string()),
                ("Expression", "{x}".to_string()),
                ("Comment", "c".to_string()),
            ]
        );
    }
}
