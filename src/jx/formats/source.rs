//! Canonical jx printer
//!
//! [to_source] prints a whole file with one child per line and four spaces per nesting level.
//! [markup_to_source] prints a markup value on a single line; host expressions use it for
//! markup nested inside them.
//!
//! Either output parses back to a structurally equal tree under the default options. The
//! printer therefore reproduces how each element was closed: implicitly closed elements are
//! printed without an end tag, and explicit end tags keep their spelling.

use super::registry::{FormatError, Formatter};
use crate::jx::ast::{
    Attribute, AttributeValue, Child, Closing, Element, Fragment, Markup, NamedAttribute,
    SourceFile, StringValue,
};

const INDENT: &str = "    ";

struct Printer {
    out: String,
    pretty: bool,
}

impl Printer {
    fn new(pretty: bool) -> Self {
        Self {
            out: String::new(),
            pretty,
        }
    }

    fn newline(&mut self, depth: usize) {
        if self.pretty {
            self.out.push('\n');
            for _ in 0..depth {
                self.out.push_str(INDENT);
            }
        }
    }

    fn markup(&mut self, markup: &Markup, depth: usize) {
        match markup {
            Markup::Element(element) => self.element(element, depth),
            Markup::Fragment(fragment) => self.fragment(fragment, depth),
        }
    }

    fn element(&mut self, element: &Element, depth: usize) {
        self.out.push('<');
        self.out.push_str(&element.name.text());
        for attribute in &element.attributes {
            self.out.push(' ');
            self.attribute(attribute);
        }
        if element.is_self_closing() {
            // An unquoted value would swallow the slash
            let unquoted_last = matches!(
                element.attributes.last(),
                Some(Attribute::Named(NamedAttribute {
                    value: Some(AttributeValue::String(StringValue { quote: None, .. })),
                    ..
                }))
            );
            self.out.push_str(if unquoted_last { " />" } else { "/>" });
            return;
        }
        self.out.push('>');

        // Raw text must come out byte for byte
        let verbatim = element.is_raw_text()
            && element
                .children
                .iter()
                .all(|child| matches!(child, Child::RawText(_)));
        if verbatim {
            for child in &element.children {
                self.child(child, depth + 1);
            }
        } else {
            self.children(&element.children, depth);
        }

        if let Closing::Explicit(end) = &element.closing {
            if !verbatim && self.breaks(&element.children) {
                self.newline(depth);
            }
            self.out.push_str("</");
            self.out.push_str(&end.text());
            self.out.push('>');
        }
    }

    fn fragment(&mut self, fragment: &Fragment, depth: usize) {
        self.out.push_str("<>");
        self.children(&fragment.children, depth);
        if self.breaks(&fragment.children) {
            self.newline(depth);
        }
        self.out.push_str("</>");
    }

    /// Whether a child list is printed one child per line
    fn breaks(&self, children: &[Child]) -> bool {
        self.pretty
            && !matches!(
                children,
                [] | [Child::Text(_) | Child::Entity(_) | Child::Expression(_) | Child::Spread(_)]
            )
    }

    fn children(&mut self, children: &[Child], depth: usize) {
        let breaks = self.breaks(children);
        for child in children {
            if breaks {
                self.newline(depth + 1);
            }
            self.child(child, depth + 1);
        }
    }

    fn child(&mut self, child: &Child, depth: usize) {
        match child {
            Child::Text(text) => self.out.push_str(&text.text),
            Child::Entity(entity) => self.out.push_str(&entity.raw),
            Child::Element(element) => self.element(element, depth),
            Child::Fragment(fragment) => self.fragment(fragment, depth),
            Child::Expression(expr) => {
                self.out.push('{');
                self.out.push_str(&expr.expression.to_string());
                self.out.push('}');
            }
            Child::Spread(spread) => {
                self.out.push_str("{...");
                self.out.push_str(&spread.expression.to_string());
                self.out.push('}');
            }
            Child::RawText(raw) => self.out.push_str(&raw.text),
            Child::Comment(comment) => {
                self.out.push_str("<!--");
                self.out.push_str(&comment.text);
                self.out.push_str("-->");
            }
            Child::Doctype(doctype) if doctype.text.is_empty() => self.out.push_str("<!doctype>"),
            Child::Doctype(doctype) => {
                self.out.push_str("<!doctype ");
                self.out.push_str(&doctype.text);
                self.out.push('>');
            }
            Child::ErroneousEndTag(tag) => {
                self.out.push_str("</");
                self.out.push_str(&tag.name);
                self.out.push('>');
            }
            Child::Error(error) => self.out.push_str(&error.source),
        }
    }

    fn attribute(&mut self, attribute: &Attribute) {
        match attribute {
            Attribute::Named(named) => self.named_attribute(named),
            Attribute::Spread(spread) => {
                self.out.push_str("{...");
                self.out.push_str(&spread.expression.to_string());
                self.out.push('}');
            }
            Attribute::Error(error) => self.out.push_str(&error.source),
        }
    }

    fn named_attribute(&mut self, named: &NamedAttribute) {
        self.out.push_str(&named.name.text());
        let Some(value) = &named.value else {
            return;
        };
        self.out.push('=');
        match value {
            AttributeValue::String(value) => match value.quote {
                Some(quote) => {
                    self.out.push(quote);
                    self.out.push_str(&value.value);
                    self.out.push(quote);
                }
                None => self.out.push_str(&value.value),
            },
            AttributeValue::Expression(expr) => {
                self.out.push('{');
                self.out.push_str(&expr.expression.to_string());
                self.out.push('}');
            }
            AttributeValue::Markup(markup) => {
                let pretty = std::mem::replace(&mut self.pretty, false);
                self.markup(markup, 0);
                self.pretty = pretty;
            }
        }
    }
}

/// Print a markup value on one line
pub fn markup_to_source(markup: &Markup) -> String {
    let mut printer = Printer::new(false);
    printer.markup(markup, 0);
    printer.out
}

/// Print a whole source file in canonical layout
pub fn to_source(file: &SourceFile) -> String {
    let mut out = String::new();
    if let Some(package) = &file.package {
        out.push_str(&format!("package {};\n\n", package.name));
    }
    for import in &file.imports {
        out.push_str("import ");
        if import.is_static {
            out.push_str("static ");
        }
        out.push_str(&import.path);
        if import.wildcard {
            out.push_str(".*");
        }
        out.push_str(";\n");
    }
    if !file.imports.is_empty() {
        out.push('\n');
    }

    let module = &file.module;
    let parameters: Vec<String> = module
        .parameters
        .iter()
        .map(|param| {
            let modifier = if param.is_final { "final " } else { "" };
            format!("{}{} {}", modifier, param.ty, param.name)
        })
        .collect();
    out.push_str(&format!("{}({}) {{\n{}", module.name, parameters.join(", "), INDENT));

    let mut printer = Printer::new(true);
    printer.markup(&module.body, 1);
    out.push_str(&printer.out);
    out.push_str("\n}\n");
    out
}

pub struct SourceFormatter;

impl Formatter for SourceFormatter {
    fn name(&self) -> &str {
        "source"
    }

    fn serialize(&self, file: &SourceFile) -> Result<String, FormatError> {
        Ok(to_source(file))
    }

    fn description(&self) -> &str {
        "Canonical jx source"
    }
}
