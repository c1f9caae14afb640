//! Whole source files: module header, embedded expressions, formats and presets

use jx::jx::ambiguity::{Production, Resolution};
use jx::jx::ast::diagnostics::codes;
use jx::jx::ast::{AstNode, Attribute, AttributeValue, Child, Markup, Visitor};
use jx::jx::config::ConfigRegistry;
use jx::jx::formats::FormatRegistry;
use jx::jx::host::{Expression, ExpressionKind, HostGrammar, HostParseError};
use jx::jx::parsing::EmbedContext;
use jx::jx::{parse_source, AmbiguityTable, JxParser, ParseError};
use rstest::rstest;

const TODO_LIST: &str = r#"package app.views;

import java.util.List;
import static app.Icons.*;

/* Renders the open items */
TodoList(final String title, List<Item> items, int[] counts) {
    <section class="todo">
        <!doctype html>
        <h1 id=title>{title.toUpperCase()}</h1>
        <ul>
            {items.stream().map(item -> <li key={item.id()}>{item.label()}</li>).toList()}
        </ul>
        <Footer count={items.size() > 0 ? items.size() : 0} {...props}/>
        <p>&copy; 2024 &mdash; {counts.length} lists</p>
    </section>
}
"#;

#[test]
fn test_complete_file() {
    let output = parse_source(TODO_LIST).unwrap();
    assert!(output.diagnostics.is_empty(), "{:?}", output.diagnostics);
    let file = output.value;

    assert_eq!(file.package.as_ref().unwrap().name, "app.views");
    assert_eq!(file.imports.len(), 2);
    let module = &file.module;
    assert_eq!(module.name, "TodoList");
    let types: Vec<_> = module.parameters.iter().map(|p| p.ty.to_string()).collect();
    assert_eq!(types, vec!["String", "List<Item>", "int[]"]);

    let section = module.body.as_element().unwrap();
    let names: Vec<_> = section.child_elements().map(|e| e.name.text()).collect();
    assert_eq!(names, vec!["h1", "ul", "Footer", "p"]);
    assert!(matches!(section.children[0], Child::Doctype(_)));
}

#[test]
fn test_nested_markup_spans_point_into_the_file() {
    let file = parse_source(TODO_LIST).unwrap().value;
    let section = file.module.body.as_element().unwrap();
    let ul = section.child_elements().nth(1).unwrap();
    let Child::Expression(embedded) = &ul.children[0] else {
        panic!("expected an embedded expression");
    };
    let nested = embedded.expression.markup();
    assert_eq!(nested.len(), 1);
    let li = nested[0].as_element().unwrap();
    assert_eq!(
        li.location.text(TODO_LIST),
        "<li key={item.id()}>{item.label()}</li>"
    );
    assert_eq!(li.location.start.line, 11);
}

#[derive(Default)]
struct ElementCounter {
    names: Vec<String>,
}

impl Visitor for ElementCounter {
    fn visit_element(&mut self, element: &jx::jx::ast::Element) {
        self.names.push(element.name.text());
    }
}

#[test]
fn test_visitor_walks_the_whole_file() {
    let file = parse_source(TODO_LIST).unwrap().value;
    let mut counter = ElementCounter::default();
    file.accept(&mut counter);
    assert_eq!(counter.names, vec!["section", "h1", "ul", "li", "Footer", "p"]);
}

#[rstest]
#[case::comparison("{a < b}", "a < b")]
#[case::markup_operand("{<b>x</b>}", "<b>x</b>")]
#[case::generic_call("{Util.<String>empty()}", "Util.<String>empty()")]
#[case::shift("{mask >> 2}", "mask >> 2")]
#[case::lambda("{xs.map(x -> x * 2)}", "xs.map(x -> x * 2)")]
#[case::conditional_markup("{ok ? <a/> : <b/>}", "ok ? <a/> : <b/>")]
#[case::cast("{(int) ratio}", "(int) ratio")]
fn test_embedded_expression_readings(#[case] embedded: &str, #[case] printed: &str) {
    let source = format!("M() {{ <p>{}</p> }}", embedded);
    let output = parse_source(&source).unwrap();
    assert!(output.diagnostics.is_empty(), "{:?}", output.diagnostics);
    let p = output.value.module.body.as_element().unwrap().clone();
    let Child::Expression(expr) = &p.children[0] else {
        panic!("expected an expression child, got {:?}", p.children[0]);
    };
    assert_eq!(expr.expression.to_string(), printed);
}

#[test]
fn test_deferred_cast_is_reported_as_hint() {
    let output = parse_source("M() { <p>{(total) - 1}</p> }").unwrap();
    assert!(!output.has_errors());
    assert_eq!(output.diagnostics.len(), 1);
    assert!(output.diagnostics[0].has_code(codes::DEFERRED_AMBIGUITY));
}

#[rstest]
#[case::missing_parens("Card { <p/> }")]
#[case::call_not_declaration("Card(1) { <p/> }")]
#[case::body_not_markup("Card() { \"text\" }")]
#[case::no_module("package a.b;")]
fn test_header_syntax_errors(#[case] source: &str) {
    assert!(
        matches!(parse_source(source), Err(ParseError::Syntax { .. })),
        "{:?}",
        parse_source(source)
    );
}

#[test]
fn test_fatal_error_locations() {
    let source = "M() {\n    <div>\n        <span>\n}";
    let err = parse_source(source).unwrap_err();
    match &err {
        ParseError::UnterminatedElement { tag, location } => {
            assert_eq!(tag, "span");
            assert_eq!(location.start.line, 2);
        }
        other => panic!("unexpected {:?}", other),
    }
    let context = jx::jx::ast::format_source_context(source, err.location());
    assert!(context.contains(">>"));
}

/// A host grammar that only knows identifiers
struct NamesOnly;

impl HostGrammar for NamesOnly {
    fn parse_expression(
        &self,
        cx: &mut EmbedContext<'_>,
        cursor: usize,
    ) -> Result<(Expression, usize), HostParseError> {
        let start = self.skip_trivia(cx.source(), cursor);
        let len = cx.source()[start..]
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(cx.source().len() - start);
        if len == 0 {
            return Err(HostParseError::new("expected a name", start));
        }
        let end = start + len;
        let name = cx.source()[start..end].to_string();
        Ok((
            Expression::new(ExpressionKind::Name(name), cx.range(start..end)),
            end,
        ))
    }
}

#[test]
fn test_custom_host_grammar() {
    let parser = JxParser::new().with_host(NamesOnly);
    let output = parser.parse_markup("<p title={name}>{greeting}{1 + 2}</p>").unwrap();
    let p = output.value.as_element().unwrap();
    let Attribute::Named(title) = &p.attributes[0] else {
        panic!("expected a named attribute");
    };
    assert!(matches!(title.value, Some(AttributeValue::Expression(_))));
    assert!(matches!(p.children[0], Child::Expression(_)));
    assert!(matches!(p.children[1], Child::Error(_)));
    assert_eq!(output.errors().count(), 1);
}

#[test]
fn test_custom_ambiguity_table() {
    let standard = AmbiguityTable::standard();
    let conflicts = standard
        .conflicts()
        .iter()
        .cloned()
        .map(|mut rule| {
            if rule.first == Production::Cast && rule.second == Production::Binary {
                rule.resolution = Resolution::Prefer(Production::Cast);
            }
            rule
        })
        .collect();
    let table = AmbiguityTable::new(conflicts, standard.operators().to_vec());

    let output = JxParser::new()
        .with_table(&table)
        .parse_markup("<p>{(total) - 1}</p>")
        .unwrap();
    assert!(output.diagnostics.is_empty(), "{:?}", output.diagnostics);
    let p = output.value.as_element().unwrap();
    let Child::Expression(expr) = &p.children[0] else {
        panic!("expected an expression child");
    };
    assert!(matches!(expr.expression.kind, ExpressionKind::Cast { .. }));
}

#[test]
fn test_config_presets_change_the_tree() {
    let source = "M() { <p> a <!-- c --> b </p> }";
    let registry = ConfigRegistry::with_defaults();
    let children = |preset: &str| -> Vec<String> {
        let options = registry.get(preset).unwrap().options;
        let file = JxParser::new().with_options(options).parse_source(source).unwrap().value;
        let Markup::Element(p) = &file.module.body else {
            panic!("expected an element");
        };
        p.children.iter().map(|c| c.node_type().to_string()).collect()
    };
    assert_eq!(children("default"), vec!["Text", "Comment", "Text"]);
    assert_eq!(children("compact"), vec!["Text", "Text"]);
    assert_eq!(children("verbatim"), vec!["Text", "Comment", "Text"]);
}

#[rstest]
#[case("treeviz", "◇ section")]
#[case("json", "\"node_type\": \"Module\"")]
#[case("yaml", "node_type: Module")]
#[case("source", "package app.views;")]
fn test_every_format_renders(#[case] format: &str, #[case] needle: &str) {
    let file = parse_source(TODO_LIST).unwrap().value;
    let rendered = FormatRegistry::with_defaults().serialize(&file, format).unwrap();
    assert!(rendered.contains(needle), "{}", rendered);
}
