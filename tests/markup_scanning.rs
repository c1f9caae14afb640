//! Scanner and recovery behavior on whole markup documents
//!
//! The reference cases of the markup grammar, plus the recovery policy: permissive auto-close
//! for elements, fragments as barriers, unmatched end tags kept as erroneous end tags.

use jx::jx::ast::diagnostics::codes;
use jx::jx::ast::{Child, Closing, Markup};
use jx::jx::scanning::Token;
use jx::jx::{parse_markup, JxParser, ParseError};
use rstest::rstest;

fn tokens(source: &str) -> Vec<Token> {
    JxParser::new()
        .scan(source)
        .unwrap()
        .value
        .into_iter()
        .map(|(token, _)| token)
        .collect()
}

fn markup(source: &str) -> Markup {
    parse_markup(source).unwrap().value
}

#[test]
fn test_empty_div() {
    let markup = markup("<div></div>");
    let div = markup.as_element().unwrap();
    assert_eq!(div.name.text(), "div");
    assert!(div.attributes.is_empty());
    assert!(div.children.is_empty());
    assert_eq!(div.location.span, 0..11);
}

#[test]
fn test_self_closing_br_leaves_no_frame() {
    let output = parse_markup("<br/>").unwrap();
    let br = output.value.as_element().unwrap();
    assert!(br.is_self_closing());
    assert!(output.diagnostics.is_empty());
    assert_eq!(
        tokens("<br/>"),
        vec![
            Token::TagOpen,
            Token::TagName(jx::jx::ast::TagNameKind::identifier("br")),
            Token::SelfClosingMarker,
        ]
    );
}

#[test]
fn test_script_body_is_raw_text() {
    let source = r#"<script>var x = "<div>";</script>"#;
    let markup = markup(source);
    let script = markup.as_element().unwrap();
    assert_eq!(script.children.len(), 1);
    let Child::RawText(raw) = &script.children[0] else {
        panic!("expected raw text, got {:?}", script.children[0]);
    };
    assert_eq!(raw.text, r#"var x = "<div>";"#);
    assert_eq!(raw.location.span, 8..24);
    assert!(matches!(script.closing, Closing::Explicit(_)));
}

#[test]
fn test_auto_close_emits_implicit_end_tag() {
    let scanned = tokens("<a><b></a>");
    assert_eq!(
        scanned.iter().filter(|t| matches!(t, Token::ImplicitEndTag(_))).count(),
        1
    );
    let position = scanned
        .iter()
        .position(|t| matches!(t, Token::ImplicitEndTag(name) if name == "b"))
        .unwrap();
    assert!(matches!(scanned[position + 1], Token::EndTag(_)));

    let output = parse_markup("<a><b></a>").unwrap();
    let a = output.value.as_element().unwrap();
    let b = a.child_elements().next().unwrap();
    assert_eq!(b.closing, Closing::Implicit);
    assert!(output
        .diagnostics
        .iter()
        .any(|d| d.has_code(codes::IMPLICIT_END_TAG) && !d.is_error()));
}

#[test]
fn test_fragment_is_never_auto_closed() {
    let err = parse_markup("<>{x}<").unwrap_err();
    assert!(
        matches!(err, ParseError::UnterminatedFragment { .. }),
        "got {:?}",
        err
    );
}

#[rstest]
#[case::unclosed_element("<div><p></p>")]
#[case::unclosed_nested("<a><b>")]
#[case::end_tag_stopped_by_fragment("<div><></div>")]
fn test_unterminated_element_is_fatal(#[case] source: &str) {
    let err = parse_markup(source).unwrap_err();
    assert!(
        matches!(
            err,
            ParseError::UnterminatedElement { .. } | ParseError::UnterminatedFragment { .. }
        ),
        "got {:?}",
        err
    );
}

#[rstest]
#[case::script("<script>if (a < b) {", "script")]
#[case::style_any_case("<STYLE>p { color: red }", "STYLE")]
fn test_unterminated_raw_text_is_fatal(#[case] source: &str, #[case] tag: &str) {
    match parse_markup(source).unwrap_err() {
        ParseError::UnterminatedRawText { tag: found, .. } => assert_eq!(found, tag),
        other => panic!("expected unterminated raw text, got {:?}", other),
    }
}

#[rstest]
#[case::longer_name("<script>a</scripts>b</script>", "a</scripts>b")]
#[case::prefix_of_a_word(
    "<script>if (a</scriptx && b) { <div> }</script>",
    "if (a</scriptx && b) { <div> }"
)]
#[case::other_raw_text_element("<style>p</script>q</style>", "p</script>q")]
fn test_raw_text_runs_to_its_own_end_tag(#[case] source: &str, #[case] body: &str) {
    let output = parse_markup(source).unwrap();
    assert!(output.diagnostics.is_empty(), "{:?}", output.diagnostics);
    let element = output.value.as_element().unwrap();
    assert_eq!(element.children.len(), 1);
    let Child::RawText(raw) = &element.children[0] else {
        panic!("expected raw text, got {:?}", element.children[0]);
    };
    assert_eq!(raw.text, body);
}

#[rstest]
#[case::raw_text_in_conditional("<div>{x ? <script>y : z}</div>")]
#[case::element_in_call("<ul>{items.map(i -> <li>{i})}</ul>")]
#[case::fragment_in_attribute("<p title={<>t}></p>")]
fn test_fatal_errors_in_nested_markup_fail_the_parse(#[case] source: &str) {
    let result = parse_markup(source);
    assert!(
        matches!(
            result,
            Err(ParseError::UnterminatedRawText { .. }
                | ParseError::UnterminatedElement { .. }
                | ParseError::UnterminatedFragment { .. })
        ),
        "got {:?}",
        result
    );
}

#[test]
fn test_abandoned_expression_leaves_one_diagnostic() {
    let output = parse_markup("<div>{<a><i></a> +}</div>").unwrap();
    assert_eq!(output.diagnostics.len(), 1, "{:?}", output.diagnostics);
    assert!(output.diagnostics[0].has_code(codes::HOST_EXPRESSION));
}

#[rstest]
#[case::stray_end_tag("<a></b></a>", "b")]
#[case::custom_names_keep_case("<Card></card></Card>", "card")]
#[case::fragment_barrier("<div><></div></></div>", "div")]
fn test_erroneous_end_tags(#[case] source: &str, #[case] name: &str) {
    let output = parse_markup(source).unwrap();
    let erroneous: Vec<_> = collect_children(&output.value)
        .into_iter()
        .filter_map(|child| match child {
            Child::ErroneousEndTag(tag) => Some(tag.name.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(erroneous, vec![name.to_string()]);
    assert!(output.diagnostics.iter().any(|d| d.has_code(codes::ERRONEOUS_END_TAG)));
}

#[rstest]
#[case::lower_upper("<DIV></div>")]
#[case::mixed("<Table><TR></tr></TABLE>")]
fn test_html_names_match_ignoring_case(#[case] source: &str) {
    let output = parse_markup(source).unwrap();
    assert!(output.diagnostics.is_empty(), "{:?}", output.diagnostics);
}

#[rstest]
#[case::br("<p><br>text</p>")]
#[case::img("<p><img src=\"a.png\">text</p>")]
#[case::input_upper("<p><INPUT type=checkbox>text</p>")]
fn test_void_elements_close_immediately(#[case] source: &str) {
    let markup = markup(source);
    let p = markup.as_element().unwrap();
    assert_eq!(p.children.len(), 2);
    let void = p.children[0].as_element().unwrap();
    assert!(void.is_void());
    assert_eq!(void.closing, Closing::Implicit);
    assert!(void.children.is_empty());
    assert_eq!(p.children[1].as_text(), Some("text"));
}

#[test]
fn test_unterminated_quote_is_repaired() {
    let output = parse_markup("<a title=\"oops\n></a>").unwrap();
    let a = output.value.as_element().unwrap();
    let title = a.attribute("title").unwrap();
    assert_eq!(title.value.as_ref().and_then(|v| v.as_str()), Some("oops"));
    assert!(output
        .diagnostics
        .iter()
        .any(|d| d.has_code(codes::UNTERMINATED_ATTRIBUTE_VALUE) && d.is_error()));
}

#[test]
fn test_host_failure_is_contained() {
    let output = parse_markup("<ul><li>{a +}</li><li>ok</li></ul>").unwrap();
    let ul = output.value.as_element().unwrap();
    let items: Vec<_> = ul.child_elements().collect();
    assert_eq!(items.len(), 2);
    assert!(matches!(items[0].children[0], Child::Error(_)));
    assert_eq!(items[1].children[0].as_text(), Some("ok"));
    assert_eq!(output.errors().count(), 1);
    assert!(output.diagnostics[0].has_code(codes::HOST_EXPRESSION));
}

#[test]
fn test_malformed_entity_is_kept_as_text() {
    let output = parse_markup("<p>fish & chips &amp; peas</p>").unwrap();
    let p = output.value.as_element().unwrap();
    assert_eq!(p.children[0].as_text(), Some("fish & chips"));
    assert!(matches!(p.children[1], Child::Entity(_)));
    assert_eq!(p.children[2].as_text(), Some("peas"));
    assert!(output.diagnostics.iter().any(|d| d.has_code(codes::MALFORMED_ENTITY)));
}

#[rstest]
#[case::comment("<p><!-- never closed</p>")]
fn test_unterminated_comment_is_fatal(#[case] source: &str) {
    assert!(matches!(
        parse_markup(source),
        Err(ParseError::UnterminatedComment { .. })
    ));
}

#[test]
fn test_attribute_forms() {
    let markup = markup(
        r##"<input disabled type="text" name='q' size=10 value={query} xlink:href="#a" {...rest} icon=<Icon/> slot=<>x</>/>"##,
    );
    let input = markup.as_element().unwrap();
    assert_eq!(input.attributes.len(), 9);
    let text = |name: &str| {
        input
            .attribute(name)
            .and_then(|attr| attr.value.as_ref())
            .and_then(|value| value.as_str())
            .map(str::to_string)
    };
    assert!(input.attribute("disabled").unwrap().value.is_none());
    assert_eq!(text("type").as_deref(), Some("text"));
    assert_eq!(text("name").as_deref(), Some("q"));
    assert_eq!(text("size").as_deref(), Some("10"));
    assert_eq!(text("xlink:href").as_deref(), Some("#a"));
    assert!(input.attribute("icon").is_some());
    assert!(input.attribute("slot").is_some());
}

#[test]
fn test_html_attribute_names() {
    let output = parse_markup(r#"<button @click={save} :disabled="busy" v-on:submit=go />"#).unwrap();
    assert!(output.diagnostics.is_empty(), "{:?}", output.diagnostics);
    let button = output.value.as_element().unwrap();
    assert!(button.attribute("@click").is_some());
    assert!(button.attribute(":disabled").is_some());
    assert!(button.attribute("v-on:submit").is_some());
}

/// Every child in the tree, depth first
fn collect_children(markup: &Markup) -> Vec<&Child> {
    fn walk<'a>(children: &'a [Child], out: &mut Vec<&'a Child>) {
        for child in children {
            out.push(child);
            match child {
                Child::Element(element) => walk(&element.children, out),
                Child::Fragment(fragment) => walk(&fragment.children, out),
                _ => {}
            }
        }
    }
    let mut out = Vec::new();
    walk(markup.children(), &mut out);
    out
}
