//! Tag classification
//!
//!     Tag names fall into two families. A plain identifier whose ASCII-lowercase form is one of
//!     the fixed HTML element names belongs to the HTML family and is matched against end tags
//!     case-insensitively (`<DIV>...</div>`). Everything else (custom components, namespaced
//!     and member names) is matched exactly.
//!
//!     Void elements never have a body; raw-text elements hold theirs verbatim. Both
//!     classifications ignore case, so `<BR>` is void and `<SCRIPT>` is raw text.

use crate::jx::ast::elements::TagNameKind;
use once_cell::sync::Lazy;
use regex::Regex;

/// Elements that never take a body or an end tag
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input", "keygen", "link",
    "meta", "param", "source", "track", "wbr",
];

/// Elements whose body is raw text up to the matching end tag
pub const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// HTML elements that take a body; together with [VOID_ELEMENTS] they form the HTML family
pub const HTML_ELEMENTS: &[&str] = &[
    "a", "abbr", "address", "article", "aside", "audio", "b", "bdi", "bdo", "blockquote",
    "body", "button", "canvas", "caption", "cite", "code", "colgroup", "data", "datalist", "dd",
    "del", "details", "dfn", "dialog", "div", "dl", "dt", "em", "fieldset", "figcaption",
    "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "head", "header", "hgroup",
    "html", "i", "iframe", "ins", "kbd", "label", "legend", "li", "main", "map", "mark", "math",
    "menu", "meter", "nav", "noscript", "object", "ol", "optgroup", "option", "output", "p",
    "picture", "pre", "progress", "q", "rb", "rp", "rt", "rtc", "ruby", "s", "samp", "script",
    "section", "select", "slot", "small", "span", "strong", "style", "sub", "summary", "sup",
    "svg", "table", "tbody", "td", "template", "textarea", "tfoot", "th", "thead", "time",
    "title", "tr", "u", "ul", "var", "video",
];

/// `</` and a raw-text element name, ending at whitespace, `/`, `>` or the end of input
static RAW_TEXT_END: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)</({})(?:[\s/>]|$)", RAW_TEXT_ELEMENTS.join("|"))).unwrap()
});

/// Offset in `body` of the end tag closing the raw-text element `name`
///
/// Longer names (`</scripts>`) and the other raw-text element's end tag are part of the body.
pub fn raw_text_end(body: &str, name: &str) -> Option<usize> {
    RAW_TEXT_END
        .captures_iter(body)
        .filter(|caps| caps.get(1).is_some_and(|m| m.as_str().eq_ignore_ascii_case(name)))
        .find_map(|caps| caps.get(0).map(|m| m.start()))
}

/// How an end tag name is compared against an open element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagFamily {
    /// Fixed HTML element set, case-insensitive
    Html,
    /// Everything else, exact
    Custom,
}

fn in_set(set: &[&str], name: &str) -> bool {
    set.iter().any(|entry| entry.eq_ignore_ascii_case(name))
}

pub fn family(kind: &TagNameKind) -> TagFamily {
    match kind {
        TagNameKind::Identifier(name)
            if in_set(HTML_ELEMENTS, name) || in_set(VOID_ELEMENTS, name) =>
        {
            TagFamily::Html
        }
        _ => TagFamily::Custom,
    }
}

pub fn is_void(kind: &TagNameKind) -> bool {
    matches!(kind, TagNameKind::Identifier(name) if in_set(VOID_ELEMENTS, name))
}

pub fn is_raw_text(kind: &TagNameKind) -> bool {
    matches!(kind, TagNameKind::Identifier(name) if in_set(RAW_TEXT_ELEMENTS, name))
}

/// Whether an end tag written `end` closes an element opened as `open` of `family`
pub fn names_match(family: TagFamily, open: &str, end: &str) -> bool {
    match family {
        TagFamily::Html => open.eq_ignore_ascii_case(end),
        TagFamily::Custom => open == end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> TagNameKind {
        TagNameKind::identifier(name)
    }

    #[test]
    fn test_family() {
        assert_eq!(family(&ident("div")), TagFamily::Html);
        assert_eq!(family(&ident("DIV")), TagFamily::Html);
        assert_eq!(family(&ident("br")), TagFamily::Html);
        assert_eq!(family(&ident("Card")), TagFamily::Custom);
        let namespaced = TagNameKind::Namespaced {
            namespace: "svg".into(),
            name: "rect".into(),
        };
        assert_eq!(family(&namespaced), TagFamily::Custom);
    }

    #[test]
    fn test_void_and_raw_text() {
        assert!(is_void(&ident("img")));
        assert!(is_void(&ident("Input")));
        assert!(!is_void(&ident("div")));
        assert!(is_raw_text(&ident("Script")));
        assert!(is_raw_text(&ident("style")));
        assert!(!is_raw_text(&TagNameKind::Member(vec!["ui".into(), "script".into()])));
    }

    #[test]
    fn test_raw_text_end_needs_a_boundary() {
        assert_eq!(raw_text_end("a</script>", "script"), Some(1));
        assert_eq!(raw_text_end("a</SCRIPT >", "script"), Some(1));
        assert_eq!(raw_text_end("a</scripts>b</script>", "script"), Some(12));
        assert_eq!(raw_text_end("x</scriptx && y</script", "script"), Some(15));
        assert_eq!(raw_text_end("p</style>q</script>", "script"), Some(10));
        assert_eq!(raw_text_end("a</scripts>", "script"), None);
    }

    #[test]
    fn test_names_match() {
        assert!(names_match(TagFamily::Html, "DIV", "div"));
        assert!(!names_match(TagFamily::Custom, "Card", "card"));
        assert!(names_match(TagFamily::Custom, "Ui.Card", "Ui.Card"));
    }
}
