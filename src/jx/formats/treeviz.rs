//! Treeviz formatter
//!
//! One line per node, nesting drawn with box characters, labels truncated to 30 characters:
//!
//!     ⧉ Card
//!     ├─ ↳ java.util.List
//!     └─ § Card
//!        ├─ ∷ String title
//!        └─ ◇ div
//!           ├─ @ class=card
//!           └─ ◇ h2
//!              └─ λ title
//!
//! Icons
//!     File level:
//!         SourceFile: ⧉
//!         Import: ↳
//!         Module: §
//!         Parameter: ∷
//!     Markup:
//!         Element: ◇
//!         Fragment: ◌
//!         Attribute: @
//!         SpreadAttribute / Spread: …
//!         Expression: λ
//!     Leaves:
//!         Text: ◦
//!         Entity: &
//!         RawText: 𝒱
//!         Comment: #
//!         Doctype: !
//!     Recovery:
//!         ErroneousEndTag: ✗
//!         Error: ⚠

use super::registry::{FormatError, Formatter};
use crate::jx::ast::{snapshot_from_source_file, AstSnapshot, SourceFile};

fn icon(node_type: &str) -> &'static str {
    match node_type {
        "SourceFile" => "⧉",
        "Import" => "↳",
        "Module" => "§",
        "Parameter" => "∷",
        "Element" => "◇",
        "Fragment" => "◌",
        "Attribute" => "@",
        "SpreadAttribute" | "Spread" => "…",
        "Expression" => "λ",
        "Text" => "◦",
        "Entity" => "&",
        "RawText" => "𝒱",
        "Comment" => "#",
        "Doctype" => "!",
        "ErroneousEndTag" => "✗",
        "Error" => "⚠",
        _ => "?",
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    let single_line = s.replace('\n', "↵");
    if single_line.chars().count() > max_chars {
        let mut truncated = single_line.chars().take(max_chars).collect::<String>();
        truncated.push('…');
        truncated
    } else {
        single_line
    }
}

fn label(node: &AstSnapshot) -> String {
    match (node.node_type.as_str(), node.attributes.get("value"), node.attributes.get("type")) {
        ("Attribute", Some(value), _) => format!("{}={}", node.label, value),
        ("Parameter", _, Some(ty)) => format!("{} {}", ty, node.label),
        _ => node.label.clone(),
    }
}

pub fn to_treeviz_str(file: &SourceFile) -> String {
    let root = snapshot_from_source_file(file);
    let mut result = format!("{} {}\n", icon(&root.node_type), truncate(&label(&root), 30));
    append_children(&mut result, &root.children, "");
    result
}

fn append_node(result: &mut String, node: &AstSnapshot, prefix: &str, is_last: bool) {
    let connector = if is_last { "└─" } else { "├─" };
    result.push_str(&format!(
        "{}{} {} {}\n",
        prefix,
        connector,
        icon(&node.node_type),
        truncate(&label(node), 30)
    ));
    let new_prefix = format!("{}{}", prefix, if is_last { "   " } else { "│  " });
    append_children(result, &node.children, &new_prefix);
}

fn append_children(result: &mut String, children: &[AstSnapshot], prefix: &str) {
    for (i, child) in children.iter().enumerate() {
        append_node(result, child, prefix, i + 1 == children.len());
    }
}

pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, file: &SourceFile) -> Result<String, FormatError> {
        Ok(to_treeviz_str(file))
    }

    fn description(&self) -> &str {
        "One line per node with icons"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jx::parsing::parse_source;

    #[test]
    fn test_treeviz_layout() {
        let file = parse_source("Card(String title) { <div class=\"card\"><h2>{title}</h2></div> }")
            .unwrap()
            .value;
        let lines: Vec<_> = to_treeviz_str(&file).lines().map(str::to_string).collect();
        assert_eq!(
            lines,
            vec![
                "⧉ Card",
                "└─ § Card",
                "   ├─ ∷ String title",
                "   └─ ◇ div",
                "      ├─ @ class=card",
                "      └─ ◇ h2",
                "         └─ λ title",
            ]
        );
    }

    #[test]
    fn test_long_labels_are_truncated() {
        let text = "x".repeat(40);
        let file = parse_source(&format!("M() {{ <p>{}</p> }}", text)).unwrap().value;
        let output = to_treeviz_str(&file);
        let last = output.lines().last().unwrap();
        assert!(last.ends_with(&format!("{}…", "x".repeat(30))));
    }
}
