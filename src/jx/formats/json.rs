//! JSON rendition of the tree snapshot

use super::registry::{FormatError, Formatter};
use crate::jx::ast::{snapshot_from_source_file, SourceFile};

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, file: &SourceFile) -> Result<String, FormatError> {
        serde_json::to_string_pretty(&snapshot_from_source_file(file))
            .map_err(|err| FormatError::SerializationError(err.to_string()))
    }

    fn description(&self) -> &str {
        "Location-free tree snapshot as JSON"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jx::ast::AstSnapshot;
    use crate::jx::parsing::parse_source;

    #[test]
    fn test_json_reads_back_as_snapshot() {
        let file = parse_source("M() { <a href=\"#\">x</a> }").unwrap().value;
        let json = JsonFormatter.serialize(&file).unwrap();
        let snapshot: AstSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, snapshot_from_source_file(&file));
        assert!(json.contains("\"node_type\": \"Element\""));
    }
}
