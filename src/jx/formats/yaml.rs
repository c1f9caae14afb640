//! YAML rendition of the tree snapshot

use super::registry::{FormatError, Formatter};
use crate::jx::ast::{snapshot_from_source_file, SourceFile};

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, file: &SourceFile) -> Result<String, FormatError> {
        serde_yaml::to_string(&snapshot_from_source_file(file))
            .map_err(|err| FormatError::SerializationError(err.to_string()))
    }

    fn description(&self) -> &str {
        "Location-free tree snapshot as YAML"
    }
}
