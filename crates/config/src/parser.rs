//! Text-to-value parsing for configuration layers.

use serde_yaml::Value;

use crate::error::Result;

/// Parses the text of a configuration layer.
///
/// Returning a non-mapping value (e.g. `Null` for an empty file) is not an
/// error: the layer is treated as empty.
pub trait TextParser: Send + Sync {
    fn parse(&self, text: &str) -> Result<Value>;
}

/// [`TextParser`] for YAML.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlParser;

impl TextParser for YamlParser {
    fn parse(&self, text: &str) -> Result<Value> {
        // Always terminate the final line.
        let mut owned = String::with_capacity(text.len() + 1);
        owned.push_str(text);
        owned.push('\n');
        Ok(serde_yaml::from_str(&owned)?)
    }
}
