//! Patch configuration.
//!
//! Options are read from a JSON object using the camelCase names of the
//! original tool, e.g. `{ "looseIncludes": true }`. Unknown keys are ignored
//! so a shared options file can carry settings for other stages.

use serde::{Deserialize, Deserializer, Serialize};

/// Accepts both JSON booleans and their common string spellings.
///
/// Handles option files that contain `"looseIncludes": "true"` instead of
/// `"looseIncludes": true`.
fn deserialize_bool_or_string<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    match BoolOrString::deserialize(deserializer)? {
        BoolOrString::Bool(b) => Ok(b),
        BoolOrString::String(s) => {
            let normalized = s.trim().to_lowercase();
            match normalized.as_str() {
                "true" | "1" | "yes" | "on" => Ok(true),
                "false" | "0" | "no" | "off" => Ok(false),
                _ => Err(Error::custom(format!(
                    "invalid boolean value: '{}'. Expected true, false, 'true', or 'false'",
                    s
                ))),
            }
        }
    }
}

/// Options consumed by the main-stage patchers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchOptions {
    /// Emit `b.includes(a)` for `a in b` without the defensive
    /// `Array.from(...)` conversion of the right operand.
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub loose_includes: bool,
}

impl PatchOptions {
    /// Parse options from a JSON object.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Builder-style setter for `loose_includes`.
    #[must_use]
    pub fn with_loose_includes(mut self, loose_includes: bool) -> Self {
        self.loose_includes = loose_includes;
        self
    }
}

#[cfg(test)]
#[path = "../tests/options_tests.rs"]
mod tests;
