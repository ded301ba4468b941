use serde::{Deserialize, Serialize};

/// A single key/value pair taken from an INI line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationEntry {
    /// The key, possibly with a suffix such as `,P` (e.g., "ASD_Active,P")
    pub key: String,
    /// The value (e.g., "Active")
    pub value: String,
    /// The line number where the key is defined (1-indexed)
    pub line: usize,
}
