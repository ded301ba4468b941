use std::collections::HashMap;

/// Lookup table from a Simplified-only code point to its Traditional form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantTable {
    pairs: HashMap<char, char>,
}

impl VariantTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, simplified: char, traditional: char) {
        self.pairs.insert(simplified, traditional);
    }

    /// Traditional counterpart of `ch` if `ch` is a known Simplified-only variant
    pub fn traditional_of(&self, ch: char) -> Option<char> {
        self.pairs.get(&ch).copied()
    }

    pub fn contains(&self, ch: char) -> bool {
        self.pairs.contains_key(&ch)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl FromIterator<(char, char)> for VariantTable {
    fn from_iter<I: IntoIterator<Item = (char, char)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

/// Curated sample of common characters that only exist in Simplified form.
///
/// Far from exhaustive; a complete check needs a full conversion table.
pub fn default_variants() -> VariantTable {
    [
        ('国', '國'),
        ('门', '門'),
        ('长', '長'),
        ('开', '開'),
        ('车', '車'),
        ('贝', '貝'),
        ('见', '見'),
        ('气', '氣'),
        ('无', '無'),
        ('专', '專'),
    ]
    .into_iter()
    .collect()
}
