pub mod paths;
pub mod variants;

pub use paths::DefaultPaths;
pub use variants::{default_variants, VariantTable};

/// Default number of code points shown on each side of a flagged character
pub const DEFAULT_CONTEXT_WIDTH: usize = 10;

/// Settings for the encoding classifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifierConfig {
    /// When set, a valid UTF-8 buffer that contains any byte in the
    /// double-byte lead ranges is not accepted as UTF-8 outright and is
    /// tried against the Big5 and GBK byte rules first.
    pub strict_high_bytes: bool,
}

impl ClassifierConfig {
    pub fn with_strict_high_bytes(mut self, strict: bool) -> Self {
        self.strict_high_bytes = strict;
        self
    }
}

/// Settings for the secondary character scan
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub context_width: usize,
    pub variants: VariantTable,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            context_width: DEFAULT_CONTEXT_WIDTH,
            variants: default_variants(),
        }
    }
}

impl ScanConfig {
    pub fn with_context_width(mut self, width: usize) -> Self {
        self.context_width = width;
        self
    }

    pub fn with_variants(mut self, variants: VariantTable) -> Self {
        self.variants = variants;
        self
    }
}
