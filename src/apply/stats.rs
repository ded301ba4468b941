use serde::Serialize;

/// Per-run line counters for a substitution pass.
///
/// `not_found` is a subset of `unchanged`, so
/// `total == translated + unchanged + skipped` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub translated: usize,
    pub unchanged: usize,
    pub skipped: usize,
    pub not_found: usize,
}

impl Stats {
    pub fn is_consistent(&self) -> bool {
        self.total == self.translated + self.unchanged + self.skipped
            && self.not_found <= self.unchanged
    }
}
