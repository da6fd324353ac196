use serde::Serialize;

/// Summary of a bulk tagging run
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct BulkSummary {
    /// Association rows written
    pub tagged: usize,
    /// Entries the user chose to skip
    pub skipped: usize,
    /// Entries left untouched because the run was ended early
    pub remaining: usize,
}

impl BulkSummary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn tagged(count: usize) -> Self {
        Self {
            tagged: count,
            skipped: 0,
            remaining: 0,
        }
    }

    pub const fn add_skip(&mut self) {
        self.skipped += 1;
    }

    #[must_use]
    pub const fn ended_early(&self) -> bool {
        self.remaining > 0
    }
}
