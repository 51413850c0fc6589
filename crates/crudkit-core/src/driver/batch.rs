/// The per-entry outcome of a batch execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchResult {
    /// The entry affected this many rows
    Count(u64),

    /// The entry succeeded but the driver reports no row count
    SuccessNoInfo,

    /// The entry failed without failing the batch
    ExecuteFailed,
}

impl BatchResult {
    /// Rows counted for this entry: "success, no info" counts as one row and
    /// a failed entry as none.
    pub const fn affected(&self) -> u64 {
        match self {
            Self::Count(count) => *count,
            Self::SuccessNoInfo => 1,
            Self::ExecuteFailed => 0,
        }
    }
}

/// Sums the rows affected by a batch.
pub fn affected_row_count(results: &[BatchResult]) -> u64 {
    results.iter().map(BatchResult::affected).sum()
}
