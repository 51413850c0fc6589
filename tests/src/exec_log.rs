use crate::logging_connection::StatementOp;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A wrapper around the operations log that provides a clean API for tests
pub struct ExecLog {
    ops: Arc<Mutex<Vec<StatementOp>>>,
}

impl ExecLog {
    pub(crate) fn new(ops: Arc<Mutex<Vec<StatementOp>>>) -> Self {
        Self { ops }
    }

    fn ops(&self) -> MutexGuard<'_, Vec<StatementOp>> {
        self.ops.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get the number of logged statements
    pub fn len(&self) -> usize {
        self.ops().len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.ops().is_empty()
    }

    /// SQL of every logged statement, in execution order
    pub fn sql(&self) -> Vec<String> {
        self.ops().iter().map(|op| op.sql.clone()).collect()
    }

    /// Remove and return the oldest logged statement
    #[track_caller]
    pub fn pop(&self) -> StatementOp {
        let mut ops = self.ops();
        assert!(!ops.is_empty(), "no statements logged");
        ops.remove(0)
    }

    /// Clear all logged statements
    pub fn clear(&self) {
        self.ops().clear();
    }
}
