//! Saga infrastructure: multi-row writes with compensation.
//!
//! A saga performs its steps in order and records an undo action after each
//! successful one. On failure the recorded undo actions run in reverse order
//! and the original error is returned, wrapped with the rollback outcome.

pub mod leftover;

use tracing::{debug, warn};

use crate::error::ServiceError;
use crate::store::StoreError;

type Undo<'a> = Box<dyn FnOnce() -> Result<(), StoreError> + 'a>;

/// Undo log of one saga run.
pub struct Compensations<'a> {
    operation: &'static str,
    steps: Vec<(String, Undo<'a>)>,
}

impl<'a> Compensations<'a> {
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            steps: Vec::new(),
        }
    }

    /// Register the undo action for a step that just succeeded.
    pub fn record(
        &mut self,
        label: impl Into<String>,
        undo: impl FnOnce() -> Result<(), StoreError> + 'a,
    ) {
        self.steps.push((label.into(), Box::new(undo)));
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// All steps succeeded; forget the undo actions.
    pub fn commit(self) {
        debug!(operation = self.operation, steps = self.steps.len(), "saga committed");
    }

    /// Run every undo action, newest first. Keeps going after a failed undo
    /// and returns the first failure.
    pub fn rollback(self) -> Result<(), StoreError> {
        let mut first_error = None;
        for (label, undo) in self.steps.into_iter().rev() {
            if let Err(e) = undo() {
                warn!(operation = self.operation, step = %label, error = %e, "compensation failed");
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Roll back and wrap `cause` with the rollback outcome.
    pub fn abort(self, cause: impl Into<ServiceError>) -> ServiceError {
        let operation = self.operation;
        let cause = cause.into();
        warn!(
            operation,
            error = %cause,
            steps = self.steps.len(),
            "saga step failed, compensating"
        );
        let rollback_error = self.rollback().err();
        ServiceError::Saga {
            operation,
            source: Box::new(cause),
            compensated: rollback_error.is_none(),
            rollback_error,
        }
    }
}
