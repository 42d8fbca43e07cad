//! Application-level errors.
//!
//! Domain errors and store errors meet here so `?` works across layers.
//! Failed multi-row writes additionally report whether their partial writes
//! were rolled back.

use siteledger_core::DomainError;

use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// A saga step failed. `compensated` is false when at least one undo step
    /// failed too; the first such failure is kept in `rollback_error`.
    #[error("{operation} failed (compensated: {compensated}): {source}")]
    Saga {
        operation: &'static str,
        source: Box<ServiceError>,
        compensated: bool,
        rollback_error: Option<StoreError>,
    },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// The domain error at the root of this failure, if any.
    pub fn domain(&self) -> Option<&DomainError> {
        match self {
            ServiceError::Domain(e) => Some(e),
            ServiceError::Store(_) => None,
            ServiceError::Saga { source, .. } => source.domain(),
        }
    }

    /// The store error at the root of this failure, if any.
    pub fn store(&self) -> Option<&StoreError> {
        match self {
            ServiceError::Domain(_) => None,
            ServiceError::Store(e) => Some(e),
            ServiceError::Saga { source, .. } => source.store(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.domain(), Some(DomainError::NotFound { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_causes_are_reachable_through_saga_wrappers() {
        let err = ServiceError::Saga {
            operation: "create leftover",
            source: Box::new(ServiceError::Store(StoreError::Unavailable("down".into()))),
            compensated: true,
            rollback_error: None,
        };
        assert!(matches!(err.store(), Some(StoreError::Unavailable(_))));
        assert!(err.domain().is_none());
        assert!(err.to_string().contains("compensated: true"));

        let nf: ServiceError = DomainError::not_found("material", "x").into();
        assert!(nf.is_not_found());
    }
}
