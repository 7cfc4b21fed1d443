//! Errors shared across services

/// No entity of the given kind exists under the requested id.
///
/// Raised both for ids that match nothing and for ids the store could not
/// parse; callers are not told which.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Entity {kind} with id {id} not found")]
pub struct EntityNotFoundError {
    pub kind: &'static str,
    pub id: String,
}

impl EntityNotFoundError {
    pub fn new(kind: &'static str, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}
