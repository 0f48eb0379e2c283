use thiserror::Error;

/// Why a store mutation was refused. The store is untouched when one of
/// these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("one or more fields are invalid")]
    InvalidFields,
    #[error("id {0} already exists")]
    DuplicateId(i64),
    #[error("no record with id {0}")]
    NotFound(i64),
}
