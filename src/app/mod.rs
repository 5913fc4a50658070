pub mod comments;
pub mod likes;
pub mod threads;

/// Failure modes of the service layer. `NoRowsAffected` is a logical
/// rejection (ownership filter matched nothing, or a write guard
/// suppressed the statement), distinct from a storage failure.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Storage(#[from] sqlx::Error),

    #[error("no rows affected")]
    NoRowsAffected,
}
