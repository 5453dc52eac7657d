use turnwise_core::error::CoreError;

/// Error type for repository operations that enforce domain rules inside
/// their own transaction (the turn toggle, pairing creation).
///
/// Plain CRUD operations keep returning `sqlx::Error`; this wrapper exists
/// so a rule violation discovered mid-transaction surfaces as the domain
/// error it is rather than a storage failure.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}
