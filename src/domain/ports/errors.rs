use thiserror::Error;

/// Failure surface of the persistence collaborator.
///
/// Unique-constraint violations get their own variant so the service layer
/// can translate them into a descriptive duplicate error; every other store
/// failure propagates untouched.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("query failed: {0}")]
    Query(#[from] sqlx::Error),

    #[error("unique constraint violated")]
    UniqueViolation,

    #[error("row decode failed: {0}")]
    Decode(String),

    #[error("schema script failed: {0}")]
    SchemaScript(String),
}
