use thiserror::Error;

/// Outcomes of an attendance submission that are not a success.
///
/// `AlreadySubmitted` and `DuplicateSlot` are normal states the caller
/// branches on, not failures; `Validation` rejects the payload before any
/// persistence; `Database`/`Io` are generic storage failures with no
/// automatic retry. None of these are fatal to the process.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("{0}")]
    Validation(String),

    #[error("attendance already submitted for this business day")]
    AlreadySubmitted,

    #[error("this time slot is already recorded for the selected date")]
    DuplicateSlot,

    #[error("database failure")]
    Database(#[from] sqlx::Error),

    #[error("photo storage failure")]
    Io(#[from] std::io::Error),
}

impl SubmissionError {
    /// SQLSTATE 23000 on insert means the storage-level one-per-day gate
    /// fired; everything else stays a storage failure.
    pub fn from_insert_error(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some("23000") {
                return SubmissionError::AlreadySubmitted;
            }
        }
        SubmissionError::Database(err)
    }
}
