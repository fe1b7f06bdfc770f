use crate::records::RecordError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid record: {0}")]
    InvalidRecord(#[from] RecordError),
    #[error("state lock poisoned")]
    StateLock,
}
