use thiserror::Error;

use crate::contract::error::StoreError;
use crate::domain::edit::DraftError;

/// Why a table action was not applied. The committed rows are untouched
/// whenever one of these is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error(transparent)]
    Remote(#[from] StoreError),

    #[error("draft cannot be saved: {0}")]
    InvalidDraft(#[from] DraftError),
}
