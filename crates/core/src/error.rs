use thiserror::Error;

use crate::model::ParseIdError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Id(#[from] ParseIdError),
    #[error("unknown category: {0}")]
    UnknownCategory(String),
}
