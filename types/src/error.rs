//! Errors raised while parsing or constructing fundamental types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("invalid member id: {0}")]
    InvalidMemberId(String),
}
