use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid inquiry: {0}")]
    InvalidInquiry(String),

    #[error("Invalid argument: {0}")]
    InvalidArg(String),

    #[error("Knowledge base error: {0}")]
    KnowledgeBase(String),
}

pub type Result<T> = std::result::Result<T, Error>;
