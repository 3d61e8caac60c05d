//! Generation error types.
//!
//! These error kinds are shared by the loader, the composer and the
//! renderer so the caller can tell validation problems apart from
//! generation failures without string matching.

use std::path::PathBuf;

use thiserror::Error;

use crate::model::Category;

/// Errors that can occur while generating a test.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The backing question table is missing or unreadable.
    #[error("{category} question bank unavailable ({}): {reason}", .path.display())]
    BankUnavailable {
        category: Category,
        path: PathBuf,
        reason: String,
    },

    /// The table exists but holds no questions.
    #[error("{category} question bank is empty")]
    BankEmpty { category: Category },

    /// The requested question count is out of range.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// More questions were requested than the bank holds.
    #[error(
        "requested {requested} {category} questions but the bank only has {available}; \
         try {available} or fewer"
    )]
    InsufficientBank {
        category: Category,
        requested: usize,
        available: usize,
    },

    /// PDF encoding failed.
    #[error("failed to render document: {0}")]
    Render(String),
}

impl GenerateError {
    /// Returns `true` for errors caused by the request itself rather than by
    /// the bank or the renderer.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            GenerateError::InvalidRequest(_) | GenerateError::InsufficientBank { .. }
        )
    }
}
