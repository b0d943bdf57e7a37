//! Error types for index construction and queries.
//!
//! Every failure here is local, synchronous, and non-transient: it reflects a
//! logic or configuration error at the call site, never an I/O or concurrency
//! hazard, so nothing is ever worth retrying.

use thiserror::Error;

/// Errors surfaced by index construction and queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    /// The tokenizer does not map the boundary token text back to itself.
    ///
    /// Raised once, at corpus construction, before any document is processed.
    /// A boundary that splits or mutates under tokenization cannot act as a
    /// single recognizable sentinel in the composite stream.
    #[error(
        "tokenizer `{tokenizer}` does not preserve boundary token {boundary:?} (tokenized to {tokenized:?})"
    )]
    InvalidBoundary {
        tokenizer: String,
        boundary: String,
        tokenized: Vec<String>,
    },

    /// A positional query fell outside the valid range.
    #[error("position {position} out of range for length {len}")]
    OutOfBounds { position: usize, len: usize },

    /// A document id that was never registered with the corpus.
    #[error("unknown document id {id:?}")]
    UnknownDocument { id: String },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, IndexError>;
