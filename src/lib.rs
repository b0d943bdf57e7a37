//! # TXI - Suffix-Array Text Indexing
//!
//! TXI builds in-memory suffix indexes over characters, token sequences, and
//! whole document collections, for repeated-phrase discovery and fast
//! phrase-to-document lookups.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`index`] - Suffix indexes (char, token, and corpus variants)
//! - [`tokenize`] - Tokenization trait and the reference whitespace splitter
//! - [`error`] - Typed errors shared by every index
//!
//! ## Quick Start
//!
//! ```
//! use std::collections::HashMap;
//! use txi::{CharSuffixIndex, CorpusConfig, CorpusSuffixIndex, WhitespaceTokenizer};
//!
//! // Repeated-prefix discovery over a single string.
//! let chars = CharSuffixIndex::new("abracadabra");
//! assert_eq!(chars.occurrences("abra"), vec![0, 7]);
//!
//! // Phrase search across a document collection.
//! let mut docs = HashMap::new();
//! docs.insert("d1".to_string(), "cat dog".to_string());
//! docs.insert("d2".to_string(), "dog bird".to_string());
//!
//! let corpus = CorpusSuffixIndex::build(&docs, &WhitespaceTokenizer, CorpusConfig::default())?;
//! assert_eq!(corpus.doc_text("d1")?, "cat dog");
//! assert_eq!(corpus.phrase_occurrences(&["dog"], 10).len(), 2);
//! # Ok::<(), txi::IndexError>(())
//! ```
//!
//! ## How matches stay inside documents
//!
//! The corpus index concatenates documents into one composite text separated
//! by a boundary token. The suffix comparator treats that token exactly like
//! the end of the sequence, so sorting, grouping, and lookups can share one
//! index while no phrase ever matches across two documents.
//!
//! Every index is immutable once built; shared references are safe to use
//! from multiple threads without locking.

pub mod error;
pub mod index;
pub mod tokenize;

pub use error::{IndexError, Result};
pub use index::{
    CharSuffixIndex, CorpusConfig, CorpusStats, CorpusSuffixIndex, PhraseMatch, TokenSuffixIndex,
};
pub use tokenize::{Token, Tokenizer, WhitespaceTokenizer};
