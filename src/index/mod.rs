pub mod chars;
pub mod corpus;
pub(crate) mod sort;
pub mod tokens;
pub mod types;

pub use chars::CharSuffixIndex;
pub use corpus::CorpusSuffixIndex;
pub use tokens::TokenSuffixIndex;
pub use types::*;
