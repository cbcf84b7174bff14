pub mod error;
pub mod config;
pub mod tokenizer;
pub mod analyzer;
pub mod index;
pub mod ranking;
pub mod query;
pub mod eval;
pub mod engine;
pub mod output;
pub mod query_file;

pub type DocId = u32;
pub type TermOffset = u32;

// field searched by unqualified query terms
pub const DEFAULT_FIELD: &str = "body";
// field qualifiers understood by the query parser, e.g. `apple.title`
pub const KNOWN_FIELDS: [&str; 5] = ["url", "title", "keywords", "inlink", "body"];
