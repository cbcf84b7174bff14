use std::io;
use thiserror::Error;
use super::DocId;

// Errors raised while turning a query string into an operator tree.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum QueryError {
    #[error("query syntax error at token {position}: {message}")]
    Syntax { message: String, position: usize },
    #[error("unbalanced query: {0} operator(s) left open")]
    Unbalanced(usize),
    #[error("invalid #NEAR window: {0}")]
    InvalidWindow(String),
    #[error("query has no searchable terms")]
    NoTerms,
}

// Errors raised while evaluating an operator tree against the index.
// Any of these aborts the current query only.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvalError {
    #[error("field '{field}' has no collection statistics")]
    EmptyFieldStatistics { field: String },
    #[error("no document length for docid {docid} in field '{field}'")]
    MissingDocumentLength { field: String, docid: DocId },
    #[error("{operator} expects inverted-list arguments, got a score list")]
    ExpectedInvertedList { operator: &'static str },
    #[error("internal docid {0} has no external id")]
    UnknownDocument(DocId),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot parse parameter file: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{path}:{line}: {message}")]
    QueryFile { path: String, line: usize, message: String },
    #[error("index file error: {0}")]
    Index(#[from] bincode::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
