use thiserror::Error;

pub type Result<T> = std::result::Result<T, IngestError>;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Failed to load grammar: {0}")]
    Language(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid UTF-8 in source: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("Query assembly error: {0}")]
    Query(#[from] srcgraph_query::QueryError),
}
