//! # Srcgraph Ingest
//!
//! Translates one JavaScript source file into one graph-mutation statement.
//!
//! ## Pipeline
//!
//! ```text
//! Source file
//!     │
//!     ├──> SourceParser (tree-sitter)
//!     │      └─> Syntax tree
//!     │
//!     ├──> ScopeWalker
//!     │      ├─ scope stack (module / function / block)
//!     │      ├─ declarations, containment, reference resolution
//!     │      └─ emits into a GraphSink
//!     │
//!     └──> Sink
//!            ├─ QuerySink  -> one parameterized Cypher statement
//!            └─ CsvAssembler -> bulk-import rows
//! ```

mod error;
mod ingest;
mod parser;
mod sink;
mod walker;

pub use error::{IngestError, Result};
pub use ingest::FileIngest;
pub use parser::SourceParser;
pub use sink::{GraphSink, QuerySink, RelKind};
pub use walker::ScopeWalker;
