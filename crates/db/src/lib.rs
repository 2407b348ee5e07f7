//! # Srcgraph Db
//!
//! Execution-side plumbing for assembled statements.
//!
//! The query core never touches a connection; a finalized
//! [`srcgraph_query::Query`] is handed to an [`Executor`] through a
//! [`Session`]. Transactions, retries, and connectivity belong to whatever
//! sits behind the executor.
//!
//! Also hosts the canned Cypher resources compiled into the binary and the
//! CSV assembler used for bulk-import export.

mod csv_assembler;
mod error;
mod executor;
mod resources;
mod session;

pub use csv_assembler::CsvAssembler;
pub use error::{DbError, Result};
pub use executor::{ExecutionSummary, Executor, MemoryExecutor, RecordedStatement, ScriptWriter};
pub use resources::CannedQuery;
pub use session::Session;
