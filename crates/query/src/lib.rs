//! # Srcgraph Query
//!
//! Ordered, multi-clause Cypher statement assembly.
//!
//! An AST/scope walker visits a parsed source file and emits small typed
//! fragments (match, merge, create, set, ...). The builder accumulates them,
//! renames every parameter to a globally unique name, and renders one
//! parameterized statement in canonical clause order.
//!
//! ## Architecture
//!
//! ```text
//! Walker (per file)
//!     │
//!     ├──> QueryBuilder
//!     │      ├─ match_node / where_eq / set / add_fragment ...
//!     │      ├─ one bucket per ClauseKind, insertion order kept
//!     │      └─ caller parameter keys renamed to fresh identifiers
//!     │
//!     └──> build()
//!            └─> Query { template, parameters } — ready for execution
//! ```
//!
//! ## Example
//!
//! ```
//! use srcgraph_query::QueryBuilder;
//! use std::collections::HashMap;
//!
//! let query = QueryBuilder::new()
//!     .match_node("n", Some("File"), &[], HashMap::new())
//!     .set("n", "status", "parsed")
//!     .build()
//!     .unwrap();
//!
//! assert!(query.template().starts_with("MATCH (n:File)"));
//! ```

mod builder;
mod clause;
mod error;
mod ident;
mod query;

pub use builder::QueryBuilder;
pub use clause::ClauseKind;
pub use error::{QueryError, Result};
pub use ident::fresh_param_id;
pub use query::Query;
