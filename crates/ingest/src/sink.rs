use crate::error::Result;
use serde_json::{json, Value};
use srcgraph_db::CsvAssembler;
use srcgraph_query::{ClauseKind, Query, QueryBuilder};
use std::collections::HashMap;

/// Relationship kinds emitted by the walker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelKind {
    /// Scope declares a binding (function, class, variable, parameter)
    Declares,
    /// Class contains a method
    Contains,
    /// Scope reads a binding declared elsewhere
    Reads,
}

impl RelKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Declares => "DECLARES",
            Self::Contains => "CONTAINS",
            Self::Reads => "READS",
        }
    }
}

/// Where the walker's findings go.
///
/// Variables are unique within one file's traversal; a sink that outlives
/// the file (like the CSV assembler) namespaces them itself.
pub trait GraphSink {
    /// The file node the rest of the statement hangs off
    fn file(&mut self, var: &str, path: &str, session_id: &str) -> Result<()>;

    /// A declaration node with its name and source line
    fn declaration(&mut self, var: &str, label: &str, name: &str, line: usize) -> Result<()>;

    /// A relationship between two already-emitted variables
    fn edge(&mut self, from_var: &str, to_var: &str, kind: RelKind) -> Result<()>;
}

/// Sink that accumulates fragments into one statement per file
#[derive(Debug, Default)]
pub struct QuerySink {
    builder: QueryBuilder,
}

impl QuerySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Finalize the accumulated statement
    pub fn into_query(self) -> Result<Query> {
        Ok(self.builder.build()?)
    }
}

impl GraphSink for QuerySink {
    fn file(&mut self, var: &str, path: &str, session_id: &str) -> Result<()> {
        let template = format!("MERGE ({var}:File {{path: {{path}}, session: {{session}}}})");
        let parameters: HashMap<String, Value> = HashMap::from([
            ("path".to_string(), json!(path)),
            ("session".to_string(), json!(session_id)),
        ]);
        let builder = std::mem::take(&mut self.builder);
        self.builder = builder.add_fragment(ClauseKind::Merge, template, parameters);
        Ok(())
    }

    fn declaration(&mut self, var: &str, label: &str, name: &str, line: usize) -> Result<()> {
        let template = format!("CREATE ({var}:{label} {{name: {{name}}, line: {{line}}}})");
        let parameters: HashMap<String, Value> = HashMap::from([
            ("name".to_string(), json!(name)),
            ("line".to_string(), json!(line)),
        ]);
        let builder = std::mem::take(&mut self.builder);
        self.builder = builder.add_fragment(ClauseKind::Create, template, parameters);
        Ok(())
    }

    fn edge(&mut self, from_var: &str, to_var: &str, kind: RelKind) -> Result<()> {
        let template = format!("CREATE ({from_var})-[:{}]->({to_var})", kind.as_str());
        let builder = std::mem::take(&mut self.builder);
        self.builder = builder.add_fragment(ClauseKind::Create, template, HashMap::new());
        Ok(())
    }
}

impl GraphSink for CsvAssembler {
    fn file(&mut self, var: &str, path: &str, session_id: &str) -> Result<()> {
        self.begin_file(path);
        self.add_file_node(var, path, session_id);
        Ok(())
    }

    fn declaration(&mut self, var: &str, label: &str, name: &str, line: usize) -> Result<()> {
        self.add_node(var, label, name, line);
        Ok(())
    }

    fn edge(&mut self, from_var: &str, to_var: &str, kind: RelKind) -> Result<()> {
        self.add_relationship(from_var, to_var, kind.as_str());
        Ok(())
    }
}
