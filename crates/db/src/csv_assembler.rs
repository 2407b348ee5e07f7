use crate::error::Result;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Serialize)]
struct NodeRow {
    id: String,
    label: String,
    name: Option<String>,
    line: Option<usize>,
    path: Option<String>,
    session: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct RelationshipRow {
    start: String,
    end: String,
    #[serde(rename = "type")]
    rel_type: String,
}

/// Accumulates node and relationship rows for bulk import.
///
/// Statement variables are only unique within one file's statement, so rows
/// are keyed by `<file path>#<variable>`; call [`CsvAssembler::begin_file`]
/// before emitting a file's rows.
#[derive(Debug, Default)]
pub struct CsvAssembler {
    file_prefix: String,
    nodes: Vec<NodeRow>,
    relationships: Vec<RelationshipRow>,
}

impl CsvAssembler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope subsequent rows to one source file
    pub fn begin_file(&mut self, path: &str) {
        self.file_prefix = path.to_string();
    }

    fn row_id(&self, var: &str) -> String {
        format!("{}#{}", self.file_prefix, var)
    }

    /// Add the file node itself
    pub fn add_file_node(&mut self, var: &str, path: &str, session_id: &str) {
        self.nodes.push(NodeRow {
            id: self.row_id(var),
            label: "File".to_string(),
            name: None,
            line: None,
            path: Some(path.to_string()),
            session: Some(session_id.to_string()),
        });
    }

    /// Add a declaration node (function, class, variable)
    pub fn add_node(&mut self, var: &str, label: &str, name: &str, line: usize) {
        self.nodes.push(NodeRow {
            id: self.row_id(var),
            label: label.to_string(),
            name: Some(name.to_string()),
            line: Some(line),
            path: None,
            session: None,
        });
    }

    /// Add a relationship between two variables of the current file
    pub fn add_relationship(&mut self, from_var: &str, to_var: &str, rel_type: &str) {
        self.relationships.push(RelationshipRow {
            start: self.row_id(from_var),
            end: self.row_id(to_var),
            rel_type: rel_type.to_string(),
        });
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    /// Write `nodes.csv` and `relationships.csv` into `dir`
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        let mut nodes = csv::Writer::from_path(dir.join("nodes.csv"))?;
        for row in &self.nodes {
            nodes.serialize(row)?;
        }
        nodes.flush()?;

        let mut relationships = csv::Writer::from_path(dir.join("relationships.csv"))?;
        for row in &self.relationships {
            relationships.serialize(row)?;
        }
        relationships.flush()?;

        log::info!(
            "Wrote {} nodes and {} relationships to {}",
            self.nodes.len(),
            self.relationships.len(),
            dir.display()
        );
        Ok(())
    }
}
