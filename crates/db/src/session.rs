use crate::error::Result;
use crate::executor::{ExecutionSummary, Executor};
use crate::resources::CannedQuery;
use serde_json::Value;
use srcgraph_query::Query;
use std::collections::HashMap;

/// One logical unit of work against the graph.
///
/// Owns an executor and forwards finalized statements to it. The builder
/// side assumes finalize-then-execute happens at most once per unit;
/// transaction discipline lives behind the executor.
pub struct Session<E: Executor> {
    executor: E,
}

impl<E: Executor> Session<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Execute a finalized query
    pub fn run(&mut self, query: &Query) -> Result<ExecutionSummary> {
        log::debug!(
            "executing statement ({} chars, {} parameters)",
            query.template().len(),
            query.parameters().len()
        );
        self.executor.execute(query.template(), query.parameters())
    }

    /// Execute a raw template with explicit parameters
    pub fn run_template(
        &mut self,
        template: &str,
        parameters: &HashMap<String, Value>,
    ) -> Result<ExecutionSummary> {
        self.executor.execute(template, parameters)
    }

    /// Stamp the current commit hash on the branch node
    pub fn set_commit_hash(&mut self, commit_hash: &str) -> Result<ExecutionSummary> {
        let parameters = HashMap::from([("commithash".to_string(), Value::from(commit_hash))]);
        self.run_template(CannedQuery::SetCommitHash.text(), &parameters)
    }

    /// Detach and delete everything ingested for one file in a session
    pub fn remove_file(&mut self, session_id: &str, path: &str) -> Result<ExecutionSummary> {
        let parameters = HashMap::from([
            ("sessionid".to_string(), Value::from(session_id)),
            ("path".to_string(), Value::from(path)),
        ]);
        self.run_template(CannedQuery::RemoveFile.text(), &parameters)
    }

    pub fn into_inner(self) -> E {
        self.executor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::MemoryExecutor;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_run_forwards_template_and_parameters() {
        let query = Query::new(
            "MATCH (n) SET n.x = {p1}",
            HashMap::from([("p1".to_string(), json!(1))]),
        );

        let mut session = Session::new(MemoryExecutor::new());
        let summary = session.run(&query).unwrap();
        assert_eq!(summary.parameter_count, 1);

        let executor = session.into_inner();
        assert_eq!(executor.statements[0].template, "MATCH (n) SET n.x = {p1}");
        assert_eq!(executor.statements[0].parameters["p1"], json!(1));
    }

    #[test]
    fn test_remove_file_binds_session_and_path() {
        let mut session = Session::new(MemoryExecutor::new());
        session.remove_file("s1", "/a.js").unwrap();

        let executor = session.into_inner();
        let recorded = &executor.statements[0];
        assert_eq!(recorded.parameters["sessionid"], json!("s1"));
        assert_eq!(recorded.parameters["path"], json!("/a.js"));
        assert!(recorded.template.contains("{path}"));
    }
}
