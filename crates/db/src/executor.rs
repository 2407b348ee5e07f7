use crate::error::Result;
use serde_json::Value;
use std::collections::HashMap;
use std::io::Write;

/// Outcome of executing one statement
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionSummary {
    /// Number of parameters bound in the executed statement
    pub parameter_count: usize,
}

/// The sole execution boundary of the system.
///
/// The caller finalizes a statement and hands template plus parameters over;
/// the implementation decides what execution means (a driver, a script
/// file, an in-memory recording).
pub trait Executor {
    fn execute(
        &mut self,
        template: &str,
        parameters: &HashMap<String, Value>,
    ) -> Result<ExecutionSummary>;
}

/// One statement captured by [`MemoryExecutor`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedStatement {
    pub template: String,
    pub parameters: HashMap<String, Value>,
}

/// Records statements instead of running them. Used in tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryExecutor {
    pub statements: Vec<RecordedStatement>,
}

impl MemoryExecutor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Executor for MemoryExecutor {
    fn execute(
        &mut self,
        template: &str,
        parameters: &HashMap<String, Value>,
    ) -> Result<ExecutionSummary> {
        self.statements.push(RecordedStatement {
            template: template.to_string(),
            parameters: parameters.clone(),
        });

        Ok(ExecutionSummary {
            parameter_count: parameters.len(),
        })
    }
}

/// Serializes each statement as one JSON line for external replay:
/// `{"statement": "...", "parameters": {...}}`.
pub struct ScriptWriter<W: Write> {
    writer: W,
}

impl<W: Write> ScriptWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Executor for ScriptWriter<W> {
    fn execute(
        &mut self,
        template: &str,
        parameters: &HashMap<String, Value>,
    ) -> Result<ExecutionSummary> {
        let line = serde_json::json!({
            "statement": template,
            "parameters": parameters,
        });
        serde_json::to_writer(&mut self.writer, &line)?;
        self.writer.write_all(b"\n")?;

        Ok(ExecutionSummary {
            parameter_count: parameters.len(),
        })
    }
}
