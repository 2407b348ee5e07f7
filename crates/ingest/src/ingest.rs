use crate::error::Result;
use crate::parser::SourceParser;
use crate::sink::QuerySink;
use crate::walker::ScopeWalker;
use srcgraph_db::CsvAssembler;
use srcgraph_query::Query;
use std::time::Instant;

/// Turns one source file into one executable statement (or CSV rows).
///
/// Holds the parser so repeated files reuse the grammar; each file gets its
/// own builder, so concurrent pipelines use one `FileIngest` per worker.
pub struct FileIngest {
    parser: SourceParser,
}

impl FileIngest {
    pub fn new() -> Result<Self> {
        Ok(Self {
            parser: SourceParser::new()?,
        })
    }

    /// Parse, walk, and finalize one file into a single statement
    pub fn ingest_source(&mut self, session_id: &str, path: &str, content: &str) -> Result<Query> {
        let started = Instant::now();
        let tree = self.parser.parse(content)?;
        log::info!("{path} PARSE {}ms", started.elapsed().as_millis());

        let started = Instant::now();
        let mut sink = QuerySink::new();
        ScopeWalker::run(&mut sink, &tree, content, path, session_id)?;
        log::info!("{path} WALK {}ms", started.elapsed().as_millis());

        sink.into_query()
    }

    /// Parse and walk one file into bulk-import rows
    pub fn ingest_source_csv(
        &mut self,
        assembler: &mut CsvAssembler,
        session_id: &str,
        path: &str,
        content: &str,
    ) -> Result<()> {
        let tree = self.parser.parse(content)?;
        ScopeWalker::run(assembler, &tree, content, path, session_id)
    }
}
