use crate::error::{IngestError, Result};
use tree_sitter::{Parser, Tree};

/// Tree-sitter parser configured for JavaScript
pub struct SourceParser {
    parser: Parser,
}

impl SourceParser {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_javascript::LANGUAGE.into())
            .map_err(|e| IngestError::Language(e.to_string()))?;

        Ok(Self { parser })
    }

    pub fn parse(&mut self, content: &str) -> Result<Tree> {
        self.parser
            .parse(content, None)
            .ok_or_else(|| IngestError::Parse("parser produced no tree".to_string()))
    }
}
