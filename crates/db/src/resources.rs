/// Pre-written Cypher statements compiled into the binary.
///
/// These cover maintenance operations that are not assembled per file, such
/// as stamping the commit hash or removing an ingested file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CannedQuery {
    SetCommitHash,
    RemoveFile,
}

impl CannedQuery {
    /// Statement text, with `{name}` parameter placeholders
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::SetCommitHash => include_str!("../queries/set_commit_hash.cypher"),
            Self::RemoveFile => include_str!("../queries/remove_file.cypher"),
        }
    }
}
