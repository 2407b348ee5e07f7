/// The nine Cypher clause families a statement is assembled from.
///
/// Declaration order is the canonical rendering order; see the openCypher
/// grammar railroad for the reference ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClauseKind {
    MatchWhere,
    Unwind,
    Merge,
    Create,
    Set,
    Delete,
    Remove,
    With,
    Return,
}

impl ClauseKind {
    pub const COUNT: usize = 9;

    /// Canonical rendering order, independent of insertion order
    pub const ORDER: [Self; Self::COUNT] = [
        Self::MatchWhere,
        Self::Unwind,
        Self::Merge,
        Self::Create,
        Self::Set,
        Self::Delete,
        Self::Remove,
        Self::With,
        Self::Return,
    ];

    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MatchWhere => "matchWhere",
            Self::Unwind => "unwind",
            Self::Merge => "merge",
            Self::Create => "create",
            Self::Set => "set",
            Self::Delete => "delete",
            Self::Remove => "remove",
            Self::With => "with",
            Self::Return => "return",
        }
    }
}
