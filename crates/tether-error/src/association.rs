/// An alias whose join instructions cannot be classified as a one-to-many or
/// many-to-many association.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssociationError {
    #[error("Association `{alias}` has {count} join instructions; expected 1 or 2")]
    UnsupportedCardinality { alias: String, count: usize },

    #[error(
        "Association `{alias}` does not chain: first join targets `{junction}` but second join starts at `{next_parent}`"
    )]
    BrokenChain {
        alias: String,
        junction: String,
        next_parent: String,
    },

    #[error("Association `{alias}` starts at `{found}` instead of the parent table `{expected}`")]
    ForeignAnchor {
        alias: String,
        expected: String,
        found: String,
    },
}

impl AssociationError {
    pub fn alias(&self) -> &str {
        match self {
            AssociationError::UnsupportedCardinality { alias, .. }
            | AssociationError::BrokenChain { alias, .. }
            | AssociationError::ForeignAnchor { alias, .. } => alias,
        }
    }
}
