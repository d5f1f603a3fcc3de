pub type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    // input errors
    #[error("premise {0} is not derived by any inference and is not asserted")]
    UnresolvedPremise(String),

    // Other
    #[error("{0}")]
    Custom(String),
}

impl Error {
    pub fn custom(s: impl Into<String>) -> Self {
        Self::Custom(s.into())
    }
    pub fn unresolved_premise(premise: impl Into<String>) -> Self {
        Self::UnresolvedPremise(premise.into())
    }
}
