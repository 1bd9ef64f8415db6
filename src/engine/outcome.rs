use crate::source::traits::FetchError;

/// Terminal classification of one identifier's fetch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The artifact was already present locally; no network access happened.
    CacheHit,
    /// The artifact was downloaded and persisted.
    Downloaded,
    /// The attempt failed; nothing was persisted.
    Failed(FetchError),
}

impl FetchOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, FetchOutcome::Failed(_))
    }
}
