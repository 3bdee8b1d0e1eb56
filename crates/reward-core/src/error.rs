//! Error types for reward operations.

use thiserror::Error;

/// Errors surfaced by a [`RewardStore`](crate::RewardStore) implementation.
///
/// The variants carry the retry classification: only [`Conflict`] is
/// transient. A store must never map an I/O failure to "no boost" or
/// "no event" — those are [`Unavailable`] and abort the submission.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Concurrent modification of the same user's balance or streak rows.
    /// Transient; the caller retries with freshly read state.
    #[error("conflicting update: {0}")]
    Conflict(String),

    /// The backing store failed (connection, query, commit). Fatal for
    /// this submission.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A persisted record failed typed validation at the lookup boundary
    /// (e.g. a boost multiplier <= 1). Fatal; never defaulted over.
    #[error("malformed {entity} record: {detail}")]
    Malformed {
        entity: &'static str,
        detail: String,
    },

    /// A referenced entity does not exist. Fatal.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
}

impl StoreError {
    /// Whether retrying with freshly read state can succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Conflict(_))
    }
}

/// Errors returned by the reward engine's entry point.
#[derive(Debug, Error)]
pub enum RewardError {
    /// The quest configuration is invalid (negative base reward). The
    /// caller must fix the quest; the engine does not repair it.
    #[error("invalid quest configuration: {0}")]
    InvalidQuest(String),

    /// The store failed; see [`StoreError`] for the classification.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Every retry attempt hit a conflict.
    #[error("reward commit failed after {attempts} attempts: {last}")]
    RetriesExhausted { attempts: u32, last: StoreError },
}

impl RewardError {
    /// Whether the caller could usefully retry the whole submission.
    pub fn is_retryable(&self) -> bool {
        match self {
            RewardError::Store(e) => e.is_retryable(),
            _ => false,
        }
    }
}
