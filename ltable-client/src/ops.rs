/// Shared operation interface implemented by both strategies
///
/// The facade talks to one of two interchangeable implementations of this
/// trait. Per-operation semantics are defined here once and hold on both
/// paths:
///
/// - `add_entry` without overwrite fails when the id already exists;
/// - `update_entry` is a no-op, not a failure, when the id is absent;
/// - `append_entry` fails when the id is absent;
/// - `remove_entry` is idempotent.

use async_trait::async_trait;

pub(crate) type OpResult<T> = std::result::Result<T, OpFailure>;

/// Failure of a single operation attempt, before any error-surface policy
/// (throwing vs. non-throwing) is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum OpFailure {
    /// A reply arrived but carried the wrong message kind.
    Mismatch {
        expected: &'static str,
        actual: &'static str,
    },
    /// Anything else: transport failure, timeout, or a store-reported
    /// failure reason.
    Failed(String),
}

impl OpFailure {
    /// Human-readable reason, as reported by the non-throwing variants.
    pub(crate) fn reason(&self) -> String {
        match self {
            OpFailure::Mismatch { expected, actual } => {
                format!("received reply of kind {} where {} was expected", actual, expected)
            }
            OpFailure::Failed(reason) => reason.clone(),
        }
    }
}

/// The six logical entry operations, confirmed (every call observes the
/// store's outcome). Fire-and-forget sends are a remote-only extra and
/// live on the remote strategy directly.
#[async_trait]
pub(crate) trait EntryOperations: Send + Sync {
    async fn entry_exists(&self, id: &str) -> OpResult<bool>;

    async fn get_entry(&self, id: &str) -> OpResult<String>;

    async fn add_entry(&self, id: &str, data: &str, allow_overwrite: bool) -> OpResult<()>;

    async fn append_entry(&self, id: &str, data: &str) -> OpResult<()>;

    async fn update_entry(&self, id: &str, data: &str) -> OpResult<()>;

    async fn remove_entry(&self, id: &str) -> OpResult<()>;
}
