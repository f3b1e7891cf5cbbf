use crate::error::Result;
use crate::model::Scope;

/// Abstract interface for raw key/value storage.
///
/// This trait handles the "how" of storage (filesystem vs memory), while
/// [`QuoteStore`](super::QuoteStore) handles the "what" (quote lists,
/// defaults, validation).
///
/// Two areas are exposed:
/// - the **durable** area survives across sessions;
/// - the **session** area lives exactly as long as the backend value.
pub trait StorageBackend {
    // --- Durable Operations ---

    /// Read the value stored under `key`. Ok(None) when the key was never written.
    fn read(&self, scope: Scope, key: &str) -> Result<Option<String>>;

    /// Overwrite the value under `key`.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn write(&self, scope: Scope, key: &str, value: &str) -> Result<()>;

    // --- Session Operations ---

    fn read_session(&self, scope: Scope, key: &str) -> Result<Option<String>>;

    fn write_session(&self, scope: Scope, key: &str, value: &str) -> Result<()>;

    fn remove_session(&self, scope: Scope, key: &str) -> Result<()>;

    // --- Capabilities ---

    /// Check if a scope is available (e.g. project root resolved).
    fn scope_available(&self, scope: Scope) -> bool;
}
