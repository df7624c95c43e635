//! Repository contract for saving and loading sessions.

use super::{Result, SessionSnapshot};

/// Stores session snapshots under named save slots.
pub trait StateRepository: Send + Sync {
    /// Save a snapshot, replacing whatever the slot held.
    fn save(&self, slot: &str, snapshot: &SessionSnapshot) -> Result<()>;

    /// Load the snapshot in `slot`, if any.
    fn load(&self, slot: &str) -> Result<Option<SessionSnapshot>>;

    /// Check if a slot holds a snapshot.
    fn exists(&self, slot: &str) -> bool;

    /// Delete a slot. Deleting an empty slot is not an error.
    fn delete(&self, slot: &str) -> Result<()>;

    /// List occupied slots in lexical order.
    fn list_slots(&self) -> Result<Vec<String>> {
        Ok(vec![])
    }
}
