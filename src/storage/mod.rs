use crate::{
    domain::{Habit, HabitStore},
    error::Result,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod file_storage;

/// Current version of the persisted snapshot schema.
pub const SCHEMA_VERSION: u32 = 1;

/// The whole-store snapshot written after every mutation.
///
/// One versioned object serialized atomically, replacing the legacy layout
/// of three independently keyed records (`habits`, `trash`, `counter`).
#[derive(Debug, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub schema_version: u32,
    pub active_habits: Vec<Habit>,
    pub trashed_habits: Vec<Habit>,
    pub next_id: u32,
}

impl StoreSnapshot {
    /// Captures the full state of a store.
    pub fn capture(store: &HabitStore) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            active_habits: store.active().to_vec(),
            trashed_habits: store.trash().to_vec(),
            next_id: store.next_id(),
        }
    }

    /// Rebuilds the store, re-deriving the id counter from the loaded ids.
    pub fn into_store(self) -> HabitStore {
        HabitStore::from_parts(self.active_habits, self.trashed_habits, self.next_id)
    }
}

/// Storage trait for persisting the habit store
#[async_trait]
pub trait Storage: Send + Sync {
    /// Initializes the storage backend
    async fn initialize(&self) -> Result<()>;

    /// Loads the full store state.
    ///
    /// Must fail-soft: an absent or unparsable medium yields an empty
    /// store, never an error, so a corrupt record cannot brick startup.
    /// Errors are reserved for the medium being unreachable.
    async fn load_store(&self) -> Result<HabitStore>;

    /// Saves the full store state (whole-store, never incremental).
    async fn save_store(&self, store: &HabitStore) -> Result<()>;

    /// Checks if the storage medium has been initialized
    async fn is_initialized(&self) -> bool;
}
