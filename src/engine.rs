//! Command dispatch between the view controller and the store.
//!
//! The view controller never mutates the store directly: a user gesture
//! becomes a typed [`Command`], the engine applies it, persists the whole
//! store and answers with the set of views the gesture invalidated. The
//! engine issues no change notifications; re-rendering the dirty views is
//! the caller's job.

use crate::{
    domain::{HabitId, HabitStore},
    error::{HabitoError, Result},
    storage::Storage,
};
use chrono::NaiveDate;
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// A user gesture translated into a store mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddHabit { name: String },
    Toggle { id: HabitId, date: NaiveDate },
    MoveToTrash { id: HabitId },
    Restore { id: HabitId },
    DeleteForever { id: HabitId },
    Reorder { ids: Vec<HabitId> },
}

/// A view the controller may need to re-render after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum View {
    Day,
    Week,
    Month,
    Report,
    Trash,
}

/// The views a dispatched command invalidated. Empty for no-ops.
pub type DirtyViews = BTreeSet<View>;

fn dirty(views: &[View]) -> DirtyViews {
    views.iter().copied().collect()
}

/// Owns the single store instance and the persistence adapter.
pub struct Engine {
    store: HabitStore,
    storage: Box<dyn Storage>,
}

impl Engine {
    /// Loads the persisted store and wraps it. Fail-soft loading means a
    /// fresh or corrupted medium starts an empty session rather than
    /// failing here.
    pub async fn load(storage: Box<dyn Storage>) -> Result<Self> {
        let store = storage.load_store().await?;
        Ok(Self { store, storage })
    }

    /// Wraps an existing store, e.g. one built in a test.
    pub fn with_store(store: HabitStore, storage: Box<dyn Storage>) -> Self {
        Self { store, storage }
    }

    /// Read access for rendering. All mutation goes through [`dispatch`].
    ///
    /// [`dispatch`]: Engine::dispatch
    pub fn store(&self) -> &HabitStore {
        &self.store
    }

    /// Applies a command, persists the whole store and reports which views
    /// went stale.
    ///
    /// Error policy follows the taxonomy: validation errors propagate with
    /// state unchanged; a stale id (`HabitNotFound`) is a silent no-op
    /// returning an empty dirty set; a persistence failure is logged and
    /// swallowed, since the in-memory state stays authoritative for the
    /// session and the next successful mutation re-persists everything.
    pub async fn dispatch(&mut self, command: Command) -> Result<DirtyViews> {
        let applied = self.apply(command);

        match applied {
            Ok(views) => {
                if let Err(err) = self.storage.save_store(&self.store).await {
                    warn!(%err, "failed to persist store, keeping in-memory state");
                }
                Ok(views)
            }
            Err(HabitoError::HabitNotFound(id)) => {
                debug!(id, "command referenced a stale habit id, ignoring");
                Ok(DirtyViews::new())
            }
            Err(err) => Err(err),
        }
    }

    fn apply(&mut self, command: Command) -> Result<DirtyViews> {
        match command {
            Command::AddHabit { name } => {
                self.store.add_habit(&name)?;
                Ok(dirty(&[View::Day, View::Week, View::Month, View::Report]))
            }
            Command::Toggle { id, date } => {
                self.store.toggle_completion(id, date)?;
                Ok(dirty(&[View::Day, View::Week, View::Month, View::Report]))
            }
            Command::MoveToTrash { id } => {
                self.store.move_to_trash(id)?;
                Ok(dirty(&[
                    View::Day,
                    View::Week,
                    View::Month,
                    View::Report,
                    View::Trash,
                ]))
            }
            Command::Restore { id } => {
                self.store.restore(id)?;
                Ok(dirty(&[
                    View::Day,
                    View::Week,
                    View::Month,
                    View::Report,
                    View::Trash,
                ]))
            }
            Command::DeleteForever { id } => {
                self.store.delete_forever(id)?;
                Ok(dirty(&[View::Trash]))
            }
            Command::Reorder { ids } => {
                self.store.reorder(&ids);
                Ok(dirty(&[View::Day, View::Week, View::Month]))
            }
        }
    }
}
