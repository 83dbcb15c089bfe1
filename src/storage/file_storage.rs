use crate::{
    domain::{Habit, HabitStore},
    error::Result,
    storage::{Storage, StoreSnapshot},
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::warn;

/// File-based storage implementation.
///
/// Writes one versioned snapshot file under a `.habito` directory. Saves
/// are atomic (temp file, then rename) so a crash mid-write never leaves a
/// half-serialized store behind. Loading also understands the legacy
/// three-file layout (`habits.json`, `trash.json`, `counter.json`) and
/// migrates it on the next save.
pub struct FileStorage {
    root_path: PathBuf,
}

impl FileStorage {
    const HABITO_DIR: &'static str = ".habito";
    const SNAPSHOT_FILE: &'static str = "store.json";
    const LEGACY_HABITS_FILE: &'static str = "habits.json";
    const LEGACY_TRASH_FILE: &'static str = "trash.json";
    const LEGACY_COUNTER_FILE: &'static str = "counter.json";

    /// Creates a new FileStorage instance for the given data root
    pub fn new(data_root: impl AsRef<Path>) -> Self {
        Self {
            root_path: data_root.as_ref().join(Self::HABITO_DIR),
        }
    }

    fn snapshot_file(&self) -> PathBuf {
        self.root_path.join(Self::SNAPSHOT_FILE)
    }

    fn legacy_file(&self, name: &str) -> PathBuf {
        self.root_path.join(name)
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }

    /// Parses one legacy habit list; absent or unparsable files yield an
    /// empty list so a single bad record never blocks startup.
    async fn load_legacy_habits(&self, file_name: &str) -> Vec<Habit> {
        let path = self.legacy_file(file_name);
        let Ok(contents) = fs::read_to_string(&path).await else {
            return Vec::new();
        };
        match serde_json::from_str(&contents) {
            Ok(habits) => habits,
            Err(err) => {
                warn!(file = file_name, %err, "discarding unparsable legacy record");
                Vec::new()
            }
        }
    }

    async fn load_legacy_counter(&self) -> u32 {
        let path = self.legacy_file(Self::LEGACY_COUNTER_FILE);
        let Ok(contents) = fs::read_to_string(&path).await else {
            return 0;
        };
        match contents.trim().parse() {
            Ok(counter) => counter,
            Err(err) => {
                warn!(%err, "discarding unparsable legacy counter");
                0
            }
        }
    }

    /// Rebuilds the store from the legacy three-file layout.
    ///
    /// The counter is re-derived from the loaded ids when the counter
    /// record is lost, so id uniqueness survives the migration.
    async fn load_legacy(&self) -> HabitStore {
        let active = self.load_legacy_habits(Self::LEGACY_HABITS_FILE).await;
        let trash = self.load_legacy_habits(Self::LEGACY_TRASH_FILE).await;
        let counter = self.load_legacy_counter().await;
        HabitStore::from_parts(active, trash, counter)
    }

    async fn atomic_write(&self, path: &Path, contents: &str) -> Result<()> {
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, contents).await?;
        fs::rename(&tmp_path, path).await?;
        Ok(())
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn initialize(&self) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;

        // Seed an empty snapshot unless there is state to load or migrate.
        let has_legacy = self.legacy_file(Self::LEGACY_HABITS_FILE).exists()
            || self.legacy_file(Self::LEGACY_TRASH_FILE).exists()
            || self.legacy_file(Self::LEGACY_COUNTER_FILE).exists();
        if !self.snapshot_file().exists() && !has_legacy {
            self.save_store(&HabitStore::new()).await?;
        }

        Ok(())
    }

    async fn load_store(&self) -> Result<HabitStore> {
        let snapshot_file = self.snapshot_file();

        if !snapshot_file.exists() {
            return Ok(self.load_legacy().await);
        }

        let contents = fs::read_to_string(&snapshot_file).await?;
        match serde_json::from_str::<StoreSnapshot>(&contents) {
            Ok(snapshot) => Ok(snapshot.into_store()),
            Err(err) => {
                warn!(%err, "discarding unparsable store snapshot, starting empty");
                Ok(HabitStore::new())
            }
        }
    }

    async fn save_store(&self, store: &HabitStore) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;

        let json = serde_json::to_string_pretty(&StoreSnapshot::capture(store))?;
        self.atomic_write(&self.snapshot_file(), &json).await?;

        Ok(())
    }

    async fn is_initialized(&self) -> bool {
        self.root_path.exists() && self.snapshot_file().exists()
    }
}
