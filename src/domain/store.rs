use crate::{
    domain::habit::{Habit, HabitId},
    error::{HabitoError, Result},
};
use chrono::NaiveDate;

/// The single source of truth for all habit state.
///
/// Owns the active list (in display/drag order), the trash (in deletion
/// order) and the id counter. Fields are private so every mutation goes
/// through an operation that preserves the invariants: ids unique across
/// both lists, active names unique case-insensitively, counter strictly
/// above every id ever issued.
///
/// The store itself never performs I/O; the engine persists it after each
/// mutating operation.
#[derive(Debug, Default)]
pub struct HabitStore {
    active: Vec<Habit>,
    trash: Vec<Habit>,
    next_id: u32,
}

impl HabitStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            active: Vec::new(),
            trash: Vec::new(),
            next_id: 1,
        }
    }

    /// Rebuilds a store from persisted parts.
    ///
    /// The counter is re-derived as the maximum of the persisted value and
    /// every loaded id + 1, so a lost or stale counter record can never
    /// cause an id collision. Trashed flags are normalized to match the
    /// list each habit actually sits in.
    pub fn from_parts(active: Vec<Habit>, trash: Vec<Habit>, next_id: u32) -> Self {
        let mut store = Self {
            active,
            trash,
            next_id: next_id.max(1),
        };
        for habit in &mut store.active {
            habit.trashed = false;
        }
        for habit in &mut store.trash {
            habit.trashed = true;
        }
        let highest = store
            .active
            .iter()
            .chain(store.trash.iter())
            .map(|h| h.id.value())
            .max()
            .unwrap_or(0);
        store.next_id = store.next_id.max(highest + 1);
        store
    }

    /// Active habits in display order.
    pub fn active(&self) -> &[Habit] {
        &self.active
    }

    /// Trashed habits in deletion order.
    pub fn trash(&self) -> &[Habit] {
        &self.trash
    }

    /// The next id the store will issue.
    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    /// Looks up an active habit by id.
    pub fn find_active(&self, id: HabitId) -> Option<&Habit> {
        self.active.iter().find(|h| h.id == id)
    }

    /// Looks up a trashed habit by id.
    pub fn find_trashed(&self, id: HabitId) -> Option<&Habit> {
        self.trash.iter().find(|h| h.id == id)
    }

    /// Adds a new habit to the tail of the active list.
    ///
    /// The name is trimmed before validation. Fails with `EmptyName` if
    /// nothing remains, or `DuplicateName` if an *active* habit already
    /// carries the same name case-insensitively (trashed habits may
    /// collide). Returns a snapshot of the created habit.
    pub fn add_habit(&mut self, name: &str) -> Result<Habit> {
        let name = name.trim();
        if name.is_empty() {
            return Err(HabitoError::EmptyName);
        }

        let lowered = name.to_lowercase();
        if self.active.iter().any(|h| h.name.to_lowercase() == lowered) {
            return Err(HabitoError::DuplicateName(name.to_string()));
        }

        let habit = Habit::new(HabitId::new(self.next_id), name.to_string());
        self.next_id += 1;
        self.active.push(habit.clone());
        Ok(habit)
    }

    /// Flips completion of `date` for an active habit.
    ///
    /// Returns a snapshot of the updated habit. Fails with `HabitNotFound`
    /// if `id` is not active; the caller decides which views to re-render.
    pub fn toggle_completion(&mut self, id: HabitId, date: NaiveDate) -> Result<Habit> {
        let habit = self
            .active
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or(HabitoError::HabitNotFound(id.value()))?;
        habit.toggle_completion(date);
        Ok(habit.clone())
    }

    /// Soft-deletes an active habit: moved, not copied, to the tail of the
    /// trash. Completion history travels with it.
    pub fn move_to_trash(&mut self, id: HabitId) -> Result<()> {
        let pos = self
            .active
            .iter()
            .position(|h| h.id == id)
            .ok_or(HabitoError::HabitNotFound(id.value()))?;
        let mut habit = self.active.remove(pos);
        habit.trashed = true;
        self.trash.push(habit);
        Ok(())
    }

    /// Moves a trashed habit back to the tail of the active list.
    ///
    /// The habit keeps its id, name and completion history. A restored name
    /// may collide with an active one; the trash never re-validates.
    pub fn restore(&mut self, id: HabitId) -> Result<()> {
        let pos = self
            .trash
            .iter()
            .position(|h| h.id == id)
            .ok_or(HabitoError::HabitNotFound(id.value()))?;
        let mut habit = self.trash.remove(pos);
        habit.trashed = false;
        self.active.push(habit);
        Ok(())
    }

    /// Permanently removes a trashed habit. Unrecoverable.
    pub fn delete_forever(&mut self, id: HabitId) -> Result<()> {
        let pos = self
            .trash
            .iter()
            .position(|h| h.id == id)
            .ok_or(HabitoError::HabitNotFound(id.value()))?;
        self.trash.remove(pos);
        Ok(())
    }

    /// Resets the active list to the given id sequence (a finished drag).
    ///
    /// Ids in the sequence come first, in sequence order; active ids the
    /// sequence misses keep their prior relative order and are appended
    /// after all ordered ids. Unknown or repeated ids are ignored, so
    /// applying the same sequence twice yields the same ordering.
    pub fn reorder(&mut self, ordered_ids: &[HabitId]) {
        let mut remaining = std::mem::take(&mut self.active);
        let mut reordered = Vec::with_capacity(remaining.len());

        for id in ordered_ids {
            if let Some(pos) = remaining.iter().position(|h| h.id == *id) {
                reordered.push(remaining.remove(pos));
            }
        }
        reordered.append(&mut remaining);
        self.active = reordered;
    }

    /// Lifetime aggregate completion rate across active habits.
    ///
    /// Total recorded completions divided by the number of active habits,
    /// as a percentage rounded to one decimal place. This is a raw-count
    /// ratio (it can exceed 100), not a per-day percentage. Returns 0.0
    /// when there are no active habits.
    pub fn completion_rate(&self) -> f64 {
        if self.active.is_empty() {
            return 0.0;
        }
        let total: usize = self.active.iter().map(|h| h.completion_count()).sum();
        let pct = total as f64 / self.active.len() as f64 * 100.0;
        (pct * 10.0).round() / 10.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn ids(store: &HabitStore) -> Vec<u32> {
        store.active().iter().map(|h| h.id.value()).collect()
    }

    #[test]
    fn test_add_habit_assigns_sequential_ids() {
        let mut store = HabitStore::new();

        let a = store.add_habit("Workout").unwrap();
        let b = store.add_habit("Read").unwrap();

        assert_eq!(a.id.value(), 1);
        assert_eq!(b.id.value(), 2);
        assert_eq!(store.next_id(), 3);
        assert_eq!(store.active().len(), 2);
    }

    #[test]
    fn test_add_habit_trims_name() {
        let mut store = HabitStore::new();
        let habit = store.add_habit("  Workout  ").unwrap();
        assert_eq!(habit.name, "Workout");
    }

    #[test]
    fn test_add_habit_rejects_blank_name() {
        let mut store = HabitStore::new();
        assert!(matches!(store.add_habit(""), Err(HabitoError::EmptyName)));
        assert!(matches!(store.add_habit("   "), Err(HabitoError::EmptyName)));
        assert!(store.active().is_empty());
    }

    #[test]
    fn test_add_habit_rejects_case_insensitive_duplicate() {
        let mut store = HabitStore::new();
        store.add_habit("Workout").unwrap();

        let err = store.add_habit("workout").unwrap_err();
        assert!(matches!(err, HabitoError::DuplicateName(_)));
        assert_eq!(store.active().len(), 1);
    }

    #[test]
    fn test_trashed_name_does_not_block_add() {
        let mut store = HabitStore::new();
        let habit = store.add_habit("Workout").unwrap();
        store.move_to_trash(habit.id).unwrap();

        // Only active names participate in uniqueness.
        store.add_habit("workout").unwrap();
        assert_eq!(store.active().len(), 1);
        assert_eq!(store.trash().len(), 1);
    }

    #[test]
    fn test_toggle_completion_is_involution() {
        let mut store = HabitStore::new();
        let habit = store.add_habit("Workout").unwrap();
        let d = date("2024-06-12");

        let after_first = store.toggle_completion(habit.id, d).unwrap();
        assert!(after_first.is_completed(d));

        let after_second = store.toggle_completion(habit.id, d).unwrap();
        assert!(!after_second.is_completed(d));
        assert_eq!(after_second.completed_dates, habit.completed_dates);
    }

    #[test]
    fn test_toggle_unknown_id_fails() {
        let mut store = HabitStore::new();
        let err = store
            .toggle_completion(HabitId::new(99), date("2024-06-12"))
            .unwrap_err();
        assert!(matches!(err, HabitoError::HabitNotFound(99)));
    }

    #[test]
    fn test_toggle_trashed_id_fails() {
        let mut store = HabitStore::new();
        let habit = store.add_habit("Workout").unwrap();
        store.move_to_trash(habit.id).unwrap();

        let err = store
            .toggle_completion(habit.id, date("2024-06-12"))
            .unwrap_err();
        assert!(matches!(err, HabitoError::HabitNotFound(1)));
    }

    #[test]
    fn test_trash_then_restore_round_trip() {
        let mut store = HabitStore::new();
        let first = store.add_habit("Workout").unwrap();
        store.add_habit("Read").unwrap();
        store.toggle_completion(first.id, date("2024-06-12")).unwrap();

        store.move_to_trash(first.id).unwrap();
        assert_eq!(ids(&store), vec![2]);
        assert!(store.find_trashed(first.id).unwrap().trashed);

        store.restore(first.id).unwrap();

        // Restored to the tail, identity and history intact.
        assert_eq!(ids(&store), vec![2, 1]);
        let restored = store.find_active(first.id).unwrap();
        assert_eq!(restored.name, "Workout");
        assert!(restored.is_completed(date("2024-06-12")));
        assert!(!restored.trashed);
        assert!(store.trash().is_empty());
    }

    #[test]
    fn test_restore_requires_trashed_id() {
        let mut store = HabitStore::new();
        let habit = store.add_habit("Workout").unwrap();

        // Active but not trashed: restore must not find it.
        let err = store.restore(habit.id).unwrap_err();
        assert!(matches!(err, HabitoError::HabitNotFound(1)));
    }

    #[test]
    fn test_delete_forever_is_permanent() {
        let mut store = HabitStore::new();
        let habit = store.add_habit("Workout").unwrap();
        store.move_to_trash(habit.id).unwrap();

        store.delete_forever(habit.id).unwrap();
        assert!(store.trash().is_empty());
        assert!(matches!(
            store.delete_forever(habit.id),
            Err(HabitoError::HabitNotFound(1))
        ));

        // The id is never reissued.
        let next = store.add_habit("Read").unwrap();
        assert_eq!(next.id.value(), 2);
    }

    #[test]
    fn test_reorder_applies_sequence() {
        let mut store = HabitStore::new();
        store.add_habit("A").unwrap();
        store.add_habit("B").unwrap();
        store.add_habit("C").unwrap();

        store.reorder(&[HabitId::new(3), HabitId::new(1), HabitId::new(2)]);
        assert_eq!(ids(&store), vec![3, 1, 2]);
    }

    #[test]
    fn test_reorder_is_idempotent() {
        let mut store = HabitStore::new();
        store.add_habit("A").unwrap();
        store.add_habit("B").unwrap();
        store.add_habit("C").unwrap();

        let seq = [HabitId::new(2), HabitId::new(3)];
        store.reorder(&seq);
        let once = ids(&store);
        store.reorder(&seq);
        assert_eq!(ids(&store), once);
    }

    #[test]
    fn test_reorder_appends_missing_ids_in_prior_order() {
        let mut store = HabitStore::new();
        store.add_habit("A").unwrap();
        store.add_habit("B").unwrap();
        store.add_habit("C").unwrap();
        store.add_habit("D").unwrap();

        // B and D are absent from the sequence: they keep their relative
        // order and land after the ordered ids.
        store.reorder(&[HabitId::new(3), HabitId::new(1)]);
        assert_eq!(ids(&store), vec![3, 1, 2, 4]);
    }

    #[test]
    fn test_reorder_ignores_unknown_ids() {
        let mut store = HabitStore::new();
        store.add_habit("A").unwrap();
        store.add_habit("B").unwrap();

        store.reorder(&[HabitId::new(99), HabitId::new(2), HabitId::new(1)]);
        assert_eq!(ids(&store), vec![2, 1]);
    }

    #[test]
    fn test_completion_rate_is_raw_count_ratio() {
        let mut store = HabitStore::new();
        let a = store.add_habit("Workout").unwrap();
        let b = store.add_habit("Read").unwrap();

        store.toggle_completion(a.id, date("2024-06-10")).unwrap();
        store.toggle_completion(a.id, date("2024-06-11")).unwrap();
        store.toggle_completion(b.id, date("2024-06-11")).unwrap();

        // 3 completions over 2 active habits.
        assert_eq!(store.completion_rate(), 150.0);
    }

    #[test]
    fn test_completion_rate_empty_store_is_zero() {
        let store = HabitStore::new();
        assert_eq!(store.completion_rate(), 0.0);
    }

    #[test]
    fn test_completion_rate_ignores_trash() {
        let mut store = HabitStore::new();
        let a = store.add_habit("Workout").unwrap();
        let b = store.add_habit("Read").unwrap();
        store.toggle_completion(a.id, date("2024-06-10")).unwrap();
        store.toggle_completion(b.id, date("2024-06-10")).unwrap();
        store.toggle_completion(b.id, date("2024-06-11")).unwrap();

        store.move_to_trash(b.id).unwrap();

        // One active habit with one completion.
        assert_eq!(store.completion_rate(), 100.0);
    }

    #[test]
    fn test_completion_rate_rounds_to_one_decimal() {
        let mut store = HabitStore::new();
        let a = store.add_habit("A").unwrap();
        store.add_habit("B").unwrap();
        store.add_habit("C").unwrap();
        store.toggle_completion(a.id, date("2024-06-10")).unwrap();

        // 1/3 * 100 = 33.333... -> 33.3
        assert_eq!(store.completion_rate(), 33.3);
    }

    #[test]
    fn test_from_parts_rederives_counter() {
        let active = vec![Habit::new(HabitId::new(4), "A".to_string())];
        let trash = vec![Habit::new(HabitId::new(7), "B".to_string())];

        // Persisted counter lagging behind the loaded ids.
        let mut store = HabitStore::from_parts(active, trash, 2);
        assert_eq!(store.next_id(), 8);

        let habit = store.add_habit("C").unwrap();
        assert_eq!(habit.id.value(), 8);
    }

    #[test]
    fn test_from_parts_normalizes_trashed_flags() {
        let mut stale = Habit::new(HabitId::new(1), "A".to_string());
        stale.trashed = true; // wrong flag in the active record
        let store = HabitStore::from_parts(vec![stale], Vec::new(), 2);

        assert!(!store.active()[0].trashed);
    }
}
