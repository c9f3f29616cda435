use super::slot::{Slot, SlotBackend};
use super::ThoughtStore;
use crate::error::{Result, ThoughtzError};
use crate::model::{sort_by_date_desc, Thought, ThoughtPatch};
use log::warn;
use uuid::Uuid;

/// On-device store: the whole thought collection as one JSON blob in the
/// [`Slot::Thoughts`] slot.
///
/// Every mutation is a whole-collection read-modify-write. Insertion order
/// is preserved in the blob; [`ThoughtStore::list`] sorts newest-first on
/// the way out. Two in-flight mutations can race (last writer wins) — the
/// single-threaded caller is the serialization point.
pub struct LocalStore<B: SlotBackend> {
    slots: B,
}

impl<B: SlotBackend> LocalStore<B> {
    pub fn new(slots: B) -> Self {
        Self { slots }
    }

    /// The stored collection, in insertion order.
    ///
    /// A missing or corrupt blob reads as the empty collection: silent data
    /// loss is preferred over an unusable app here, matching the persisted
    /// slot's contract. The corruption is logged.
    pub fn get_all(&self) -> Vec<Thought> {
        let raw = match self.slots.read(Slot::Thoughts) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("failed to read local thoughts slot: {}", e);
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(thoughts) => thoughts,
            Err(e) => {
                warn!("local thoughts blob is corrupt, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Overwrite the stored collection wholesale.
    pub fn save_all(&self, thoughts: &[Thought]) -> Result<()> {
        let raw = serde_json::to_string(thoughts).map_err(ThoughtzError::Serialization)?;
        self.slots.write(Slot::Thoughts, &raw)
    }

    /// Read, append, write back.
    pub fn append(&self, thought: &Thought) -> Result<()> {
        let mut thoughts = self.get_all();
        thoughts.push(thought.clone());
        self.save_all(&thoughts)
    }

    /// Read, merge the patch into the matching record, write back.
    /// Fails with `ThoughtNotFound` if no record has the id.
    pub fn update_record(&self, id: &str, patch: &ThoughtPatch) -> Result<()> {
        let mut thoughts = self.get_all();
        let entry = thoughts
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| ThoughtzError::ThoughtNotFound(id.to_string()))?;
        patch.apply_to(entry);
        self.save_all(&thoughts)
    }

    /// Read, filter out the matching record, write back. Removing an absent
    /// id is a no-op.
    pub fn remove(&self, id: &str) -> Result<()> {
        let mut thoughts = self.get_all();
        let before = thoughts.len();
        thoughts.retain(|t| t.id != id);
        if thoughts.len() == before {
            return Ok(());
        }
        self.save_all(&thoughts)
    }
}

impl<B: SlotBackend> ThoughtStore for LocalStore<B> {
    fn create(&mut self, thought: &Thought) -> Result<String> {
        let mut thought = thought.clone();
        if thought.id.is_empty() {
            thought.id = Uuid::new_v4().to_string();
        }
        self.append(&thought)?;
        Ok(thought.id)
    }

    fn get(&self, id: &str) -> Result<Thought> {
        self.get_all()
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| ThoughtzError::ThoughtNotFound(id.to_string()))
    }

    fn list(&self, owner: &str) -> Result<Vec<Thought>> {
        let mut thoughts: Vec<Thought> = self
            .get_all()
            .into_iter()
            .filter(|t| t.user_id == owner)
            .collect();
        sort_by_date_desc(&mut thoughts);
        Ok(thoughts)
    }

    fn update(&mut self, id: &str, patch: &ThoughtPatch) -> Result<()> {
        self.update_record(id, patch)
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        self.remove(id)
    }

    fn list_public(&self) -> Result<Vec<Thought>> {
        let mut thoughts: Vec<Thought> = self.get_all().into_iter().filter(|t| t.public).collect();
        sort_by_date_desc(&mut thoughts);
        Ok(thoughts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GUEST_USER_ID;
    use crate::store::mem_slot::MemSlots;

    fn store() -> LocalStore<MemSlots> {
        LocalStore::new(MemSlots::new())
    }

    fn guest_thought(title: &str) -> Thought {
        Thought::new(GUEST_USER_ID, title, "some content", vec![])
    }

    #[test]
    fn test_get_all_empty_when_never_written() {
        assert!(store().get_all().is_empty());
    }

    #[test]
    fn test_get_all_empty_on_corrupt_blob() {
        let slots = MemSlots::new();
        slots.inject_raw(Slot::Thoughts, "{not json[");
        let store = LocalStore::new(slots);
        assert!(store.get_all().is_empty());
    }

    #[test]
    fn test_save_all_round_trip_preserves_order_and_fields() {
        let store = store();
        let input = vec![
            guest_thought("first"),
            guest_thought("second"),
            guest_thought("third"),
        ];
        store.save_all(&input).unwrap();
        assert_eq!(store.get_all(), input);
    }

    #[test]
    fn test_append_keeps_exactly_one_record_per_id() {
        let mut store = store();
        let t = guest_thought("only one");
        store.create(&t).unwrap();
        let all = store.get_all();
        assert_eq!(all.iter().filter(|x| x.id == t.id).count(), 1);
        assert_eq!(all[0], t);
    }

    #[test]
    fn test_update_replaces_only_matching_record() {
        let store = store();
        let a = guest_thought("a");
        let b = guest_thought("b");
        store.save_all(&[a.clone(), b.clone()]).unwrap();

        let patch = ThoughtPatch {
            title: Some("a edited".to_string()),
            ..Default::default()
        };
        store.update_record(&a.id, &patch).unwrap();

        let all = store.get_all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, a.id);
        assert_eq!(all[0].title, "a edited");
        assert_eq!(all[0].content, a.content);
        assert_eq!(all[1], b);
    }

    #[test]
    fn test_update_missing_id_is_an_error() {
        let store = store();
        store.save_all(&[guest_thought("x")]).unwrap();
        let patch = ThoughtPatch::favorite(true);
        match store.update_record("no-such-id", &patch) {
            Err(ThoughtzError::ThoughtNotFound(id)) => assert_eq!(id, "no-such-id"),
            other => panic!("expected ThoughtNotFound, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_delete_removes_exactly_one_in_order() {
        let mut store = store();
        let a = guest_thought("a");
        let b = guest_thought("b");
        let c = guest_thought("c");
        store.save_all(&[a.clone(), b.clone(), c.clone()]).unwrap();

        store.delete(&b.id).unwrap();
        assert_eq!(store.get_all(), vec![a, c]);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mut store = store();
        let a = guest_thought("a");
        let b = guest_thought("b");
        store.save_all(&[a.clone(), b.clone()]).unwrap();

        store.delete(&a.id).unwrap();
        // Second delete of the same id: no error, no effect on the rest
        store.delete(&a.id).unwrap();
        assert_eq!(store.get_all(), vec![b]);
    }

    #[test]
    fn test_list_filters_by_owner_and_sorts_desc() {
        let mut store = store();
        let mut old = guest_thought("old");
        old.date = "2024-01-01T00:00:00Z".parse().unwrap();
        let mut new = guest_thought("new");
        new.date = "2024-06-01T00:00:00Z".parse().unwrap();
        let other = Thought::new("someone-else", "theirs", "c", vec![]);
        store.save_all(&[old, other, new]).unwrap();

        let mine = store.list(GUEST_USER_ID).unwrap();
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].title, "new");
        assert_eq!(mine[1].title, "old");
    }

    #[test]
    fn test_list_public_only_flagged() {
        let mut store = store();
        let mut shared = guest_thought("shared");
        shared.public = true;
        store
            .save_all(&[guest_thought("private"), shared.clone()])
            .unwrap();

        let feed = store.list_public().unwrap();
        assert_eq!(feed, vec![shared]);
    }

    #[test]
    fn test_create_fills_missing_id() {
        let mut store = store();
        let mut t = guest_thought("no id yet");
        t.id = String::new();
        let id = store.create(&t).unwrap();
        assert!(!id.is_empty());
        assert_eq!(store.get(&id).unwrap().title, "no id yet");
    }

    #[test]
    fn test_write_failure_propagates() {
        let slots = MemSlots::new();
        let store = LocalStore::new(slots.clone());
        slots.set_simulate_write_error(true);
        assert!(store.append(&guest_thought("x")).is_err());
    }
}
