use crate::error::Result;

/// The well-known on-device key-value slots.
///
/// Each slot holds one serialized value under a stable key. The thought
/// collection is a single JSON blob — whole-collection read-modify-write,
/// no partial updates, no indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The guest's entire thought collection, one JSON array.
    Thoughts,
    /// The persisted guest-mode boolean.
    GuestMode,
    /// The in-progress draft for autosave/restore.
    Draft,
}

impl Slot {
    pub fn key(self) -> &'static str {
        match self {
            Slot::Thoughts => "local_thoughts",
            Slot::GuestMode => "guest_mode",
            Slot::Draft => "draft",
        }
    }

    pub const ALL: [Slot; 3] = [Slot::Thoughts, Slot::GuestMode, Slot::Draft];
}

/// Abstract interface for raw slot I/O.
/// This trait handles the "how" of storage (filesystem vs memory), while
/// [`super::local::LocalStore`] and friends handle the "what".
pub trait SlotBackend {
    /// Read the raw value of a slot. Returns `Ok(None)` if the slot has
    /// never been written. Returns `Err` only on actual I/O errors.
    fn read(&self, slot: Slot) -> Result<Option<String>>;

    /// Write a slot wholesale. MUST be atomic for durable backends
    /// (write to tmp then rename) to avoid partial writes.
    fn write(&self, slot: Slot, value: &str) -> Result<()>;

    /// Remove a slot. Clearing an absent slot is a no-op.
    fn clear(&self, slot: Slot) -> Result<()>;
}
