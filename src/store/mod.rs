//! # Storage Layer
//!
//! This module defines the storage port for thought records. The
//! [`ThoughtStore`] trait gives the dispatch layer one polymorphic interface
//! with two implementations, so routing is decided in one place instead of
//! re-branching on a mode flag at every call site.
//!
//! ## Dual-store architecture
//!
//! - [`local::LocalStore`]: the guest's collection as a single JSON blob in
//!   an on-device key-value slot. Every operation is a whole-collection
//!   read-modify-write; correctness relies on the caller's single-threaded
//!   execution, not on locking. A corrupt or missing blob reads as the empty
//!   collection (fail soft).
//! - [`remote::RemoteStore`]: CRUD against a remote document collection over
//!   HTTP, keyed by the owner id, with a polling watch for list views.
//!
//! The two stores are disjoint: a record belongs to exactly one, fixed by
//! the session mode at creation time. There is no background sync, conflict
//! resolution, or merge between them.
//!
//! ## Slot backends
//!
//! Raw on-device I/O goes through [`slot::SlotBackend`], which handles the
//! "how" (filesystem vs memory) while the stores handle the "what":
//!
//! - [`fs_slot::FsSlots`]: production; one JSON file per slot, atomic writes.
//! - [`mem_slot::MemSlots`]: for testing logic without filesystem I/O.
//!
//! ## Error policy
//!
//! `update` and `get` on a missing id fail with
//! [`ThoughtNotFound`](crate::error::ThoughtzError::ThoughtNotFound) in both
//! stores; `delete` on a missing id is an idempotent no-op. The not-found
//! policy is uniform across both stores so callers never branch on which
//! store they hit.

use crate::error::Result;
use crate::model::{Thought, ThoughtPatch};

pub mod fs_slot;
pub mod local;
pub mod mem_slot;
pub mod remote;
pub mod slot;

/// Abstract interface for thought storage.
///
/// One implementation per backing world (local slots, remote collection).
/// The api facade selects one per operation based on the session mode and
/// never mixes them.
pub trait ThoughtStore {
    /// Persist a new record. Returns the stored id: the record's own id for
    /// stores that accept caller-generated ids, or the id the store assigned.
    fn create(&mut self, thought: &Thought) -> Result<String>;

    /// Fetch a single record by id.
    fn get(&self, id: &str) -> Result<Thought>;

    /// All records owned by `owner`, newest first.
    fn list(&self, owner: &str) -> Result<Vec<Thought>>;

    /// Merge the present patch fields into an existing record.
    fn update(&mut self, id: &str, patch: &ThoughtPatch) -> Result<()>;

    /// Remove a record. Deleting an already-deleted id is a no-op.
    fn delete(&mut self, id: &str) -> Result<()>;

    /// All records flagged public, newest first. Used by the discovery feed.
    fn list_public(&self) -> Result<Vec<Thought>>;
}
