use super::slot::{Slot, SlotBackend};
use crate::error::{Result, ThoughtzError};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// In-memory slot backend for testing.
///
/// Uses `RefCell` for interior mutability since the gateway is
/// single-threaded. Clones share the same underlying map, so a cloned
/// backend handed to the session sees writes made through the store.
#[derive(Clone, Default)]
pub struct MemSlots {
    slots: Rc<RefCell<HashMap<Slot, String>>>,
    simulate_write_error: Rc<RefCell<bool>>,
}

impl MemSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Test helper to inject a raw (possibly malformed) slot value.
    pub fn inject_raw(&self, slot: Slot, value: &str) {
        self.slots.borrow_mut().insert(slot, value.to_string());
    }
}

impl SlotBackend for MemSlots {
    fn read(&self, slot: Slot) -> Result<Option<String>> {
        Ok(self.slots.borrow().get(&slot).cloned())
    }

    fn write(&self, slot: Slot, value: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(ThoughtzError::Store("Simulated write error".to_string()));
        }
        self.slots.borrow_mut().insert(slot, value.to_string());
        Ok(())
    }

    fn clear(&self, slot: Slot) -> Result<()> {
        self.slots.borrow_mut().remove(&slot);
        Ok(())
    }
}
