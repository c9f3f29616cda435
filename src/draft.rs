//! Draft autosave for the creation flow.
//!
//! An in-progress thought is persisted to its own slot on every change so it
//! survives an app restart mid-composition. Loading is fail-soft: a missing
//! or corrupt draft reads as "no draft" rather than an error. The slot is
//! cleared after the draft is successfully turned into a record.

use crate::error::{Result, ThoughtzError};
use crate::store::slot::{Slot, SlotBackend};
use log::warn;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Draft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            tags: Vec::new(),
        }
    }

    /// Add a tag, suppressing duplicates. Returns true if it was added.
    pub fn add_tag(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        if tag.is_empty() || self.tags.contains(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }

    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty() && self.content.trim().is_empty() && self.tags.is_empty()
    }
}

/// Restore the autosaved draft, if a readable one exists.
pub fn load_draft<B: SlotBackend>(slots: &B) -> Option<Draft> {
    let raw = match slots.read(Slot::Draft) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!("failed to read draft slot: {}", e);
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(draft) => Some(draft),
        Err(e) => {
            warn!("draft slot is corrupt, discarding: {}", e);
            None
        }
    }
}

pub fn save_draft<B: SlotBackend>(slots: &B, draft: &Draft) -> Result<()> {
    let raw = serde_json::to_string(draft).map_err(ThoughtzError::Serialization)?;
    slots.write(Slot::Draft, &raw)
}

pub fn clear_draft<B: SlotBackend>(slots: &B) -> Result<()> {
    slots.clear(Slot::Draft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_slot::MemSlots;

    #[test]
    fn test_round_trip() {
        let slots = MemSlots::new();
        let mut draft = Draft::new("Half a title", "half a body");
        draft.add_tag("later");

        save_draft(&slots, &draft).unwrap();
        assert_eq!(load_draft(&slots), Some(draft));
    }

    #[test]
    fn test_load_missing_is_none() {
        assert_eq!(load_draft(&MemSlots::new()), None);
    }

    #[test]
    fn test_load_corrupt_is_none() {
        let slots = MemSlots::new();
        slots.inject_raw(Slot::Draft, "{{{");
        assert_eq!(load_draft(&slots), None);
    }

    #[test]
    fn test_clear_removes_draft() {
        let slots = MemSlots::new();
        save_draft(&slots, &Draft::new("t", "c")).unwrap();
        clear_draft(&slots).unwrap();
        assert_eq!(load_draft(&slots), None);
    }

    #[test]
    fn test_add_tag_dedups() {
        let mut draft = Draft::new("t", "c");
        assert!(draft.add_tag("shower"));
        assert!(!draft.add_tag("shower"));
        draft.remove_tag("shower");
        assert!(draft.tags.is_empty());
    }

    #[test]
    fn test_is_blank() {
        assert!(Draft::default().is_blank());
        assert!(Draft::new("  ", "\n").is_blank());
        assert!(!Draft::new("x", "").is_blank());
    }
}
