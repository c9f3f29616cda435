//! # Domain Model: the Thought record
//!
//! A [`Thought`] is the sole domain entity: a short note with tags, a
//! favorite flag, and an optional public flag that makes it eligible for the
//! discovery feed. Records are owned either by the pseudo-user `"guest"`
//! (on-device storage) or by an authenticated identity (remote storage) —
//! never both. Ownership is fixed at creation and there is no migration path
//! between the two stores.
//!
//! ## Canonical shape
//!
//! Call sites never have to guess field presence: every record that leaves a
//! constructor has all fields populated. Optional document fields (`tags`,
//! `favorite`, `public`, `userId`) deserialize with defaults so legacy blobs
//! written before those fields existed still load.
//!
//! Wire names are camelCase to match the remote document collection.
//!
//! ## Partial updates
//!
//! [`ThoughtPatch`] is the canonical partial update: only present fields are
//! serialized, so a remote merge touches nothing else, and [`ThoughtPatch::
//! apply_to`] gives the local store the same merge semantics. `date` and
//! `userId` are deliberately not patchable — the timestamp is set at creation
//! and ownership never changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Owner id used for all records persisted on-device in guest mode.
pub const GUEST_USER_ID: &str = "guest";

fn default_user_id() -> String {
    GUEST_USER_ID.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thought {
    pub id: String,
    pub title: String,
    pub content: String,
    /// Set at creation; edits never touch it.
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default)]
    pub public: bool,
    #[serde(default = "default_user_id")]
    pub user_id: String,
    /// Reference to an attached voice memo (local path or remote blob URL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_uri: Option<String>,
}

impl Thought {
    /// Build a new record owned by `owner`, with a locally generated id and
    /// the creation timestamp stamped now. Duplicate tags are suppressed,
    /// insertion order preserved.
    pub fn new(
        owner: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        tags: Vec<String>,
    ) -> Self {
        let mut thought = Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            content: content.into(),
            date: Utc::now(),
            tags: Vec::new(),
            favorite: false,
            public: false,
            user_id: owner.into(),
            audio_uri: None,
        };
        for tag in tags {
            thought.add_tag(tag);
        }
        thought
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
}

/// Partial update for a [`Thought`]. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThoughtPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_uri: Option<String>,
}

impl ThoughtPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.tags.is_none()
            && self.favorite.is_none()
            && self.public.is_none()
            && self.audio_uri.is_none()
    }

    /// Merge the present fields into `thought`. Tags passed through a patch
    /// are deduplicated the same way the constructor deduplicates them.
    pub fn apply_to(&self, thought: &mut Thought) {
        if let Some(title) = &self.title {
            thought.title = title.clone();
        }
        if let Some(content) = &self.content {
            thought.content = content.clone();
        }
        if let Some(tags) = &self.tags {
            thought.tags.clear();
            for tag in tags {
                thought.add_tag(tag.clone());
            }
        }
        if let Some(favorite) = self.favorite {
            thought.favorite = favorite;
        }
        if let Some(public) = self.public {
            thought.public = public;
        }
        if let Some(audio_uri) = &self.audio_uri {
            thought.audio_uri = Some(audio_uri.clone());
        }
    }

    pub fn favorite(value: bool) -> Self {
        Self {
            favorite: Some(value),
            ..Default::default()
        }
    }

    pub fn public(value: bool) -> Self {
        Self {
            public: Some(value),
            ..Default::default()
        }
    }
}

/// Sort newest-first by creation date, the canonical list order.
pub fn sort_by_date_desc(thoughts: &mut [Thought]) {
    thoughts.sort_by(|a, b| b.date.cmp(&a.date));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_populates_defaults() {
        let t = Thought::new(GUEST_USER_ID, "Title", "Content", vec![]);
        assert!(!t.id.is_empty());
        assert_eq!(t.user_id, "guest");
        assert!(!t.favorite);
        assert!(!t.public);
        assert!(t.tags.is_empty());
        assert!(t.audio_uri.is_none());
    }

    #[test]
    fn test_new_dedups_tags_preserving_order() {
        let t = Thought::new(
            "u1",
            "T",
            "C",
            vec![
                "shower".to_string(),
                "paradox".to_string(),
                "shower".to_string(),
            ],
        );
        assert_eq!(t.tags, vec!["shower", "paradox"]);
    }

    #[test]
    fn test_add_tag_suppresses_duplicates() {
        let mut t = Thought::new("u1", "T", "C", vec![]);
        assert!(t.add_tag("idea"));
        assert!(!t.add_tag("idea"));
        assert!(!t.add_tag(""));
        assert_eq!(t.tags, vec!["idea"]);
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let t = Thought::new("u1", "T", "C", vec![]);
        let json = serde_json::to_value(&t).unwrap();
        assert!(json.get("userId").is_some());
        assert!(json.get("user_id").is_none());
        // Absent audio uri is omitted entirely
        assert!(json.get("audioUri").is_none());
    }

    #[test]
    fn test_legacy_record_without_flags() {
        // Blob written before favorite/public/userId existed
        let json = r#"{
            "id": "abc",
            "title": "Old",
            "content": "Body",
            "date": "2023-01-01T00:00:00Z",
            "tags": ["old"]
        }"#;
        let t: Thought = serde_json::from_str(json).unwrap();
        assert_eq!(t.user_id, GUEST_USER_ID);
        assert!(!t.favorite);
        assert!(!t.public);
    }

    #[test]
    fn test_patch_serializes_only_present_fields() {
        let patch = ThoughtPatch::favorite(true);
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({ "favorite": true }));
    }

    #[test]
    fn test_patch_apply_merges() {
        let mut t = Thought::new("u1", "Title", "Content", vec!["a".to_string()]);
        let date_before = t.date;
        let patch = ThoughtPatch {
            title: Some("New Title".to_string()),
            public: Some(true),
            ..Default::default()
        };
        patch.apply_to(&mut t);
        assert_eq!(t.title, "New Title");
        assert_eq!(t.content, "Content");
        assert!(t.public);
        assert_eq!(t.tags, vec!["a"]);
        assert_eq!(t.date, date_before);
    }

    #[test]
    fn test_patch_tags_replace_and_dedup() {
        let mut t = Thought::new("u1", "T", "C", vec!["old".to_string()]);
        let patch = ThoughtPatch {
            tags: Some(vec!["x".to_string(), "y".to_string(), "x".to_string()]),
            ..Default::default()
        };
        patch.apply_to(&mut t);
        assert_eq!(t.tags, vec!["x", "y"]);
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(ThoughtPatch::default().is_empty());
        assert!(!ThoughtPatch::public(false).is_empty());
    }

    #[test]
    fn test_sort_by_date_desc() {
        let mut a = Thought::new("u", "A", "c", vec![]);
        let mut b = Thought::new("u", "B", "c", vec![]);
        a.date = "2024-01-01T00:00:00Z".parse().unwrap();
        b.date = "2024-06-01T00:00:00Z".parse().unwrap();
        let mut list = vec![a, b];
        sort_by_date_desc(&mut list);
        assert_eq!(list[0].title, "B");
        assert_eq!(list[1].title, "A");
    }
}
