//! The fixed sample feed.
//!
//! When neither store yields public content — guest mode with nothing flagged
//! public, or a failed/empty remote query — the discovery view falls back to
//! this seed set so it is never blank. Stable ids, fixed timestamps, no
//! state.

use crate::model::{sort_by_date_desc, Thought};
use once_cell::sync::Lazy;

const SAMPLE_OWNER: &str = "sample";

static SAMPLES: Lazy<Vec<Thought>> = Lazy::new(|| {
    let mut thoughts = vec![
        seed(
            "sample-mirror",
            "Mirrors are just honest windows",
            "Every mirror is a window into a room that copies yours exactly, \
             down to the person staring back.",
            "2024-09-02T08:12:00Z",
            &["mirrors", "perception"],
        ),
        seed(
            "sample-fish",
            "Do fish know they're wet?",
            "Wetness might only exist for creatures that can leave the water. \
             For a fish, dry is the exotic state.",
            "2024-08-21T19:45:00Z",
            &["shower", "fish"],
        ),
        seed(
            "sample-tomorrow",
            "Tomorrow never actually arrives",
            "By the time you get there it has already renamed itself today, \
             and the deadline moved with it.",
            "2024-07-30T22:05:00Z",
            &["time"],
        ),
        seed(
            "sample-alphabet",
            "The alphabet song and Twinkle Twinkle are the same tune",
            "Two of the first songs you ever learn are secretly one song \
             wearing different words.",
            "2024-07-11T07:30:00Z",
            &["music", "childhood"],
        ),
        seed(
            "sample-maps",
            "Every map is out of date the moment it's printed",
            "Coastlines erode, streets close, borders shift. A map is a \
             photograph of a place that no longer quite exists.",
            "2024-06-19T14:00:00Z",
            &["maps"],
        ),
    ];
    sort_by_date_desc(&mut thoughts);
    thoughts
});

fn seed(id: &str, title: &str, content: &str, date: &str, tags: &[&str]) -> Thought {
    Thought {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        date: date.parse().expect("sample timestamps are well-formed"),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        favorite: false,
        public: true,
        user_id: SAMPLE_OWNER.to_string(),
        audio_uri: None,
    }
}

/// The sample feed, newest first.
pub fn sample_thoughts() -> Vec<Thought> {
    SAMPLES.clone()
}
