//! Share-text and date formatting for thoughts handed to a native share
//! sheet or rendered in a list row.

use crate::model::Thought;
use chrono::{DateTime, Utc};

/// The message body for the platform share dialog: quoted title, content,
/// comma-joined tags when present, and the app attribution line.
pub fn share_text(thought: &Thought) -> String {
    let tags = if thought.tags.is_empty() {
        String::new()
    } else {
        format!("\n\n{}", thought.tags.join(", "))
    };
    format!(
        "\"{}\"\n{}{}\n\nfrom Thoughtz",
        thought.title, thought.content, tags
    )
}

/// Render a record date as "Jan 1, 2023".
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GUEST_USER_ID;

    #[test]
    fn test_share_text_with_tags() {
        let t = Thought::new(
            GUEST_USER_ID,
            "Shower Paradox",
            "The water is thinking too.",
            vec!["shower".to_string(), "paradox".to_string()],
        );
        assert_eq!(
            share_text(&t),
            "\"Shower Paradox\"\nThe water is thinking too.\n\nshower, paradox\n\nfrom Thoughtz"
        );
    }

    #[test]
    fn test_share_text_without_tags() {
        let t = Thought::new(GUEST_USER_ID, "Title", "Body", vec![]);
        assert_eq!(share_text(&t), "\"Title\"\nBody\n\nfrom Thoughtz");
    }

    #[test]
    fn test_format_date() {
        let date: DateTime<Utc> = "2023-01-01T10:30:00Z".parse().unwrap();
        assert_eq!(format_date(&date), "Jan 1, 2023");
        let date: DateTime<Utc> = "2024-11-23T00:00:00Z".parse().unwrap();
        assert_eq!(format_date(&date), "Nov 23, 2024");
    }
}
