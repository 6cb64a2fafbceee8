//! Journal entry and image records

use crate::domain::mood::{self, Mood, MoodOption};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A journal record authored by one user for one calendar date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    /// Raw stored value; may predate the current mood catalog
    pub mood: String,
    pub entry_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub images: Vec<EntryImage>,
}

impl JournalEntry {
    pub fn mood_option(&self) -> &'static MoodOption {
        mood::lookup(&self.mood)
    }

    pub fn was_edited(&self) -> bool {
        self.updated_at != self.created_at
    }

    /// Case-insensitive substring match against title or content.
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.content.to_lowercase().contains(needle)
    }
}

/// An image attached to exactly one entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryImage {
    pub id: Uuid,
    pub entry_id: Uuid,
    pub image_url: String,
    pub image_name: String,
    pub created_at: DateTime<Utc>,
}

/// Fields submitted when creating an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub title: String,
    pub content: String,
    pub mood: Mood,
    pub entry_date: NaiveDate,
}

/// Fields resubmitted on every edit. The entry date and owner are fixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPatch {
    pub title: String,
    pub content: String,
    pub mood: Mood,
}

/// Image record to link to an entry after its binary was stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewImage {
    pub entry_id: Uuid,
    pub image_url: String,
    pub image_name: String,
}
