//! Domain layer - Journal records and their rules

pub mod entry;
pub mod image;
pub mod mood;
pub mod user;

pub use entry::{EntryImage, EntryPatch, JournalEntry, NewEntry, NewImage};
pub use image::ImageFile;
pub use mood::{Mood, MoodOption};
pub use user::{AuthEvent, Session, User};
