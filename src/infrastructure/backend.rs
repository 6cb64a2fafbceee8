//! Collaborator interfaces for auth, records and binary storage

use crate::domain::{EntryImage, EntryPatch, JournalEntry, NewEntry, NewImage, Session, User};
use crate::error::Result;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Sort direction on `entry_date`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

/// Account and session management
pub trait AuthService {
    /// Create an account and sign it in
    fn sign_up(&self, email: &str, password: &str) -> Result<Session>;

    fn sign_in(&self, email: &str, password: &str) -> Result<Session>;

    fn sign_out(&self) -> Result<()>;

    /// The stored session, if any. Expired sessions are refreshed; the
    /// boolean reports whether that happened.
    fn current_session(&self) -> Result<Option<(Session, bool)>>;

    fn current_user(&self) -> Result<Option<User>> {
        Ok(self.current_session()?.map(|(session, _)| session.user))
    }
}

/// Table-level access to entries and their images
pub trait RecordStore {
    /// Insert an entry owned by `user_id`; the store assigns id and timestamps
    fn insert_entry(&self, user_id: Uuid, entry: &NewEntry) -> Result<JournalEntry>;

    fn update_entry(
        &self,
        id: Uuid,
        patch: &EntryPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<JournalEntry>;

    fn delete_entry(&self, id: Uuid) -> Result<()>;

    /// All entries of `user_id`, each joined with its images in insertion order
    fn select_entries(&self, user_id: Uuid, order: SortOrder) -> Result<Vec<JournalEntry>>;

    fn insert_image(&self, image: &NewImage) -> Result<EntryImage>;

    /// Remove every image record of an entry, returning how many were removed
    fn delete_images(&self, entry_id: Uuid) -> Result<usize>;
}

/// Binary object storage with publicly resolvable addresses
pub trait ObjectStore {
    fn upload(&self, key: &str, bytes: &[u8]) -> Result<()>;

    fn public_url(&self, key: &str) -> String;
}
