//! Entry repository: the signed-in user's entries and every change to them
//!
//! The repository keeps the loaded entries in memory, newest `entry_date`
//! first, and routes all mutations through the record and object stores.
//! After a successful create, update or delete it reloads the whole
//! collection so ordering and image lists always reflect the store.

use crate::domain::image::{storage_key, ImageFile};
use crate::domain::{EntryImage, EntryPatch, JournalEntry, NewEntry, NewImage};
use crate::error::{DaybookError, Result};
use crate::infrastructure::{ObjectStore, RecordStore, SortOrder};
use chrono::{Duration, Utc};
use std::fmt;
use uuid::Uuid;

/// Identifies one load request; only the newest ticket may apply its result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

/// An image that could not be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFailure {
    pub file_name: String,
    pub reason: String,
}

/// Result of a create or update. The entry itself was saved; some of its
/// images may not have been.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub entry: JournalEntry,
    pub images_attempted: usize,
    pub failures: Vec<UploadFailure>,
}

impl SaveOutcome {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn images_saved(&self) -> usize {
        self.images_attempted - self.failures.len()
    }
}

impl fmt::Display for SaveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_complete() {
            write!(f, "entry saved")?;
            if self.images_attempted > 0 {
                write!(f, " with {} image(s)", self.images_attempted)?;
            }
            Ok(())
        } else {
            write!(
                f,
                "entry saved; {} of {} images failed",
                self.failures.len(),
                self.images_attempted
            )
        }
    }
}

pub struct EntryRepository<S, O> {
    store: S,
    objects: O,
    entries: Vec<JournalEntry>,
    loading: bool,
    error: Option<String>,
    active_user: Option<Uuid>,
    generation: u64,
}

impl<S: RecordStore, O: ObjectStore> EntryRepository<S, O> {
    pub fn new(store: S, objects: O) -> Self {
        EntryRepository {
            store,
            objects,
            entries: Vec::new(),
            loading: false,
            error: None,
            active_user: None,
            generation: 0,
        }
    }

    /// Loaded entries, newest `entry_date` first
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message of the last failed load, cleared by the next successful one
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn active_user(&self) -> Option<Uuid> {
        self.active_user
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Start a load. Any ticket issued earlier becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.loading = true;
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Apply a fetched result for `user_id`. Returns false, leaving state
    /// untouched, when a newer load was started after `ticket`.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        user_id: Uuid,
        result: std::result::Result<Vec<JournalEntry>, String>,
    ) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                stale = ticket.generation,
                current = self.generation,
                "Discarding stale load"
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(mut entries) => {
                entries.sort_by(|a, b| b.entry_date.cmp(&a.entry_date));
                tracing::debug!(user_id = %user_id, count = entries.len(), "Loaded entries");
                self.entries = entries;
                self.error = None;
            }
            Err(message) => {
                tracing::warn!(user_id = %user_id, "Failed to load entries: {}", message);
                if self.active_user != Some(user_id) {
                    self.entries.clear();
                }
                self.error = Some(message);
            }
        }
        self.active_user = Some(user_id);
        true
    }

    /// Fetch every entry of `user_id` with its images and replace the
    /// in-memory collection. On failure the error is also retained.
    pub fn load(&mut self, user_id: Uuid) -> Result<&[JournalEntry]> {
        let ticket = self.begin_load();
        match self.store.select_entries(user_id, SortOrder::Descending) {
            Ok(entries) => {
                self.finish_load(ticket, user_id, Ok(entries));
                Ok(&self.entries)
            }
            Err(e) => {
                self.finish_load(ticket, user_id, Err(e.to_string()));
                Err(e)
            }
        }
    }

    /// Reload the active user's entries; failures stay in `error()`
    fn reload(&mut self, user_id: Uuid) {
        if self.load(user_id).is_err() {
            tracing::debug!(user_id = %user_id, "Reload failed; keeping previous entries");
        }
    }

    pub fn create(
        &mut self,
        user_id: Uuid,
        entry: NewEntry,
        images: &[ImageFile],
    ) -> Result<SaveOutcome> {
        validate_title(&entry.title)?;

        let created = self.store.insert_entry(user_id, &entry)?;
        tracing::info!(entry_id = %created.id, "Created entry");

        let failures = self.upload_images(created.id, images);
        self.reload(user_id);

        Ok(self.outcome(created, images.len(), failures))
    }

    /// Overwrite title, content and mood, and append any new images
    pub fn update(
        &mut self,
        id: Uuid,
        patch: EntryPatch,
        images: &[ImageFile],
    ) -> Result<SaveOutcome> {
        validate_title(&patch.title)?;

        let mut updated_at = Utc::now();
        if let Some(previous) = self.get(id) {
            if updated_at <= previous.updated_at {
                updated_at = previous.updated_at + Duration::microseconds(1);
            }
        }

        let updated = self.store.update_entry(id, &patch, updated_at)?;
        tracing::info!(entry_id = %id, "Updated entry");

        let failures = self.upload_images(id, images);
        if let Some(user_id) = self.active_user {
            self.reload(user_id);
        }

        Ok(self.outcome(updated, images.len(), failures))
    }

    /// Remove an entry's images, then the entry. Nothing is reloaded unless
    /// both steps succeed.
    pub fn delete(&mut self, id: Uuid) -> Result<()> {
        let removed = self.store.delete_images(id)?;
        self.store.delete_entry(id)?;
        tracing::info!(entry_id = %id, images = removed, "Deleted entry");

        if let Some(user_id) = self.active_user {
            self.reload(user_id);
        }
        Ok(())
    }

    /// Entries whose title or content contains `query`, ignoring case.
    /// A blank query returns everything.
    pub fn search(&self, query: &str) -> Vec<&JournalEntry> {
        if query.trim().is_empty() {
            return self.entries.iter().collect();
        }

        let needle = query.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| entry.matches(&needle))
            .collect()
    }

    pub fn get(&self, id: Uuid) -> Option<&JournalEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Find a loaded entry by full id or unique id prefix
    pub fn resolve(&self, id_or_prefix: &str) -> Result<&JournalEntry> {
        let prefix = id_or_prefix.trim().to_lowercase();
        if prefix.is_empty() {
            return Err(DaybookError::EntryNotFound(id_or_prefix.to_string()));
        }

        let matches: Vec<&JournalEntry> = self
            .entries
            .iter()
            .filter(|entry| entry.id.to_string().starts_with(&prefix))
            .collect();

        match matches.as_slice() {
            [] => Err(DaybookError::EntryNotFound(id_or_prefix.to_string())),
            [entry] => Ok(*entry),
            _ => matches
                .iter()
                .find(|entry| entry.id.to_string() == prefix)
                .copied()
                .ok_or_else(|| DaybookError::AmbiguousId(id_or_prefix.to_string())),
        }
    }

    fn outcome(
        &self,
        saved: JournalEntry,
        images_attempted: usize,
        failures: Vec<UploadFailure>,
    ) -> SaveOutcome {
        let entry = self.get(saved.id).cloned().unwrap_or(saved);
        SaveOutcome {
            entry,
            images_attempted,
            failures,
        }
    }

    /// Store each image and link it to the entry. A failed image is logged
    /// and recorded; the rest of the batch still runs.
    fn upload_images(&self, entry_id: Uuid, images: &[ImageFile]) -> Vec<UploadFailure> {
        let mut failures = Vec::new();

        for image in images {
            match self.upload_image(entry_id, image) {
                Ok(record) => {
                    tracing::debug!(entry_id = %entry_id, url = %record.image_url, "Linked image");
                }
                Err(e) => {
                    tracing::warn!(
                        entry_id = %entry_id,
                        file = %image.name,
                        "Error uploading image: {}",
                        e
                    );
                    failures.push(UploadFailure {
                        file_name: image.name.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        failures
    }

    fn upload_image(&self, entry_id: Uuid, image: &ImageFile) -> Result<EntryImage> {
        let key = storage_key(entry_id, &image.name, Utc::now().timestamp_millis());
        self.objects.upload(&key, &image.bytes)?;

        let image_url = self.objects.public_url(&key);
        self.store.insert_image(&NewImage {
            entry_id,
            image_url,
            image_name: image.name.clone(),
        })
    }
}

fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(DaybookError::Validation("Title is required".to_string()));
    }
    Ok(())
}
