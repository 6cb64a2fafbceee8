//! Local record store: entry and image tables kept as TOML files

use crate::domain::{EntryImage, EntryPatch, JournalEntry, NewEntry, NewImage};
use crate::error::{DaybookError, Result};
use crate::infrastructure::backend::{RecordStore, SortOrder};
use crate::infrastructure::workspace::{write_atomic, Workspace};
use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const ENTRIES_TABLE: &str = "journal_entries.toml";
const IMAGES_TABLE: &str = "entry_images.toml";

/// Row of the entries table. Images live in their own table.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EntryRow {
    id: Uuid,
    user_id: Uuid,
    title: String,
    content: String,
    mood: String,
    entry_date: NaiveDate,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl EntryRow {
    fn into_entry(self, images: Vec<EntryImage>) -> JournalEntry {
        JournalEntry {
            id: self.id,
            user_id: self.user_id,
            title: self.title,
            content: self.content,
            mood: self.mood,
            entry_date: self.entry_date,
            created_at: self.created_at,
            updated_at: self.updated_at,
            images,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Table<T> {
    #[serde(default = "Vec::new", rename = "row")]
    rows: Vec<T>,
}

/// Record store backed by `.daybook/tables/*.toml`
#[derive(Debug, Clone)]
pub struct LocalRecordStore {
    tables_dir: PathBuf,
}

impl LocalRecordStore {
    pub fn new(tables_dir: PathBuf) -> Self {
        LocalRecordStore { tables_dir }
    }

    pub fn open(workspace: &Workspace) -> Self {
        Self::new(workspace.tables_dir())
    }

    fn read_table<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>> {
        let path = self.tables_dir.join(name);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(data_error(&path, e)),
        };

        let table: Table<T> = toml::from_str(&contents).map_err(|e| data_error(&path, e))?;
        Ok(table.rows)
    }

    fn write_table<T: Serialize>(&self, name: &str, rows: Vec<T>) -> Result<()> {
        let path = self.tables_dir.join(name);
        let contents =
            toml::to_string_pretty(&Table { rows }).map_err(|e| data_error(&path, e))?;
        write_atomic(&path, &contents).map_err(|e| data_error(&path, e))?;
        tracing::debug!(table = name, "Wrote table");
        Ok(())
    }

    fn images_of(images: &[EntryImage], entry_id: Uuid) -> Vec<EntryImage> {
        images
            .iter()
            .filter(|image| image.entry_id == entry_id)
            .cloned()
            .collect()
    }
}

fn data_error(path: &Path, err: impl std::fmt::Display) -> DaybookError {
    DaybookError::Data(format!("{}: {}", path.display(), err))
}

impl RecordStore for LocalRecordStore {
    fn insert_entry(&self, user_id: Uuid, entry: &NewEntry) -> Result<JournalEntry> {
        let mut rows: Vec<EntryRow> = self.read_table(ENTRIES_TABLE)?;
        let now = Utc::now();
        let row = EntryRow {
            id: Uuid::new_v4(),
            user_id,
            title: entry.title.clone(),
            content: entry.content.clone(),
            mood: entry.mood.as_str().to_string(),
            entry_date: entry.entry_date,
            created_at: now,
            updated_at: now,
        };

        rows.push(row.clone());
        self.write_table(ENTRIES_TABLE, rows)?;
        Ok(row.into_entry(Vec::new()))
    }

    fn update_entry(
        &self,
        id: Uuid,
        patch: &EntryPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<JournalEntry> {
        let mut rows: Vec<EntryRow> = self.read_table(ENTRIES_TABLE)?;
        let row = rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or_else(|| DaybookError::EntryNotFound(id.to_string()))?;

        row.title = patch.title.clone();
        row.content = patch.content.clone();
        row.mood = patch.mood.as_str().to_string();
        row.updated_at = updated_at;
        let updated = row.clone();

        self.write_table(ENTRIES_TABLE, rows)?;
        let images: Vec<EntryImage> = self.read_table(IMAGES_TABLE)?;
        Ok(updated.into_entry(Self::images_of(&images, id)))
    }

    fn delete_entry(&self, id: Uuid) -> Result<()> {
        let mut rows: Vec<EntryRow> = self.read_table(ENTRIES_TABLE)?;
        let before = rows.len();
        rows.retain(|row| row.id != id);

        if rows.len() == before {
            tracing::debug!(entry_id = %id, "Delete matched no entry");
            return Ok(());
        }
        self.write_table(ENTRIES_TABLE, rows)
    }

    fn select_entries(&self, user_id: Uuid, order: SortOrder) -> Result<Vec<JournalEntry>> {
        let rows: Vec<EntryRow> = self.read_table(ENTRIES_TABLE)?;
        let images: Vec<EntryImage> = self.read_table(IMAGES_TABLE)?;

        let mut entries: Vec<JournalEntry> = rows
            .into_iter()
            .filter(|row| row.user_id == user_id)
            .map(|row| {
                let owned = Self::images_of(&images, row.id);
                row.into_entry(owned)
            })
            .collect();

        match order {
            SortOrder::Ascending => entries.sort_by(|a, b| a.entry_date.cmp(&b.entry_date)),
            SortOrder::Descending => entries.sort_by(|a, b| b.entry_date.cmp(&a.entry_date)),
        }

        tracing::debug!(user_id = %user_id, count = entries.len(), "Selected entries");
        Ok(entries)
    }

    fn insert_image(&self, image: &NewImage) -> Result<EntryImage> {
        let entries: Vec<EntryRow> = self.read_table(ENTRIES_TABLE)?;
        if !entries.iter().any(|row| row.id == image.entry_id) {
            return Err(DaybookError::Data(format!(
                "Image references missing entry {}",
                image.entry_id
            )));
        }

        let mut rows: Vec<EntryImage> = self.read_table(IMAGES_TABLE)?;
        let record = EntryImage {
            id: Uuid::new_v4(),
            entry_id: image.entry_id,
            image_url: image.image_url.clone(),
            image_name: image.image_name.clone(),
            created_at: Utc::now(),
        };

        rows.push(record.clone());
        self.write_table(IMAGES_TABLE, rows)?;
        Ok(record)
    }

    fn delete_images(&self, entry_id: Uuid) -> Result<usize> {
        let mut rows: Vec<EntryImage> = self.read_table(IMAGES_TABLE)?;
        let before = rows.len();
        rows.retain(|image| image.entry_id != entry_id);
        let removed = before - rows.len();

        if removed > 0 {
            self.write_table(IMAGES_TABLE, rows)?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Mood;
    use tempfile::TempDir;

    fn new_entry(title: &str, date: (i32, u32, u32)) -> NewEntry {
        NewEntry {
            title: title.to_string(),
            content: format!("{} content", title),
            mood: Mood::Good,
            entry_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        }
    }

    fn image_for(entry_id: Uuid, name: &str) -> NewImage {
        NewImage {
            entry_id,
            image_url: format!("https://cdn.example.com/{}", name),
            image_name: name.to_string(),
        }
    }

    #[test]
    fn test_empty_store_selects_nothing() {
        let temp = TempDir::new().unwrap();
        let store = LocalRecordStore::new(temp.path().to_path_buf());

        let entries = store
            .select_entries(Uuid::new_v4(), SortOrder::Descending)
            .unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_insert_assigns_id_and_equal_timestamps() {
        let temp = TempDir::new().unwrap();
        let store = LocalRecordStore::new(temp.path().to_path_buf());
        let user = Uuid::new_v4();

        let entry = store
            .insert_entry(user, &new_entry("First", (2024, 1, 1)))
            .unwrap();

        assert_eq!(entry.user_id, user);
        assert_eq!(entry.mood, "good");
        assert_eq!(entry.created_at, entry.updated_at);
        assert!(temp.path().join(ENTRIES_TABLE).exists());
    }

    #[test]
    fn test_select_filters_by_user_and_orders_by_date() {
        let temp = TempDir::new().unwrap();
        let store = LocalRecordStore::new(temp.path().to_path_buf());
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        store.insert_entry(alice, &new_entry("Jan", (2024, 1, 1))).unwrap();
        store.insert_entry(alice, &new_entry("Mar", (2024, 3, 15))).unwrap();
        store.insert_entry(bob, &new_entry("Bob", (2024, 5, 1))).unwrap();
        store.insert_entry(alice, &new_entry("Feb", (2024, 2, 1))).unwrap();

        let desc = store.select_entries(alice, SortOrder::Descending).unwrap();
        let titles: Vec<&str> = desc.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Mar", "Feb", "Jan"]);

        let asc = store.select_entries(alice, SortOrder::Ascending).unwrap();
        let titles: Vec<&str> = asc.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Jan", "Feb", "Mar"]);
    }

    #[test]
    fn test_images_are_joined_in_insertion_order() {
        let temp = TempDir::new().unwrap();
        let store = LocalRecordStore::new(temp.path().to_path_buf());
        let user = Uuid::new_v4();
        let a = store.insert_entry(user, &new_entry("A", (2024, 1, 1))).unwrap();
        let b = store.insert_entry(user, &new_entry("B", (2024, 1, 2))).unwrap();

        store.insert_image(&image_for(a.id, "one.png")).unwrap();
        store.insert_image(&image_for(b.id, "other.png")).unwrap();
        store.insert_image(&image_for(a.id, "two.png")).unwrap();

        let entries = store.select_entries(user, SortOrder::Ascending).unwrap();
        let names: Vec<&str> = entries[0]
            .images
            .iter()
            .map(|i| i.image_name.as_str())
            .collect();
        assert_eq!(names, vec!["one.png", "two.png"]);
        assert_eq!(entries[1].images.len(), 1);
    }

    #[test]
    fn test_insert_image_requires_existing_entry() {
        let temp = TempDir::new().unwrap();
        let store = LocalRecordStore::new(temp.path().to_path_buf());

        let err = store
            .insert_image(&image_for(Uuid::new_v4(), "orphan.png"))
            .unwrap_err();
        assert!(matches!(err, DaybookError::Data(_)));
    }

    #[test]
    fn test_update_keeps_date_and_owner() {
        let temp = TempDir::new().unwrap();
        let store = LocalRecordStore::new(temp.path().to_path_buf());
        let user = Uuid::new_v4();
        let entry = store
            .insert_entry(user, &new_entry("Draft", (2024, 4, 4)))
            .unwrap();

        let later = entry.updated_at + chrono::Duration::seconds(5);
        let patch = EntryPatch {
            title: "Final".to_string(),
            content: "Rewritten".to_string(),
            mood: Mood::Excellent,
        };
        let updated = store.update_entry(entry.id, &patch, later).unwrap();

        assert_eq!(updated.title, "Final");
        assert_eq!(updated.mood, "excellent");
        assert_eq!(updated.updated_at, later);
        assert_eq!(updated.created_at, entry.created_at);
        assert_eq!(updated.entry_date, entry.entry_date);
        assert_eq!(updated.user_id, user);
    }

    #[test]
    fn test_update_missing_entry_fails() {
        let temp = TempDir::new().unwrap();
        let store = LocalRecordStore::new(temp.path().to_path_buf());
        let patch = EntryPatch {
            title: "x".to_string(),
            content: String::new(),
            mood: Mood::Okay,
        };

        let err = store
            .update_entry(Uuid::new_v4(), &patch, Utc::now())
            .unwrap_err();
        assert!(matches!(err, DaybookError::EntryNotFound(_)));
    }

    #[test]
    fn test_delete_images_then_entry() {
        let temp = TempDir::new().unwrap();
        let store = LocalRecordStore::new(temp.path().to_path_buf());
        let user = Uuid::new_v4();
        let entry = store.insert_entry(user, &new_entry("A", (2024, 1, 1))).unwrap();
        store.insert_image(&image_for(entry.id, "one.png")).unwrap();
        store.insert_image(&image_for(entry.id, "two.png")).unwrap();

        assert_eq!(store.delete_images(entry.id).unwrap(), 2);
        store.delete_entry(entry.id).unwrap();

        assert!(store
            .select_entries(user, SortOrder::Descending)
            .unwrap()
            .is_empty());
        let images: Vec<EntryImage> = store.read_table(IMAGES_TABLE).unwrap();
        assert!(images.is_empty());
    }

    #[test]
    fn test_legacy_mood_value_is_preserved() {
        let temp = TempDir::new().unwrap();
        let store = LocalRecordStore::new(temp.path().to_path_buf());
        let user = Uuid::new_v4();
        fs::write(
            temp.path().join(ENTRIES_TABLE),
            format!(
                "[[row]]\n\
                id = \"{}\"\n\
                user_id = \"{}\"\n\
                title = \"Imported\"\n\
                content = \"From an old export\"\n\
                mood = \"meh\"\n\
                entry_date = \"2023-06-01\"\n\
                created_at = \"2023-06-01T10:00:00Z\"\n\
                updated_at = \"2023-06-01T10:00:00Z\"\n",
                Uuid::new_v4(),
                user
            ),
        )
        .unwrap();

        let entries = store.select_entries(user, SortOrder::Descending).unwrap();
        assert_eq!(entries[0].mood, "meh");
        assert_eq!(entries[0].mood_option().label, "Okay");
    }

    #[test]
    fn test_corrupt_table_is_data_error() {
        let temp = TempDir::new().unwrap();
        let store = LocalRecordStore::new(temp.path().to_path_buf());
        fs::write(temp.path().join(ENTRIES_TABLE), "not [valid toml").unwrap();

        let err = store
            .select_entries(Uuid::new_v4(), SortOrder::Descending)
            .unwrap_err();
        assert!(matches!(err, DaybookError::Data(_)));
    }
}
