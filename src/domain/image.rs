//! Image selection rules and storage key naming

use crate::error::{DaybookError, Result};
use std::fs;
use std::path::Path;
use uuid::Uuid;

const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "webp", "bmp", "svg", "heic", "heif", "avif", "tif", "tiff",
    "ico",
];

/// An image selected for upload, held in memory until stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    /// Original file name, kept as the human-readable image name
    pub name: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        ImageFile {
            name: name.into(),
            bytes,
        }
    }

    /// Read an image from disk, rejecting files that are not images
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                DaybookError::Validation(format!("Invalid image path: {}", path.display()))
            })?
            .to_string();

        if !is_image_name(&name) {
            return Err(DaybookError::Validation(format!(
                "Not an image file: {}",
                name
            )));
        }

        let bytes = fs::read(path)?;
        Ok(ImageFile::new(name, bytes))
    }
}

/// True when the file name carries a known image extension
pub fn is_image_name(name: &str) -> bool {
    match name.rsplit_once('.') {
        Some((_, ext)) => IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()),
        None => false,
    }
}

/// Load every path as an image, enforcing the per-submission limit first.
pub fn select_images<P: AsRef<Path>>(paths: &[P], max_images: usize) -> Result<Vec<ImageFile>> {
    if paths.len() > max_images {
        return Err(DaybookError::Validation(format!(
            "You can only upload up to {} images",
            max_images
        )));
    }

    paths
        .iter()
        .map(|p| ImageFile::from_path(p.as_ref()))
        .collect()
}

/// Text after the last '.' of the name; the whole name when there is none.
pub fn extension_of(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

/// Storage key for an uploaded image: `<entry_id>/<unix_millis>.<ext>`.
///
/// Two images stored for the same entry within one millisecond get the same
/// key; the object store rejects the second upload.
pub fn storage_key(entry_id: Uuid, file_name: &str, unix_millis: i64) -> String {
    format!("{}/{}.{}", entry_id, unix_millis, extension_of(file_name))
}
