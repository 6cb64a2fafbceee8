//! Output formatting utilities

use crate::application::SaveOutcome;
use crate::domain::mood::MOOD_OPTIONS;
use crate::domain::JournalEntry;
use chrono::{DateTime, Local, Utc};

const PREVIEW_CHARS: usize = 150;
const PREVIEW_IMAGES: usize = 3;

fn short_id(entry: &JournalEntry) -> String {
    entry.id.simple().to_string()[..8].to_string()
}

fn local_timestamp(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local)
        .format("%b %-d, %Y %-I:%M %p")
        .to_string()
}

/// First `max_chars` characters of `content`, with `...` when cut
pub fn truncate_content(content: &str, max_chars: usize) -> String {
    match content.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_string(),
    }
}

/// One entry as a compact card
pub fn format_entry_card(entry: &JournalEntry) -> String {
    let mood = entry.mood_option();
    let mut output = format!(
        "{}  [{}]\n  {} · {} {}\n",
        entry.title,
        short_id(entry),
        entry.entry_date.format("%b %-d, %Y"),
        mood.emoji,
        mood.label
    );

    if !entry.content.is_empty() {
        for line in truncate_content(&entry.content, PREVIEW_CHARS).lines() {
            output.push_str(&format!("  {}\n", line));
        }
    }

    if !entry.images.is_empty() {
        let names: Vec<&str> = entry
            .images
            .iter()
            .take(PREVIEW_IMAGES)
            .map(|image| image.image_name.as_str())
            .collect();
        output.push_str(&format!("  Images: {}", names.join(", ")));
        if entry.images.len() > PREVIEW_IMAGES {
            output.push_str(&format!(" +{}", entry.images.len() - PREVIEW_IMAGES));
        }
        output.push('\n');
    }

    output
}

/// Cards for a list of entries, or the empty-state message
pub fn format_entry_list(entries: &[&JournalEntry], searching: bool) -> String {
    if entries.is_empty() {
        return if searching {
            "No entries found\nTry adjusting your search terms".to_string()
        } else {
            "No entries yet\nStart by creating your first journal entry: daybook new --title ..."
                .to_string()
        };
    }

    entries
        .iter()
        .map(|entry| format_entry_card(entry))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full view of one entry
pub fn format_entry_detail(entry: &JournalEntry) -> String {
    let mood = entry.mood_option();
    let mut output = format!(
        "{}\n{} · {} {}\nid: {}\n\n",
        entry.title,
        entry.entry_date.format("%B %-d, %Y"),
        mood.emoji,
        mood.label,
        entry.id
    );

    if !entry.content.is_empty() {
        output.push_str(&entry.content);
        output.push_str("\n\n");
    }

    if !entry.images.is_empty() {
        output.push_str(&format!("Images ({}):\n", entry.images.len()));
        for image in &entry.images {
            output.push_str(&format!("  {}  {}\n", image.image_name, image.image_url));
        }
        output.push('\n');
    }

    output.push_str(&format!("Created: {}", local_timestamp(entry.created_at)));
    if entry.was_edited() {
        output.push_str(&format!("  Updated: {}", local_timestamp(entry.updated_at)));
    }
    output.push('\n');
    output
}

/// Summary printed after a create or edit
pub fn format_save_outcome(outcome: &SaveOutcome) -> String {
    let mut output = format!(
        "{} [{}]: {}\n",
        outcome.entry.title,
        short_id(&outcome.entry),
        outcome
    );
    for failure in &outcome.failures {
        output.push_str(&format!("  failed: {} ({})\n", failure.file_name, failure.reason));
    }
    output
}

/// The mood catalog, one mood per line
pub fn format_mood_catalog() -> String {
    let mut output = String::new();
    for option in MOOD_OPTIONS.iter() {
        output.push_str(&format!(
            "{} {:<10} {}\n",
            option.emoji,
            option.value.as_str(),
            option.label
        ));
    }
    output
}
