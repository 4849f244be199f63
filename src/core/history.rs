use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::content::{ContentType, GenerationRequest, Platform, Tone, Variation};

/// One durable record of a completed generation run. Never edited or
/// deleted once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: String,
    pub platform: Platform,
    pub content_type: ContentType,
    pub tone: Tone,
    pub topic: String,
    pub variations: Vec<Variation>,
}

impl HistoryEntry {
    /// Stamp a finished batch with the current UTC time.
    pub fn from_batch(request: &GenerationRequest, variations: Vec<Variation>) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            platform: request.platform,
            content_type: request.content_type,
            tone: request.tone,
            topic: request.topic.clone(),
            variations,
        }
    }
}

/// Flat row used by the history table and the CSV export.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRow {
    pub timestamp: String,
    pub topic: String,
    pub platform: String,
    pub content_type: String,
    pub preview: String,
}

/// Characters of the first variation shown in previews.
const PREVIEW_CHARS: usize = 100;

/// Append-only, newest-first store backed by one pretty-printed JSON
/// file. The whole file is read on load and rewritten on every insert.
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every entry, newest first. History is supplementary data:
    /// an absent file is an empty store and a corrupt one degrades to
    /// empty with a logged diagnostic instead of failing the run.
    pub async fn load(&self) -> Vec<HistoryEntry> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("No history file at {}", self.path.display());
                return Vec::new();
            }
            Err(err) => {
                warn!(
                    "History file {} unreadable ({}), treating as empty",
                    self.path.display(),
                    err
                );
                return Vec::new();
            }
        };
        match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(
                    "History file {} is corrupt ({}), treating as empty",
                    self.path.display(),
                    err
                );
                Vec::new()
            }
        }
    }

    /// Prepend one entry and rewrite the whole file. Not atomic across
    /// a crash; the store is single-user by assumption.
    pub async fn insert(&self, entry: HistoryEntry) -> Result<()> {
        let mut entries = self.load().await;
        entries.insert(0, entry);
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let json = to_json_pretty(&entries)?;
        tokio::fs::write(&self.path, json)
            .await
            .with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }
}

/// Project entries into flat rows: timestamp, topic, platform, type,
/// and a preview of the first variation capped at 100 characters.
pub fn to_tabular(entries: &[HistoryEntry]) -> Vec<HistoryRow> {
    entries
        .iter()
        .map(|entry| {
            let first_text = entry
                .variations
                .first()
                .map(|v| v.text.as_str())
                .unwrap_or("");
            HistoryRow {
                timestamp: entry.timestamp.clone(),
                topic: entry.topic.clone(),
                platform: entry.platform.to_string(),
                content_type: entry.content_type.to_string(),
                preview: preview_of(first_text),
            }
        })
        .collect()
}

fn preview_of(text: &str) -> String {
    if text.chars().count() > PREVIEW_CHARS {
        let head: String = text.chars().take(PREVIEW_CHARS).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

/// CSV projection of the whole store. An empty store exports as an
/// empty string, not a lone header row.
pub fn to_csv(entries: &[HistoryEntry]) -> String {
    let rows = to_tabular(entries);
    if rows.is_empty() {
        return String::new();
    }
    let mut out = String::from("timestamp,topic,platform,type,preview\n");
    for row in rows {
        out.push_str(&format!(
            "{},{},{},{},{}\n",
            escape_csv(&row.timestamp),
            escape_csv(&row.topic),
            escape_csv(&row.platform),
            escape_csv(&row.content_type),
            escape_csv(&row.preview)
        ));
    }
    out
}

fn escape_csv(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Pretty-printed JSON of the whole store, non-ASCII preserved.
pub fn to_json_pretty(entries: &[HistoryEntry]) -> Result<String> {
    Ok(serde_json::to_string_pretty(entries)?)
}
