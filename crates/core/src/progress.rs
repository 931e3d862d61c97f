//! Learner Progress Sources
//!
//! This module defines the seam between the mastery engine and whatever owns
//! a learner's persisted record. The engine only ever reads progress; writing
//! it back is the owner's job.

use crate::catalog::Catalog;
use crate::report::MasteryRecord;
use anyhow::{Context, Result};
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, info};

/// Defines the contract for anything that can supply a learner's mastery records.
///
/// Implementations are free to read from memory, a file or a remote store;
/// callers rebuild every report from a fresh `load_records` call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Returns the learner's current mastery records.
    async fn load_records(&self) -> Result<Vec<MasteryRecord>>;
}

/// A `ProgressStore` backed by a fixed list of records.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProgress {
    records: Vec<MasteryRecord>,
}

impl InMemoryProgress {
    pub fn new(records: Vec<MasteryRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl ProgressStore for InMemoryProgress {
    async fn load_records(&self) -> Result<Vec<MasteryRecord>> {
        Ok(self.records.clone())
    }
}

/// A read-only `ProgressStore` over a JSON array of `MasteryRecord`s.
///
/// A missing file means the learner has no progress yet. The file is re-read
/// on every call so that edits made by its owner show up immediately.
#[derive(Debug, Clone)]
pub struct JsonFileProgress {
    path: PathBuf,
}

impl JsonFileProgress {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ProgressStore for JsonFileProgress {
    async fn load_records(&self) -> Result<Vec<MasteryRecord>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Progress file not found, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read progress file {}", self.path.display())
                });
            }
        };
        let records: Vec<MasteryRecord> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse progress file {}", self.path.display()))?;
        info!(path = %self.path.display(), records = records.len(), "Loaded progress records");
        Ok(records)
    }
}

/// A single entry from the learner's lesson log.
///
/// Entries are produced by an external log parser; concept tags are free text
/// and are not guaranteed to match catalog ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LessonEntry {
    pub difficulty: String,
    #[serde(default)]
    pub concepts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ConceptTally {
    pub topic_id: String,
    pub occurrences: usize,
}

/// Counts how often each catalog topic was tagged across lesson entries.
///
/// Tags that are not catalog ids are ignored. Results follow catalog order and
/// omit topics that were never tagged.
pub fn tally_concepts(catalog: &Catalog, entries: &[LessonEntry]) -> Vec<ConceptTally> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for tag in entries.iter().flat_map(|e| e.concepts.iter()) {
        let tag = tag.trim();
        if catalog.contains(tag) {
            *counts.entry(tag).or_default() += 1;
        }
    }

    catalog
        .iter()
        .filter_map(|topic| {
            counts.get(topic.id.as_str()).map(|&occurrences| ConceptTally {
                topic_id: topic.id.clone(),
                occurrences,
            })
        })
        .collect()
}
