//! Mastery Reporter
//!
//! Summarizes a learner's mastery records into a structured report. Records
//! come from whatever the caller has persisted; this module only reads them.

use crate::catalog::Catalog;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How well a learner knows a topic, independent of the topic's difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum MasteryDepth {
    Surface,
    Intermediate,
    Deep,
}

/// A learner's standing on a single topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MasteryRecord {
    pub topic_id: String,
    pub mastered: bool,
    pub depth: MasteryDepth,
    #[serde(default)]
    pub completed_exercise_count: u32,
}

impl MasteryRecord {
    pub fn new(
        topic_id: impl Into<String>,
        mastered: bool,
        depth: MasteryDepth,
        completed_exercise_count: u32,
    ) -> Self {
        Self {
            topic_id: topic_id.into(),
            mastered,
            depth,
            completed_exercise_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MasteredEntry {
    pub topic_id: String,
    /// The topic's name, or its raw id when the catalog does not know it.
    pub name: String,
    pub completed_exercise_count: u32,
}

/// Mastered topics partitioned by depth.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DepthBuckets {
    pub surface: Vec<MasteredEntry>,
    pub intermediate: Vec<MasteredEntry>,
    pub deep: Vec<MasteredEntry>,
}

impl DepthBuckets {
    fn bucket_mut(&mut self, depth: MasteryDepth) -> &mut Vec<MasteredEntry> {
        match depth {
            MasteryDepth::Surface => &mut self.surface,
            MasteryDepth::Intermediate => &mut self.intermediate,
            MasteryDepth::Deep => &mut self.deep,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReadyTopic {
    pub topic_id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MasteryReport {
    pub completion_percentage: u8,
    pub mastered_count: usize,
    pub total_topics: usize,
    pub by_depth: DepthBuckets,
    /// Every topic the learner can start now, in catalog order.
    pub ready_to_learn: Vec<ReadyTopic>,
}

/// Returns the ids of all records flagged as mastered.
pub fn mastered_set(records: &[MasteryRecord]) -> HashSet<String> {
    records
        .iter()
        .filter(|r| r.mastered)
        .map(|r| r.topic_id.clone())
        .collect()
}

/// `round(100 * mastered / total)`, clamped to `0..=100`.
///
/// Records for unknown topics still count as mastered, so the raw ratio can
/// exceed one; the clamp keeps the percentage in range.
pub fn completion_percentage(mastered: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let percentage = (100.0 * mastered as f64 / total as f64).round();
    percentage.min(100.0) as u8
}

/// Builds a mastery report for the given records.
pub fn build_report(catalog: &Catalog, records: &[MasteryRecord]) -> MasteryReport {
    let mastered = mastered_set(records);

    let mut by_depth = DepthBuckets::default();
    for record in records.iter().filter(|r| r.mastered) {
        by_depth.bucket_mut(record.depth).push(MasteredEntry {
            topic_id: record.topic_id.clone(),
            name: catalog.display_name(&record.topic_id).to_string(),
            completed_exercise_count: record.completed_exercise_count,
        });
    }

    let ready_to_learn = catalog
        .eligible_topics(&mastered)
        .into_iter()
        .map(|eligible| ReadyTopic {
            name: catalog.display_name(&eligible.topic_id).to_string(),
            topic_id: eligible.topic_id,
        })
        .collect();

    MasteryReport {
        completion_percentage: completion_percentage(mastered.len(), catalog.len()),
        mastered_count: mastered.len(),
        total_topics: catalog.len(),
        by_depth,
        ready_to_learn,
    }
}
