//! Eligibility & Recommendation Engine
//!
//! Decides which topics a learner can start next and which of them unlocks
//! the most future topics.

use crate::catalog::Catalog;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// A topic whose prerequisites are all mastered but which is not mastered itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EligibleTopic {
    pub topic_id: String,
    /// Number of topics that list this one as a direct prerequisite.
    pub dependent_count: usize,
}

/// The single topic suggested as the next thing to learn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Recommendation {
    pub topic_id: String,
    pub reason: String,
}

impl Catalog {
    /// Lists every eligible topic in catalog order.
    ///
    /// Mastered ids that do not exist in the catalog are ignored, except that
    /// they satisfy prerequisites declaring the same unknown id.
    pub fn eligible_topics(&self, mastered: &HashSet<String>) -> Vec<EligibleTopic> {
        self.iter()
            .filter(|topic| !mastered.contains(&topic.id))
            .filter(|topic| topic.prerequisites.iter().all(|p| mastered.contains(p)))
            .map(|topic| EligibleTopic {
                topic_id: topic.id.clone(),
                dependent_count: self.dependents_of(&topic.id).len(),
            })
            .collect()
    }

    /// Picks the eligible topic that unlocks the most dependents.
    ///
    /// Ties go to the topic that appears first in the catalog. Returns `None`
    /// when nothing is eligible, which covers both a fully mastered catalog and
    /// a learner with no reachable entry point.
    pub fn recommend_next(&self, mastered: &HashSet<String>) -> Option<Recommendation> {
        let mut best: Option<EligibleTopic> = None;
        for candidate in self.eligible_topics(mastered) {
            if best
                .as_ref()
                .is_none_or(|top| candidate.dependent_count > top.dependent_count)
            {
                best = Some(candidate);
            }
        }

        let Some(best) = best else {
            debug!(mastered = mastered.len(), "No eligible topics to recommend");
            return None;
        };
        debug!(
            topic = %best.topic_id,
            dependents = best.dependent_count,
            "Recommending next topic"
        );

        let noun = if best.dependent_count == 1 {
            "topic"
        } else {
            "topics"
        };
        Some(Recommendation {
            reason: format!("unlocks {} dependent {}", best.dependent_count, noun),
            topic_id: best.topic_id,
        })
    }
}
