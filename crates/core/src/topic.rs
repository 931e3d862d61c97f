use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed difficulty tier of a topic.
///
/// This is a property of the topic itself, not of any learner's progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// All tiers in ascending order, used wherever topics are grouped by tier.
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Beginner => write!(f, "Beginner"),
            Difficulty::Intermediate => write!(f, "Intermediate"),
            Difficulty::Advanced => write!(f, "Advanced"),
        }
    }
}

/// A single learning unit in the catalog.
///
/// `prerequisites` keeps its declared order for display, but every engine
/// treats it as a set. `related_topics` are advisory cross-links and are never
/// consulted when computing closures or eligibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TopicNode {
    pub id: String,
    pub name: String,
    pub description: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default)]
    pub related_topics: Vec<String>,
}

impl TopicNode {
    /// Creates a topic with no related topics.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        difficulty: Difficulty,
        prerequisites: &[&str],
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            difficulty,
            prerequisites: prerequisites.iter().map(|p| p.to_string()).collect(),
            related_topics: Vec::new(),
        }
    }

    /// Adds advisory cross-links to other topics.
    pub fn with_related(mut self, related: &[&str]) -> Self {
        self.related_topics = related.iter().map(|r| r.to_string()).collect();
        self
    }

    /// A root topic has no prerequisites and is eligible from the start.
    pub fn is_root(&self) -> bool {
        self.prerequisites.is_empty()
    }
}
