//! Topic Catalog
//!
//! The catalog is an immutable, insertion-ordered table of `TopicNode`s keyed
//! by id. Insertion order matters: it decides the order of dependents and the
//! tie-break between equally scored recommendations.
//!
//! A built-in catalog ships with the crate. Alternative catalogs can be loaded
//! from a JSON data file at startup; neither kind can be mutated afterwards.

use crate::error::CatalogError;
use crate::topic::{Difficulty, TopicNode};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use indexmap::IndexMap;
use petgraph::algo::toposort;
use petgraph::graph::DiGraph;
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{info, warn};

struct TopicDef {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    difficulty: Difficulty,
    prerequisites: &'static [&'static str],
    related: &'static [&'static str],
}

const BUILTIN_TOPICS: &[TopicDef] = &[
    TopicDef {
        id: "variables-and-types",
        name: "Variables and Types",
        description: "Bindings, primitive types and how values are represented.",
        difficulty: Difficulty::Beginner,
        prerequisites: &[],
        related: &["memory-model"],
    },
    TopicDef {
        id: "control-flow",
        name: "Control Flow",
        description: "Conditionals, loops and early returns.",
        difficulty: Difficulty::Beginner,
        prerequisites: &["variables-and-types"],
        related: &[],
    },
    TopicDef {
        id: "functions-and-scope",
        name: "Functions and Scope",
        description: "Parameters, return values, closures and variable visibility.",
        difficulty: Difficulty::Beginner,
        prerequisites: &["control-flow"],
        related: &["error-handling"],
    },
    TopicDef {
        id: "memory-model",
        name: "Memory Model",
        description: "Stack and heap allocation, references and object lifetimes.",
        difficulty: Difficulty::Intermediate,
        prerequisites: &["variables-and-types"],
        related: &["ownership-and-lifetimes"],
    },
    TopicDef {
        id: "error-handling",
        name: "Error Handling",
        description: "Propagating, wrapping and recovering from failures.",
        difficulty: Difficulty::Intermediate,
        prerequisites: &["functions-and-scope"],
        related: &[],
    },
    TopicDef {
        id: "data-structures",
        name: "Data Structures",
        description: "Arrays, maps, sets and choosing the right container.",
        difficulty: Difficulty::Intermediate,
        prerequisites: &["functions-and-scope"],
        related: &["performance-profiling"],
    },
    TopicDef {
        id: "ownership-and-lifetimes",
        name: "Ownership and Lifetimes",
        description: "Who frees what, aliasing rules and dangling references.",
        difficulty: Difficulty::Intermediate,
        prerequisites: &["memory-model", "functions-and-scope"],
        related: &[],
    },
    TopicDef {
        id: "concurrency-basics",
        name: "Concurrency Basics",
        description: "Threads, shared state and message passing.",
        difficulty: Difficulty::Intermediate,
        prerequisites: &["functions-and-scope", "memory-model"],
        related: &["async-programming"],
    },
    TopicDef {
        id: "locks-and-synchronization",
        name: "Locks and Synchronization",
        description: "Mutexes, read-write locks, condition variables and deadlock.",
        difficulty: Difficulty::Advanced,
        prerequisites: &["concurrency-basics"],
        related: &["race-conditions"],
    },
    TopicDef {
        id: "async-programming",
        name: "Async Programming",
        description: "Futures, executors and cooperative scheduling.",
        difficulty: Difficulty::Advanced,
        prerequisites: &["concurrency-basics", "error-handling"],
        related: &[],
    },
    TopicDef {
        id: "race-conditions",
        name: "Race Conditions",
        description: "Data races, check-then-act bugs and ordering guarantees.",
        difficulty: Difficulty::Advanced,
        prerequisites: &["locks-and-synchronization"],
        related: &["async-programming"],
    },
    TopicDef {
        id: "performance-profiling",
        name: "Performance Profiling",
        description: "Measuring hot paths, allocation pressure and cache behaviour.",
        difficulty: Difficulty::Advanced,
        prerequisites: &["data-structures", "memory-model"],
        related: &[],
    },
];

impl From<&TopicDef> for TopicNode {
    fn from(def: &TopicDef) -> Self {
        TopicNode::new(
            def.id,
            def.name,
            def.description,
            def.difficulty,
            def.prerequisites,
        )
        .with_related(def.related)
    }
}

/// An immutable, insertion-ordered collection of topics.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    topics: IndexMap<String, TopicNode>,
}

impl Catalog {
    /// Returns the process-wide built-in catalog, initializing it on first use.
    pub fn builtin() -> &'static Catalog {
        static BUILTIN: OnceLock<Catalog> = OnceLock::new();
        BUILTIN.get_or_init(|| Catalog {
            topics: BUILTIN_TOPICS
                .iter()
                .map(|def| (def.id.to_string(), TopicNode::from(def)))
                .collect(),
        })
    }

    /// Builds a catalog from topics, keeping their order.
    ///
    /// Fails if two topics share an id. Cycles are not checked here; call
    /// [`Catalog::validate`] for that.
    pub fn from_topics(topics: Vec<TopicNode>) -> Result<Self, CatalogError> {
        let mut map = IndexMap::with_capacity(topics.len());
        for topic in topics {
            if map.contains_key(&topic.id) {
                return Err(CatalogError::DuplicateTopic(topic.id));
            }
            map.insert(topic.id.clone(), topic);
        }
        Ok(Self { topics: map })
    }

    /// Parses a JSON array of topics.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let topics: Vec<TopicNode> = serde_json::from_str(json)?;
        Self::from_topics(topics)
    }

    /// Loads a catalog from a JSON data file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&content)?;
        info!(path = %path.display(), topics = catalog.len(), "Loaded topic catalog");
        Ok(catalog)
    }

    /// Looks up a topic by its exact id.
    pub fn get(&self, id: &str) -> Option<&TopicNode> {
        self.topics.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.topics.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Iterates over topics in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &TopicNode> {
        self.topics.values()
    }

    /// The topic's name, or the raw id when the topic is unknown.
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.get(id).map(|t| t.name.as_str()).unwrap_or(id)
    }

    /// Resolves a free-form query to a topic.
    ///
    /// Tries the exact id, then a case-insensitive name match, then the best
    /// fuzzy match against names and ids. Equal fuzzy scores go to the earlier
    /// topic.
    pub fn resolve(&self, query: &str) -> Option<&TopicNode> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        if let Some(topic) = self.get(query) {
            return Some(topic);
        }
        if let Some(topic) = self.iter().find(|t| t.name.eq_ignore_ascii_case(query)) {
            return Some(topic);
        }

        let matcher = SkimMatcherV2::default();
        let mut best: Option<(i64, &TopicNode)> = None;
        for topic in self.iter() {
            let score = [
                matcher.fuzzy_match(&topic.name, query),
                matcher.fuzzy_match(&topic.id, query),
            ]
            .into_iter()
            .flatten()
            .max();
            if let Some(score) = score {
                if best.is_none_or(|(top, _)| score > top) {
                    best = Some((score, topic));
                }
            }
        }
        best.map(|(_, topic)| topic)
    }

    /// Resolves a topic's advisory cross-links, dropping unknown ids.
    pub fn related_topics(&self, id: &str) -> Vec<&TopicNode> {
        self.get(id)
            .map(|topic| {
                topic
                    .related_topics
                    .iter()
                    .filter_map(|related| self.get(related))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Checks that the prerequisite graph is acyclic.
    ///
    /// References to unknown prerequisite ids are logged but tolerated: such a
    /// topic simply stays ineligible until the caller reports the unknown id as
    /// mastered.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut graph = DiGraph::<&str, ()>::with_capacity(self.len(), 0);
        let indices: HashMap<&str, _> = self
            .iter()
            .map(|topic| (topic.id.as_str(), graph.add_node(topic.id.as_str())))
            .collect();

        for topic in self.iter() {
            for prerequisite in &topic.prerequisites {
                if *prerequisite == topic.id {
                    return Err(CatalogError::Cycle {
                        topic: topic.id.clone(),
                    });
                }
                match indices.get(prerequisite.as_str()) {
                    Some(&from) => {
                        graph.add_edge(from, indices[topic.id.as_str()], ());
                    }
                    None => warn!(
                        topic = %topic.id,
                        prerequisite = %prerequisite,
                        "Topic declares an unknown prerequisite"
                    ),
                }
            }
        }

        toposort(&graph, None)
            .map(|_| ())
            .map_err(|cycle| CatalogError::Cycle {
                topic: graph[cycle.node_id()].to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn topic(id: &str, prerequisites: &[&str]) -> TopicNode {
        TopicNode::new(id, id.to_uppercase(), "", Difficulty::Beginner, prerequisites)
    }

    #[test]
    fn test_builtin_catalog_is_complete_and_acyclic() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), BUILTIN_TOPICS.len());
        assert!(catalog.validate().is_ok());
        for topic in catalog.iter() {
            for prerequisite in &topic.prerequisites {
                assert!(
                    catalog.contains(prerequisite),
                    "{} declares unknown prerequisite {}",
                    topic.id,
                    prerequisite
                );
            }
        }
    }

    #[test]
    fn test_builtin_catalog_keeps_declaration_order() {
        let ids: Vec<&str> = Catalog::builtin().iter().map(|t| t.id.as_str()).collect();
        let declared: Vec<&str> = BUILTIN_TOPICS.iter().map(|d| d.id).collect();
        assert_eq!(ids, declared);
    }

    #[test]
    fn test_from_topics_rejects_duplicates() {
        let err = Catalog::from_topics(vec![topic("x", &[]), topic("x", &[])]).unwrap_err();
        match err {
            CatalogError::DuplicateTopic(id) => assert_eq!(id, "x"),
            _ => panic!("Expected DuplicateTopic"),
        }
    }

    #[test]
    fn test_validate_detects_cycle() {
        let catalog = Catalog::from_topics(vec![
            topic("a", &["c"]),
            topic("b", &["a"]),
            topic("c", &["b"]),
        ])
        .unwrap();
        match catalog.validate().unwrap_err() {
            CatalogError::Cycle { topic } => assert!(["a", "b", "c"].contains(&topic.as_str())),
            _ => panic!("Expected Cycle"),
        }
    }

    #[test]
    fn test_validate_detects_self_loop() {
        let catalog = Catalog::from_topics(vec![topic("a", &["a"])]).unwrap();
        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::Cycle { topic }) if topic == "a"
        ));
    }

    #[test]
    fn test_validate_tolerates_unknown_prerequisite() {
        let catalog = Catalog::from_topics(vec![topic("a", &["ghost"])]).unwrap();
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.display_name("control-flow"), "Control Flow");
        assert_eq!(catalog.display_name("unknown-id"), "unknown-id");
    }

    #[test]
    fn test_resolve_by_id_name_and_fuzzy() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.resolve("memory-model").unwrap().id, "memory-model");
        assert_eq!(
            catalog.resolve("locks and synchronization").unwrap().id,
            "locks-and-synchronization"
        );
        assert_eq!(catalog.resolve("race").unwrap().id, "race-conditions");
        assert!(catalog.resolve("   ").is_none());
        assert!(catalog.resolve("zzzzqqq").is_none());
    }

    #[test]
    fn test_related_topics_drops_unknown_ids() {
        let catalog = Catalog::from_topics(vec![
            topic("a", &[]).with_related(&["b", "ghost"]),
            topic("b", &[]),
        ])
        .unwrap();
        let related: Vec<&str> = catalog
            .related_topics("a")
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(related, vec!["b"]);
        assert!(catalog.related_topics("ghost").is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"id": "x", "name": "X", "description": "root", "difficulty": "beginner"}},
                {{"id": "y", "name": "Y", "description": "leaf", "difficulty": "advanced", "prerequisites": ["x"]}}
            ]"#
        )
        .unwrap();

        let catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("y").unwrap().prerequisites, vec!["x".to_string()]);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Catalog::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn test_from_json_str_rejects_malformed_input() {
        assert!(matches!(
            Catalog::from_json_str(r#"[{"id": "x"}]"#),
            Err(CatalogError::Parse(_))
        ));
    }
}
