//! Closure Engine
//!
//! Graph walks over prerequisite edges. Every walk keeps a visited set, so a
//! cyclic catalog yields a truncated result instead of looping forever.

use crate::catalog::Catalog;
use std::collections::HashSet;

impl Catalog {
    /// Computes every topic reachable through prerequisite edges from `id`.
    ///
    /// The starting topic is never part of the result, even when a cycle leads
    /// back to it. Unknown ids contribute nothing beyond themselves.
    pub fn prerequisites_of(&self, id: &str) -> HashSet<String> {
        let mut visited: HashSet<&str> = HashSet::from([id]);
        let mut stack: Vec<&str> = vec![id];
        let mut closure = HashSet::new();

        while let Some(current) = stack.pop() {
            let Some(topic) = self.get(current) else {
                continue;
            };
            for prerequisite in &topic.prerequisites {
                if visited.insert(prerequisite.as_str()) {
                    closure.insert(prerequisite.clone());
                    stack.push(prerequisite.as_str());
                }
            }
        }

        closure
    }

    /// Returns the topics that list `id` as a direct prerequisite, in catalog order.
    pub fn dependents_of(&self, id: &str) -> Vec<&str> {
        self.iter()
            .filter(|topic| topic.prerequisites.iter().any(|p| p == id))
            .map(|topic| topic.id.as_str())
            .collect()
    }

    /// Orders everything still standing between the learner and `target`.
    ///
    /// Returns the unmastered transitive prerequisites of `target` followed by
    /// `target` itself, each topic placed after all of its prerequisites.
    /// Prerequisites are expanded in declared order. An unknown or already
    /// mastered target yields an empty path.
    pub fn learning_path(&self, target: &str, mastered: &HashSet<String>) -> Vec<String> {
        if !self.contains(target) || mastered.contains(target) {
            return Vec::new();
        }

        // Each entry is (topic, prerequisites_already_pushed). A topic is
        // emitted the second time it is popped, after all its prerequisites.
        let mut visited: HashSet<&str> = HashSet::new();
        let mut stack: Vec<(&str, bool)> = vec![(target, false)];
        let mut path = Vec::new();

        while let Some((id, expanded)) = stack.pop() {
            if expanded {
                path.push(id.to_string());
                continue;
            }
            if mastered.contains(id) || !visited.insert(id) {
                continue;
            }
            stack.push((id, true));
            if let Some(topic) = self.get(id) {
                for prerequisite in topic.prerequisites.iter().rev() {
                    stack.push((prerequisite.as_str(), false));
                }
            }
        }

        path
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::Catalog;
    use crate::topic::{Difficulty, TopicNode};
    use std::collections::HashSet;

    fn topic(id: &str, prerequisites: &[&str]) -> TopicNode {
        TopicNode::new(id, id, "", Difficulty::Beginner, prerequisites)
    }

    fn set(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn diamond() -> Catalog {
        Catalog::from_topics(vec![
            topic("root", &[]),
            topic("left", &["root"]),
            topic("right", &["root"]),
            topic("top", &["left", "right"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_prerequisites_of_is_transitive() {
        let catalog = diamond();
        assert_eq!(catalog.prerequisites_of("top"), set(&["left", "right", "root"]));
        assert_eq!(catalog.prerequisites_of("left"), set(&["root"]));
        assert!(catalog.prerequisites_of("root").is_empty());
    }

    #[test]
    fn test_prerequisites_of_unknown_topic_is_empty() {
        assert!(diamond().prerequisites_of("missing").is_empty());
    }

    #[test]
    fn test_prerequisites_of_includes_declared_unknown_ids() {
        let catalog = Catalog::from_topics(vec![topic("a", &["ghost"])]).unwrap();
        assert_eq!(catalog.prerequisites_of("a"), set(&["ghost"]));
    }

    #[test]
    fn test_prerequisites_of_terminates_on_cycle() {
        let catalog = Catalog::from_topics(vec![
            topic("a", &["b"]),
            topic("b", &["c"]),
            topic("c", &["a"]),
        ])
        .unwrap();
        let closure = catalog.prerequisites_of("a");
        assert_eq!(closure, set(&["b", "c"]));
        assert!(!closure.contains("a"));
    }

    #[test]
    fn test_dependents_of_follows_catalog_order() {
        let catalog = diamond();
        assert_eq!(catalog.dependents_of("root"), vec!["left", "right"]);
        assert_eq!(catalog.dependents_of("left"), vec!["top"]);
        assert!(catalog.dependents_of("top").is_empty());
        assert!(catalog.dependents_of("missing").is_empty());
    }

    #[test]
    fn test_builtin_dependents() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.dependents_of("concurrency-basics"),
            vec!["locks-and-synchronization", "async-programming"]
        );
    }

    #[test]
    fn test_learning_path_orders_prerequisites_first() {
        let catalog = diamond();
        let path = catalog.learning_path("top", &HashSet::new());
        assert_eq!(path, vec!["root", "left", "right", "top"]);
    }

    #[test]
    fn test_long_chains_do_not_exhaust_the_stack() {
        let depth = 50_000;
        let topics = (0..depth)
            .map(|i| {
                let id = format!("t{}", i);
                let previous = format!("t{}", i.max(1) - 1);
                let prerequisites: Vec<&str> = if i == 0 { vec![] } else { vec![previous.as_str()] };
                TopicNode::new(id, "", "", Difficulty::Beginner, &prerequisites)
            })
            .collect();
        let catalog = Catalog::from_topics(topics).unwrap();
        let last = format!("t{}", depth - 1);

        let path = catalog.learning_path(&last, &HashSet::new());
        assert_eq!(path.len(), depth);
        assert_eq!(path[0], "t0");
        assert_eq!(path[depth - 1], last);
        assert_eq!(catalog.prerequisites_of(&last).len(), depth - 1);
    }

    #[test]
    fn test_learning_path_terminates_on_cycle() {
        let catalog = Catalog::from_topics(vec![topic("a", &["b"]), topic("b", &["a"])]).unwrap();
        assert_eq!(catalog.learning_path("a", &HashSet::new()), vec!["b", "a"]);
    }

    #[test]
    fn test_learning_path_skips_mastered_topics() {
        let catalog = diamond();
        let path = catalog.learning_path("top", &set(&["root", "left"]));
        assert_eq!(path, vec!["right", "top"]);
        assert!(catalog.learning_path("top", &set(&["top"])).is_empty());
        assert!(catalog.learning_path("missing", &HashSet::new()).is_empty());
    }
}
