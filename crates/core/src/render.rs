//! Presentation Formatter
//!
//! Renders the catalog and mastery reports as markdown-flavoured text for
//! tool responses and terminal output.

use crate::catalog::Catalog;
use crate::report::{MasteredEntry, MasteryReport};
use crate::topic::Difficulty;
use std::fmt::Write;

const NONE: &str = "- (none)";

/// Renders the catalog grouped by difficulty tier.
///
/// Each topic appears in exactly one tier group, with its direct (not
/// transitive) prerequisites listed by name.
pub fn render_catalog(catalog: &Catalog) -> String {
    let mut out = String::from("# Concept Map\n");

    for tier in Difficulty::ALL {
        let _ = write!(out, "\n## {}\n", tier);
        let mut any = false;
        for topic in catalog.iter().filter(|t| t.difficulty == tier) {
            any = true;
            let requires = if topic.prerequisites.is_empty() {
                "none".to_string()
            } else {
                topic
                    .prerequisites
                    .iter()
                    .map(|p| catalog.display_name(p))
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            let _ = writeln!(out, "- {} [{}]: {}", topic.name, topic.id, topic.description);
            let _ = writeln!(out, "  Requires: {}", requires);
        }
        if !any {
            let _ = writeln!(out, "{}", NONE);
        }
    }

    out
}

fn render_bucket(out: &mut String, title: &str, entries: &[MasteredEntry]) {
    let _ = write!(out, "\n## {}\n", title);
    if entries.is_empty() {
        let _ = writeln!(out, "{}", NONE);
        return;
    }
    for entry in entries {
        let noun = if entry.completed_exercise_count == 1 {
            "exercise"
        } else {
            "exercises"
        };
        let _ = writeln!(
            out,
            "- {} ({} {})",
            entry.name, entry.completed_exercise_count, noun
        );
    }
}

/// Renders a mastery report, deepest mastery first.
pub fn render_report(report: &MasteryReport) -> String {
    let mut out = String::from("# Mastery Report\n\n");
    let _ = writeln!(
        out,
        "Progress: {}/{} topics mastered ({}%)",
        report.mastered_count, report.total_topics, report.completion_percentage
    );

    render_bucket(&mut out, "Deep", &report.by_depth.deep);
    render_bucket(&mut out, "Intermediate", &report.by_depth.intermediate);
    render_bucket(&mut out, "Surface", &report.by_depth.surface);

    out.push_str("\n## Ready to Learn\n");
    if report.ready_to_learn.is_empty() {
        let _ = writeln!(out, "{}", NONE);
    }
    for ready in &report.ready_to_learn {
        let _ = writeln!(out, "- {}", ready.name);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{MasteryDepth, MasteryRecord, build_report};
    use crate::topic::TopicNode;

    #[test]
    fn test_render_catalog_groups_each_topic_once() {
        let catalog = Catalog::builtin();
        let rendered = render_catalog(catalog);

        for topic in catalog.iter() {
            let marker = format!("[{}]", topic.id);
            assert_eq!(rendered.matches(&marker).count(), 1, "{}", topic.id);
        }

        let beginner = rendered.find("## Beginner").unwrap();
        let intermediate = rendered.find("## Intermediate").unwrap();
        let advanced = rendered.find("## Advanced").unwrap();
        let locks = rendered.find("[locks-and-synchronization]").unwrap();
        assert!(beginner < intermediate && intermediate < advanced);
        assert!(locks > advanced);
    }

    #[test]
    fn test_render_catalog_lists_direct_prerequisite_names() {
        let catalog = Catalog::from_topics(vec![
            TopicNode::new("x", "Root X", "first", Difficulty::Beginner, &[]),
            TopicNode::new("y", "Leaf Y", "second", Difficulty::Beginner, &["x", "ghost"]),
            TopicNode::new("z", "Top Z", "third", Difficulty::Advanced, &["y"]),
        ])
        .unwrap();

        let rendered = render_catalog(&catalog);

        assert!(rendered.contains("- Root X [x]: first\n  Requires: none\n"));
        assert!(rendered.contains("- Leaf Y [y]: second\n  Requires: Root X, ghost\n"));
        // Only the direct prerequisite, not the transitive one.
        assert!(rendered.contains("- Top Z [z]: third\n  Requires: Leaf Y\n"));
        assert!(rendered.contains("## Intermediate\n- (none)\n"));
    }

    #[test]
    fn test_render_report() {
        let records = vec![
            MasteryRecord::new("variables-and-types", true, MasteryDepth::Deep, 4),
            MasteryRecord::new("control-flow", true, MasteryDepth::Surface, 1),
        ];
        let report = build_report(Catalog::builtin(), &records);

        let rendered = render_report(&report);

        assert!(rendered.starts_with("# Mastery Report\n"));
        assert!(rendered.contains("Progress: 2/12 topics mastered (17%)"));
        assert!(rendered.contains("## Deep\n- Variables and Types (4 exercises)\n"));
        assert!(rendered.contains("## Intermediate\n- (none)\n"));
        assert!(rendered.contains("## Surface\n- Control Flow (1 exercise)\n"));
        assert!(rendered.contains("## Ready to Learn\n- Functions and Scope\n- Memory Model\n"));
    }

    #[test]
    fn test_render_report_with_nothing_ready() {
        let report = build_report(&Catalog::default(), &[]);
        let rendered = render_report(&report);
        assert!(rendered.contains("Progress: 0/0 topics mastered (0%)"));
        assert!(rendered.ends_with("## Ready to Learn\n- (none)\n"));
    }
}
