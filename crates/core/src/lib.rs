//! Concept mastery graph and recommendation engine.
//!
//! The catalog is a fixed DAG of learning topics. On top of it this crate
//! computes prerequisite closures, decides which topics a learner may start,
//! recommends the one that unlocks the most, and summarizes progress.

pub mod catalog;
pub mod closure;
pub mod error;
pub mod progress;
pub mod recommend;
pub mod render;
pub mod report;
pub mod service;
pub mod topic;

pub use catalog::Catalog;
pub use error::CatalogError;
pub use recommend::{EligibleTopic, Recommendation};
pub use report::{MasteryDepth, MasteryRecord, MasteryReport, build_report};
pub use topic::{Difficulty, TopicNode};
