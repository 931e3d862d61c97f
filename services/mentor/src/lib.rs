//! Concept Mentor Service Library Crate
//!
//! Holds the startup configuration for the `mentor` binary, which serves the
//! mastery tools from `mentor-core` over stdio.

pub mod config;
