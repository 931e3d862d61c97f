//! Concept Mentor Tool Service
//!
//! Exposes the mastery engine as MCP (Model Context Protocol) tools. Each tool
//! loads the learner's current records from the configured `ProgressStore`,
//! runs the pure engine over the shared catalog and returns text or JSON.

use crate::catalog::Catalog;
use crate::progress::ProgressStore;
use crate::render::{render_catalog, render_report};
use crate::report::{MasteryRecord, build_report, mastered_set};
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

/// Arguments for tools that operate on a single topic.
#[derive(Deserialize, JsonSchema, Debug)]
pub struct TopicQueryArgs {
    /// A topic id or name. Close misspellings are resolved to the nearest topic.
    #[schemars(description = "A topic id or name, e.g. 'locks-and-synchronization'")]
    pub topic: String,
}

/// The tool service backing the `mentor` binary.
pub struct MentorService {
    catalog: Arc<Catalog>,
    progress: Arc<dyn ProgressStore>,
    tool_router: ToolRouter<Self>,
}

#[tool_handler]
impl ServerHandler for MentorService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(
                "Concept mastery tools: browse the concept map, see what to learn next and review progress."
                    .to_string(),
            ),
            ..Default::default()
        }
    }
}

#[tool_router]
impl MentorService {
    pub fn new(catalog: Arc<Catalog>, progress: Arc<dyn ProgressStore>) -> Self {
        Self {
            catalog,
            progress,
            tool_router: Self::tool_router(),
        }
    }

    async fn records(&self) -> Result<Vec<MasteryRecord>, String> {
        self.progress.load_records().await.map_err(|e| {
            warn!(error = %e, "Failed to load progress records");
            format!("Failed to load progress: {}", e)
        })
    }

    /// Renders the whole catalog grouped by difficulty tier.
    #[tool(description = "Show every concept grouped by difficulty, with the prerequisites of each.")]
    pub async fn get_concept_map(&self) -> Result<String, String> {
        info!("Executing tool 'get_concept_map'");
        Ok(render_catalog(&self.catalog))
    }

    /// Builds and renders the learner's mastery report.
    #[tool(
        description = "Summarize the learner's progress: completion percentage, mastered concepts by depth and concepts ready to learn."
    )]
    pub async fn get_mastery_report(&self) -> Result<String, String> {
        info!("Executing tool 'get_mastery_report'");
        let records = self.records().await?;
        let report = build_report(&self.catalog, &records);
        Ok(render_report(&report))
    }

    /// Suggests the eligible concept that unlocks the most other concepts.
    #[tool(description = "Recommend the next concept to learn and explain why.")]
    pub async fn recommend_next_concept(&self) -> Result<String, String> {
        info!("Executing tool 'recommend_next_concept'");
        let records = self.records().await?;
        let mastered = mastered_set(&records);

        match self.catalog.recommend_next(&mastered) {
            Some(recommendation) => {
                let name = self.catalog.display_name(&recommendation.topic_id).to_string();
                Ok(json!({
                    "topic_id": recommendation.topic_id,
                    "name": name,
                    "reason": recommendation.reason,
                })
                .to_string())
            }
            None => Ok(
                "No concepts are eligible right now: everything reachable is already mastered."
                    .to_string(),
            ),
        }
    }

    /// Explains what stands between the learner and a topic.
    #[tool(
        description = "List all prerequisites of a concept and the ordered path of unmastered concepts leading to it."
    )]
    pub async fn get_prerequisites(
        &self,
        args: Parameters<TopicQueryArgs>,
    ) -> Result<String, String> {
        info!(args = ?args.0, "Executing tool 'get_prerequisites'");
        let topic = self
            .catalog
            .resolve(&args.0.topic)
            .ok_or_else(|| format!("Concept '{}' not found.", args.0.topic))?;

        let records = self.records().await?;
        let mastered = mastered_set(&records);

        let mut prerequisites: Vec<String> = self
            .catalog
            .prerequisites_of(&topic.id)
            .iter()
            .map(|id| self.catalog.display_name(id).to_string())
            .collect();
        prerequisites.sort_unstable();

        let path: Vec<String> = self
            .catalog
            .learning_path(&topic.id, &mastered)
            .iter()
            .map(|id| self.catalog.display_name(id).to_string())
            .collect();

        let related: Vec<&str> = self
            .catalog
            .related_topics(&topic.id)
            .iter()
            .map(|t| t.name.as_str())
            .collect();

        Ok(json!({
            "topic_id": topic.id,
            "name": topic.name,
            "difficulty": topic.difficulty,
            "mastered": mastered.contains(&topic.id),
            "prerequisites": prerequisites,
            "learning_path": path,
            "related": related,
        })
        .to_string())
    }
}
