//! Request types for MCP tools.

use rmcp::schemars::JsonSchema;
use serde::Deserialize;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ThinkRequest {
    #[schemars(description = "a thought to record")]
    pub thought: String,
}
