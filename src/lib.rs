//! think-tool: an in-memory scratchpad an AI agent can use to record its
//! reasoning steps, served over the Model Context Protocol.

pub mod api;
pub mod mcp;
pub mod models;
pub mod notebook;
