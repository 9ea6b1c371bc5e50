mod handlers;

use std::sync::Arc;

use axum::{
    http::{HeaderName, HeaderValue, Method},
    routing::get,
    Router,
};
use rmcp::transport::streamable_http_server::{
    session::local::LocalSessionManager, StreamableHttpServerConfig, StreamableHttpService,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::mcp::ThinkServer;
use crate::notebook::Notebook;

/// Build the HTTP router: MCP over streamable HTTP at `/mcp`, plus `/health`.
///
/// Every MCP session gets its own [`ThinkServer`], but all of them share
/// the one `notebook`. Cross-origin requests are only answered for
/// `cors_origins`; with none listed, no CORS headers are sent.
pub fn create_router(notebook: Notebook, cors_origins: &[HeaderValue]) -> Router {
    let shared = notebook.clone();
    let mcp = StreamableHttpService::new(
        move || Ok(ThinkServer::new(shared.clone())),
        Arc::new(LocalSessionManager::default()),
        StreamableHttpServerConfig::default(),
    );

    let mut router = Router::new()
        .route("/health", get(handlers::health))
        .nest_service("/mcp", mcp)
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = cors_layer(cors_origins) {
        router = router.layer(cors);
    }

    router.with_state(notebook)
}

fn cors_layer(origins: &[HeaderValue]) -> Option<CorsLayer> {
    if origins.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins.iter().cloned()))
            .allow_methods([Method::GET, Method::POST, Method::DELETE])
            .allow_headers(Any)
            .expose_headers([HeaderName::from_static("mcp-session-id")]),
    )
}

pub async fn serve(
    notebook: Notebook,
    host: &str,
    port: u16,
    cors_origins: &[HeaderValue],
) -> anyhow::Result<()> {
    let app = create_router(notebook, cors_origins);

    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    tracing::info!(
        "think-tool MCP server listening on http://{}/mcp",
        listener.local_addr()?
    );

    axum::serve(listener, app).await?;

    Ok(())
}
