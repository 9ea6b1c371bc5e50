use axum::http::HeaderValue;
use axum_test::TestServer;
use serde_json::{json, Value};
use think_tool::api::create_router;
use think_tool::notebook::Notebook;

fn setup() -> (TestServer, Notebook) {
    setup_with_cors(&[])
}

fn setup_with_cors(origins: &[HeaderValue]) -> (TestServer, Notebook) {
    let notebook = Notebook::new();
    let app = create_router(notebook.clone(), origins);
    let server = TestServer::new(app).expect("Failed to create test server");
    (server, notebook)
}

mod health {
    use super::*;

    #[tokio::test]
    async fn reports_ok_with_empty_notebook() {
        let (server, _notebook) = setup();

        let response = server.get("/health").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["thoughts"], 0);
    }

    #[tokio::test]
    async fn reports_current_thought_count() {
        let (server, notebook) = setup();
        notebook.append("one").expect("Failed to append");
        notebook.append("two").expect("Failed to append");

        let body: Value = server.get("/health").await.json();
        assert_eq!(body["thoughts"], 2);

        notebook.clear_all();

        let body: Value = server.get("/health").await.json();
        assert_eq!(body["thoughts"], 0);
    }
}

mod mcp_over_http {
    use super::*;

    const ACCEPT: &str = "application/json, text/event-stream";

    /// Pull the JSON-RPC messages out of an SSE or plain JSON body.
    fn messages(body: &str) -> Vec<Value> {
        if let Ok(value) = serde_json::from_str::<Value>(body) {
            return vec![value];
        }
        body.lines()
            .filter_map(|line| line.strip_prefix("data:"))
            .filter_map(|data| serde_json::from_str(data.trim()).ok())
            .collect()
    }

    fn response_for(body: &str, id: u64) -> Value {
        messages(body)
            .into_iter()
            .find(|m| m["id"] == id)
            .expect("Expected a response with matching id")
    }

    /// Run the initialize handshake, returning the session id.
    async fn initialize(server: &TestServer) -> String {
        let response = server
            .post("/mcp")
            .add_header("Accept", ACCEPT)
            .json(&json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "initialize",
                "params": {
                    "protocolVersion": "2024-11-05",
                    "capabilities": {},
                    "clientInfo": { "name": "test-client", "version": "1.0.0" }
                }
            }))
            .await;

        response.assert_status_ok();
        let session_id = response
            .headers()
            .get("mcp-session-id")
            .expect("Expected mcp-session-id header")
            .to_str()
            .expect("Session id should be ASCII")
            .to_string();

        let init = response_for(&response.text(), 1);
        assert_eq!(init["result"]["serverInfo"]["name"], "think-tool");

        server
            .post("/mcp")
            .add_header("Accept", ACCEPT)
            .add_header("mcp-session-id", session_id.as_str())
            .json(&json!({
                "jsonrpc": "2.0",
                "method": "notifications/initialized"
            }))
            .await;

        session_id
    }

    async fn call_tool(
        server: &TestServer,
        session_id: &str,
        id: u64,
        name: &str,
        arguments: Value,
    ) -> Value {
        let response = server
            .post("/mcp")
            .add_header("Accept", ACCEPT)
            .add_header("mcp-session-id", session_id)
            .json(&json!({
                "jsonrpc": "2.0",
                "id": id,
                "method": "tools/call",
                "params": { "name": name, "arguments": arguments }
            }))
            .await;

        response.assert_status_ok();
        response_for(&response.text(), id)
    }

    #[tokio::test]
    async fn think_lands_in_the_shared_notebook() {
        let (server, notebook) = setup();
        let session_id = initialize(&server).await;

        let reply = call_tool(
            &server,
            &session_id,
            2,
            "think",
            json!({ "thought": "recorded over http" }),
        )
        .await;

        assert_eq!(
            reply["result"]["content"][0]["text"],
            "Thought: recorded over http"
        );
        assert_eq!(notebook.len(), 1);
        assert_eq!(
            notebook.list_all().expect("Failed to list")[0].content,
            "recorded over http"
        );

        let body: Value = server.get("/health").await.json();
        assert_eq!(body["thoughts"], 1);
    }

    #[tokio::test]
    async fn sessions_share_one_notebook() {
        let (server, _notebook) = setup();
        let first = initialize(&server).await;
        let second = initialize(&server).await;
        assert_ne!(first, second);

        call_tool(&server, &first, 2, "think", json!({ "thought": "from first" })).await;

        let reply = call_tool(&server, &second, 2, "get_thoughts", json!({})).await;
        let text = reply["result"]["content"][0]["text"]
            .as_str()
            .expect("Expected text content");
        assert!(text.contains(":\nfrom first\n"));
    }

    #[tokio::test]
    async fn empty_thought_is_an_error_result() {
        let (server, notebook) = setup();
        let session_id = initialize(&server).await;

        let reply = call_tool(&server, &session_id, 2, "think", json!({ "thought": "" })).await;

        assert!(reply.get("error").is_none());
        assert_eq!(reply["result"]["isError"], true);
        assert_eq!(reply["result"]["content"][0]["text"], "no thoughts provided");
        assert!(notebook.is_empty());
    }
}

mod cors {
    use super::*;

    const ALLOW_ORIGIN: &str = "access-control-allow-origin";

    #[tokio::test]
    async fn no_cors_headers_by_default() {
        let (server, _notebook) = setup();

        let response = server
            .get("/health")
            .add_header("Origin", "https://evil.example")
            .await;

        response.assert_status_ok();
        assert!(response.headers().get(ALLOW_ORIGIN).is_none());
    }

    #[tokio::test]
    async fn allows_configured_origin() {
        let (server, _notebook) =
            setup_with_cors(&[HeaderValue::from_static("https://app.example")]);

        let response = server
            .get("/health")
            .add_header("Origin", "https://app.example")
            .await;

        assert_eq!(
            response.headers().get(ALLOW_ORIGIN),
            Some(&HeaderValue::from_static("https://app.example"))
        );
    }

    #[tokio::test]
    async fn ignores_unlisted_origin() {
        let (server, _notebook) =
            setup_with_cors(&[HeaderValue::from_static("https://app.example")]);

        let response = server
            .get("/health")
            .add_header("Origin", "https://evil.example")
            .await;

        assert!(response.headers().get(ALLOW_ORIGIN).is_none());
    }
}
