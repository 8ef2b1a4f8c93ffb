//! End-to-end tests: MCP client -> HTTP server -> stubbed Tavily API.

use axum_test::TestServer;
use search_mcp::ClientError;
use search_mcp::mcp::{ClientCache, SearchServer};
use search_mcp::search::{TavilyClient, TavilySettings};
use search_mcp::server::build_router;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn search_server(base_url: &str, api_key: Option<&str>) -> SearchServer {
    SearchServer::new(TavilyClient::new(TavilySettings {
        base_url: base_url.to_string(),
        api_key: api_key.map(ToString::to_string),
    }))
}

/// Serve the router on an ephemeral port and return its MCP endpoint URL.
async fn spawn_server(search: SearchServer) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = build_router(search);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/mcp")
}

#[tokio::test]
async fn liveness_endpoint_answers() {
    let app = build_router(search_server("http://127.0.0.1:1", None));
    let server = TestServer::new(app).unwrap();

    let response = server.get("/test").await;
    response.assert_status_ok();
    response.assert_text("hello, world");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn remote_search_round_trip() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_json(json!({
            "query": "what is mcp",
            "topic": "general",
            "max_results": 10,
            "include_answer": "advanced"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "answer": "A protocol for tools.",
            "results": [{"content": "MCP spec"}, {"content": "rmcp crate"}]
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    let url = spawn_server(search_server(&upstream.uri(), Some("test-key"))).await;
    let cache = ClientCache::streamable_http();
    let client = cache.get_or_create(&url).await.expect("connect");

    let text = client.tavily_search("what is mcp", None).await.unwrap();
    assert_eq!(
        text,
        "Summary of search results:\nA protocol for tools.\n\nSearch result details:\n- MCP spec\n- rmcp crate\n"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn cached_session_is_reused() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"answer": "ok", "results": []})),
        )
        .expect(2)
        .mount(&upstream)
        .await;

    let url = spawn_server(search_server(&upstream.uri(), Some("test-key"))).await;
    let cache = ClientCache::streamable_http();

    let first = cache.get_or_create(&url).await.unwrap();
    first.tavily_search("one", Some("news")).await.unwrap();
    let second = cache.get_or_create(&url).await.unwrap();
    second.tavily_search("two", None).await.unwrap();

    assert_eq!(cache.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn upstream_failure_is_a_tool_error() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&upstream)
        .await;

    let url = spawn_server(search_server(&upstream.uri(), Some("test-key"))).await;
    let cache = ClientCache::streamable_http();
    let client = cache.get_or_create(&url).await.unwrap();

    match client.tavily_search("rust", None).await {
        Err(ClientError::RemoteTool(msg)) => assert_eq!(msg, "http_status_code[500] invalid"),
        other => panic!("unexpected result: {other:?}"),
    }

    // The session survives a failed search.
    let err = client.tavily_search("rust", Some("sports")).await.unwrap_err();
    assert!(matches!(err, ClientError::RemoteTool(msg) if msg.contains("unsupported topic")));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn missing_api_key_is_a_tool_error() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&upstream)
        .await;

    let url = spawn_server(search_server(&upstream.uri(), None)).await;
    let cache = ClientCache::streamable_http();
    let client = cache.get_or_create(&url).await.unwrap();

    match client.tavily_search("rust", None).await {
        Err(ClientError::RemoteTool(msg)) => assert_eq!(msg, "tavily api key is empty"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn connect_to_closed_port_fails() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let cache = ClientCache::streamable_http();
    let err = cache
        .get_or_create(&format!("http://{addr}/mcp"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Connect { .. }));
    assert!(cache.is_empty());
}
