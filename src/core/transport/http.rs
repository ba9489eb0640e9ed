//! HTTP transport implementation.
//!
//! Stateless JSON-RPC 2.0 over `POST {rpc_path}`, plus `GET /` (server
//! summary) and `GET /health`. Each request is answered independently; the
//! preferences store is the only state shared between requests.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use rmcp::ServerHandler;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, instrument, warn};

use super::{TransportError, TransportResult, config::HttpConfig, shutdown_signal};
use crate::core::McpServer;

const JSONRPC_VERSION: &str = "2.0";
const INVALID_REQUEST: i32 = -32600;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;
const INTERNAL_ERROR: i32 = -32603;

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// Incoming JSON-RPC message.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// Outgoing JSON-RPC message.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

impl JsonRpcResponse {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

/// Failure inside a method handler, converted to a JSON-RPC error.
struct RpcFailure {
    code: i32,
    message: String,
}

impl RpcFailure {
    fn invalid_params(message: impl Into<String>) -> Self {
        Self {
            code: INVALID_PARAMS,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            code: INTERNAL_ERROR,
            message: message.into(),
        }
    }
}

type RpcResult = Result<Value, RpcFailure>;

#[derive(Clone)]
struct AppState {
    server: McpServer,
    rpc_path: String,
}

impl HttpTransport {
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    fn router(&self, server: McpServer) -> Router {
        let state = AppState {
            server,
            rpc_path: self.config.rpc_path.clone(),
        };

        let app = Router::new()
            .route(&self.config.rpc_path, post(handle_rpc))
            .route("/health", get(health_check))
            .route("/", get(root_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http());

        if self.config.enable_cors {
            app.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
        } else {
            app
        }
    }

    /// Run the HTTP transport until Ctrl-C.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        let app = self.router(server);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!(
            "Ready - listening on {} (JSON-RPC at POST {}, CORS {})",
            addr,
            self.config.rpc_path,
            if self.config.enable_cors { "on" } else { "off" }
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        info!("HTTP transport stopped");
        Ok(())
    }
}

async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "name": state.server.name(),
        "version": state.server.version(),
        "transport": "HTTP",
        "protocol": "JSON-RPC 2.0",
        "endpoints": {
            "rpc": state.rpc_path,
            "health": "/health"
        }
    }))
}

async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[instrument(skip_all, fields(method = %request.method))]
async fn handle_rpc(
    State(state): State<AppState>,
    Json(request): Json<JsonRpcRequest>,
) -> impl IntoResponse {
    // Notifications carry no id and get no JSON-RPC response.
    if request.id.is_none() && request.method.starts_with("notifications/") {
        debug!("Notification received");
        return StatusCode::ACCEPTED.into_response();
    }

    (StatusCode::OK, Json(process_request(&state.server, request).await)).into_response()
}

async fn process_request(server: &McpServer, request: JsonRpcRequest) -> JsonRpcResponse {
    if request.jsonrpc != JSONRPC_VERSION {
        return JsonRpcResponse::error(request.id, INVALID_REQUEST, "Invalid Request");
    }

    let params = request.params.unwrap_or_else(|| json!({}));
    let outcome = match request.method.as_str() {
        "initialize" => initialize(server),
        "ping" => Ok(json!({})),
        "tools/list" => Ok(json!({ "tools": server.list_tools() })),
        "tools/call" => call_tool(server, &params).await,
        "resources/list" => Ok(json!({ "resources": server.list_resources().await })),
        "resources/templates/list" => Ok(json!({
            "resourceTemplates": server.list_resource_templates().await
        })),
        "resources/read" => read_resource(server, &params).await,
        "prompts/list" => Ok(json!({ "prompts": server.list_prompts().await })),
        "prompts/get" => get_prompt(server, &params).await,
        method if method.starts_with("notifications/") => Ok(Value::Null),
        method => {
            warn!("Unknown method: {}", method);
            return JsonRpcResponse::error(request.id, METHOD_NOT_FOUND, "Method not found");
        }
    };

    match outcome {
        Ok(result) => JsonRpcResponse::success(request.id, result),
        Err(failure) => JsonRpcResponse::error(request.id, failure.code, failure.message),
    }
}

fn required_str<'a>(params: &'a Value, key: &str) -> Result<&'a str, RpcFailure> {
    params
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| RpcFailure::invalid_params(format!("Missing '{key}'")))
}

fn initialize(server: &McpServer) -> RpcResult {
    serde_json::to_value(server.get_info()).map_err(|e| RpcFailure::internal(e.to_string()))
}

async fn call_tool(server: &McpServer, params: &Value) -> RpcResult {
    let name = required_str(params, "name")?;
    let arguments = params.get("arguments").cloned().unwrap_or_else(|| json!({}));

    server
        .call_tool(name, arguments)
        .await
        .map_err(|e| RpcFailure::invalid_params(e.to_string()))
}

async fn read_resource(server: &McpServer, params: &Value) -> RpcResult {
    let uri = required_str(params, "uri")?;
    server
        .read_resource(uri)
        .await
        .map_err(RpcFailure::invalid_params)
}

async fn get_prompt(server: &McpServer, params: &Value) -> RpcResult {
    let name = required_str(params, "name")?;
    server
        .get_prompt(name, params.get("arguments").cloned())
        .await
        .map_err(RpcFailure::invalid_params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;

    fn request(method: &str, params: Value) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(1)),
            method: method.to_string(),
            params: Some(params),
        }
    }

    async fn call(method: &str, params: Value) -> JsonRpcResponse {
        let server = McpServer::new(Config::default());
        process_request(&server, request(method, params)).await
    }

    #[tokio::test]
    async fn test_initialize_reports_server_info() {
        let response = call("initialize", json!({})).await;
        let result = response.result.unwrap();
        assert_eq!(result["serverInfo"]["name"], "devtools-mcp-server");
        assert!(result["capabilities"]["tools"].is_object());
    }

    #[tokio::test]
    async fn test_tools_call() {
        let response = call(
            "tools/call",
            json!({ "name": "statistics", "arguments": { "data": "1, 2, 3" } }),
        )
        .await;
        let result = response.result.unwrap();
        assert_eq!(result["structuredContent"]["statistics"]["mean"], 2.0);
    }

    #[tokio::test]
    async fn test_tools_call_errors() {
        let response = call("tools/call", json!({ "arguments": {} })).await;
        assert_eq!(response.error.unwrap().code, INVALID_PARAMS);

        let response = call("tools/call", json!({ "name": "missing_tool" })).await;
        assert!(response.error.unwrap().message.contains("missing_tool"));
    }

    #[tokio::test]
    async fn test_resources_read_template() {
        let response = call("resources/read", json!({ "uri": "devtools://units/weight" })).await;
        let result = response.result.unwrap();
        assert_eq!(result["contents"][0]["uri"], "devtools://units/weight");
    }

    async fn send(body: Option<Value>, method: &str, uri: &str) -> (StatusCode, Value) {
        use http_body_util::BodyExt;
        use tower::ServiceExt;

        let app = HttpTransport::new(HttpConfig::default()).router(McpServer::new(Config::default()));
        let body = body.map_or_else(axum::body::Body::empty, |b| axum::body::Body::from(b.to_string()));
        let request = http::Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body)
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes: bytes::Bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_router_rpc_endpoint() {
        let body = json!({ "jsonrpc": "2.0", "id": 7, "method": "tools/list" });
        let (status, value) = send(Some(body), "POST", "/mcp").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["id"], 7);
        assert_eq!(value["result"]["tools"].as_array().unwrap().len(), 16);
    }

    #[tokio::test]
    async fn test_router_notification_accepted() {
        let body = json!({ "jsonrpc": "2.0", "method": "notifications/initialized" });
        let (status, value) = send(Some(body), "POST", "/mcp").await;
        assert_eq!(status, StatusCode::ACCEPTED);
        assert!(value.is_null());
    }

    #[tokio::test]
    async fn test_router_root_and_health() {
        let (status, value) = send(None, "GET", "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["endpoints"]["rpc"], "/mcp");

        let (_, value) = send(None, "GET", "/health").await;
        assert_eq!(value["status"], "healthy");
    }

    #[tokio::test]
    async fn test_unknown_method_and_version() {
        let response = call("sampling/createMessage", json!({})).await;
        assert_eq!(response.error.unwrap().code, METHOD_NOT_FOUND);

        let server = McpServer::new(Config::default());
        let mut bad = request("ping", json!({}));
        bad.jsonrpc = "1.0".to_string();
        let response = process_request(&server, bad).await;
        assert_eq!(response.error.unwrap().code, INVALID_REQUEST);
    }
}
