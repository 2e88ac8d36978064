use super::client::{WeatherToolClient, build_headers};
use super::types::{WeatherPayload, WeatherSnapshot, WeatherToolRequest};
use crate::{
    Error, Result,
    config::{McpClientType, McpServerConfig},
};
use async_trait::async_trait;
use rmcp::{
    RoleClient,
    model::{
        CallToolRequestParam, CallToolResult, ClientCapabilities, ClientInfo, Implementation,
        InitializeRequestParam, RawContent,
    },
    service::{RunningService, ServiceExt},
    transport::{
        ConfigureCommandExt, SseClientTransport, StreamableHttpClientTransport, TokioChildProcess,
        sse_client::SseClientConfig, streamable_http_client::StreamableHttpClientTransportConfig,
    },
};
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Fetches weather by calling a tool on an MCP server through rmcp.
pub struct McpWeatherClient {
    name: String,
    peer: RunningService<RoleClient, InitializeRequestParam>,
    timeout: Option<Duration>,
}

impl McpWeatherClient {
    pub async fn connect(config: &McpServerConfig, timeout_secs: Option<u64>) -> Result<Self> {
        info!("Connecting to MCP weather server: {}", config.name);

        let peer = match config.client_type {
            McpClientType::Stdio => Self::serve_stdio(config).await?,
            McpClientType::Sse => Self::serve_sse(config).await?,
            McpClientType::StreamableHttp => Self::serve_http(config).await?,
        };

        info!("Successfully connected to MCP weather server: {}", config.name);

        Ok(Self {
            name: config.name.clone(),
            peer,
            timeout: timeout_secs.map(Duration::from_secs),
        })
    }

    fn client_info() -> ClientInfo {
        ClientInfo {
            protocol_version: Default::default(),
            capabilities: ClientCapabilities::default(),
            client_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }

    async fn serve_stdio(
        config: &McpServerConfig,
    ) -> Result<RunningService<RoleClient, InitializeRequestParam>> {
        let command = config.command.as_ref().ok_or_else(|| {
            Error::config("Stdio MCP client requires 'command' field".to_string())
        })?;

        debug!("Creating stdio process for command: {}", command);

        let transport = TokioChildProcess::new(Command::new(command).configure(|cmd| {
            cmd.args(&config.args);
            for (key, value) in &config.env {
                cmd.env(key, value);
            }
        }))?;

        Self::client_info()
            .serve(transport)
            .await
            .map_err(|e| Error::mcp(format!("Failed to create rmcp service: {}", e)))
    }

    async fn serve_sse(
        config: &McpServerConfig,
    ) -> Result<RunningService<RoleClient, InitializeRequestParam>> {
        let url = config
            .url
            .as_ref()
            .ok_or_else(|| Error::config("SSE MCP client requires 'url' field".to_string()))?;

        debug!("Creating SSE connection to: {}", url);

        let client = reqwest::Client::builder()
            .default_headers(build_headers(&config.headers)?)
            .build()
            .map_err(|e| Error::mcp(format!("Failed to create HTTP client: {}", e)))?;

        let transport = SseClientTransport::start_with_client(
            client,
            SseClientConfig {
                sse_endpoint: url.clone().into(),
                ..Default::default()
            },
        )
        .await
        .map_err(|e| Error::mcp(format!("Failed to create SSE transport: {}", e)))?;

        Self::client_info()
            .serve(transport)
            .await
            .map_err(|e| Error::mcp(format!("Failed to serve SSE rmcp service: {}", e)))
    }

    async fn serve_http(
        config: &McpServerConfig,
    ) -> Result<RunningService<RoleClient, InitializeRequestParam>> {
        let url = config
            .url
            .as_ref()
            .ok_or_else(|| Error::config("HTTP MCP client requires 'url' field".to_string()))?;

        debug!("Creating HTTP connection to: {}", url);

        let client = reqwest::Client::builder()
            .default_headers(build_headers(&config.headers)?)
            .build()
            .map_err(|e| Error::mcp(format!("Failed to create HTTP client: {}", e)))?;

        let transport = StreamableHttpClientTransport::with_client(
            client,
            StreamableHttpClientTransportConfig::with_uri(url.clone()),
        );

        Self::client_info()
            .serve(transport)
            .await
            .map_err(|e| Error::mcp(format!("Failed to serve HTTP rmcp service: {}", e)))
    }
}

#[async_trait]
impl WeatherToolClient for McpWeatherClient {
    async fn fetch_weather(&self, request: &WeatherToolRequest) -> Result<WeatherSnapshot> {
        let tool_name = request.tool_name().to_string();
        debug!("Calling tool: {} with rmcp peer: {}", tool_name, self.name);

        let mut arguments = serde_json::Map::new();
        arguments.insert(
            "city".to_string(),
            serde_json::Value::String(request.city.clone()),
        );

        let call = self.peer.call_tool(CallToolRequestParam {
            name: tool_name.clone().into(),
            arguments: Some(arguments),
        });

        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call).await.map_err(|_| {
                Error::collaborator(format!(
                    "tool {} timed out after {:?} on MCP server {}",
                    tool_name, limit, self.name
                ))
            })?,
            None => call.await,
        }
        .map_err(|e| {
            warn!(
                "Failed to call tool {} via rmcp peer {}: {}",
                tool_name, self.name, e
            );
            Error::collaborator(format!("Tool call failed: {}", e))
        })?;

        snapshot_from_tool_result(result, request)
    }
}

/// Reads the first text item of a tool result as the weather payload.
pub fn snapshot_from_tool_result(
    result: CallToolResult,
    request: &WeatherToolRequest,
) -> Result<WeatherSnapshot> {
    let tool_name = request.tool_name();
    let text = result
        .content
        .into_iter()
        .find_map(|item| match item.raw {
            RawContent::Text(text) => Some(text.text),
            _ => None,
        })
        .ok_or_else(|| Error::collaborator(format!("tool {} returned no text content", tool_name)))?;

    if result.is_error.unwrap_or(false) {
        return Err(Error::collaborator(format!(
            "tool {} reported an error: {}",
            tool_name, text
        )));
    }

    let payload: WeatherPayload = serde_json::from_str(&text)
        .map_err(|e| Error::collaborator(format!("malformed weather payload: {}", e)))?;

    payload.into_snapshot(&request.city, request.config.strict_validation)
}
