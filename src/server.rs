//! MCP server exposing the documentation tool.

use crate::client_log::{ClientLogLevel, ClientLogReceiver};
use crate::config::Config;
use crate::prepare::prepare;
use crate::state::DocsState;
use crate::tools::docs::{DocsRequest, handle_docs};
use anyhow::Context;
use rmcp::{
    ErrorData, RoleServer, ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    service::RequestContext,
    tool, tool_handler, tool_router,
    transport::stdio,
};
use std::sync::Arc;

/// MCP Server for KaibanJS documentation queries
#[derive(Clone)]
pub struct DocsServer {
    /// Shared documentation state (docs root, listing cache)
    state: Arc<DocsState>,

    /// Minimum level for log messages sent to the client
    client_log_level: ClientLogLevel,

    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for DocsServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocsServer")
            .field("state", &self.state)
            .finish()
    }
}

#[tool_router]
impl DocsServer {
    pub fn new(state: Arc<DocsState>, client_log_level: ClientLogLevel) -> Self {
        Self {
            state,
            client_log_level,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        name = "kaibanjsDocs",
        description = "Get KaibanJS documentation. Request paths to explore the docs. \
            The user doesn't know about files and directories. \
            You can also use keywords from the user query to find relevant documentation, but prioritize paths. \
            This is your internal knowledge the user can't read. \
            IMPORTANT: Be concise with your answers. The user will ask for more info. \
            If packages need to be installed, provide the install command. \
            When displaying results, always mention which file path contains the information \
            (e.g., 'Found in \"path/to/file.md\"') so users know where this documentation lives."
    )]
    async fn kaibanjs_docs(
        &self,
        Parameters(request): Parameters<DocsRequest>,
    ) -> std::result::Result<String, String> {
        handle_docs(&self.state, request).await
    }
}

#[tool_handler]
impl ServerHandler for DocsServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(
            ServerCapabilities::builder()
                .enable_tools()
                .enable_logging()
                .build(),
        )
        .with_protocol_version(ProtocolVersion::V_2024_11_05)
        .with_server_info(Implementation::from_build_env())
        .with_instructions(format!(
            "KaibanJS Documentation Server. Use the kaibanjsDocs tool with one or more \
             documentation paths.\n\n{}",
            self.state.available_paths()
        ))
    }

    async fn set_level(
        &self,
        request: SetLevelRequestParams,
        _: RequestContext<RoleServer>,
    ) -> std::result::Result<(), ErrorData> {
        tracing::debug!(level = ?request.level, "Client set log level");
        self.client_log_level.set(request.level);
        Ok(())
    }
}

/// Prepare the documentation snapshot if requested, then serve over stdio until the client disconnects.
///
/// Log messages queued in `client_log` are forwarded to the client once it connects.
pub async fn run(config: &Config, client_log: Option<ClientLogReceiver>) -> crate::error::Result<()> {
    if config.rebuild_on_start {
        tracing::info!("Rebuilding docs on start");
        match prepare(&config.source_dir, &config.docs_dir).await {
            Ok(copied) => tracing::info!("Docs rebuilt successfully ({} files)", copied),
            Err(e) => tracing::error!(error = %format!("{:#}", e), "Failed to rebuild docs"),
        }
    }

    let state = DocsState::load(&config.docs_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to load documentation from {}",
                config.docs_dir.display()
            )
        })?;

    let client_log_level = client_log
        .as_ref()
        .map(ClientLogReceiver::level)
        .unwrap_or_default();
    let server = DocsServer::new(Arc::new(state), client_log_level);
    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("Error serving MCP server: {:?}", e);
    })?;

    if let Some(receiver) = client_log {
        tokio::spawn(receiver.forward(service.peer().clone()));
    }

    tracing::info!("Started KaibanJS Docs MCP Server");

    service.waiting().await?;

    Ok(())
}
