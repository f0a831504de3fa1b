//! Stacklens MCP server
//!
//! Authenticates against Keystone once at startup, then serves the query
//! tools over streamable HTTP (default) or stdio.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use stacklens_mcp::{CompositeRegistry, HealthTools, McpServer, ServerConfig, ToolRegistry};
use stacklens_mcp_query::QueryTools;
use stacklens_query::{CloudConfig, HttpControlPlane, QueryFacade, Session};

/// Mount point for the streamable HTTP transport.
const HTTP_PATH: &str = "/openstack";

/// Stacklens - MCP query gateway for OpenStack
#[derive(Parser, Debug)]
#[command(name = "stacklens", version, about = "MCP query gateway for OpenStack control planes", long_about = None)]
struct Args {
    /// Port to listen on for HTTP
    #[arg(long, default_value_t = 8000)]
    port: u16,

    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Use the single-response channel instead of SSE streaming
    #[arg(long, default_value_t = false)]
    json_response: bool,

    /// Serve over stdio instead of HTTP
    #[arg(long, default_value_t = false)]
    stdio: bool,

    /// Keystone authentication URL
    #[arg(long, env = "OS_AUTH_URL", default_value = "http://127.0.0.1:5000/v3")]
    auth_url: String,

    /// OpenStack user name
    #[arg(long, env = "OS_USERNAME", default_value = "admin")]
    username: String,

    /// OpenStack password
    #[arg(long, env = "OS_PASSWORD", default_value = "admin")]
    password: String,

    /// OpenStack project name
    #[arg(long, env = "OS_PROJECT_NAME", default_value = "admin")]
    project_name: String,

    /// OpenStack user domain name
    #[arg(long, env = "OS_USER_DOMAIN_NAME", default_value = "Default")]
    user_domain_name: String,

    /// OpenStack project domain name
    #[arg(long, env = "OS_PROJECT_DOMAIN_NAME", default_value = "Default")]
    project_domain_name: String,

    /// Outbound control-plane request timeout, in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(args.timeout_secs))
        .build()?;

    let config = CloudConfig {
        auth_url: args.auth_url.clone(),
        username: args.username.clone(),
        password: args.password.clone(),
        project_name: args.project_name.clone(),
        user_domain_name: args.user_domain_name.clone(),
        project_domain_name: args.project_domain_name.clone(),
    };

    let session = Arc::new(Session::establish(&config, &client).await?);
    let facade = QueryFacade::new(HttpControlPlane::new(session, client));
    let upstream = facade.backend_name().to_string();

    let query_tools = QueryTools::new(facade);
    let tool_count = query_tools.tool_count() + 1;
    let registry = CompositeRegistry::new().add(query_tools).add(
        HealthTools::new("stacklens", env!("CARGO_PKG_VERSION"), tool_count)
            .with_upstream(upstream),
    );

    let server = McpServer::new(
        registry,
        ServerConfig {
            name: "stacklens".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            instructions: Some(
                "Read-only OpenStack inventory. Each get_* tool accepts \
                 filter (name substring or exact id), limit, and \
                 detail_level (basic|detailed|full)."
                    .to_string(),
            ),
        },
    );

    if args.stdio {
        server.serve_stdio().await
    } else {
        let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
        tracing::info!("stacklens listening on {addr}{HTTP_PATH}");
        server.serve_http(addr, HTTP_PATH, args.json_response).await
    }
}

/// Log to stderr so the stdio transport stays clean. `RUST_LOG` overrides
/// the CLI level when set.
fn init_logging(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
