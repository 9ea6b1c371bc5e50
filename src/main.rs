use axum::http::HeaderValue;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{
    fmt::writer::BoxMakeWriter, layer::SubscriberExt, util::SubscriberInitExt,
};

use think_tool::{api, mcp, notebook::Notebook};

#[derive(Parser)]
#[command(name = "think-tool")]
#[command(about = "A scratchpad MCP server for recording reasoning steps")]
#[command(version)]
struct Cli {
    /// Log output format
    #[arg(
        long,
        global = true,
        value_enum,
        env = "THINK_TOOL_LOG_FORMAT",
        default_value = "json"
    )]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start MCP server via stdio (default)
    Mcp,
    /// Start MCP server over streamable HTTP
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port for HTTP
        #[arg(short, long, default_value = "17020")]
        port: u16,

        /// Origin allowed to call the server from a browser (repeatable, or comma-separated)
        #[arg(
            long = "cors-origin",
            env = "THINK_TOOL_CORS_ORIGINS",
            value_delimiter = ',',
            value_parser = parse_origin
        )]
        cors_origins: Vec<HeaderValue>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

fn parse_origin(s: &str) -> Result<HeaderValue, String> {
    HeaderValue::from_str(s.trim()).map_err(|e| format!("invalid origin '{}': {}", s, e))
}

/// Initialize tracing with output to stderr (for stdio mode) or stdout
fn init_tracing(format: LogFormat, use_stderr: bool) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "think_tool=info,tower_http=info".into()),
    );

    let registry = tracing_subscriber::registry().with(filter);
    let writer = if use_stderr {
        BoxMakeWriter::new(std::io::stderr)
    } else {
        BoxMakeWriter::new(std::io::stdout)
    };

    match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
            .init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(writer))
            .init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdio mode needs stderr for logging since stdout is the protocol channel
    let use_stderr = !matches!(cli.command, Some(Commands::Serve { .. }));
    init_tracing(cli.log_format, use_stderr);

    let notebook = Notebook::new();

    let result = match cli.command {
        Some(Commands::Serve {
            host,
            port,
            cors_origins,
        }) => api::serve(notebook, &host, port, &cors_origins).await,
        Some(Commands::Mcp) | None => mcp::run_stdio_server(notebook).await,
    };

    if let Err(ref e) = result {
        tracing::error!(error = %e, "failed to run server");
    }

    result
}
