//! Business Crew Server
//!
//! Axum server that embeds and serves the single-page UI with the JSON API,
//! plus a CLI mode that runs one analysis without the server.

mod api;

use anyhow::Context;
use api::{AppState, SharedState};
use axum::{
    body::Body,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use clap::{Parser, Subcommand};
use crew_core::analysis::{run_analysis, TROUBLESHOOTING_TIPS};
use crew_core::config::{PersistedConfig, Secrets, CONFIG_PATH};
use crew_core::crew::{all_agents, AnalysisMode};
use crew_core::llm::RadkitBackend;
use rust_embed::RustEmbed;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Embedded UI assets
#[derive(RustEmbed)]
#[folder = "assets"]
struct Assets;

#[derive(Parser, Clone)]
#[command(author, version, about = "Business Multi-Agent System")]
struct Args {
    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Subcommand, Clone)]
enum CliCommand {
    /// Start the web UI (default)
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8501")]
        port: u16,
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: IpAddr,
    },
    /// Run one analysis in the terminal
    Run {
        /// Analysis mode: comprehensive, market-research, sales-strategy,
        /// customer-analysis or executive-report
        #[arg(short, long, default_value = "comprehensive")]
        mode: String,
        /// Also write the report to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// The business task to analyse
        task: String,
    },
    /// List the agents and analysis modes
    Agents,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("crew_server=info,crew_core=info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

/// Resolve model settings and the API key, then build the backend.
async fn load_backend() -> anyhow::Result<RadkitBackend> {
    let mut config = PersistedConfig::load().await;
    config.apply_env();
    let model = config.model_config();

    Secrets::load()
        .await
        .export(model.provider)
        .context("cannot start without an API key")?;

    tracing::info!(provider = %model.provider, model = %model.model, "API key configured");
    Ok(RadkitBackend::new(model))
}

// === Static File Serving ===

async fn serve_static(uri: Uri) -> Response {
    let path = match uri.path().trim_start_matches('/') {
        "" => "index.html",
        p => p,
    };

    if let Some(file) = Assets::get(path) {
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        return (
            [(header::CONTENT_TYPE, mime.as_ref().to_string())],
            Body::from(file.data.into_owned()),
        )
            .into_response();
    }

    // SPA fallback
    if let Some(file) = Assets::get("index.html") {
        return (
            [(header::CONTENT_TYPE, "text/html".to_string())],
            Body::from(file.data.into_owned()),
        )
            .into_response();
    }

    (StatusCode::NOT_FOUND, "Not Found").into_response()
}

fn app(state: SharedState) -> Router {
    Router::new()
        .nest("/api/v1", api::routes())
        .fallback(get(serve_static))
        .with_state(state)
}

// === Server Entry ===

async fn run_server(host: IpAddr, port: u16) -> anyhow::Result<()> {
    let backend = load_backend().await?;
    let state: SharedState = Arc::new(AppState {
        model: backend.config().clone(),
        backend: Arc::new(backend),
        config_path: PathBuf::from(CONFIG_PATH),
    });

    let addr = SocketAddr::new(host, port);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!("Business Crew running at http://{}", addr);
    tracing::info!(
        "API: /api/v1/status, /agents, /modes, /analysis, /analysis/stream, /report/download, /config"
    );

    axum::serve(listener, app(state)).await?;
    Ok(())
}

async fn run_once(mode: &str, task: &str, output: Option<PathBuf>) -> anyhow::Result<()> {
    let mode: AnalysisMode = mode.parse()?;
    let backend = load_backend().await?;

    println!(
        "🤖 {} ({} task(s), est. {})",
        mode.label(),
        mode.templates().len(),
        mode.estimated_time()
    );

    let report = match run_analysis(mode, task, &backend).await {
        Ok(report) => report,
        Err(e) => {
            if !e.is_user_error() {
                eprintln!("💡 Troubleshooting Tips:");
                for tip in TROUBLESHOOTING_TIPS {
                    eprintln!("   - {}", tip);
                }
            }
            return Err(e.into());
        }
    };

    println!("{}", report.content);
    println!(
        "\n✅ Agents used: {} | Tasks completed: {}",
        report.agents_used, report.tasks_completed
    );

    if let Some(path) = output {
        tokio::fs::write(&path, &report.content)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("⬇️  Saved report to {}", path.display());
    }
    Ok(())
}

fn print_agents() {
    println!("👥 Active Agents");
    for agent in all_agents() {
        println!("  {} {} - {}", agent.icon, agent.display_name, agent.caption);
    }
    println!("\n📋 Analysis Types");
    for mode in AnalysisMode::all() {
        println!("  {:<18} {}", mode.id(), mode.label());
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; keys may come from the secrets file or the shell.
    let _ = dotenvy::dotenv();
    init_logging();

    let args = Args::parse();
    match args.command {
        Some(CliCommand::Run { mode, output, task }) => run_once(&mode, &task, output).await,
        Some(CliCommand::Agents) => {
            print_agents();
            Ok(())
        }
        Some(CliCommand::Serve { port, host }) => run_server(host, port).await,
        None => run_server(IpAddr::from([127, 0, 0, 1]), 8501).await,
    }
}
