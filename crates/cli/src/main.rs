//! `kokoro` binary: HTTP server plus small operational commands.

#![allow(clippy::print_stdout, reason = "CLI output goes to stdout")]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use kokoro_http::{AppState, create_router};
use kokoro_llm::{LlmConfig, client_from_config};
use kokoro_service::{
    ChatService, GoalService, KpiService, PromptStore, ReportService, SessionService,
};
use kokoro_storage::Storage;

#[derive(Parser)]
#[command(name = "kokoro")]
#[command(about = "Backend for the kokoro coaching and journaling app", long_about = None)]
struct Cli {
    /// SQLite database file. Created (with parent directories) if missing.
    #[arg(long, default_value = "kokoro.db", global = true)]
    db: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server.
    Serve {
        #[arg(short, long, default_value = "8000")]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
        /// Directory holding versioned prompt templates.
        #[arg(long, default_value = "prompts")]
        prompts_dir: PathBuf,
    },
    /// Create a user and print it as JSON.
    AddUser { name: String },
    /// Print a user's edit-ratio KPI report as JSON.
    Kpi {
        #[arg(long)]
        user_id: i64,
        /// Print the completion/retention rollup instead.
        #[arg(long)]
        summary: bool,
    },
}

fn open_storage(db_path: &PathBuf) -> Result<Arc<Storage>> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    let storage =
        Storage::new(db_path).with_context(|| format!("opening {}", db_path.display()))?;
    Ok(Arc::new(storage))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, host, prompts_dir } => {
            let storage = open_storage(&cli.db)?;
            let prompts = Arc::new(PromptStore::new(prompts_dir));
            let llm_config = LlmConfig::from_env();
            let llm = client_from_config(&llm_config)?;

            let state = Arc::new(AppState {
                storage: Arc::clone(&storage),
                session_service: Arc::new(SessionService::new(
                    Arc::clone(&storage),
                    Arc::clone(&prompts),
                    llm_config.clone(),
                )),
                chat_service: Arc::new(ChatService::new(
                    Arc::clone(&storage),
                    Arc::clone(&prompts),
                    Arc::clone(&llm),
                )),
                goal_service: Arc::new(GoalService::new(Arc::clone(&storage))),
                report_service: Arc::new(ReportService::new(
                    Arc::clone(&storage),
                    prompts,
                    llm,
                    llm_config.clone(),
                )),
                kpi_service: Arc::new(KpiService::new(Arc::clone(&storage))),
            });

            let router = create_router(state);
            let addr = format!("{host}:{port}");
            tracing::info!(%addr, provider = llm_config.provider.as_str(), "starting HTTP server");
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            axum::serve(listener, router).await?;
        },
        Commands::AddUser { name } => {
            let storage = open_storage(&cli.db)?;
            let user = storage.create_user(&name)?;
            println!("{}", serde_json::to_string_pretty(&user)?);
        },
        Commands::Kpi { user_id, summary } => {
            let storage = open_storage(&cli.db)?;
            let kpi = KpiService::new(storage);
            if summary {
                println!("{}", serde_json::to_string_pretty(&kpi.summary(user_id)?)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&kpi.edit_ratio_report(user_id)?)?);
            }
        },
    }

    Ok(())
}
