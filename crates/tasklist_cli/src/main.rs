//! Server entry point.
//!
//! # Responsibility
//! - Parse configuration from flags and environment.
//! - Initialize logging, open the task store once, and serve HTTP until
//!   Ctrl-C.

use clap::Parser;
use log::{error, info};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tasklist_core::{default_log_level, init_logging, init_stderr_logging, TaskStore};

#[derive(Debug, Parser)]
#[command(name = "tasklist", version, about = "Single-user task list web server")]
struct Cli {
    /// SQLite database file; created with its schema when missing.
    #[arg(long, env = "TASKLIST_DB_PATH", default_value = "todo.db")]
    db: PathBuf,

    /// Address to listen on.
    #[arg(long, env = "TASKLIST_BIND", default_value = "127.0.0.1:5000")]
    bind: SocketAddr,

    /// trace|debug|info|warn|error. Defaults by build mode.
    #[arg(long, env = "TASKLIST_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files. Logs go to stderr when unset.
    #[arg(long, env = "TASKLIST_LOG_DIR")]
    log_dir: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    let logging = match cli.log_dir.as_deref() {
        Some(dir) => init_logging(level, dir),
        None => init_stderr_logging(level),
    };
    if let Err(err) = logging {
        eprintln!("tasklist: {err}");
        return ExitCode::FAILURE;
    }

    match serve(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=server_exit module=cli status=error error={err}");
            ExitCode::FAILURE
        }
    }
}

async fn serve(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let store = Arc::new(TaskStore::open(&cli.db)?);
    let app = tasklist_web::router(store);

    let listener = tokio::net::TcpListener::bind(cli.bind).await?;
    info!(
        "event=server_start module=cli status=ok addr={} db={}",
        listener.local_addr()?,
        cli.db.display()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=cli status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        // Without a signal handler, keep serving rather than exit at once.
        error!("event=signal module=cli status=error error={err}");
        std::future::pending::<()>().await;
    }
}
