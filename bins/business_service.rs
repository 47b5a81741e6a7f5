use std::process::ExitCode;

use configs::{AppConfig, Role};
use dotenvy::dotenv;
use tracing::{error, info, warn};
use uuid::Uuid;

const SERVICE: &str = "business-service";

fn init_logging() {
    // load .env before reading RUST_LOG / LOG_FORMAT
    dotenv().ok();
    common::utils::logging::init_logging_from_env();
    info!(service = SERVICE, event = "logger_init", "tracing subscriber initialized");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(service = SERVICE, event = "signal_error", error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!(service = SERVICE, event = "shutdown_signal", "received Ctrl+C, draining connections");
}

fn main() -> ExitCode {
    init_logging();

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(service = SERVICE, event = "panic", %service_id, pid, message = %info, "unhandled panic occurred");
    }));

    let cfg = match AppConfig::load_and_validate(Role::BusinessService) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = SERVICE, event = "config_invalid", error = %e, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = cfg.server.worker_threads {
        builder.worker_threads(w);
    }
    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = SERVICE, event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service = SERVICE,
        event = "start",
        %service_id,
        pid,
        version,
        addr = %cfg.server.addr(),
        threads = cfg.server.worker_threads.unwrap_or_default(),
        "business service starting"
    );

    rt.block_on(async move {
        match gateway::run(cfg, shutdown_signal()).await {
            Ok(()) => {
                info!(service = SERVICE, event = "stop", %service_id, pid, "business service stopped normally");
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!(service = SERVICE, event = "run_failed", error = %e, "business service exited with error");
                ExitCode::FAILURE
            }
        }
    })
}
