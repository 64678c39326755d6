use dotenvy::dotenv;
use tracing::{error, info, warn};
use uuid::Uuid;

fn init_logging(format: &str) {
    common::utils::logging::init_logging_with_format(format);
    info!(service = "server", event = "logger_init", format, "tracing subscriber initialized");
}

fn main() -> std::process::ExitCode {
    // load .env first so RUST_LOG, CONFIG_PATH and the env fallbacks take effect
    dotenv().ok();
    // config.toml first, environment second
    let settings = match server::load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            init_logging("compact");
            error!(service = "server", event = "config_invalid", error = %e, "cannot load settings");
            return std::process::ExitCode::FAILURE;
        }
    };
    init_logging(&settings.log_format);
    let config_path = configs::config_path();
    if !std::path::Path::new(&config_path).exists() {
        warn!(service = "server", path = %config_path, "config file not found; using environment");
    }

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new({
        let service_id = service_id;
        move |info| {
            error!(
                service = "server",
                event = "panic",
                %service_id,
                pid,
                message = %info,
                "unhandled panic occurred"
            );
        }
    }));

    let worker_threads = settings.worker_threads;
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "server", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "server",
        event = "start",
        %service_id,
        pid,
        version,
        threads = worker_threads.unwrap_or_default(),
        "server service starting"
    );

    // run() returns once Ctrl+C has drained in-flight requests
    match rt.block_on(server::run(settings)) {
        Ok(()) => {
            info!(service = "server", event = "stop", %service_id, pid, "server stopped normally");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "server", event = "run_failed", error = %e, "server::run returned error");
            std::process::ExitCode::FAILURE
        }
    }
}
