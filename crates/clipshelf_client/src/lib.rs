//! Clipboard history client.
//!
//! Exposes the app state, the backend worker, and a `run` helper so the
//! workspace root can launch the console client without duplicating setup.

/// Client state: cache, view, sync loop, gate, preview, and rendering.
pub mod app;
/// Backend worker + protocol types used by the app and headless tests.
pub mod backend;
mod console;

pub use app::ClipShelfApp;
pub use console::{apply_command, parse_command, ConsoleCommand};

use backend::spawn_backend;
use clipshelf_core::{AppError, Config, MemoryGateway};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "clipshelf=warn,clipshelf_client=info,clipshelf_core=info";

/// Installs the global tracing subscriber, writing to stderr.
///
/// `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

/// Start the console client against an in-memory backend.
///
/// # Errors
/// Returns an error when the backend worker cannot be spawned or the console
/// loop fails on I/O.
pub fn run(config: Config) -> Result<(), AppError> {
    init_tracing();

    let gateway = MemoryGateway::new(config.export_dir.as_str());
    if config.demo_seed {
        gateway.seed_demo();
    }
    let backend = spawn_backend(gateway.clone())?;
    info!(export_dir = %config.export_dir, "clipshelf client starting");
    let app = ClipShelfApp::new(backend, config);
    console::run_console(app, gateway)
}
