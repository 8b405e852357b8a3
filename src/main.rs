use clap::Parser;
use std::path::PathBuf;
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use marketview::config::{self, AppState, Config};
use marketview::logger;
use marketview::server;

#[derive(Parser)]
#[command(
    name = "marketview",
    version,
    about = "Market dashboard server: one page, three JSON datasets"
)]
struct Cli {
    /// Config file path (extension optional)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Application root holding templates/, data/ and static/
    #[arg(short, long, value_name = "DIR")]
    root: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .map_or_else(|| config::DEFAULT_CONFIG_PATH.to_string(), |p| p.display().to_string());
    let mut cfg = Config::load_from(&config_path)?;
    if let Some(root) = cli.root.as_deref() {
        cfg = cfg.with_root(root);
    }

    logger::init(&cfg)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_reusable_listener(addr)?;

    let state = Arc::new(AppState::new(cfg));
    logger::log_server_start(&addr, &state.config, &state.routes.paths());

    server::start_server_loop(
        listener,
        state,
        Arc::new(AtomicUsize::new(0)),
        server::shutdown_signal(),
    )
    .await;

    Ok(())
}
