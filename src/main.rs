use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use mockable::DefaultClock;

use rollcall::camera::SimulatedCamera;
use rollcall::config::Config;
use rollcall::logging::init_tracing;
use rollcall::storage::JsonFileStore;
use rollcall::ui::app::App;
use rollcall::ui::runtime::Runtime;

/// Attendance kiosk driven by line commands on stdin.
#[derive(Debug, Parser)]
#[command(name = "rollcall", version, about)]
struct Args {
    /// Config file (default: <config dir>/rollcall/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Registration store file, overriding `[storage] path`
    #[arg(long)]
    store: Option<PathBuf>,

    /// Refuse every camera request
    #[arg(long)]
    deny_camera: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tracing();
    let args = Args::parse();
    if let Err(err) = run(args).await {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("failed to load config")?;

    let store_path = args
        .store
        .clone()
        .unwrap_or_else(|| config.storage.resolved_path());
    tracing::info!(store = %store_path.display(), "Starting rollcall");

    let camera = if args.deny_camera {
        SimulatedCamera::denying()
    } else {
        SimulatedCamera::new()
    };

    let app = App::new(
        &config,
        Box::new(JsonFileStore::new(store_path)),
        Arc::new(DefaultClock),
    )
    .context("invalid config")?;

    let mut stdout = std::io::stdout();
    let app = Runtime::new(app, Arc::new(camera.clone()))
        .run(tokio::io::stdin(), &mut stdout)
        .await
        .context("runtime failed")?;

    let stats = camera.stats();
    tracing::info!(
        registrations = app.registrations().len(),
        check_ins = app.attendance().len(),
        cameras_opened = stats.opened,
        cameras_live = stats.live(),
        "Exiting"
    );
    Ok(())
}
