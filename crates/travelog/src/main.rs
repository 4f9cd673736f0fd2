mod bootstrap;

use anyhow::Result;
use travelog_core::presenter::Presenter;
use travelog_core::settings::Settings;
use travelog_data::aggregator::TripAggregator;
use travelog_data::reader::load_records;
use travelog_runtime::orchestrator::RefreshOrchestrator;
use travelog_ui::app::{App, ViewMode};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("Travelog v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!("View: {}, Theme: {}", settings.view, settings.theme);

    let data_path = settings
        .data
        .clone()
        .or_else(bootstrap::discover_data_path);
    let zones_path = settings
        .zones
        .clone()
        .or_else(bootstrap::discover_zones_path);

    let Some(data_path) = data_path else {
        eprintln!("No trip feed found.");
        eprintln!("Pass --data <file> or place cities.json in the current directory or ~/.travelog/.");
        return Ok(());
    };

    let source = data_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| data_path.display().to_string());

    match settings.view.as_str() {
        "dashboard" => {
            tracing::info!("Starting live dashboard...");

            let orchestrator = RefreshOrchestrator::new(
                u64::from(settings.refresh_rate),
                data_path.clone(),
                zones_path,
            );

            let (rx, handle) = orchestrator.start();

            let app = App::new(&settings.theme, ViewMode::Dashboard, source);

            // Run the TUI event loop. The loop exits on 'q' / Ctrl+C inside the
            // TUI. We also listen for Ctrl+C at the OS level so that signals
            // received while the terminal is in raw mode are handled cleanly.
            tokio::select! {
                result = app.run_dashboard(rx) => {
                    handle.abort();
                    result?;
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Ctrl+C received; shutting down refresh task");
                    handle.abort();
                }
            }
        }

        "trips" | "stays" => {
            tracing::info!("Running {} view...", settings.view);

            // One-shot pipeline run; no background refresh.
            let records = load_records(&data_path)?;
            let snapshot = TripAggregator::build(records);

            let view_mode = if settings.view == "stays" {
                ViewMode::Stays
            } else {
                ViewMode::Trips
            };

            let mut app = App::new(&settings.theme, view_mode, source);
            app.panel.clear_all();
            snapshot.present(&mut app.panel);
            app.updated = chrono::Local::now().format("%H:%M:%S").to_string();

            app.run_table().await?;
        }

        unknown => {
            eprintln!("Unknown view mode: {}", unknown);
        }
    }

    Ok(())
}
