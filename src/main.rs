mod ai;
mod config;
mod console;
mod core;
mod logger;
mod ui;

use std::sync::Arc;

use ai::{KeywordResponder, Responder, ResponseTable};
use anyhow::Context;
use config::Config;
use eframe::NativeOptions;
use ui::AssistantApp;

fn main() -> anyhow::Result<()> {
    // Configuration first: it decides where the log file goes
    let config = Config::from_env();
    logger::init(&config.log_dir)?;
    log::info!("assistant starting");
    for warning in &config.warnings {
        log::warn!("config: {}", warning);
    }

    // Runtime for the simulated typing cycles
    let rt = tokio::runtime::Runtime::new().context("cannot start tokio runtime")?;
    let _guard = rt.enter();

    // Answer source shared by every session
    let keywords = KeywordResponder::new(ResponseTable::builtin());
    log::info!(
        "responder: {} with {} canned responses",
        keywords.name(),
        keywords.table().iter().count()
    );
    let responder: Arc<dyn Responder> = Arc::new(keywords);

    if config.console {
        log::info!("console mode");
        return rt.block_on(console::run(&config, responder));
    }

    let title = config.assistant_name.clone();
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(&title)
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([420.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| -> Result<Box<dyn eframe::App>, Box<dyn std::error::Error + Send + Sync>> {
            Ok(Box::new(AssistantApp::new(cc, config, responder)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("window failed: {}", e))?;

    log::info!("assistant stopped");
    Ok(())
}
