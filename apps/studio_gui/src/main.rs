use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use compile_core::{SimulatedCompiler, SIMULATED_COMPILE_LATENCY};
use crossbeam_channel::bounded;
use eframe::egui;

mod backend_bridge;
mod controller;
mod transfer;
mod ui;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::app::StudioApp;

#[derive(Debug, Parser)]
#[command(name = "studio_gui", about = "Rust Compiler Studio desktop app")]
struct Args {
    /// Source file (.rs or .txt) to load into the editor at startup.
    #[arg(long)]
    file: Option<PathBuf>,

    /// Override the simulated compile latency in milliseconds.
    #[arg(long)]
    latency_ms: Option<u64>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = Args::parse();
    let latency = args
        .latency_ms
        .map_or(SIMULATED_COMPILE_LATENCY, Duration::from_millis);
    let compiler = SimulatedCompiler::new(latency);

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::spawn_backend_thread(compiler, cmd_rx, ui_tx);

    if let Some(path) = args.file {
        if let Err(err) = cmd_tx.try_send(BackendCommand::LoadSourceFile { path }) {
            tracing::warn!("unable to queue startup file load: {err}");
        }
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Rust Compiler Studio")
            .with_inner_size([1180.0, 760.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Rust Compiler Studio",
        options,
        Box::new(|_cc| Ok(Box::new(StudioApp::new(cmd_tx, ui_rx)))),
    )
}
