#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use clap::Parser;
use eframe::egui;

use schedule_board::config::{Config, Overrides};
use schedule_board::ui::ScheduleApp;

/// Conference schedule viewer
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// URL or file path of the schedule JSON, instead of the configured one
    #[arg(short, long)]
    source: Option<String>,

    /// Viewport width at or below which the list view is used
    #[arg(short, long)]
    breakpoint: Option<f32>,
}

fn main() -> eframe::Result<()> {
    #[cfg(debug_assertions)]
    colog::init();

    let args = Args::parse();

    let config = Config::load().unwrap_or_else(|e| {
        log::warn!("Using default config: {:#}", e);
        Config::default()
    });
    let overrides = Overrides {
        source: args.source,
        breakpoint: args.breakpoint,
    };

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1200.0, 900.0])
        .with_min_inner_size([360.0, 480.0])
        .with_title("Schedule Board");

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Schedule Board",
        options,
        Box::new(|cc| Ok(Box::new(ScheduleApp::new(cc, config, overrides)?))),
    )
}
