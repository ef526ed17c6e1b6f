#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic
)]
// Tell OS to hide the console window when running.
// This attribute is only applied if the target OS is Windows.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod loader;
mod memory;
mod ui_menubar;
mod ui_popup;

use crate::ui_popup::PopupType;
use app::{Config, GbViewApp};
use clap::Parser;
use eframe::egui;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "gbview")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Boot ROM image to load on startup
    #[arg(value_name = "ROM")]
    rom: Option<PathBuf>,

    /// Bytes per row in the editors
    #[arg(long, default_value = "16")]
    cols: usize,

    /// Open the ROM editor in read-only mode
    #[arg(long)]
    read_only_rom: bool,

    /// Show the data preview panel
    #[arg(long)]
    preview: bool,
}

fn main() -> eframe::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let config = Config {
        cols: args.cols.max(1),
        read_only_rom: args.read_only_rom,
        preview: args.preview,
    };

    let mut app = GbViewApp::new(&config);
    if let Some(path) = &args.rom {
        app.open_rom(path);
    }

    let options = eframe::NativeOptions {
        vsync: true,
        viewport: egui::ViewportBuilder::default()
            .with_resizable(true)
            .with_inner_size([1280.0, 720.0]),
        ..Default::default()
    };
    eframe::run_native("gbview", options, Box::new(|_cc| Ok(Box::new(app))))
}

impl eframe::App for GbViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        #[cfg(debug_assertions)]
        {
            // Track FPS
            let dt = ctx.input(|i| i.stable_dt);
            let fps = if dt > 0.0 { 1.0 / dt } else { 0.0 };
            tracing::trace!("FPS: {fps:.1}");
        }

        self.show_menu_bar(ctx);

        if self.error.is_some() && !self.popup.active {
            self.popup.open(PopupType::Error);
        }

        self.show_central_panel(ctx);
        self.show_editors(ctx);

        if self.popup.active {
            self.show_popup(ctx);
        }
    }
}
