mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::{config::normalize_posts_url, load_settings, MutationMode};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::PostsApp;

#[derive(Parser, Debug)]
struct Args {
    #[arg(long)]
    posts_url: Option<String>,
    #[arg(long)]
    remote_mutations: bool,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let args = Args::parse();

    let mut settings = load_settings()?;
    if let Some(url) = args.posts_url {
        settings.posts_url = normalize_posts_url(&url)?;
    }
    if args.remote_mutations {
        settings.mutation_mode = MutationMode::Remote;
    }

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(1024);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Posts")
            .with_inner_size([720.0, 640.0])
            .with_min_inner_size([420.0, 360.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Posts",
        options,
        Box::new(|_cc| Ok(Box::new(PostsApp::new(cmd_tx, ui_rx)))),
    )
    .map_err(|err| anyhow::anyhow!("failed to run desktop gui: {err}"))
}
