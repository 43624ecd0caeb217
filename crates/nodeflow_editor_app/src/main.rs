// SPDX-License-Identifier: MIT OR Apache-2.0
//! `Nodeflow` Editor - visual programming with node graphs
//!
//! Place nodes from the toolbar, drag them around the canvas, link outputs
//! to inputs, then compile the graph into a program and run it.
//!
//! ## Architecture
//!
//! The graph model, compiler, interpreter and canvas live in
//! `nodeflow_editor_graph`. This crate owns the window, the GPU surface and
//! the panels around the canvas.

mod app;
mod config;
mod panels;

use app::EditorApp;
use config::EditorConfig;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn main() {
    // Config is read before logging exists, so report failures afterwards
    let (config, config_error) = match EditorConfig::load() {
        Ok(config) => (config, None),
        Err(err) => (EditorConfig::default(), Some(err)),
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Nodeflow Editor v{}", env!("CARGO_PKG_VERSION"));

    if let Some(err) = config_error {
        tracing::warn!("Using default configuration: {err}");
    }

    if let Err(e) = EditorApp::run(config) {
        tracing::error!("Editor crashed: {e}");
        std::process::exit(1);
    }
}
