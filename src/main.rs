mod actions;
mod app_context;
mod chart;
mod commands;
mod config;
mod cues;
mod feed;
mod format;
mod jobs;
mod model;
mod series;
mod view;

use tokio::signal;
use tracing_subscriber::EnvFilter;

use crate::actions::ApiClient;
use crate::app_context::AppContext;
use crate::commands::{InputEnd, run_command_loop};
use crate::config::{Config, config_path_from_env, load_config};
use crate::cues::AlertCues;
use crate::jobs::start_background_jobs;
use crate::view::Region;

fn init_json_logging() {
    if let Err(error) = tracing_log::LogTracer::init() {
        eprintln!(
            "logging bridge initialization failed (continuing with existing logger): {}",
            error
        );
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .json()
        .with_current_span(false)
        .with_span_list(false)
        .finish();

    if let Err(error) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("global logger initialization failed: {}", error);
    }
}

async fn wait_for_shutdown_signal() {
    if let Err(error) = signal::ctrl_c().await {
        log::error!("shutdown signal listener failed: {}", error);
    }
}

// Main
#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_json_logging();

    let config_path = config_path_from_env();
    let config: Config = match load_config(&config_path) {
        Ok(config) => config,
        Err(error) => {
            log::error!("Configuration error: {}", error);
            return;
        }
    };

    let api = match ApiClient::from_config(&config.server) {
        Ok(api) => api,
        Err(error) => {
            log::error!("API client initialization failed: {}", error);
            return;
        }
    };

    log::info!(
        "Nexdash client is starting... server={} config={}",
        config.server.base_url,
        config_path
    );

    let cues = AlertCues::terminal(config.alerts.notification_permission);
    let app_context = AppContext::new(config, config_path, api, cues);

    let permission = app_context.cues.request_permission_once().await;
    log::info!("notification_permission state={:?}", permission);

    {
        let mut view = app_context.view.lock().await;
        if view.is_mounted(Region::Navbar) {
            let pinned = view.navbar.apply();
            log::info!("navbar_layout_applied pinned_properties={}", pinned);
        }
    }

    start_background_jobs(app_context.clone());

    let input_end = tokio::select! {
        result = run_command_loop(app_context) => result,
        _ = wait_for_shutdown_signal() => {
            log::info!("Shutting down gracefully");
            return;
        }
    };

    match input_end {
        Ok(InputEnd::Quit) => log::info!("Shutting down on quit command"),
        Ok(InputEnd::Closed) => {
            log::info!("command input closed, running until interrupted");
            wait_for_shutdown_signal().await;
            log::info!("Shutting down gracefully");
        }
        Err(error) => {
            log::error!("command loop failed: {}, running until interrupted", error);
            wait_for_shutdown_signal().await;
            log::info!("Shutting down gracefully");
        }
    }
}
