use std::sync::Arc;

use clap::Parser;
use pinata_config::Config;
use pinata_core::ScreenState;
use pinata_core::state::Phase;
use pinata_core::types::{AppEvent, Scene, ScreenEvent, UiUpdate};
use tracing_subscriber::EnvFilter;

pub mod cli;
pub mod controller;
pub mod events;
pub mod image_probe;
pub mod profile;
pub mod render;
pub mod state;


use self::cli::Cli;
use self::controller::AppController;
use self::events::capture_view::SnapshotCapture;
use self::events::load_vocabulary::VocabularySource;
use self::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = profile::init_user_config() {
        tracing::warn!("Could not initialize user config: {e}");
    }
    let mut config = profile::load_user_profile(&cli.profile).unwrap_or_else(|e| {
        tracing::warn!("Failed to load profile {}: {e:#}, using defaults", cli.profile);
        Config::new()
    });
    if let Some(language) = cli.language {
        config.language = language;
    }

    let (image_bytes, image_size) = image_probe::probe_image(&cli.image).await?;
    let display_size = image_size.scaled_to_width(config.ui.display_width);

    let source = VocabularySource::from_config(&config, cli.response.clone(), &image_bytes);

    let screen = ScreenState::new(config.language, config.layout.placement, config.layout.drag);
    let state = Arc::new(AppState::new(config));
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks(screen, source, Arc::new(SnapshotCapture));

    let events_tx = controller.event_sender();
    events_tx
        .send(AppEvent::Screen(ScreenEvent::ImageMeasured(display_size)))
        .await?;

    let updates = controller.update_receiver();
    let mut last_scene: Option<Box<Scene>> = None;
    let mut capture_requested = false;

    while let Ok(update) = updates.recv().await {
        match update {
            UiUpdate::Effect(effect) => render::print_effect(effect),
            UiUpdate::Rendered(scene) => {
                let settled = scene.phase != Phase::Loading && scene.image.is_some();
                let idle = !scene.branding_visible;
                last_scene = Some(scene);

                if settled && idle && !capture_requested {
                    if cli.export.is_some() {
                        capture_requested = true;
                        events_tx.send(AppEvent::Capture).await?;
                    } else {
                        events_tx.send(AppEvent::Close).await?;
                        break;
                    }
                }
            }
            UiUpdate::Exported { bytes, message } => {
                if let Some(path) = &cli.export {
                    tokio::fs::write(path, &bytes).await?;
                    println!("{message} ({})", path.display());
                }
                events_tx.send(AppEvent::Close).await?;
                break;
            }
            UiUpdate::ExportFailed(e) => {
                tracing::error!("Export failed: {e}");
                events_tx.send(AppEvent::Close).await?;
                break;
            }
        }
    }

    if let Some(scene) = last_scene {
        print!("{}", render::render_scene(&scene));
    }

    controller.shutdown();
    while let Some(result) = tasks.join_next().await {
        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!("Task failed: {e}"),
            Err(e) => tracing::error!("Task panicked: {e}"),
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if std::env::var("PINATA_LOG_FORMAT").is_ok_and(|format| format == "json") {
        builder.json().init();
    } else {
        builder.with_ansi(console::colors_enabled_stderr()).init();
    }
}
