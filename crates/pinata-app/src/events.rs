use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use pinata_core::ScreenState;
use pinata_core::types::{AppEvent, ScreenEvent, UiUpdate};
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

pub mod capture_view;
pub mod load_vocabulary;

use capture_view::{ViewCapture, capture_and_share};

/// Whether the screen loop keeps running after an event
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Close,
}

/// Screen loop. Owns the screen state; every mutation goes through here.
pub async fn screen_loop(
    state: Arc<AppState>,
    mut screen: ScreenState,
    events_rx: AsyncReceiver<AppEvent>,
    ui_tx: AsyncSender<UiUpdate>,
    capture: Arc<dyn ViewCapture>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    tracing::info!(
        "[SCREEN] Session {} started ({})",
        screen.session_id(),
        screen.language()
    );
    ui_tx
        .send(UiUpdate::Rendered(Box::new(screen.scene())))
        .await?;

    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("[SCREEN] Cancelled");
                break;
            }
            event = events_rx.recv() => match event {
                Ok(event) => event,
                Err(_) => {
                    tracing::info!("[SCREEN] Event channel closed");
                    break;
                }
            },
        };

        tracing::trace!("[SCREEN] {:?}", std::mem::discriminant(&event));
        if handle_event(&state, &mut screen, capture.as_ref(), &ui_tx, event).await? == Flow::Close {
            break;
        }
    }

    tracing::info!("[SCREEN] Session {} closed", screen.session_id());
    Ok(())
}

async fn handle_event(
    state: &AppState,
    screen: &mut ScreenState,
    capture: &dyn ViewCapture,
    ui_tx: &AsyncSender<UiUpdate>,
    event: AppEvent,
) -> anyhow::Result<Flow> {
    match event {
        AppEvent::Screen(event) => apply_and_render(screen, ui_tx, event).await?,
        AppEvent::Capture => capture_and_share(state, screen, capture, ui_tx).await?,
        AppEvent::Close => return Ok(Flow::Close),
    }

    Ok(Flow::Continue)
}

/// Apply one event, forward its effects, then publish the new frame
pub(crate) async fn apply_and_render(
    screen: &mut ScreenState,
    ui_tx: &AsyncSender<UiUpdate>,
    event: ScreenEvent,
) -> anyhow::Result<()> {
    for effect in screen.apply(event) {
        ui_tx.send(UiUpdate::Effect(effect)).await?;
    }

    ui_tx
        .send(UiUpdate::Rendered(Box::new(screen.scene())))
        .await?;
    Ok(())
}
