use std::time::Duration;

use async_trait::async_trait;
use kanal::AsyncSender;
use pinata_core::ScreenState;
use pinata_core::types::{Scene, ScreenEvent, UiUpdate};

use crate::events::apply_and_render;
use crate::state::AppState;

/// Turns the composed view into shareable bytes
#[async_trait]
pub trait ViewCapture: Send + Sync {
    async fn capture(&self, scene: &Scene) -> anyhow::Result<Vec<u8>>;
}

/// Pretty JSON of the scene, branding flag included
pub struct SnapshotCapture;

#[async_trait]
impl ViewCapture for SnapshotCapture {
    async fn capture(&self, scene: &Scene) -> anyhow::Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(scene)?)
    }
}

/// Show branding, let the frame settle, capture, hide branding again.
///
/// Branding is hidden whether or not the capture succeeds.
pub async fn capture_and_share(
    state: &AppState,
    screen: &mut ScreenState,
    capture: &dyn ViewCapture,
    ui_tx: &AsyncSender<UiUpdate>,
) -> anyhow::Result<()> {
    let (settle, message) = {
        let config = state.config.read().await;
        (
            Duration::from_millis(config.ui.capture_settle_ms),
            config.ui.share_message.clone(),
        )
    };

    apply_and_render(screen, ui_tx, ScreenEvent::CaptureStarted).await?;
    tokio::time::sleep(settle).await;

    let result = capture.capture(&screen.scene()).await;

    apply_and_render(screen, ui_tx, ScreenEvent::CaptureFinished).await?;

    match result {
        Ok(bytes) => {
            tracing::info!("[CAPTURE] Captured {} bytes", bytes.len());
            ui_tx.send(UiUpdate::Exported { bytes, message }).await?;
        }
        Err(e) => {
            tracing::error!("[CAPTURE] Failed: {e}");
            ui_tx.send(UiUpdate::ExportFailed(e.to_string())).await?;
        }
    }

    Ok(())
}
