use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use pinata_core::ScreenState;
use pinata_core::types::{AppEvent, UiUpdate};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::capture_view::ViewCapture;
use crate::events::load_vocabulary::{VocabularySource, load_vocabulary};
use crate::events::screen_loop;
use crate::state::AppState;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<UiUpdate>, AsyncReceiver<UiUpdate>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            app_to_ui: kanal::bounded_async(256), // a frame per drag move
            ui_to_app: kanal::bounded_async(64),  // gestures
        }
    }
}

/// Owns one result screen's tasks for their lifetime
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Where the presentation layer sends gestures
    pub fn event_sender(&self) -> AsyncSender<AppEvent> {
        self.channels.ui_to_app.0.clone()
    }

    /// Where the presentation layer reads frames and effects
    pub fn update_receiver(&self) -> AsyncReceiver<UiUpdate> {
        self.channels.app_to_ui.1.clone()
    }

    pub fn spawn_tasks(
        &self,
        screen: ScreenState,
        source: VocabularySource,
        capture: Arc<dyn ViewCapture>,
    ) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Screen loop, the only writer of the screen state
        tasks.spawn(screen_loop(
            self.state.clone(),
            screen,
            self.channels.ui_to_app.1.clone(),
            self.channels.app_to_ui.0.clone(),
            capture,
            self.cancel_token.child_token(),
        ));

        // One-shot vocabulary load
        tasks.spawn(load_vocabulary(
            self.state.clone(),
            source,
            self.channels.ui_to_app.0.clone(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
