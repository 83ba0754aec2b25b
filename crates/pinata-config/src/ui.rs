use serde::{Deserialize, Serialize};

fn default_display_width() -> f32 {
    390.0
}

fn default_capture_settle_ms() -> u64 {
    100
}

fn default_share_message() -> String {
    "Check out my vocabulary from Pinata!".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    /// Width the image is scaled to, in logical pixels
    #[serde(default = "default_display_width")]
    pub display_width: f32,
    /// Time given to the branding overlay to render before capture
    #[serde(default = "default_capture_settle_ms")]
    pub capture_settle_ms: u64,
    #[serde(default = "default_share_message")]
    pub share_message: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            display_width: default_display_width(),
            capture_settle_ms: default_capture_settle_ms(),
            share_message: default_share_message(),
        }
    }
}
