use pinata_core::MarkerBounds;
use serde::{Deserialize, Serialize};

/// Marker clamp bounds. Initial placement and dragging are configured
/// separately but default to the same 100x60 marker.
#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct LayoutConfig {
    pub placement: MarkerBounds,
    pub drag: MarkerBounds,
}
