use serde::{Deserialize, Serialize};

use crate::types::{ImageSize, Location, Position};

/// Half-extent a marker keeps away from every image edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerBounds {
    pub half_width: f32,
    pub half_height: f32,
}

impl MarkerBounds {
    /// Bounds for a marker of the given full size
    pub fn from_size(width: f32, height: f32) -> Self {
        Self {
            half_width: width / 2.0,
            half_height: height / 2.0,
        }
    }

    /// Pull `candidate` back inside the image so the whole marker stays visible.
    ///
    /// On an image smaller than the marker the far edge wins.
    pub fn clamp(&self, candidate: Position, image: ImageSize) -> Position {
        Position {
            left: candidate
                .left
                .max(self.half_width)
                .min(image.width - self.half_width),
            top: candidate
                .top
                .max(self.half_height)
                .min(image.height - self.half_height),
        }
    }
}

impl Default for MarkerBounds {
    /// 100x60 marker
    fn default() -> Self {
        Self {
            half_width: 50.0,
            half_height: 30.0,
        }
    }
}

/// Absolute pixel position for a percentage location
pub fn place(location: Location, image: ImageSize, bounds: MarkerBounds) -> Position {
    let raw = Position {
        left: location.x * image.width / 100.0,
        top: location.y * image.height / 100.0,
    };
    bounds.clamp(raw, image)
}
