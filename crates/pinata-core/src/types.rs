use serde::{Deserialize, Serialize};

use crate::state::Phase;

/// Semantic role of an extracted word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Something visible in the image
    #[default]
    Description,
    /// Mood or atmosphere of the scene
    Atmosphere,
}

/// Anchor point in percent of image width/height
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub x: f32,
    pub y: f32,
}

/// One vocabulary item extracted from the model response
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyRecord {
    pub category: Category,
    pub word_type: String,
    pub word: String,
    pub english: String,
    pub pronunciation: Option<String>,
    pub word_forms: Vec<String>,
    pub sentence: String,
    pub translation: String,
    pub location: Option<Location>,
}

impl VocabularyRecord {
    /// Word and gloss are both present
    pub fn is_renderable(&self) -> bool {
        !self.word.is_empty() && !self.english.is_empty()
    }

    /// Needs a marker over the image
    pub fn is_placeable(&self) -> bool {
        self.is_renderable() && self.location.is_some()
    }

    /// The word followed by its alternate forms
    pub fn highlight_targets(&self) -> Vec<&str> {
        std::iter::once(self.word.as_str())
            .chain(self.word_forms.iter().map(String::as_str))
            .collect()
    }
}

/// Absolute on-image pixel position of a marker's center
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub left: f32,
    pub top: f32,
}

/// Displayed image dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: f32,
    pub height: f32,
}

impl ImageSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Both dimensions loaded and non-zero
    pub fn is_known(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Keep the aspect ratio, fit to `display_width`
    pub fn scaled_to_width(&self, display_width: f32) -> Self {
        if !self.is_known() {
            return *self;
        }

        Self {
            width: display_width,
            height: self.height / self.width * display_width,
        }
    }
}

/// A run of text, emphasized or not
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    pub emphasized: bool,
}

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasized: false,
        }
    }

    pub fn emphasized(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasized: true,
        }
    }
}

/// Render snapshot of one marker
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerView {
    pub record_index: usize,
    pub word: String,
    pub english: String,
    pub position: Position,
    pub z_rank: usize,
    pub selected: bool,
    pub dragging: bool,
}

/// One row of the vocabulary list under the image
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListEntry {
    pub record_index: usize,
    pub word: String,
    pub english: String,
    pub word_type: String,
    pub pronunciation: Option<String>,
    pub forms: String,
    pub sentence: Vec<Segment>,
    pub translation: Vec<Segment>,
    pub has_marker: bool,
}

/// Everything the presentation layer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub phase: Phase,
    pub image: Option<ImageSize>,
    pub edit_mode: bool,
    pub scroll_enabled: bool,
    /// Branding overlay, visible only while capturing
    pub branding_visible: bool,
    /// Back to front
    pub markers: Vec<MarkerView>,
    pub entries: Vec<ListEntry>,
}

/// Informational messages, never errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Notice {
    NoWordsFound,
    LimitReached,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Notice::NoWordsFound => "No words found, try again.",
            Notice::LimitReached => "Daily limit reached. Come back tomorrow for more words.",
        }
    }
}

/// Input to the screen state machine
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenEvent {
    VocabularyLoaded(Vec<VocabularyRecord>),
    LimitReached,
    ImageMeasured(ImageSize),
    TapMarker(usize),
    BeginDrag(usize),
    DragBy { index: usize, dx: f32, dy: f32 },
    EndDrag(usize),
    CancelDrag(usize),
    DeleteMarker(usize),
    DeleteRecord(usize),
    SetEditMode(bool),
    CaptureStarted,
    CaptureFinished,
}

/// Requests from the state machine to the enclosing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenEffect {
    ScrollToTop,
    SetScrollEnabled(bool),
    ShowMessage(Notice),
}

/// Messages into the screen loop
#[derive(Debug, Clone)]
pub enum AppEvent {
    Screen(ScreenEvent),
    /// Capture the composed view and hand it to sharing
    Capture,
    Close,
}

/// Messages out of the screen loop
#[derive(Debug, Clone)]
pub enum UiUpdate {
    Effect(ScreenEffect),
    Rendered(Box<Scene>),
    Exported { bytes: Vec<u8>, message: String },
    ExportFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_to_width_keeps_aspect_ratio() {
        let scaled = ImageSize::new(1200.0, 800.0).scaled_to_width(300.0);
        assert_eq!(scaled, ImageSize::new(300.0, 200.0));
    }

    #[test]
    fn test_unknown_size_is_not_scaled() {
        let size = ImageSize::new(0.0, 800.0);
        assert!(!size.is_known());
        assert_eq!(size.scaled_to_width(300.0), size);
    }

    #[test]
    fn test_highlight_targets_start_with_word() {
        let record = VocabularyRecord {
            word: "perro".to_string(),
            word_forms: vec!["perros".to_string()],
            ..Default::default()
        };
        assert_eq!(record.highlight_targets(), vec!["perro", "perros"]);
    }

    #[test]
    fn test_placeable_needs_word_gloss_and_location() {
        let mut record = VocabularyRecord {
            word: "perro".to_string(),
            english: "dog".to_string(),
            ..Default::default()
        };
        assert!(record.is_renderable());
        assert!(!record.is_placeable());

        record.location = Some(Location { x: 10.0, y: 10.0 });
        assert!(record.is_placeable());

        record.english.clear();
        assert!(!record.is_placeable());
    }
}
