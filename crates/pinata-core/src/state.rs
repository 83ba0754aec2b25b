use serde::Serialize;
use uuid::Uuid;

use crate::highlight::highlight;
use crate::language::TargetLanguage;
use crate::layout::MarkerBounds;
use crate::markers::MarkerBoard;
use crate::types::{
    ImageSize, ListEntry, MarkerView, Notice, Scene, ScreenEffect, ScreenEvent, VocabularyRecord,
};

/// Where the screen is in its one-shot load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Phase {
    #[default]
    Loading,
    Ready,
    NoWords,
    LimitReached,
}

/// Everything one result screen owns: the records, their markers and the UI
/// flags. Mutated only through [`ScreenState::apply`].
#[derive(Debug, Clone)]
pub struct ScreenState {
    session_id: Uuid,
    language: TargetLanguage,
    records: Vec<VocabularyRecord>,
    board: MarkerBoard,
    image: Option<ImageSize>,
    placement: MarkerBounds,
    seeded: bool,
    phase: Phase,
    capturing: bool,
}

impl ScreenState {
    pub fn new(language: TargetLanguage, placement: MarkerBounds, drag: MarkerBounds) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            language,
            records: Vec::new(),
            board: MarkerBoard::new(drag),
            image: None,
            placement,
            seeded: false,
            phase: Phase::Loading,
            capturing: false,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn language(&self) -> TargetLanguage {
        self.language
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn records(&self) -> &[VocabularyRecord] {
        &self.records
    }

    pub fn board(&self) -> &MarkerBoard {
        &self.board
    }

    pub fn image(&self) -> Option<ImageSize> {
        self.image
    }

    pub fn is_capturing(&self) -> bool {
        self.capturing
    }

    /// Page scroll is off while editing or dragging
    pub fn scroll_enabled(&self) -> bool {
        !self.board.edit_mode() && self.board.dragging().is_none()
    }

    /// Apply one event and return what the enclosing surface must do.
    ///
    /// # Panics
    /// On out-of-range marker or record indices.
    pub fn apply(&mut self, event: ScreenEvent) -> Vec<ScreenEffect> {
        match event {
            ScreenEvent::VocabularyLoaded(records) => return self.load(records),
            ScreenEvent::LimitReached => {
                self.phase = Phase::LimitReached;
                return vec![ScreenEffect::ShowMessage(Notice::LimitReached)];
            }
            ScreenEvent::ImageMeasured(size) => {
                if !size.is_known() {
                    tracing::debug!("Image size not known yet, deferring layout");
                    return Vec::new();
                }
                self.image = Some(size);
                self.board.set_image(size);
                self.try_seed();
            }
            ScreenEvent::TapMarker(index) => self.board.select_or_toggle(index),
            ScreenEvent::BeginDrag(index) => {
                self.board.begin_drag(index);
            }
            ScreenEvent::DragBy { index, dx, dy } => {
                self.board.update_drag(index, dx, dy);
            }
            ScreenEvent::EndDrag(index) => self.board.end_drag(index),
            ScreenEvent::CancelDrag(index) => self.board.cancel_drag(index),
            ScreenEvent::DeleteMarker(index) => {
                let marker = self.board.delete_marker(index);
                self.records.remove(marker.record_index);
            }
            ScreenEvent::DeleteRecord(record_index) => {
                assert!(
                    record_index < self.records.len(),
                    "record index {record_index} out of range ({} records)",
                    self.records.len()
                );
                self.records.remove(record_index);
                self.board.remove_record(record_index);
            }
            ScreenEvent::SetEditMode(on) => {
                if self.board.set_edit_mode(on) {
                    tracing::debug!("Edit mode {}", if on { "on" } else { "off" });
                    return if on {
                        vec![ScreenEffect::ScrollToTop, ScreenEffect::SetScrollEnabled(false)]
                    } else {
                        vec![ScreenEffect::SetScrollEnabled(true)]
                    };
                }
            }
            ScreenEvent::CaptureStarted => self.capturing = true,
            ScreenEvent::CaptureFinished => self.capturing = false,
        }

        Vec::new()
    }

    fn load(&mut self, records: Vec<VocabularyRecord>) -> Vec<ScreenEffect> {
        if self.phase != Phase::Loading {
            tracing::warn!(
                "Ignoring vocabulary for session {} in phase {:?}",
                self.session_id,
                self.phase
            );
            return Vec::new();
        }

        if !records.iter().any(VocabularyRecord::is_renderable) {
            tracing::info!("No renderable records among {} loaded", records.len());
            self.phase = Phase::NoWords;
            return vec![ScreenEffect::ShowMessage(Notice::NoWordsFound)];
        }

        tracing::info!("Loaded {} vocabulary records", records.len());
        self.records = records;
        self.phase = Phase::Ready;
        self.try_seed();
        Vec::new()
    }

    /// Markers are derived once, when both records and image size are in
    fn try_seed(&mut self) {
        if self.seeded || self.records.is_empty() {
            return;
        }
        let Some(image) = self.image else {
            return;
        };

        self.board.seed(&self.records, image, self.placement);
        self.seeded = true;
        tracing::info!(
            "Placed {} markers on {}x{} image",
            self.board.len(),
            image.width,
            image.height
        );
    }

    /// Marker snapshots, back to front
    pub fn markers(&self) -> Vec<MarkerView> {
        self.board
            .z_order()
            .iter()
            .enumerate()
            .filter_map(|(z_rank, &index)| {
                let marker = self.board.get(index)?;
                let record = self.records.get(marker.record_index)?;
                Some(MarkerView {
                    record_index: marker.record_index,
                    word: record.word.clone(),
                    english: record.english.clone(),
                    position: marker.position,
                    z_rank,
                    selected: self.board.selected() == Some(index),
                    dragging: self.board.dragging() == Some(index),
                })
            })
            .collect()
    }

    /// The vocabulary list under the image
    pub fn list_entries(&self) -> Vec<ListEntry> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, record)| record.is_renderable())
            .map(|(record_index, record)| ListEntry {
                record_index,
                word: record.word.clone(),
                english: record.english.clone(),
                word_type: record.word_type.clone(),
                pronunciation: record.pronunciation.clone(),
                forms: record.word_forms.join(" / "),
                sentence: highlight(&record.sentence, &record.highlight_targets()),
                translation: highlight(&record.translation, &[record.english.as_str()]),
                has_marker: self.board.marker_for_record(record_index).is_some(),
            })
            .collect()
    }

    pub fn scene(&self) -> Scene {
        Scene {
            phase: self.phase,
            image: self.image,
            edit_mode: self.board.edit_mode(),
            scroll_enabled: self.scroll_enabled(),
            branding_visible: self.capturing,
            markers: self.markers(),
            entries: self.list_entries(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::types::{Location, Position};

    const RESPONSE: &str = r#"
        <vocabulary>
          {"type": "description", "wordType": "noun", "word": "perro", "english": "dog", "wordConjugation": "[perros]", "sentence": "Los perros y el perro", "translation": "The dogs and the dog", "location": ["12%", "15%"]}
          {"type": "description", "wordType": "noun", "word": "césped", "english": "grass", "sentence": "El césped es verde", "translation": "The grass is green"}
          {"type": "atmosphere", "wordType": "adjective", "word": "soleado", "english": "sunny", "conjugations": ["soleada"], "sentence": "El día está soleado", "translation": "The day is sunny", "location": ["50%", "50%"]}
        </vocabulary>
    "#;

    fn screen() -> ScreenState {
        ScreenState::new(
            TargetLanguage::Spanish,
            MarkerBounds::default(),
            MarkerBounds::default(),
        )
    }

    fn loaded() -> ScreenState {
        let mut screen = screen();
        screen.apply(ScreenEvent::VocabularyLoaded(parse(RESPONSE)));
        screen.apply(ScreenEvent::ImageMeasured(ImageSize::new(300.0, 200.0)));
        screen
    }

    #[test]
    fn test_markers_wait_for_image_size() {
        let mut screen = screen();
        screen.apply(ScreenEvent::VocabularyLoaded(parse(RESPONSE)));
        assert_eq!(screen.phase(), Phase::Ready);
        assert!(screen.board().is_empty());

        screen.apply(ScreenEvent::ImageMeasured(ImageSize::new(0.0, 0.0)));
        assert!(screen.board().is_empty());

        screen.apply(ScreenEvent::ImageMeasured(ImageSize::new(300.0, 200.0)));
        assert_eq!(screen.board().len(), 2);
    }

    #[test]
    fn test_markers_seed_when_image_arrives_first() {
        let mut screen = screen();
        screen.apply(ScreenEvent::ImageMeasured(ImageSize::new(300.0, 200.0)));
        assert!(screen.board().is_empty());
        screen.apply(ScreenEvent::VocabularyLoaded(parse(RESPONSE)));
        assert_eq!(screen.board().len(), 2);
    }

    #[test]
    fn test_reference_placement() {
        let screen = loaded();
        let views = screen.markers();
        assert_eq!(views[0].word, "perro");
        assert_eq!(views[0].position, Position { left: 50.0, top: 30.0 });
        assert_eq!(views[1].position, Position { left: 150.0, top: 100.0 });
    }

    #[test]
    fn test_remeasure_does_not_reset_rearrangement() {
        let mut screen = loaded();
        screen.apply(ScreenEvent::SetEditMode(true));
        screen.apply(ScreenEvent::BeginDrag(1));
        screen.apply(ScreenEvent::DragBy { index: 1, dx: 20.0, dy: 0.0 });
        screen.apply(ScreenEvent::EndDrag(1));

        screen.apply(ScreenEvent::ImageMeasured(ImageSize::new(300.0, 200.0)));
        assert_eq!(
            screen.board().get(1).map(|m| m.position),
            Some(Position { left: 170.0, top: 100.0 })
        );
    }

    #[test]
    fn test_second_load_is_ignored() {
        let mut screen = loaded();
        let effects = screen.apply(ScreenEvent::VocabularyLoaded(Vec::new()));
        assert!(effects.is_empty());
        assert_eq!(screen.records().len(), 3);
    }

    #[test]
    fn test_empty_load_shows_notice() {
        let mut screen = screen();
        let effects = screen.apply(ScreenEvent::VocabularyLoaded(Vec::new()));
        assert_eq!(effects, vec![ScreenEffect::ShowMessage(Notice::NoWordsFound)]);
        assert_eq!(screen.phase(), Phase::NoWords);
    }

    #[test]
    fn test_limit_reached() {
        let mut screen = screen();
        let effects = screen.apply(ScreenEvent::LimitReached);
        assert_eq!(effects, vec![ScreenEffect::ShowMessage(Notice::LimitReached)]);
        assert_eq!(screen.phase(), Phase::LimitReached);
    }

    #[test]
    fn test_edit_mode_effects() {
        let mut screen = loaded();
        assert!(screen.scroll_enabled());

        let effects = screen.apply(ScreenEvent::SetEditMode(true));
        assert_eq!(
            effects,
            vec![ScreenEffect::ScrollToTop, ScreenEffect::SetScrollEnabled(false)]
        );
        assert!(!screen.scroll_enabled());
        assert!(screen.apply(ScreenEvent::SetEditMode(true)).is_empty());

        let effects = screen.apply(ScreenEvent::SetEditMode(false));
        assert_eq!(effects, vec![ScreenEffect::SetScrollEnabled(true)]);
        assert!(screen.scroll_enabled());
    }

    #[test]
    fn test_tap_raises_marker() {
        let mut screen = loaded();
        screen.apply(ScreenEvent::TapMarker(0));
        let views = screen.markers();
        assert_eq!(views.last().map(|v| v.word.as_str()), Some("perro"));
        assert!(views.last().is_some_and(|v| v.selected && v.z_rank == 1));
    }

    #[test]
    fn test_delete_marker_removes_record() {
        let mut screen = loaded();
        screen.apply(ScreenEvent::DeleteMarker(0));
        let words: Vec<&str> = screen.records().iter().map(|r| r.word.as_str()).collect();
        assert_eq!(words, vec!["césped", "soleado"]);
        assert_eq!(screen.board().get(0).map(|m| m.record_index), Some(1));
        assert_eq!(screen.markers()[0].word, "soleado");
    }

    #[test]
    fn test_delete_record_removes_marker() {
        let mut screen = loaded();
        screen.apply(ScreenEvent::DeleteRecord(2));
        assert_eq!(screen.records().len(), 2);
        assert_eq!(screen.board().len(), 1);

        // list-only record
        screen.apply(ScreenEvent::DeleteRecord(1));
        assert_eq!(screen.board().len(), 1);
        assert_eq!(screen.markers()[0].word, "perro");
    }

    #[test]
    fn test_list_entries() {
        let screen = loaded();
        let entries = screen.list_entries();
        assert_eq!(entries.len(), 3);

        let perro = &entries[0];
        assert_eq!(perro.forms, "perros");
        assert!(perro.has_marker);
        let bold: Vec<&str> = perro
            .sentence
            .iter()
            .filter(|s| s.emphasized)
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(bold, vec!["perros", "perro"]);
        assert!(perro.translation.iter().any(|s| s.emphasized && s.text == "dog"));

        assert!(!entries[1].has_marker);
    }

    #[test]
    fn test_unrenderable_records_are_hidden_from_list() {
        let mut screen = screen();
        screen.apply(ScreenEvent::VocabularyLoaded(vec![
            VocabularyRecord {
                word: "perro".to_string(),
                location: Some(Location { x: 10.0, y: 10.0 }),
                ..Default::default()
            },
            VocabularyRecord {
                word: "gato".to_string(),
                english: "cat".to_string(),
                location: Some(Location { x: 50.0, y: 50.0 }),
                ..Default::default()
            },
        ]));
        screen.apply(ScreenEvent::ImageMeasured(ImageSize::new(300.0, 200.0)));

        let entries = screen.list_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].record_index, 1);
        assert_eq!(screen.board().len(), 1);
    }

    #[test]
    fn test_only_unrenderable_records_is_no_words() {
        let mut screen = screen();
        let effects = screen.apply(ScreenEvent::VocabularyLoaded(vec![VocabularyRecord {
            word: "perro".to_string(),
            location: Some(Location { x: 10.0, y: 10.0 }),
            ..Default::default()
        }]));
        assert_eq!(effects, vec![ScreenEffect::ShowMessage(Notice::NoWordsFound)]);
        assert_eq!(screen.phase(), Phase::NoWords);

        screen.apply(ScreenEvent::ImageMeasured(ImageSize::new(300.0, 200.0)));
        assert!(screen.board().is_empty());
    }

    #[test]
    fn test_capture_toggles_branding() {
        let mut screen = loaded();
        screen.apply(ScreenEvent::CaptureStarted);
        assert!(screen.scene().branding_visible);
        screen.apply(ScreenEvent::CaptureFinished);
        assert!(!screen.scene().branding_visible);
    }
}
