//! Draggable markers over the image.
//!
//! The board is the single source of truth for marker positions once seeded.
//! `z_order` lists marker indices back to front and is always a permutation of
//! `0..len`.

use serde::Serialize;

use crate::layout::{MarkerBounds, place};
use crate::types::{ImageSize, Position, VocabularyRecord};

/// One marker, bound to a record by index
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub record_index: usize,
    pub position: Position,
}

/// Observed state of a single marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkerState {
    #[default]
    Idle,
    Selected,
    Dragging,
}

#[derive(Debug, Clone, Default)]
pub struct MarkerBoard {
    markers: Vec<Marker>,
    z_order: Vec<usize>,
    selected: Option<usize>,
    dragging: Option<usize>,
    edit_mode: bool,
    image: ImageSize,
    drag_bounds: MarkerBounds,
}

impl MarkerBoard {
    pub fn new(drag_bounds: MarkerBounds) -> Self {
        Self {
            drag_bounds,
            ..Default::default()
        }
    }

    /// Build one marker per placeable record, replacing whatever was there.
    ///
    /// Records without a location (or without word/gloss) get no marker.
    pub fn seed(&mut self, records: &[VocabularyRecord], image: ImageSize, placement: MarkerBounds) {
        self.markers = records
            .iter()
            .enumerate()
            .filter_map(|(record_index, record)| {
                let location = record.location.filter(|_| record.is_renderable())?;
                Some(Marker {
                    record_index,
                    position: place(location, image, placement),
                })
            })
            .collect();
        self.z_order = (0..self.markers.len()).collect();
        self.selected = None;
        self.dragging = None;
        self.image = image;

        tracing::debug!(
            "Seeded {} markers from {} records",
            self.markers.len(),
            records.len()
        );
    }

    /// New drag area. Existing positions are kept as they are.
    pub fn set_image(&mut self, image: ImageSize) {
        self.image = image;
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Marker> {
        self.markers.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter()
    }

    /// Marker bound to `record_index`, if the record has one
    pub fn marker_for_record(&self, record_index: usize) -> Option<usize> {
        self.markers
            .iter()
            .position(|m| m.record_index == record_index)
    }

    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// Returns whether the flag changed. Leaving edit mode ends any drag.
    pub fn set_edit_mode(&mut self, on: bool) -> bool {
        if self.edit_mode == on {
            return false;
        }
        self.edit_mode = on;
        if !on {
            self.dragging = None;
        }
        true
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn dragging(&self) -> Option<usize> {
        self.dragging
    }

    /// # Panics
    /// If `index` is out of range.
    pub fn state(&self, index: usize) -> MarkerState {
        self.check_index(index);
        if self.dragging == Some(index) {
            MarkerState::Dragging
        } else if self.selected == Some(index) {
            MarkerState::Selected
        } else {
            MarkerState::Idle
        }
    }

    /// Back to front
    pub fn z_order(&self) -> &[usize] {
        &self.z_order
    }

    /// Render rank of a marker, 0 is the bottom
    ///
    /// # Panics
    /// If `index` is out of range.
    pub fn z_rank(&self, index: usize) -> usize {
        self.check_index(index);
        self.z_order
            .iter()
            .position(|&i| i == index)
            .unwrap_or_default()
    }

    /// Tap: deselect if already selected, otherwise select it alone.
    /// Either way the marker is raised to the top.
    ///
    /// # Panics
    /// If `index` is out of range.
    pub fn select_or_toggle(&mut self, index: usize) {
        self.check_index(index);
        self.selected = if self.selected == Some(index) {
            None
        } else {
            Some(index)
        };
        self.bring_to_front(index);
    }

    /// # Panics
    /// If `index` is out of range.
    pub fn bring_to_front(&mut self, index: usize) {
        self.check_index(index);
        self.z_order.retain(|&i| i != index);
        self.z_order.push(index);
    }

    /// Start dragging. Ignored outside edit mode.
    ///
    /// # Panics
    /// If `index` is out of range.
    pub fn begin_drag(&mut self, index: usize) -> bool {
        self.check_index(index);
        if !self.edit_mode {
            tracing::debug!("Ignoring drag on marker {index}, edit mode is off");
            return false;
        }
        self.dragging = Some(index);
        self.bring_to_front(index);
        true
    }

    /// Move by `(dx, dy)` from the last committed position and commit the
    /// clamped result. Ignored outside edit mode.
    ///
    /// # Panics
    /// If `index` is out of range.
    pub fn update_drag(&mut self, index: usize, dx: f32, dy: f32) -> Option<Position> {
        self.check_index(index);
        if !self.edit_mode {
            return None;
        }
        self.dragging = Some(index);

        let marker = &mut self.markers[index];
        let candidate = Position {
            left: marker.position.left + dx,
            top: marker.position.top + dy,
        };
        marker.position = self.drag_bounds.clamp(candidate, self.image);
        Some(marker.position)
    }

    /// # Panics
    /// If `index` is out of range.
    pub fn end_drag(&mut self, index: usize) {
        self.check_index(index);
        if self.dragging == Some(index) {
            self.dragging = None;
        }
    }

    /// Same as [`end_drag`](Self::end_drag): moves already committed stay.
    ///
    /// # Panics
    /// If `index` is out of range.
    pub fn cancel_drag(&mut self, index: usize) {
        self.end_drag(index);
    }

    /// Remove a marker. The caller removes the backing record at the returned
    /// marker's `record_index`; later record indices are already shifted here.
    ///
    /// # Panics
    /// If `index` is out of range.
    pub fn delete_marker(&mut self, index: usize) -> Marker {
        self.check_index(index);
        let marker = self.remove_at(index);
        self.shift_records_after(marker.record_index);
        marker
    }

    /// Keep markers in step with a record removed from the list
    pub fn remove_record(&mut self, record_index: usize) -> Option<Marker> {
        let removed = self
            .marker_for_record(record_index)
            .map(|index| self.remove_at(index));
        self.shift_records_after(record_index);
        removed
    }

    fn remove_at(&mut self, index: usize) -> Marker {
        let marker = self.markers.remove(index);

        self.z_order.retain(|&i| i != index);
        for i in &mut self.z_order {
            if *i > index {
                *i -= 1;
            }
        }

        self.selected = reindex(self.selected, index);
        self.dragging = reindex(self.dragging, index);
        marker
    }

    fn shift_records_after(&mut self, record_index: usize) {
        for marker in &mut self.markers {
            if marker.record_index > record_index {
                marker.record_index -= 1;
            }
        }
    }

    fn check_index(&self, index: usize) {
        assert!(
            index < self.markers.len(),
            "marker index {index} out of range ({} markers)",
            self.markers.len()
        );
    }
}

fn reindex(slot: Option<usize>, removed: usize) -> Option<usize> {
    match slot {
        Some(i) if i == removed => None,
        Some(i) if i > removed => Some(i - 1),
        other => other,
    }
}
