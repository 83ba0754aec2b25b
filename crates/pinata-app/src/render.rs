use std::fmt::Write;

use console::style;
use pinata_core::types::{ListEntry, MarkerView, Scene, ScreenEffect, Segment};

/// Join segments. Emphasized runs are bold on a colour terminal and
/// wrapped in asterisks otherwise.
pub fn render_segments(segments: &[Segment]) -> String {
    let color = console::colors_enabled();
    segments.iter().fold(String::new(), |mut out, segment| {
        match (segment.emphasized, color) {
            (true, true) => {
                let _ = write!(out, "{}", style(&segment.text).bold());
            }
            (true, false) => {
                let _ = write!(out, "*{}*", segment.text);
            }
            (false, _) => out.push_str(&segment.text),
        }
        out
    })
}

fn render_entry(entry: &ListEntry) -> String {
    let mut out = format!("{} ({})", style(&entry.word).bold(), entry.english);
    if !entry.word_type.is_empty() {
        let _ = write!(out, " [{}]", entry.word_type);
    }
    if let Some(pronunciation) = &entry.pronunciation {
        let _ = write!(out, " /{pronunciation}/");
    }
    if !entry.forms.is_empty() {
        let _ = write!(out, "\n    forms: {}", entry.forms);
    }
    if !entry.sentence.is_empty() {
        let _ = write!(out, "\n    {}", render_segments(&entry.sentence));
    }
    if !entry.translation.is_empty() {
        let _ = write!(out, "\n    {}", render_segments(&entry.translation));
    }
    out
}

fn render_marker(marker: &MarkerView) -> String {
    format!(
        "{:>7.1} {:>7.1}  z{}  {} / {}",
        marker.position.left, marker.position.top, marker.z_rank, marker.word, marker.english
    )
}

/// Plain-text view of a scene: vocabulary list, then marker positions
pub fn render_scene(scene: &Scene) -> String {
    let mut out = String::new();

    for entry in &scene.entries {
        let _ = writeln!(out, "{}", render_entry(entry));
    }

    if let Some(image) = scene.image {
        let _ = writeln!(
            out,
            "\n{}",
            style(format!("Markers on {:.0}x{:.0} view:", image.width, image.height)).underlined()
        );
    }
    for marker in &scene.markers {
        let _ = writeln!(out, "{}", render_marker(marker));
    }

    out
}

pub fn print_effect(effect: ScreenEffect) {
    match effect {
        ScreenEffect::ShowMessage(notice) => println!("{}", notice.message()),
        other => tracing::debug!("Effect {other:?}"),
    }
}
