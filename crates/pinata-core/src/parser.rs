//! Turns the model's raw reply into vocabulary records.
//!
//! The reply is untrusted: only the first `<vocabulary>...</vocabulary>` block
//! is read, one JSON object per line. Lines that do not decode are skipped so a
//! single bad line never costs the whole batch.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use unicode_normalization::UnicodeNormalization;

use crate::types::{Category, Location, VocabularyRecord};

static VOCABULARY_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<vocabulary>(.*?)</vocabulary>").expect("vocabulary block pattern")
});

/// The model sometimes answers `"12px"` where a bare number was asked for
static PIXEL_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)px").expect("pixel suffix pattern"));

/// Parse every decodable record of the vocabulary block, in input order.
///
/// Never fails: no block, or no decodable line, gives an empty vec.
pub fn parse(raw: &str) -> Vec<VocabularyRecord> {
    let Some(block) = VOCABULARY_BLOCK.captures(raw).and_then(|caps| caps.get(1)) else {
        tracing::debug!("No vocabulary block in response ({} chars)", raw.len());
        return Vec::new();
    };

    let records: Vec<VocabularyRecord> = block
        .as_str()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(parse_line)
        .collect();

    tracing::debug!("Parsed {} vocabulary records", records.len());
    records
}

fn parse_line(line: &str) -> Option<VocabularyRecord> {
    let cleaned = PIXEL_SUFFIX.replace_all(line, "$1");

    let value: Value = match serde_json::from_str(&cleaned) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!("Skipping malformed vocabulary line: {e}");
            return None;
        }
    };

    let Value::Object(fields) = value else {
        tracing::debug!("Skipping vocabulary line that is not an object");
        return None;
    };

    Some(into_record(&fields))
}

/// Build a record from whatever fields the line carries. Keys are tried in
/// order, so `word` wins over the legacy `spanish` when both are present.
/// A record without a usable location stays in the list; it just gets no
/// marker over the image.
fn into_record(fields: &Map<String, Value>) -> VocabularyRecord {
    let category = match text_field(fields, &["type"]) {
        Some(kind) if kind.eq_ignore_ascii_case("atmosphere") => Category::Atmosphere,
        _ => Category::Description,
    };

    VocabularyRecord {
        category,
        word_type: text_field(fields, &["wordType"]).unwrap_or_default(),
        word: text_field(fields, &["word", "spanish"]).unwrap_or_default(),
        english: text_field(fields, &["english"]).unwrap_or_default(),
        pronunciation: text_field(fields, &["pronunciation"]).filter(|p| !p.is_empty()),
        word_forms: ["wordForms", "wordConjugation", "conjugations"]
            .iter()
            .find_map(|key| fields.get(*key).and_then(parse_forms))
            .unwrap_or_default(),
        sentence: text_field(fields, &["sentence"]).unwrap_or_default(),
        translation: text_field(fields, &["translation"]).unwrap_or_default(),
        location: fields.get("location").and_then(parse_location),
    }
}

/// First key holding a scalar. Numbers and booleans are stringified; null,
/// arrays and objects count as missing.
fn text_field(fields: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match fields.get(*key)? {
        Value::String(s) => Some(nfc(s)),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// `"[a, b, c]"` or a native list
fn parse_forms(value: &Value) -> Option<Vec<String>> {
    let forms = match value {
        Value::String(text) => {
            let inner = text.trim();
            let inner = inner.strip_prefix('[').unwrap_or(inner);
            let inner = inner.strip_suffix(']').unwrap_or(inner);
            inner
                .split(',')
                .map(|form| nfc(form.trim().trim_matches(['"', '\''])))
                .filter(|form| !form.is_empty())
                .collect()
        }
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(nfc(s)),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .filter(|form| !form.is_empty())
            .collect(),
        _ => return None,
    };
    Some(forms)
}

fn parse_location(value: &Value) -> Option<Location> {
    let coords: Vec<f32> = match value {
        Value::Array(items) => items.iter().map(parse_percentage).collect::<Option<_>>()?,
        // "[12%, 15%]" or "12%, 15%"
        Value::String(text) => text
            .trim()
            .trim_start_matches('[')
            .trim_end_matches(']')
            .split(',')
            .map(|part| parse_percentage(&Value::String(part.to_string())))
            .collect::<Option<_>>()?,
        _ => return None,
    };

    match coords.as_slice() {
        [x, y] => Some(Location { x: *x, y: *y }),
        _ => None,
    }
}

fn parse_percentage(value: &Value) -> Option<f32> {
    let number = match value {
        Value::String(text) => text
            .trim()
            .trim_end_matches('%')
            .trim()
            .parse::<f32>()
            .ok()?,
        Value::Number(n) => n.as_f64()? as f32,
        _ => return None,
    };

    number.is_finite().then_some(number)
}

fn nfc(text: &str) -> String {
    text.trim().nfc().collect()
}
