use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Languages the vocabulary can be extracted in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetLanguage {
    #[default]
    Spanish,
    French,
    Italian,
    Japanese,
    Korean,
    Chinese,
    Hindi,
}

impl TargetLanguage {
    pub const ALL: [TargetLanguage; 7] = [
        TargetLanguage::Spanish,
        TargetLanguage::French,
        TargetLanguage::Italian,
        TargetLanguage::Japanese,
        TargetLanguage::Korean,
        TargetLanguage::Chinese,
        TargetLanguage::Hindi,
    ];

    /// English name, lowercase
    pub fn name(self) -> &'static str {
        match self {
            TargetLanguage::Spanish => "spanish",
            TargetLanguage::French => "french",
            TargetLanguage::Italian => "italian",
            TargetLanguage::Japanese => "japanese",
            TargetLanguage::Korean => "korean",
            TargetLanguage::Chinese => "chinese",
            TargetLanguage::Hindi => "hindi",
        }
    }

    /// ISO 639-1 code
    pub fn code(self) -> &'static str {
        match self {
            TargetLanguage::Spanish => "es",
            TargetLanguage::French => "fr",
            TargetLanguage::Italian => "it",
            TargetLanguage::Japanese => "ja",
            TargetLanguage::Korean => "ko",
            TargetLanguage::Chinese => "zh",
            TargetLanguage::Hindi => "hi",
        }
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown target language: {0}")]
pub struct UnknownLanguage(pub String);

impl FromStr for TargetLanguage {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        TargetLanguage::ALL
            .into_iter()
            .find(|lang| lang.name() == wanted || lang.code() == wanted)
            .ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}
