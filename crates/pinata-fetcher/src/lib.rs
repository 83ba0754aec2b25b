use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use pinata_core::TargetLanguage;

pub mod openai;
pub mod prompt;
pub mod quota;
mod vocabulary;

pub use openai::OpenAiFetcher;
pub use quota::{DailyQuota, QuotaError, QuotaGate};
pub use vocabulary::{FetchOutcome, fetch_vocabulary};

/// Remote vocabulary provider interface
#[async_trait::async_trait]
pub trait VocabularyFetcher: Send + Sync {
    /// Send the image and return the assistant's raw text
    async fn fetch(&self, request: &FetchRequest) -> Result<String, FetchError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

/// One image to extract vocabulary from
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub image_base64: String,
    pub language: TargetLanguage,
}

impl FetchRequest {
    pub fn from_image_bytes(bytes: &[u8], language: TargetLanguage) -> Self {
        Self {
            image_base64: STANDARD.encode(bytes),
            language,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub model: String,
    pub requires_api_key: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,

    #[error("Response contained no message")]
    EmptyResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_encodes_image() {
        let request = FetchRequest::from_image_bytes(b"hello", TargetLanguage::French);
        assert_eq!(request.image_base64, "aGVsbG8=");
        assert_eq!(request.language, TargetLanguage::French);
    }
}
