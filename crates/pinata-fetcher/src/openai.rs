use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{Value, json};

use crate::prompt::{prompt_for, system_prompt};
use crate::{FetchError, FetchRequest, ProviderMetadata, VocabularyFetcher};

/// Chat-completions client sending the image inline as a data URL
#[derive(Clone)]
pub struct OpenAiFetcher {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl OpenAiFetcher {
    pub fn new(api_key: String, api_url: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_url,
            model,
            max_tokens: 1000,
            temperature: 0.5,
        }
    }

    #[must_use]
    pub fn with_sampling(mut self, max_tokens: u32, temperature: f32) -> Self {
        self.max_tokens = max_tokens;
        self.temperature = temperature;
        self
    }

    fn request_body(&self, request: &FetchRequest) -> Value {
        json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "temperature": self.temperature,
            "messages": [
                {
                    "role": "system",
                    "content": system_prompt(request.language),
                },
                {
                    "role": "user",
                    "content": [
                        { "type": "text", "text": prompt_for(request.language) },
                        {
                            "type": "image_url",
                            "image_url": {
                                "url": format!("data:image/jpeg;base64,{}", request.image_base64),
                            },
                        },
                    ],
                },
            ],
        })
    }
}

#[async_trait]
impl VocabularyFetcher for OpenAiFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<String, FetchError> {
        if self.api_key.is_empty() {
            return Err(FetchError::AuthenticationError);
        }

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(request))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::RateLimitExceeded);
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(FetchError::AuthenticationError);
        }

        if !status.is_success() {
            return Err(FetchError::Api(format!("HTTP {status}")));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| FetchError::Api(format!("Failed to parse response: {e}")))?;

        message_content(&json)
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "OpenAI".to_string(),
            model: self.model.clone(),
            requires_api_key: true,
        }
    }
}

fn message_content(json: &Value) -> Result<String, FetchError> {
    json["choices"]
        .get(0)
        .and_then(|choice| choice["message"]["content"].as_str())
        .map(str::to_string)
        .ok_or(FetchError::EmptyResponse)
}
