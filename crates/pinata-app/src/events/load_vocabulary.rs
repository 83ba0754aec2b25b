use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use kanal::AsyncSender;
use pinata_config::Config;
use pinata_core::types::AppEvent;
use pinata_fetcher::{
    DailyQuota, FetchOutcome, FetchRequest, OpenAiFetcher, QuotaGate, VocabularyFetcher,
    fetch_vocabulary,
};

use crate::state::AppState;

/// Where the screen's one vocabulary load comes from
pub enum VocabularySource {
    /// Ask the model, subject to the daily quota
    Remote {
        fetcher: Arc<dyn VocabularyFetcher>,
        quota: Arc<dyn QuotaGate>,
        request: FetchRequest,
    },
    /// A saved model reply; the quota is not touched
    Cached(PathBuf),
    /// Fetching switched off, or no API key to fetch with
    Disabled,
}

impl VocabularySource {
    /// A saved reply wins; otherwise the remote fetcher, if it is enabled and
    /// has a key. Without a key no quota is spent on a request that cannot
    /// succeed.
    pub fn from_config(config: &Config, response: Option<PathBuf>, image_bytes: &[u8]) -> Self {
        if let Some(path) = response {
            return VocabularySource::Cached(path);
        }

        let fetcher_config = &config.fetcher;
        if !fetcher_config.enabled {
            tracing::warn!("Fetcher disabled in config");
            return VocabularySource::Disabled;
        }
        if fetcher_config.api_key.is_empty() {
            tracing::warn!("No API key configured, set OPENAI_API_KEY or fetcher.api_key");
            return VocabularySource::Disabled;
        }

        let fetcher = OpenAiFetcher::new(
            fetcher_config.api_key.clone(),
            fetcher_config.api_url.clone(),
            fetcher_config.model.clone(),
        )
        .with_sampling(fetcher_config.max_tokens, fetcher_config.temperature);

        VocabularySource::Remote {
            fetcher: Arc::new(fetcher),
            quota: Arc::new(DailyQuota::new(config.quota.daily_limit)),
            request: FetchRequest::from_image_bytes(image_bytes, config.language),
        }
    }
}

/// Load vocabulary once and hand the outcome to the screen loop
pub async fn load_vocabulary(
    state: Arc<AppState>,
    source: VocabularySource,
    events_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let outcome = match source {
        VocabularySource::Remote {
            fetcher,
            quota,
            request,
        } => {
            let timeout = {
                let config = state.config.read().await;
                Duration::from_secs(config.fetcher.timeout_seconds)
            };
            fetch_vocabulary(fetcher.as_ref(), quota.as_ref(), &request, timeout).await
        }
        VocabularySource::Cached(path) => match tokio::fs::read_to_string(&path).await {
            Ok(raw) => {
                tracing::info!("[LOAD] Parsing saved reply {}", path.display());
                FetchOutcome::Loaded(pinata_core::parse(&raw))
            }
            Err(e) => {
                tracing::warn!("[LOAD] Failed to read {}: {e}", path.display());
                FetchOutcome::Loaded(Vec::new())
            }
        },
        VocabularySource::Disabled => {
            tracing::warn!("[LOAD] Nothing to load from");
            FetchOutcome::Loaded(Vec::new())
        }
    };

    events_tx.send(AppEvent::Screen(outcome.into_event())).await?;
    Ok(())
}
