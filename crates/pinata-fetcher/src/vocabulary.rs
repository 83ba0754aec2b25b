use std::time::Duration;

use pinata_core::types::{ScreenEvent, VocabularyRecord};

use crate::quota::QuotaGate;
use crate::{FetchRequest, VocabularyFetcher};

/// Result of the one fetch a screen makes
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Possibly empty: failures and timeouts land here too
    Loaded(Vec<VocabularyRecord>),
    /// Quota exhausted; the network was not contacted
    LimitReached,
}

impl FetchOutcome {
    pub fn into_event(self) -> ScreenEvent {
        match self {
            FetchOutcome::Loaded(records) => ScreenEvent::VocabularyLoaded(records),
            FetchOutcome::LimitReached => ScreenEvent::LimitReached,
        }
    }
}

/// Check the quota, fetch with a deadline and parse.
///
/// Never fails. Transport errors, API errors and the deadline all give an
/// empty `Loaded`; an unreachable quota backend counts as exhausted.
pub async fn fetch_vocabulary(
    fetcher: &dyn VocabularyFetcher,
    quota: &dyn QuotaGate,
    request: &FetchRequest,
    timeout: Duration,
) -> FetchOutcome {
    match quota.remaining_attempts().await {
        Ok(0) => {
            tracing::info!("Daily limit reached, not fetching");
            return FetchOutcome::LimitReached;
        }
        Ok(remaining) => tracing::debug!("{remaining} fetches left today"),
        Err(e) => {
            tracing::warn!("Quota check failed, treating as exhausted: {e}");
            return FetchOutcome::LimitReached;
        }
    }

    if let Err(e) = quota.record_attempt().await {
        tracing::warn!("Failed to record fetch attempt: {e}");
    }

    let provider = fetcher.metadata();
    tracing::info!(
        "Fetching {} vocabulary from {} ({})",
        request.language,
        provider.name,
        provider.model
    );

    let raw = match tokio::time::timeout(timeout, fetcher.fetch(request)).await {
        Ok(Ok(raw)) => raw,
        Ok(Err(e)) => {
            tracing::warn!("Vocabulary fetch failed: {e}");
            return FetchOutcome::Loaded(Vec::new());
        }
        Err(_) => {
            tracing::warn!("Vocabulary fetch timed out after {:?}", timeout);
            return FetchOutcome::Loaded(Vec::new());
        }
    };

    tracing::debug!("Model replied with {} chars", raw.len());
    FetchOutcome::Loaded(pinata_core::parse(&raw))
}
