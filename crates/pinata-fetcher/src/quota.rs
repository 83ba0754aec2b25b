use std::sync::Mutex;

use chrono::{NaiveDate, Utc};

/// Daily usage limit checked before every fetch
#[async_trait::async_trait]
pub trait QuotaGate: Send + Sync {
    /// Fetches left today
    async fn remaining_attempts(&self) -> Result<u32, QuotaError>;

    /// Count one fetch against today's limit
    async fn record_attempt(&self) -> Result<(), QuotaError>;
}

#[derive(Debug, thiserror::Error)]
pub enum QuotaError {
    #[error("Quota backend unavailable: {0}")]
    Unavailable(String),
}

/// In-memory quota that resets at UTC midnight.
///
/// The count lives as long as the process does; every `pinata` run starts
/// from a full allowance.
pub struct DailyQuota {
    limit: u32,
    usage: Mutex<DailyUsage>,
}

struct DailyUsage {
    day: NaiveDate,
    used: u32,
}

impl DailyQuota {
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            usage: Mutex::new(DailyUsage {
                day: today(),
                used: 0,
            }),
        }
    }

    fn remaining_on(&self, day: NaiveDate) -> Result<u32, QuotaError> {
        let mut usage = self.lock()?;
        usage.roll_to(day);
        Ok(self.limit.saturating_sub(usage.used))
    }

    fn record_on(&self, day: NaiveDate) -> Result<(), QuotaError> {
        let mut usage = self.lock()?;
        usage.roll_to(day);
        usage.used = usage.used.saturating_add(1);
        tracing::debug!("Quota used {}/{} on {}", usage.used, self.limit, usage.day);
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, DailyUsage>, QuotaError> {
        self.usage
            .lock()
            .map_err(|e| QuotaError::Unavailable(e.to_string()))
    }
}

impl DailyUsage {
    fn roll_to(&mut self, day: NaiveDate) {
        if self.day != day {
            self.day = day;
            self.used = 0;
        }
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[async_trait::async_trait]
impl QuotaGate for DailyQuota {
    async fn remaining_attempts(&self) -> Result<u32, QuotaError> {
        self.remaining_on(today())
    }

    async fn record_attempt(&self) -> Result<(), QuotaError> {
        self.record_on(today())
    }
}
