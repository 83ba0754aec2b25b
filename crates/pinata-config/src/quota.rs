use serde::{Deserialize, Serialize};

fn default_daily_limit() -> u32 {
    5
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct QuotaConfig {
    /// Fetches allowed per UTC day
    #[serde(default = "default_daily_limit")]
    pub daily_limit: u32,
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            daily_limit: default_daily_limit(),
        }
    }
}
