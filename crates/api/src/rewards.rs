//! Reward redemption against the external provider, with linear-backoff
//! retry.
//!
//! [`RewardClient`] POSTs a JSON redemption order to the configured provider
//! URL. Failed attempts are retried up to the configured maximum; attempt
//! `n` waits `base_delay * n` before retrying. The last failure is surfaced
//! to the caller once attempts are exhausted.

use std::time::Duration;

use canvass_core::types::DbId;
use serde::{Deserialize, Serialize};

use crate::config::RewardProviderConfig;

/// HTTP request timeout for a single redemption attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for redemption failures.
#[derive(Debug, thiserror::Error)]
pub enum RewardError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("Reward provider returned HTTP {0}")]
    HttpStatus(u16),
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Redemption order sent to the provider.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedemptionOrder {
    pub campaign_id: DbId,
    pub contributor_id: DbId,
    pub amount: f64,
    pub currency: String,
}

/// Receipt returned by the provider on success.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedemptionReceipt {
    /// Provider-side transaction reference.
    pub reference: String,
    pub status: String,
}

// ---------------------------------------------------------------------------
// RewardClient
// ---------------------------------------------------------------------------

/// Client for the external reward-redemption provider.
pub struct RewardClient {
    client: reqwest::Client,
    endpoint: String,
    max_attempts: u32,
    base_delay: Duration,
}

impl RewardClient {
    /// Create a new client with a pre-configured HTTP client.
    pub fn new(config: &RewardProviderConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            endpoint: config.endpoint.clone(),
            max_attempts: config.max_attempts.max(1),
            base_delay: Duration::from_millis(config.retry_delay_ms),
        }
    }

    /// Send a redemption order with retry.
    ///
    /// Returns the provider receipt on the first successful attempt. After
    /// the final attempt fails, the last error is returned.
    pub async fn redeem(&self, order: &RedemptionOrder) -> Result<RedemptionReceipt, RewardError> {
        let mut last_error = None;

        for attempt in 1..=self.max_attempts {
            match self.try_redeem(order).await {
                Ok(receipt) => {
                    tracing::info!(
                        campaign_id = order.campaign_id,
                        contributor_id = order.contributor_id,
                        attempt,
                        reference = %receipt.reference,
                        "Reward redemption succeeded",
                    );
                    return Ok(receipt);
                }
                Err(err) => {
                    tracing::warn!(
                        campaign_id = order.campaign_id,
                        contributor_id = order.contributor_id,
                        attempt,
                        error = %err,
                        "Reward redemption attempt failed",
                    );
                    last_error = Some(err);
                    if attempt < self.max_attempts {
                        tokio::time::sleep(self.base_delay * attempt).await;
                    }
                }
            }
        }

        // max_attempts >= 1, so at least one attempt ran and set last_error.
        Err(last_error.unwrap_or(RewardError::HttpStatus(0)))
    }

    /// A single redemption attempt.
    async fn try_redeem(&self, order: &RedemptionOrder) -> Result<RedemptionReceipt, RewardError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(order)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RewardError::HttpStatus(response.status().as_u16()));
        }

        Ok(response.json::<RedemptionReceipt>().await?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
