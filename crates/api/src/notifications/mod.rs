//! Fire-and-forget outbound webhooks.
//!
//! Deliveries run on detached tasks and are never awaited by request
//! handlers: a dead webhook endpoint must not fail or slow down an
//! enrollment or a payment submission. Failures are logged and dropped.

use reviewdrop_core::stock::{self, ProductStock};
use reviewdrop_db::models::campaign::Campaign;
use reviewdrop_db::models::enrollment::Enrollment;
use serde_json::json;

/// Dispatches JSON webhook notifications to the configured endpoint.
pub struct Notifier {
    client: reqwest::Client,
    webhook_url: Option<String>,
}

impl Notifier {
    /// Create a notifier. With `webhook_url` unset every dispatch is a
    /// silent no-op, which is the local-development default.
    pub fn new(webhook_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            webhook_url,
        }
    }

    /// Alert on every product of `campaign` whose available-text count
    /// has dropped below the low-stock threshold.
    pub fn spawn_low_stock(&self, campaign: &Campaign, counts: &[ProductStock]) {
        for low in stock::low_stock(counts) {
            self.spawn_post(json!({
                "type": "low_stock",
                "campaign_id": campaign.id,
                "campaign_name": campaign.name,
                "product_id": low.product_id,
                "available": low.available,
            }));
        }
    }

    /// Announce a completed payment submission.
    pub fn spawn_submission(&self, enrollment: &Enrollment, campaign_name: &str) {
        self.spawn_post(json!({
            "type": "submission",
            "enrollment_id": enrollment.id,
            "email": enrollment.email,
            "campaign_name": campaign_name,
        }));
    }

    /// POST `payload` on a detached task. Never blocks the caller.
    fn spawn_post(&self, payload: serde_json::Value) {
        let Some(url) = self.webhook_url.clone() else {
            tracing::debug!("no webhook URL configured, dropping notification");
            return;
        };
        let client = self.client.clone();
        tokio::spawn(async move {
            let result = client
                .post(&url)
                .json(&payload)
                .send()
                .await
                .and_then(|resp| resp.error_for_status());
            if let Err(err) = result {
                tracing::warn!(error = %err, "webhook delivery failed");
            }
        });
    }
}
