use std::time::Duration;

use tracing::info;

use crate::engine::MirroringEngine;

impl MirroringEngine {
    /// Periodic mirror driver. Skips its body while an integrity check is
    /// in flight (mutual exclusion via the Status Record flags, §4.9).
    /// With `run_as_once`, performs exactly one iteration and returns.
    pub async fn start_mirroring(&self, delay: Duration) {
        info!(?delay, "starting mirroring task");
        loop {
            let gated = self.status.lock().await.is_checking_integrity;
            if !gated {
                self.status.lock().await.last_checked_at = crate::clock::now();
                if let Err(err) = self.perform_mirroring().await {
                    tracing::error!(error = %err, "mirror iteration failed");
                }
            }
            if self.run_as_once {
                return;
            }
            tokio::time::sleep(delay).await;
        }
    }

    /// Periodic partial integrity driver. Skips its body while mirroring
    /// is in flight.
    pub async fn start_partial_integrity_check(&self, delay: Duration) {
        info!(?delay, "starting partial integrity check task");
        loop {
            let gated = {
                let status = self.status.lock().await;
                status.is_mirroring_galleryinfo || status.is_converting_to_info
            };
            if !gated {
                if let Err(err) = self.perform_partial_integrity_check().await {
                    tracing::error!(error = %err, "partial integrity check failed");
                }
            }
            if self.run_as_once {
                return;
            }
            tokio::time::sleep(delay).await;
        }
    }

    /// Periodic full integrity driver. Same gating as the partial driver.
    pub async fn start_full_integrity_check(&self, delay: Duration) {
        info!(?delay, "starting full integrity check task");
        loop {
            let gated = {
                let status = self.status.lock().await;
                status.is_mirroring_galleryinfo || status.is_converting_to_info
            };
            if !gated {
                if let Err(err) = self.perform_full_integrity_check().await {
                    tracing::error!(error = %err, "full integrity check failed");
                }
            }
            if self.run_as_once {
                return;
            }
            tokio::time::sleep(delay).await;
        }
    }
}
