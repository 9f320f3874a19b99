use sunflower_domain::{GalleryinfoDiff, Info};
use tracing::warn;

use crate::engine::MirroringEngine;
use crate::pipeline::process_in_jobs;

impl MirroringEngine {
    /// Per-id comparison of upstream record against local record (§4.8).
    ///
    /// - Upstream "not found": add id to the skip-list, log, continue. No
    ///   local data is touched.
    /// - Diff empty: no action.
    /// - Diff non-empty: delete-relational → delete-document →
    ///   create-relational → create-document, in that fixed order.
    pub async fn integrity_check(&self, ids: &[u64]) -> anyhow::Result<()> {
        for &id in ids {
            let remote = match self.preprocess(id).await {
                Ok(g) => g,
                Err(err) if Self::is_not_found(&err) => {
                    self.skip_ids.lock().await.insert(id);
                    warn!(id, "galleryinfo not found upstream; added to skip-list");
                    continue;
                }
                Err(err) => return Err(err),
            };

            let local = self.relational.get(id).await?;
            let diff = GalleryinfoDiff::compute(&remote, &local);
            if diff.is_empty() {
                continue;
            }

            warn!(id, %diff, "integrity check failed; repairing");
            self.relational.delete(id).await?;
            self.document.delete(id).await?;
            self.relational.add(remote.clone()).await?;
            self.document.add(Info::from_galleryinfo(&remote)).await?;
        }
        Ok(())
    }

    /// Runs `integrity_check` over `ids` through the batched pipeline
    /// (local concurrency budget), with `is_checking_integrity` set for the
    /// duration.
    pub async fn perform_integrity_check(&self, ids: &[u64]) -> anyhow::Result<()> {
        self.status.lock().await.is_checking_integrity = true;
        let result = process_in_jobs(
            &self.status,
            ids,
            self.remote_concurrent_size,
            self.local_concurrent_size,
            false,
            |batch| async move { self.integrity_check(&batch).await },
        )
        .await;
        self.status.lock().await.is_checking_integrity = false;
        result
    }

    /// Collects all document-store ids, subtracts the skip-list, and runs
    /// the integrity pass over the remainder.
    ///
    /// On any unhandled error, the skip-list is emptied before the error
    /// escapes (§7): it is advisory and must not outlive a failure whose
    /// root cause is unknown.
    pub async fn perform_partial_integrity_check(&self) -> anyhow::Result<()> {
        let all_ids = self.document.all_ids().await?;
        let skip = self.skip_ids.lock().await.clone();
        let ids: Vec<u64> = all_ids.into_iter().filter(|id| !skip.contains(id)).collect();

        if let Err(err) = self.perform_integrity_check(&ids).await {
            self.skip_ids.lock().await.clear();
            return Err(err);
        }
        Ok(())
    }

    /// Same as [`Self::perform_partial_integrity_check`] but named "full":
    /// it still subtracts the skip-list from its scope, reproducing the
    /// source's behavior as-is (documented open question: this makes
    /// "full" a misnomer).
    pub async fn perform_full_integrity_check(&self) -> anyhow::Result<()> {
        let all_ids = self.document.all_ids().await?;
        let skip = self.skip_ids.lock().await.clone();
        let ids: Vec<u64> = all_ids.into_iter().filter(|id| !skip.contains(id)).collect();
        self.perform_integrity_check(&ids).await
    }
}
