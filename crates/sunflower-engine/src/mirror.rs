use sunflower_domain::Info;
use sunflower_repo::RelationalGalleryinfoRepository;
use tracing::info;

use crate::engine::MirroringEngine;
use crate::pipeline::process_in_jobs;

impl MirroringEngine {
    /// One mirror iteration (§4.7):
    ///
    /// 1. remote → relational: fetch and store galleryinfos missing locally.
    /// 2. relational → document: derive and store infos missing locally.
    /// 3. integrity check over the ids from step 2 (not step 1 — see the
    ///    engine's documented open question about this scoping).
    pub async fn perform_mirroring(&self) -> anyhow::Result<()> {
        let remote_diff = self.remote_differences().await?;
        if !remote_diff.is_empty() {
            self.status.lock().await.is_mirroring_galleryinfo = true;
            let result = process_in_jobs(
                &self.status,
                &remote_diff,
                self.remote_concurrent_size,
                self.local_concurrent_size,
                true,
                |batch| async move {
                    self.fetch_and_store_galleryinfo(&batch, self.relational.as_ref())
                        .await
                },
            )
            .await;
            self.status.lock().await.is_mirroring_galleryinfo = false;
            result?;
        }

        let local_diff = self.local_differences().await?;
        if !local_diff.is_empty() {
            self.status.lock().await.is_converting_to_info = true;
            let result = process_in_jobs(
                &self.status,
                &local_diff,
                self.remote_concurrent_size,
                self.local_concurrent_size,
                false,
                |batch| async move { self.fetch_and_store_info(&batch).await },
            )
            .await;
            self.status.lock().await.is_converting_to_info = false;
            result?;
            self.status.lock().await.last_mirrored_at = crate::clock::now();
        }

        self.status.lock().await.is_checking_integrity = true;
        let result = process_in_jobs(
            &self.status,
            &local_diff,
            self.remote_concurrent_size,
            self.local_concurrent_size,
            false,
            |batch| async move { self.integrity_check(&batch).await },
        )
        .await;
        self.status.lock().await.is_checking_integrity = false;
        result?;

        Ok(())
    }

    /// For each id in `batch`, re-fetches (identity-preserving) and stores
    /// the galleryinfo on `target`.
    pub async fn fetch_and_store_galleryinfo(
        &self,
        batch: &[u64],
        target: &dyn RelationalGalleryinfoRepository,
    ) -> anyhow::Result<()> {
        for &id in batch {
            let g = self.preprocess(id).await?;
            target.add(g).await?;
        }
        info!(count = batch.len(), "stored galleryinfo batch");
        Ok(())
    }

    /// For each id in `batch`, reads the galleryinfo back from the
    /// relational store, derives an `Info`, and stores it in the document
    /// store.
    pub async fn fetch_and_store_info(&self, batch: &[u64]) -> anyhow::Result<()> {
        for &id in batch {
            let g = self.relational.get(id).await?;
            let info = Info::from_galleryinfo(&g);
            self.document.add(info).await?;
        }
        Ok(())
    }
}
