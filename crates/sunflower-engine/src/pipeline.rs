use std::future::Future;

use futures::stream::{self, StreamExt};
use tokio::sync::Mutex;

use crate::status::MirroringStatus;

/// Remote concurrency budget / batch size (`MIRRORING_REMOTE_CONCURRENT_SIZE`).
pub const REMOTE_CONCURRENT_SIZE: usize = 50;
/// Local concurrency budget / batch size (`MIRRORING_LOCAL_CONCURRENT_SIZE`).
pub const LOCAL_CONCURRENT_SIZE: usize = 25;

/// Runs `worker` over `ids`, chunked into batches of `concurrency_budget(is_remote)`
/// length, with at most that many batches in flight at once. Updates
/// `status` before, during, and after the run; resets it once every batch
/// has completed.
///
/// Each "concurrent job" is a single batch invocation processed
/// sequentially inside `worker` — the source does not parallelise within
/// a batch, and this is reproduced as-is (see the engine's open question
/// about batch size equalling concurrency).
pub async fn process_in_jobs<F, Fut>(
    status: &Mutex<MirroringStatus>,
    ids: &[u64],
    remote_size: usize,
    local_size: usize,
    is_remote: bool,
    worker: F,
) -> anyhow::Result<()>
where
    F: Fn(Vec<u64>) -> Fut,
    Fut: Future<Output = anyhow::Result<()>>,
{
    let size = if is_remote { remote_size } else { local_size };
    let batches = crate::batch::split(ids, size.max(1));

    {
        let mut status = status.lock().await;
        status.total_items = ids.len();
        status.batch_total = batches.len();
        status.batch_completed = 0;
        status.items_processed = 0;
    }

    let concurrency = size.max(1);
    let mut results = stream::iter(batches.into_iter().map(|batch| {
        let worker = &worker;
        async move {
            let len = batch.len();
            worker(batch).await.map(|()| len)
        }
    }))
    .buffer_unordered(concurrency);

    while let Some(outcome) = results.next().await {
        let len = outcome?;
        let mut status = status.lock().await;
        status.batch_completed += 1;
        status.items_processed += len;
    }

    status.lock().await.reset();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn remote_budget_processes_everything_in_one_batch() {
        let status = Mutex::new(MirroringStatus::default());
        let ids: Vec<u64> = (1..=5).collect();
        let calls: Arc<Mutex<Vec<Vec<u64>>>> = Arc::new(Mutex::new(Vec::new()));
        let calls_clone = calls.clone();

        process_in_jobs(&status, &ids, 50, 25, true, move |batch| {
            let calls = calls_clone.clone();
            async move {
                calls.lock().await.push(batch);
                Ok(())
            }
        })
        .await
        .unwrap();

        assert_eq!(status.lock().await.items_processed, 0); // reset after run
        let calls = calls.lock().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], ids);
    }

    #[tokio::test]
    async fn local_budget_splits_fifty_items_into_two_batches() {
        let status = Mutex::new(MirroringStatus::default());
        let ids: Vec<u64> = (1..=50).collect();
        let completed = Arc::new(AtomicUsize::new(0));
        let completed_clone = completed.clone();

        process_in_jobs(&status, &ids, 50, 25, false, move |batch| {
            let completed = completed_clone.clone();
            async move {
                completed.fetch_add(batch.len(), Ordering::SeqCst);
                Ok(())
            }
        })
        .await
        .unwrap();

        assert_eq!(completed.load(Ordering::SeqCst), 50);
    }

    #[tokio::test]
    async fn empty_ids_runs_zero_batches() {
        let status = Mutex::new(MirroringStatus::default());
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();

        process_in_jobs(&status, &[], 50, 25, true, move |_batch| {
            let calls = calls_clone.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        })
        .await
        .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(status.lock().await.items_processed, 0);
    }

    #[tokio::test]
    async fn worker_error_propagates() {
        let status = Mutex::new(MirroringStatus::default());
        let ids: Vec<u64> = vec![1];
        let result = process_in_jobs(&status, &ids, 50, 25, true, |_batch| async {
            anyhow::bail!("boom")
        })
        .await;
        assert!(result.is_err());
    }
}
