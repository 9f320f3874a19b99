use std::collections::HashSet;
use std::sync::Arc;

use sunflower_domain::DomainError;
use sunflower_repo::{DocumentInfoRepository, RelationalGalleryinfoRepository, RemoteIndexRepository};
use tokio::sync::Mutex;

use crate::pipeline::{LOCAL_CONCURRENT_SIZE, REMOTE_CONCURRENT_SIZE};
use crate::status::MirroringStatus;

/// The Mirroring Engine: the three cooperating periodic tasks, the
/// difference computation, the batched concurrent fetch/store pipeline,
/// and the integrity-check state machine, all sharing one Status Record
/// and skip-list.
///
/// Constructed once per process with three repository handles and a
/// `run_as_once` flag (§3 "Lifecycle"). All mutation of the Status Record
/// and skip-list goes through a single coarse lock per field group,
/// matching the source's single-threaded-cooperative assumption (§5,
/// §9 design notes: "do not spread fine-grained locking over individual
/// fields").
pub struct MirroringEngine {
    pub(crate) remote: Arc<dyn RemoteIndexRepository>,
    pub(crate) relational: Arc<dyn RelationalGalleryinfoRepository>,
    pub(crate) document: Arc<dyn DocumentInfoRepository>,

    pub(crate) status: Mutex<MirroringStatus>,
    pub(crate) skip_ids: Mutex<HashSet<u64>>,

    pub(crate) remote_concurrent_size: usize,
    pub(crate) local_concurrent_size: usize,
    pub(crate) integrity_partial_check_range_size: usize,

    pub(crate) run_as_once: bool,
}

impl MirroringEngine {
    pub fn new(
        remote: Arc<dyn RemoteIndexRepository>,
        relational: Arc<dyn RelationalGalleryinfoRepository>,
        document: Arc<dyn DocumentInfoRepository>,
        run_as_once: bool,
    ) -> Self {
        let index_files = remote.index_files().to_vec();
        Self {
            remote,
            relational,
            document,
            status: Mutex::new(MirroringStatus::default_with_index_files(index_files)),
            skip_ids: Mutex::new(HashSet::new()),
            remote_concurrent_size: REMOTE_CONCURRENT_SIZE,
            local_concurrent_size: LOCAL_CONCURRENT_SIZE,
            integrity_partial_check_range_size: 100,
            run_as_once,
        }
    }

    /// Builder-style override for the remote/local concurrency budgets and
    /// the partial-check range size (`MIRRORING_REMOTE_CONCURRENT_SIZE`,
    /// `MIRRORING_LOCAL_CONCURRENT_SIZE`, `INTEGRITY_PARTIAL_CHECK_RANGE_SIZE`).
    pub fn with_concurrency(
        mut self,
        remote_concurrent_size: usize,
        local_concurrent_size: usize,
        integrity_partial_check_range_size: usize,
    ) -> Self {
        self.remote_concurrent_size = remote_concurrent_size;
        self.local_concurrent_size = local_concurrent_size;
        self.integrity_partial_check_range_size = integrity_partial_check_range_size;
        self
    }

    /// A snapshot of the current Status Record, for the HTTP status
    /// endpoint.
    pub async fn status_snapshot(&self) -> MirroringStatus {
        self.status.lock().await.clone()
    }

    pub(crate) async fn remote_differences(&self) -> anyhow::Result<Vec<u64>> {
        crate::differences::differences(
            async { self.remote.all_ids().await },
            async { self.relational.all_ids().await },
        )
        .await
    }

    pub(crate) async fn local_differences(&self) -> anyhow::Result<Vec<u64>> {
        crate::differences::differences(
            async { self.relational.all_ids().await },
            async { self.document.all_ids().await },
        )
        .await
    }

    pub(crate) async fn preprocess(&self, id: u64) -> anyhow::Result<sunflower_domain::Galleryinfo> {
        let remote = self.remote.clone();
        crate::preprocess::preprocess(|id| async move { remote.get(id).await }, id).await
    }

    pub(crate) fn is_not_found(err: &anyhow::Error) -> bool {
        matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::GalleryinfoNotFound(_))
        )
    }
}
