use async_trait::async_trait;
use sunflower_domain::{Galleryinfo, Info};

/// The upstream gallery index. `get` may fail with
/// `DomainError::GalleryinfoNotFound`.
#[async_trait]
pub trait RemoteIndexRepository: Send + Sync {
    async fn get(&self, id: u64) -> anyhow::Result<Galleryinfo>;
    async fn all_ids(&self) -> anyhow::Result<Vec<u64>>;

    /// Remote index file names this repository reads from, snapshotted
    /// into the Status Record.
    fn index_files(&self) -> &[String];
}

/// The relational store of full `Galleryinfo` records.
#[async_trait]
pub trait RelationalGalleryinfoRepository: Send + Sync {
    async fn get(&self, id: u64) -> anyhow::Result<Galleryinfo>;
    async fn add(&self, galleryinfo: Galleryinfo) -> anyhow::Result<()>;
    async fn delete(&self, id: u64) -> anyhow::Result<()>;
    async fn all_ids(&self) -> anyhow::Result<Vec<u64>>;
}

/// The document store of derived `Info` records.
#[async_trait]
pub trait DocumentInfoRepository: Send + Sync {
    async fn add(&self, info: Info) -> anyhow::Result<()>;
    async fn delete(&self, id: u64) -> anyhow::Result<()>;
    async fn all_ids(&self) -> anyhow::Result<Vec<u64>>;
}
