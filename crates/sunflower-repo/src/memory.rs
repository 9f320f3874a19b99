use std::collections::HashMap;

use async_trait::async_trait;
use sunflower_domain::{DomainError, Galleryinfo, Info};
use tokio::sync::RwLock;

use crate::traits::{DocumentInfoRepository, RelationalGalleryinfoRepository};

/// In-memory stand-in for the relational galleryinfo store. A single
/// coarse lock over the whole map, matching the engine's own
/// single-owner-over-fine-grained-locks design.
#[derive(Default)]
pub struct InMemoryRelationalRepository {
    rows: RwLock<HashMap<u64, Galleryinfo>>,
}

impl InMemoryRelationalRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RelationalGalleryinfoRepository for InMemoryRelationalRepository {
    async fn get(&self, id: u64) -> anyhow::Result<Galleryinfo> {
        self.rows
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::GalleryinfoNotFound(id).into())
    }

    async fn add(&self, galleryinfo: Galleryinfo) -> anyhow::Result<()> {
        self.rows.write().await.insert(galleryinfo.id, galleryinfo);
        Ok(())
    }

    async fn delete(&self, id: u64) -> anyhow::Result<()> {
        self.rows.write().await.remove(&id);
        Ok(())
    }

    async fn all_ids(&self) -> anyhow::Result<Vec<u64>> {
        Ok(self.rows.read().await.keys().copied().collect())
    }
}

/// In-memory stand-in for the document info store.
#[derive(Default)]
pub struct InMemoryDocumentRepository {
    rows: RwLock<HashMap<u64, Info>>,
}

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentInfoRepository for InMemoryDocumentRepository {
    async fn add(&self, info: Info) -> anyhow::Result<()> {
        self.rows.write().await.insert(info.id, info);
        Ok(())
    }

    async fn delete(&self, id: u64) -> anyhow::Result<()> {
        self.rows.write().await.remove(&id);
        Ok(())
    }

    async fn all_ids(&self) -> anyhow::Result<Vec<u64>> {
        Ok(self.rows.read().await.keys().copied().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn add_then_get_roundtrips() {
        let repo = InMemoryRelationalRepository::new();
        let g = Galleryinfo {
            id: 7,
            title: "t".to_string(),
            gallery_type: "doujinshi".to_string(),
            language: None,
            date: "2024-01-01".to_string(),
            files: vec![],
            tags: vec![],
        };
        repo.add(g.clone()).await.unwrap();
        assert_eq!(repo.get(7).await.unwrap(), g);
        assert_eq!(repo.all_ids().await.unwrap(), vec![7]);
    }

    #[tokio::test]
    async fn missing_id_is_not_found() {
        let repo = InMemoryRelationalRepository::new();
        let err = repo.get(1).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::GalleryinfoNotFound(1))
        ));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let repo = InMemoryDocumentRepository::new();
        repo.delete(42).await.unwrap();
        repo.delete(42).await.unwrap();
    }
}
