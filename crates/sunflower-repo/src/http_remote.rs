use std::collections::BTreeSet;

use async_trait::async_trait;
use reqwest::Url;
use sunflower_domain::{DomainError, Galleryinfo};

use crate::traits::RemoteIndexRepository;

/// `reqwest`-backed remote index. `all_ids` reads the configured
/// `.nozomi` index files — Hitomi.la's binary index format: a flat
/// sequence of big-endian `u32` gallery ids, most recent first. `get`
/// fetches a single galleryinfo JSON document per id.
pub struct HttpRemoteIndexRepository {
    http: reqwest::Client,
    base_url: Url,
    index_files: Vec<String>,
}

impl HttpRemoteIndexRepository {
    pub fn new(http: reqwest::Client, base_url: Url, index_files: Vec<String>) -> Self {
        Self {
            http,
            base_url,
            index_files,
        }
    }

    fn parse_nozomi(bytes: &[u8]) -> Vec<u64> {
        bytes
            .chunks_exact(4)
            .map(|chunk| u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]) as u64)
            .collect()
    }
}

#[async_trait]
impl RemoteIndexRepository for HttpRemoteIndexRepository {
    async fn get(&self, id: u64) -> anyhow::Result<Galleryinfo> {
        let url = self.base_url.join(&format!("galleryinfo/{id}.json"))?;
        let res = self.http.get(url).send().await?;
        if res.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(DomainError::GalleryinfoNotFound(id).into());
        }
        let res = res.error_for_status()?;
        Ok(res.json::<Galleryinfo>().await?)
    }

    async fn all_ids(&self) -> anyhow::Result<Vec<u64>> {
        let mut ids = BTreeSet::new();
        for index_file in &self.index_files {
            let url = self.base_url.join(index_file)?;
            let bytes = self.http.get(url).send().await?.error_for_status()?.bytes().await?;
            ids.extend(Self::parse_nozomi(&bytes));
        }
        Ok(ids.into_iter().collect())
    }

    fn index_files(&self) -> &[String] {
        &self.index_files
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_big_endian_u32_entries() {
        let bytes: Vec<u8> = vec![0, 0, 0, 1, 0, 0, 0, 2, 0, 1, 0, 0];
        let ids = HttpRemoteIndexRepository::parse_nozomi(&bytes);
        assert_eq!(ids, vec![1, 2, 65536]);
    }

    #[test]
    fn empty_bytes_yield_no_ids() {
        assert!(HttpRemoteIndexRepository::parse_nozomi(&[]).is_empty());
    }
}
