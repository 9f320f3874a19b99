use serde::{Deserialize, Serialize};

use crate::galleryinfo::Galleryinfo;

/// A derived, search-optimized projection of a [`Galleryinfo`], stored in
/// the document store for fast reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    pub id: u64,
    pub title: String,
    pub gallery_type: String,
    pub language: Option<String>,
    pub tags: Vec<String>,
    pub num_pages: u32,
}

impl Info {
    /// Deterministic projection: the only transformation the engine needs
    /// from a `Galleryinfo` to an `Info`.
    pub fn from_galleryinfo(g: &Galleryinfo) -> Self {
        Self {
            id: g.id,
            title: g.title.clone(),
            gallery_type: g.gallery_type.clone(),
            language: g.language.clone(),
            tags: g.tags.iter().map(|t| t.name.clone()).collect(),
            num_pages: g.files.len() as u32,
        }
    }
}
