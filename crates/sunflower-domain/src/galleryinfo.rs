use serde::{Deserialize, Serialize};

/// A single file entry within a gallery (page image metadata).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryinfoFile {
    pub name: String,
    pub hash: String,
    pub width: u32,
    pub height: u32,
}

/// A tag attached to a gallery, e.g. `{ name: "schoolgirl uniform", female: true }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default)]
    pub female: bool,
    #[serde(default)]
    pub male: bool,
}

/// The full upstream record for one gallery identifier.
///
/// Equality is full recursive (derived) structural equality: the integrity
/// checker asks only "does upstream differ from local?" and this is the
/// only thing the spec requires `PartialEq` to answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Galleryinfo {
    pub id: u64,
    pub title: String,
    pub gallery_type: String,
    pub language: Option<String>,
    pub date: String,
    pub files: Vec<GalleryinfoFile>,
    pub tags: Vec<Tag>,
}

impl Galleryinfo {
    /// Forces `id` to the given value, discarding whatever the upstream
    /// record claimed. Used by the identity-preserving fetch (`preprocess`)
    /// to defend against upstream returning a record for an adjacent id.
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = id;
        self
    }
}
