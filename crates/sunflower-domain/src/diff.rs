use std::fmt;

use crate::galleryinfo::Galleryinfo;

/// Field-level diff between two [`Galleryinfo`] records, used only for the
/// integrity-check warning log. Only its emptiness (`is_empty`) feeds
/// control flow; the content is diagnostic.
#[derive(Debug, Default)]
pub struct GalleryinfoDiff {
    changed_fields: Vec<String>,
}

impl GalleryinfoDiff {
    /// Computes the diff between an upstream record and the local copy.
    pub fn compute(remote: &Galleryinfo, local: &Galleryinfo) -> Self {
        let mut changed_fields = Vec::new();
        if remote.title != local.title {
            changed_fields.push("title".to_string());
        }
        if remote.gallery_type != local.gallery_type {
            changed_fields.push("gallery_type".to_string());
        }
        if remote.language != local.language {
            changed_fields.push("language".to_string());
        }
        if remote.date != local.date {
            changed_fields.push("date".to_string());
        }
        if remote.files != local.files {
            changed_fields.push("files".to_string());
        }
        if remote.tags != local.tags {
            changed_fields.push("tags".to_string());
        }
        Self { changed_fields }
    }

    pub fn is_empty(&self) -> bool {
        self.changed_fields.is_empty()
    }
}

impl fmt::Display for GalleryinfoDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "changed fields: [{}]", self.changed_fields.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(id: u64, title: &str) -> Galleryinfo {
        Galleryinfo {
            id,
            title: title.to_string(),
            gallery_type: "doujinshi".to_string(),
            language: Some("english".to_string()),
            date: "2024-01-01".to_string(),
            files: vec![],
            tags: vec![],
        }
    }

    #[test]
    fn identical_records_produce_empty_diff() {
        let a = sample(1, "same");
        let b = sample(1, "same");
        assert!(GalleryinfoDiff::compute(&a, &b).is_empty());
    }

    #[test]
    fn title_change_is_detected() {
        let remote = sample(1, "new");
        let local = sample(1, "old");
        let diff = GalleryinfoDiff::compute(&remote, &local);
        assert!(!diff.is_empty());
        assert!(diff.to_string().contains("title"));
    }
}
