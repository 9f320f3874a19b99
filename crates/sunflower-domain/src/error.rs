use thiserror::Error;

/// Errors the domain/repository layer can raise. The engine distinguishes
/// `GalleryinfoNotFound` from everything else; `InfoNotFound` is only
/// observable through the HTTP layer.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("galleryinfo {0} not found")]
    GalleryinfoNotFound(u64),

    #[error("info {0} not found")]
    InfoNotFound(u64),

    #[error("repository error: {0}")]
    Repository(#[from] anyhow::Error),
}
