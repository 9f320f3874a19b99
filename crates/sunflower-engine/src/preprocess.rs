use std::future::Future;

use sunflower_domain::Galleryinfo;

/// Wraps a remote galleryinfo fetch so the returned record's `id` is
/// forced to the requested `id`, defending against a known upstream quirk
/// where a fetch for id A returns a record whose `id` is B (the source
/// comments this as "1783616 ↔ 1669497"). Without this, the two
/// identifier spaces diverge and the difference computer would never
/// converge.
///
/// If `fetch` fails (e.g. `GalleryinfoNotFound`), that error propagates
/// unchanged.
pub async fn preprocess<F, Fut>(fetch: F, requested_id: u64) -> anyhow::Result<Galleryinfo>
where
    F: FnOnce(u64) -> Fut,
    Fut: Future<Output = anyhow::Result<Galleryinfo>>,
{
    let g = fetch(requested_id).await?;
    Ok(g.with_id(requested_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sunflower_domain::DomainError;

    fn sample(id: u64) -> Galleryinfo {
        Galleryinfo {
            id,
            title: "t".to_string(),
            gallery_type: "doujinshi".to_string(),
            language: None,
            date: "2024-01-01".to_string(),
            files: vec![],
            tags: vec![],
        }
    }

    #[tokio::test]
    async fn overrides_id_regardless_of_fetch_result() {
        let result = preprocess(|_id| async { Ok(sample(999)) }, 12345).await.unwrap();
        assert_eq!(result.id, 12345);
    }

    #[tokio::test]
    async fn reproduces_the_documented_quirk() {
        let result = preprocess(|_id| async { Ok(sample(1669497)) }, 1783616).await.unwrap();
        assert_eq!(result.id, 1783616);
    }

    #[tokio::test]
    async fn preserves_fields_other_than_id() {
        let mut expected = sample(999);
        expected.title = "preserved".to_string();
        let given = expected.clone();
        let result = preprocess(move |_id| async move { Ok(given) }, 1).await.unwrap();
        assert_eq!(result.title, "preserved");
    }

    #[tokio::test]
    async fn not_found_propagates_unchanged() {
        let err = preprocess(|id| async move { Err(DomainError::GalleryinfoNotFound(id).into()) }, 5)
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::GalleryinfoNotFound(5))
        ));
    }
}
