use std::collections::HashSet;
use std::future::Future;

/// Awaits both `source` and `target` id-producing futures, treats them as
/// sets, and returns `source \ target` materialised as a `Vec`. Order is
/// unspecified but deterministic within a single call (driven by
/// `HashSet` iteration order on a fixed input, which is stable for a given
/// process run).
pub async fn differences<SrcFut, TgtFut>(source: SrcFut, target: TgtFut) -> anyhow::Result<Vec<u64>>
where
    SrcFut: Future<Output = anyhow::Result<Vec<u64>>>,
    TgtFut: Future<Output = anyhow::Result<Vec<u64>>>,
{
    let (source_ids, target_ids) = tokio::try_join!(source, target)?;
    let target_set: HashSet<u64> = target_ids.into_iter().collect();
    Ok(source_ids
        .into_iter()
        .filter(|id| !target_set.contains(id))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_set_difference() {
        let source = async { Ok(vec![1, 2, 3, 4, 5]) };
        let target = async { Ok(vec![3, 4, 5, 6, 7]) };
        let result: HashSet<u64> = differences(source, target).await.unwrap().into_iter().collect();
        assert_eq!(result, HashSet::from([1, 2]));
    }

    #[tokio::test]
    async fn empty_source_yields_empty_result() {
        let source = async { Ok(vec![]) };
        let target = async { Ok(vec![1, 2, 3]) };
        assert_eq!(differences(source, target).await.unwrap(), Vec::<u64>::new());
    }

    #[tokio::test]
    async fn empty_target_yields_all_source_ids() {
        let source = async { Ok(vec![1, 2, 3]) };
        let target = async { Ok(vec![]) };
        let result: HashSet<u64> = differences(source, target).await.unwrap().into_iter().collect();
        assert_eq!(result, HashSet::from([1, 2, 3]));
    }

    #[tokio::test]
    async fn propagates_source_error() {
        let source = async { anyhow::bail!("boom") };
        let target = async { Ok(vec![1]) };
        assert!(differences(source, target).await.is_err());
    }
}
