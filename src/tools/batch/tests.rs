#[cfg(test)]
mod tests {
    use crate::tools::batch::{batch, InFlightGauge};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_batch_collects_every_item() {
        let items = vec![1, 2, 3, 4, 5];

        let results = batch(items, 2, |n| async move { n * 2 }).await;

        // Completion order, not submission order
        let mut sorted = results.clone();
        sorted.sort();
        assert_eq!(sorted, vec![2, 4, 6, 8, 10]);
    }

    #[tokio::test]
    async fn test_batch_completion_order() {
        let items = vec![30u64, 10, 20];

        let results = batch(items, 3, |n| async move {
            tokio::time::sleep(Duration::from_millis(n)).await;
            n
        })
        .await;

        assert_eq!(results, vec![10, 20, 30]);
    }

    #[tokio::test]
    async fn test_batch_empty() {
        let items: Vec<i32> = vec![];
        let results = batch(items, 5, |n| async move { n }).await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_batch_zero_concurrency_still_runs() {
        let results = batch(vec![1, 2, 3], 0, |n| async move { n }).await;
        assert_eq!(results.len(), 3);
    }

    #[tokio::test]
    async fn test_batch_never_exceeds_limit() {
        let gauge = InFlightGauge::new();
        let handle = Arc::clone(&gauge);

        let items: Vec<u64> = (0..50).collect();
        let results = batch(items, 5, move |n| {
            let gauge = Arc::clone(&handle);
            async move {
                let _guard = gauge.enter();
                tokio::time::sleep(Duration::from_millis(2 + n % 3)).await;
                n
            }
        })
        .await;

        assert_eq!(results.len(), 50);
        assert!(gauge.peak() <= 5, "peak in flight was {}", gauge.peak());
        assert!(gauge.peak() >= 2);
        assert_eq!(gauge.current(), 0);
    }

    #[test]
    fn test_gauge_tracks_peak() {
        let gauge = InFlightGauge::new();
        let a = gauge.enter();
        let b = gauge.enter();
        assert_eq!(gauge.current(), 2);
        drop(a);
        let _c = gauge.enter();
        drop(b);
        assert_eq!(gauge.current(), 1);
        assert_eq!(gauge.peak(), 2);
    }
}
