//! Background worker that periodically rebuilds the region tree cache.

use std::{sync::Arc, time::Duration};

use tracing::{error, info};

use crate::domain::ports::inbound::RegionService;

/// Rebuilds the region hierarchy every `interval`.
///
/// Failures are logged and the loop keeps going; the previously cached tree
/// stays in place until a rebuild succeeds.
pub async fn run_region_tree_refresh_worker(service: Arc<dyn RegionService>, interval: Duration) {
    info!(
        interval_secs = interval.as_secs(),
        "Region tree refresh task started"
    );

    let mut ticker = tokio::time::interval(interval);

    // The first tick completes immediately; startup already handles the initial build
    ticker.tick().await;

    loop {
        ticker.tick().await;

        match service.rebuild_tree().await {
            Ok(stats) => info!(
                cities = stats.cities,
                districts = stats.districts,
                towns = stats.towns,
                "Scheduled region tree refresh completed"
            ),
            Err(e) => error!(error = %e, "Scheduled region tree refresh failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::cache::MokaCache;
    use crate::adapters::outbound::mock::MockRegionRepository;
    use crate::domain::ports::outbound::RegionRepository;
    use crate::domain::services::RegionServiceImpl;
    use crate::test_support::{point, region_around};

    #[tokio::test(start_paused = true)]
    async fn refreshes_tree_after_each_interval() {
        let regions = MockRegionRepository::new();
        let service: Arc<dyn RegionService> = Arc::new(RegionServiceImpl::new(
            Arc::new(regions.clone()),
            Arc::new(MokaCache::default()),
        ));

        let worker = tokio::spawn(run_region_tree_refresh_worker(
            Arc::clone(&service),
            Duration::from_secs(60),
        ));

        regions
            .replace_all(&[region_around(
                "1",
                ("서울특별시", "강남구", "역삼동"),
                point(127.03, 37.50),
            )])
            .await
            .unwrap();
        assert!(service.get_tree().await.unwrap().is_empty());

        tokio::time::sleep(Duration::from_secs(61)).await;
        assert_eq!(service.get_tree().await.unwrap().stats().towns, 1);

        worker.abort();
    }
}
