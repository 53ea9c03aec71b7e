// src/services/discovery_service.rs
//
// Decade discovery: the fetch orchestrator.
//
// ARCHITECTURE:
// - One task per year, all launched together (tokio JoinSet)
// - Inside a year, pages are requested strictly one after another,
//   because whether page N+1 is needed depends on page N
// - A year stops once it holds PAGE_SIZE new items, or as soon as a
//   page contributes nothing new
// - Results are reassembled in ascending year order, then de-duplicated
//   across the whole decade (earliest year keeps the title)
//
// RULES:
// - The first failing year fails the whole decade; other years are aborted
// - No retries
// - Never touches tracking state; works on a TrackedKeys snapshot

use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, info};
use tokio::task::JoinSet;

use crate::domain::{Decade, MangaSummary, TrackedKeys, YearBatch};
use crate::error::{AppError, AppResult};
use crate::integrations::anilist::{
    build_popular_manga_query, parse_page_response, CatalogGateway, PAGE_SIZE,
};

pub struct DiscoveryService {
    gateway: Arc<dyn CatalogGateway>,
}

impl DiscoveryService {
    pub fn new(gateway: Arc<dyn CatalogGateway>) -> Self {
        Self { gateway }
    }

    /// Popular manga for each year of `decade`, excluding `tracked` titles
    pub async fn fetch_decade(
        &self,
        decade: Decade,
        tracked: &TrackedKeys,
    ) -> AppResult<Vec<YearBatch>> {
        if tracked.is_empty() {
            info!("Fetching manga for decade {}", decade);
        } else {
            info!(
                "Fetching manga for decade {} ({} tracked titles excluded)",
                decade,
                tracked.len()
            );
        }

        let tracked = Arc::new(tracked.clone());
        let mut tasks = JoinSet::new();

        for year in decade.years() {
            let gateway = Arc::clone(&self.gateway);
            let tracked = Arc::clone(&tracked);
            tasks.spawn(async move {
                let result = fetch_year(gateway.as_ref(), year, &tracked).await;
                (year, result)
            });
        }

        let mut batches = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            let (year, result) =
                joined.map_err(|e| AppError::Other(format!("Discovery task failed: {}", e)))?;
            // Returning here drops the JoinSet, which aborts the remaining years
            let mangas = result?;
            batches.push(YearBatch { year, mangas });
        }

        batches.sort_by_key(|batch| batch.year);
        dedupe_across_years(&mut batches);

        Ok(batches)
    }

    /// Same walk with nothing excluded
    pub async fn fetch_decade_untracked(&self, decade: Decade) -> AppResult<Vec<YearBatch>> {
        self.fetch_decade(decade, &TrackedKeys::default()).await
    }
}

/// Page through one year until PAGE_SIZE new titles are found
async fn fetch_year(
    gateway: &dyn CatalogGateway,
    year: i32,
    tracked: &TrackedKeys,
) -> AppResult<Vec<MangaSummary>> {
    let mut accumulated: Vec<MangaSummary> = Vec::with_capacity(PAGE_SIZE);
    let mut seen = HashSet::new();
    let mut page = 1;

    while accumulated.len() < PAGE_SIZE {
        let request = build_popular_manga_query(year, page)?;
        let response = gateway.execute(&request).await?;
        let mangas = parse_page_response(response)?;

        let fresh: Vec<MangaSummary> = tracked
            .filter_untracked(mangas)
            .into_iter()
            .filter(|manga| manga.title_key().is_ok_and(|key| seen.insert(key)))
            .collect();

        debug!("Year {} page {}: {} new titles", year, page, fresh.len());

        if fresh.is_empty() {
            break;
        }

        accumulated.extend(fresh);
        page += 1;
    }

    accumulated.truncate(PAGE_SIZE);
    Ok(accumulated)
}

/// Drop titles already listed under an earlier year
fn dedupe_across_years(batches: &mut [YearBatch]) {
    let mut seen = HashSet::new();
    for batch in batches.iter_mut() {
        batch
            .mangas
            .retain(|manga| manga.title_key().is_ok_and(|key| seen.insert(key)));
    }
}
