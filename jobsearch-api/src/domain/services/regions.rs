use std::sync::Arc;

use async_trait::async_trait;
use itertools::Itertools;
use tracing::{info, instrument, warn};

use crate::domain::{
    models::{NewRegion, RegionTree, RegionTreeStats},
    ports::{
        inbound::RegionService,
        outbound::{KeyValueCache, RegionRepository},
    },
    SearchError,
};

/// Cache key holding the serialized region hierarchy.
pub const REGION_TREE_KEY: &str = "region_tree";

/// Column widths of the `regions` table.
const MAX_NAME_LEN: usize = 20;
const MAX_NUMBER_LEN: usize = 10;

/// Implementation of the [`RegionService`] inbound port.
///
/// The hierarchy lives in the injected cache under [`REGION_TREE_KEY`] and is
/// only ever replaced as a whole.
pub struct RegionServiceImpl<R> {
    regions: Arc<R>,
    cache: Arc<dyn KeyValueCache>,
}

impl<R: RegionRepository> RegionServiceImpl<R> {
    pub fn new(regions: Arc<R>, cache: Arc<dyn KeyValueCache>) -> Self {
        Self { regions, cache }
    }
}

#[async_trait]
impl<R: RegionRepository> RegionService for RegionServiceImpl<R> {
    async fn get_tree(&self) -> Result<RegionTree, SearchError> {
        let Some(serialized) = self.cache.get(REGION_TREE_KEY).await? else {
            warn!("Region tree cache is cold, serving an empty tree");
            return Ok(RegionTree::default());
        };

        serde_json::from_str(&serialized)
            .map_err(|err| SearchError::Cache(format!("corrupt region tree: {err}")))
    }

    #[instrument(name = "RegionService::rebuild_tree", skip(self))]
    async fn rebuild_tree(&self) -> Result<RegionTreeStats, SearchError> {
        let names = self.regions.region_names().await?;
        let tree = RegionTree::from_names(names);
        let stats = tree.stats();

        let serialized = serde_json::to_string(&tree)
            .map_err(|err| SearchError::Cache(format!("failed to serialize region tree: {err}")))?;
        self.cache.set(REGION_TREE_KEY, serialized).await?;

        info!(
            cities = stats.cities,
            districts = stats.districts,
            towns = stats.towns,
            "Region tree rebuilt"
        );
        Ok(stats)
    }

    #[instrument(name = "RegionService::import_regions", skip_all, fields(regions = regions.len()))]
    async fn import_regions(&self, regions: Vec<NewRegion>) -> Result<RegionTreeStats, SearchError> {
        validate_dataset(&regions)?;

        let written = self.regions.replace_all(&regions).await?;
        info!(written, "Region dataset replaced");

        self.rebuild_tree().await
    }
}

fn validate_dataset(regions: &[NewRegion]) -> Result<(), SearchError> {
    if regions.is_empty() {
        return Err(SearchError::invalid_region("dataset is empty"));
    }

    if let Some(region) = regions.iter().find(|region| {
        [
            &region.city_name,
            &region.district_name,
            &region.town_name,
            &region.city_no,
            &region.district_no,
        ]
        .iter()
        .any(|value| value.trim().is_empty())
            || region.town_no.as_str().trim().is_empty()
    }) {
        return Err(SearchError::invalid_region(format!(
            "region '{}' has a blank name or number",
            region.town_no
        )));
    }

    if let Some(region) = regions.iter().find(|region| {
        [&region.city_name, &region.district_name, &region.town_name]
            .iter()
            .any(|name| name.chars().count() > MAX_NAME_LEN)
            || [&region.city_no, &region.district_no]
                .iter()
                .any(|number| number.chars().count() > MAX_NUMBER_LEN)
            || region.town_no.as_str().chars().count() > MAX_NUMBER_LEN
    }) {
        return Err(SearchError::invalid_region(format!(
            "region '{}' has a name over {MAX_NAME_LEN} or a number over {MAX_NUMBER_LEN} characters",
            region.town_no
        )));
    }

    if let Some(town_no) = regions.iter().map(|region| &region.town_no).duplicates().next() {
        return Err(SearchError::invalid_region(format!(
            "duplicate town number {town_no}"
        )));
    }

    if let Some(name) = regions.iter().map(NewRegion::name).duplicates().next() {
        return Err(SearchError::invalid_region(format!(
            "duplicate region {} {} {}",
            name.city, name.district, name.town
        )));
    }

    Ok(())
}
