use crate::domain::geo::{GeoPoint, MultiPolygon};

use super::RegionId;

/// City / district / town names of one administrative unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionName {
    pub city: String,
    pub district: String,
    pub town: String,
}

impl RegionName {
    pub fn new(city: impl Into<String>, district: impl Into<String>, town: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            district: district.into(),
            town: town.into(),
        }
    }
}

/// A region matched by name, reduced to the anchor point used for proximity
/// search.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRegion {
    pub id: RegionId,
    pub centroid: GeoPoint,
}

/// One row of an administrative-region dataset import.
#[derive(Debug, Clone)]
pub struct NewRegion {
    pub city_no: String,
    pub city_name: String,
    pub district_no: String,
    pub district_name: String,
    pub town_no: RegionId,
    pub town_name: String,
    pub boundary: MultiPolygon,
}

impl NewRegion {
    pub fn name(&self) -> RegionName {
        RegionName::new(&self.city_name, &self.district_name, &self.town_name)
    }
}

/// Name filter over the region table.
///
/// Each level is independent: an empty list leaves that level unconstrained,
/// so a filter with all three lists empty matches every region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionFilter {
    pub cities: Vec<String>,
    pub districts: Vec<String>,
    pub towns: Vec<String>,
}

impl RegionFilter {
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty() && self.districts.is_empty() && self.towns.is_empty()
    }

    pub fn matches(&self, name: &RegionName) -> bool {
        level_matches(&self.cities, &name.city)
            && level_matches(&self.districts, &name.district)
            && level_matches(&self.towns, &name.town)
    }
}

fn level_matches(allowed: &[String], value: &str) -> bool {
    allowed.is_empty() || allowed.iter().any(|candidate| candidate == value)
}
