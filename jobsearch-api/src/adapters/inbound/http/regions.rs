//! Request body of `PUT /admin/regions`.

use serde::Deserialize;

use crate::domain::{
    geo::{MultiPolygon, Polygon},
    models::{NewRegion, RegionId},
};

use super::FieldError;

/// A complete administrative-region dataset. Replaces the stored one.
#[derive(Debug, Deserialize)]
pub struct RegionImportRequest {
    pub regions: Vec<RegionRecord>,
}

/// One town with its boundary in WGS84 `[lon, lat]` positions.
///
/// `boundary` lists the exterior ring of each polygon part; rings must be
/// closed.
#[derive(Debug, Deserialize)]
pub struct RegionRecord {
    pub city_no: String,
    pub city_name: String,
    pub district_no: String,
    pub district_name: String,
    pub town_no: String,
    pub town_name: String,
    pub boundary: Vec<Vec<[f64; 2]>>,
}

impl RegionImportRequest {
    /// Parses every boundary, reporting each broken record by index.
    pub fn into_domain(self) -> Result<Vec<NewRegion>, Vec<FieldError>> {
        let mut regions = Vec::with_capacity(self.regions.len());
        let mut errors = Vec::new();

        for (index, record) in self.regions.into_iter().enumerate() {
            match record.into_domain() {
                Ok(region) => regions.push(region),
                Err(message) => {
                    errors.push(FieldError::new(format!("regions[{index}].boundary"), message))
                }
            }
        }

        if errors.is_empty() {
            Ok(regions)
        } else {
            Err(errors)
        }
    }
}

impl RegionRecord {
    fn into_domain(self) -> Result<NewRegion, String> {
        let polygons = self
            .boundary
            .iter()
            .map(|ring| Polygon::from_positions(ring))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| err.to_string())?;
        let boundary = MultiPolygon::new(polygons).map_err(|err| err.to_string())?;

        Ok(NewRegion {
            city_no: self.city_no,
            city_name: self.city_name,
            district_no: self.district_no,
            district_name: self.district_name,
            town_no: RegionId::from(self.town_no),
            town_name: self.town_name,
            boundary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(boundary: Vec<Vec<[f64; 2]>>) -> RegionRecord {
        RegionRecord {
            city_no: "11".into(),
            city_name: "서울특별시".into(),
            district_no: "11680".into(),
            district_name: "강남구".into(),
            town_no: "11680640".into(),
            town_name: "역삼동".into(),
            boundary,
        }
    }

    fn square() -> Vec<[f64; 2]> {
        vec![[127.03, 37.49], [127.04, 37.49], [127.04, 37.50], [127.03, 37.50], [127.03, 37.49]]
    }

    #[test]
    fn converts_valid_records() {
        let request = RegionImportRequest {
            regions: vec![record(vec![square()])],
        };
        let regions = request.into_domain().unwrap();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].town_no.as_str(), "11680640");
        assert_eq!(
            regions[0].boundary.to_wkt(),
            "MULTIPOLYGON(((127.03 37.49, 127.04 37.49, 127.04 37.5, 127.03 37.5, 127.03 37.49)))"
        );
    }

    #[test]
    fn reports_broken_boundaries_by_index() {
        let mut open_ring = square();
        open_ring.pop();

        let request = RegionImportRequest {
            regions: vec![record(vec![square()]), record(vec![open_ring]), record(vec![])],
        };
        let errors = request.into_domain().unwrap_err();
        let fields = errors.iter().map(|e| e.field.as_str()).collect::<Vec<_>>();
        assert_eq!(fields, vec!["regions[1].boundary", "regions[2].boundary"]);
    }

    #[test]
    fn deserializes_from_json() {
        let json = r#"{"regions":[{"city_no":"11","city_name":"서울특별시","district_no":"11680",
            "district_name":"강남구","town_no":"11680640","town_name":"역삼동",
            "boundary":[[[127.03,37.49],[127.04,37.49],[127.04,37.5],[127.03,37.49]]]}]}"#;
        let request: RegionImportRequest = serde_json::from_str(json).unwrap();
        assert!(request.into_domain().is_ok());
    }
}
