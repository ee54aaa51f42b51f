//! Minimal WGS84 geometry used by region import and the in-memory adapters.
//!
//! The Postgres adapters delegate the same operations to PostGIS
//! (`ST_Centroid`, `ST_DWithin`); this module mirrors them closely enough for
//! administrative regions that span a few kilometres.

use std::fmt;

use thiserror::Error;

/// Mean earth radius (IUGG) in metres.
const EARTH_RADIUS_M: f64 = 6_371_008.8;

#[derive(Debug, Error, PartialEq)]
pub enum GeoError {
    #[error("coordinate out of range: ({lon}, {lat})")]
    OutOfRange { lon: f64, lat: f64 },
    #[error("ring needs at least 4 positions, got {0}")]
    TooFewPositions(usize),
    #[error("ring is not closed")]
    OpenRing,
    #[error("multipolygon has no polygons")]
    Empty,
}

/// A longitude/latitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub fn new(lon: f64, lat: f64) -> Result<Self, GeoError> {
        let valid = lon.is_finite()
            && lat.is_finite()
            && (-180.0..=180.0).contains(&lon)
            && (-90.0..=90.0).contains(&lat);
        if !valid {
            return Err(GeoError::OutOfRange { lon, lat });
        }
        Ok(Self { lon, lat })
    }

    /// Great-circle distance in metres (haversine).
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        let (lat1, lat2) = (self.lat.to_radians(), other.lat.to_radians());
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_M * a.sqrt().asin()
    }

    pub fn within_distance(&self, other: &GeoPoint, radius_m: f64) -> bool {
        self.distance_to(other) <= radius_m
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.lon, self.lat)
    }
}

/// A simple polygon described by its closed exterior ring.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    exterior: Vec<GeoPoint>,
}

impl Polygon {
    pub fn new(exterior: Vec<GeoPoint>) -> Result<Self, GeoError> {
        if exterior.len() < 4 {
            return Err(GeoError::TooFewPositions(exterior.len()));
        }
        if exterior.first() != exterior.last() {
            return Err(GeoError::OpenRing);
        }
        Ok(Self { exterior })
    }

    /// Builds a polygon from `[lon, lat]` positions, validating every one.
    pub fn from_positions(positions: &[[f64; 2]]) -> Result<Self, GeoError> {
        let ring = positions
            .iter()
            .map(|[lon, lat]| GeoPoint::new(*lon, *lat))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(ring)
    }

    /// Ring positions relative to the first vertex. Shoelace terms on raw
    /// degrees near (127, 37) cancel catastrophically.
    fn local_ring(&self) -> (GeoPoint, Vec<(f64, f64)>) {
        let origin = self.exterior[0];
        let ring = self
            .exterior
            .iter()
            .map(|p| (p.lon - origin.lon, p.lat - origin.lat))
            .collect();
        (origin, ring)
    }

    /// Area-weighted centroid plus the (unsigned) weight used to combine
    /// several polygons. Degenerate rings fall back to the vertex mean.
    fn weighted_centroid(&self) -> (GeoPoint, f64) {
        let (origin, ring) = self.local_ring();

        let area = ring
            .windows(2)
            .map(|pair| pair[0].0 * pair[1].1 - pair[1].0 * pair[0].1)
            .sum::<f64>()
            / 2.0;

        if area.abs() < f64::EPSILON {
            let vertices = &ring[..ring.len() - 1];
            let n = vertices.len() as f64;
            let lon = vertices.iter().map(|p| p.0).sum::<f64>() / n;
            let lat = vertices.iter().map(|p| p.1).sum::<f64>() / n;
            return (
                GeoPoint {
                    lon: origin.lon + lon,
                    lat: origin.lat + lat,
                },
                0.0,
            );
        }

        let (mut cx, mut cy) = (0.0, 0.0);
        for pair in ring.windows(2) {
            let cross = pair[0].0 * pair[1].1 - pair[1].0 * pair[0].1;
            cx += (pair[0].0 + pair[1].0) * cross;
            cy += (pair[0].1 + pair[1].1) * cross;
        }
        let factor = 1.0 / (6.0 * area);
        (
            GeoPoint {
                lon: origin.lon + cx * factor,
                lat: origin.lat + cy * factor,
            },
            area.abs(),
        )
    }

    pub fn centroid(&self) -> GeoPoint {
        self.weighted_centroid().0
    }
}

/// The boundary of an administrative region.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiPolygon {
    polygons: Vec<Polygon>,
}

impl MultiPolygon {
    pub fn new(polygons: Vec<Polygon>) -> Result<Self, GeoError> {
        if polygons.is_empty() {
            return Err(GeoError::Empty);
        }
        Ok(Self { polygons })
    }

    pub fn centroid(&self) -> GeoPoint {
        let parts = self
            .polygons
            .iter()
            .map(Polygon::weighted_centroid)
            .collect::<Vec<_>>();
        let total: f64 = parts.iter().map(|(_, weight)| weight).sum();

        if total < f64::EPSILON {
            let n = parts.len() as f64;
            return GeoPoint {
                lon: parts.iter().map(|(p, _)| p.lon).sum::<f64>() / n,
                lat: parts.iter().map(|(p, _)| p.lat).sum::<f64>() / n,
            };
        }

        GeoPoint {
            lon: parts.iter().map(|(p, w)| p.lon * w).sum::<f64>() / total,
            lat: parts.iter().map(|(p, w)| p.lat * w).sum::<f64>() / total,
        }
    }

    /// Well-known text, as accepted by `ST_GeomFromText`.
    pub fn to_wkt(&self) -> String {
        let polygons = self
            .polygons
            .iter()
            .map(|polygon| {
                let ring = polygon
                    .exterior
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("(({ring}))")
            })
            .collect::<Vec<_>>()
            .join(", ");
        format!("MULTIPOLYGON({polygons})")
    }
}
