use crate::models::{GeoPoint, Track};
use serde::Serialize;

/// Axis-aligned bounding box in geographic coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    /// Smallest box enclosing every point, or `None` for an empty iterator.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a GeoPoint>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bbox = BoundingBox {
            min_lat: first.lat,
            max_lat: first.lat,
            min_lng: first.lng,
            max_lng: first.lng,
        };

        for point in iter {
            bbox.min_lat = bbox.min_lat.min(point.lat);
            bbox.max_lat = bbox.max_lat.max(point.lat);
            bbox.min_lng = bbox.min_lng.min(point.lng);
            bbox.max_lng = bbox.max_lng.max(point.lng);
        }

        Some(bbox)
    }

    /// Square box of `half_span_deg` on each side of `center`.
    pub fn around(center: &GeoPoint, half_span_deg: f64) -> Self {
        BoundingBox {
            min_lat: center.lat - half_span_deg,
            max_lat: center.lat + half_span_deg,
            min_lng: center.lng - half_span_deg,
            max_lng: center.lng + half_span_deg,
        }
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new_unchecked(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }

    pub fn span_lat(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn span_lng(&self) -> f64 {
        self.max_lng - self.min_lng
    }

    /// Grow every side by `fraction` of the respective span.
    pub fn padded(&self, fraction: f64) -> Self {
        let lat_padding = self.span_lat() * fraction;
        let lng_padding = self.span_lng() * fraction;

        BoundingBox {
            min_lat: self.min_lat - lat_padding,
            max_lat: self.max_lat + lat_padding,
            min_lng: self.min_lng - lng_padding,
            max_lng: self.max_lng + lng_padding,
        }
    }

    /// Inclusive on every edge.
    pub fn contains(&self, point: &GeoPoint) -> bool {
        point.lat >= self.min_lat
            && point.lat <= self.max_lat
            && point.lng >= self.min_lng
            && point.lng <= self.max_lng
    }

    /// Perimeter estimate in km: twice the sum of the box's width and height,
    /// both measured along the southern and western edges.
    pub fn perimeter_km(&self) -> f64 {
        let south_west = GeoPoint::new_unchecked(self.min_lat, self.min_lng);
        let south_east = GeoPoint::new_unchecked(self.min_lat, self.max_lng);
        let north_west = GeoPoint::new_unchecked(self.max_lat, self.min_lng);

        2.0 * (south_west.distance_to(&south_east) + south_west.distance_to(&north_west))
    }
}

/// What the engine knows about the explored area for a single request.
#[derive(Debug, Clone, PartialEq)]
pub struct Coverage {
    pub bounds: BoundingBox,
    /// Mean of every recorded point; `None` when no tracks exist yet
    pub centroid: Option<GeoPoint>,
    pub point_count: usize,
}

impl Coverage {
    /// Scan every point of every track. `None` when there is nothing to scan.
    pub fn from_tracks(tracks: &[Track]) -> Option<Self> {
        let points = || tracks.iter().flat_map(|track| track.points.iter());
        let bounds = BoundingBox::from_points(points())?;

        let (lat_sum, lng_sum, point_count) = points()
            .fold((0.0, 0.0, 0usize), |(lat, lng, n), p| {
                (lat + p.lat, lng + p.lng, n + 1)
            });

        Some(Coverage {
            bounds,
            centroid: Some(GeoPoint::new_unchecked(
                lat_sum / point_count as f64,
                lng_sum / point_count as f64,
            )),
            point_count,
        })
    }

    /// Replace a box with no extent (every point at one spot) by a square of
    /// `half_span_deg` around it. The centroid is kept.
    pub fn with_min_extent(mut self, half_span_deg: f64) -> Self {
        if self.bounds.span_lat() == 0.0 && self.bounds.span_lng() == 0.0 {
            self.bounds = BoundingBox::around(&self.bounds.center(), half_span_deg);
        }
        self
    }

    /// Synthetic coverage used before any track exists.
    pub fn around(anchor: &GeoPoint, half_span_deg: f64) -> Self {
        Coverage {
            bounds: BoundingBox::around(anchor, half_span_deg),
            centroid: None,
            point_count: 0,
        }
    }
}
