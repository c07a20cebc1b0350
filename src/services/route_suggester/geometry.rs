use crate::constants::{ZIGZAG_MAX_INSERTED_POINTS, ZIGZAG_OFFSET_DEG};
use crate::models::GeoPoint;

/// Arithmetic mean of all points in degree space. A closed ring counts its
/// first point twice.
pub fn centroid(points: &[GeoPoint]) -> Option<GeoPoint> {
    if points.is_empty() {
        return None;
    }

    let n = points.len() as f64;
    let (lat_sum, lng_sum) = points
        .iter()
        .fold((0.0, 0.0), |(lat, lng), p| (lat + p.lat, lng + p.lng));

    Some(GeoPoint::new_unchecked(lat_sum / n, lng_sum / n))
}

/// Move every point toward (factor < 1) or away from (factor > 1) the centroid.
/// Point count and closure are preserved.
pub fn scale_toward_centroid(points: &[GeoPoint], factor: f64) -> Vec<GeoPoint> {
    let Some(center) = centroid(points) else {
        return Vec::new();
    };

    points
        .iter()
        .map(|p| {
            GeoPoint::new_unchecked(
                center.lat + (p.lat - center.lat) * factor,
                center.lng + (p.lng - center.lng) * factor,
            )
        })
        .collect()
}

/// Lengthen a path by inserting perpendicular detours at every segment midpoint.
///
/// Each non-degenerate segment gets `max(1, round(factor) - 1)` extra points,
/// offset by a fixed 0.01° and alternating sides. The result is not guaranteed
/// to lie on any street.
///
/// At most [`ZIGZAG_MAX_INSERTED_POINTS`] are spread over the segments (never
/// fewer than one per segment), so huge factors extend less than asked.
pub fn zigzag_extend(points: &[GeoPoint], factor: f64) -> Vec<GeoPoint> {
    if points.len() < 2 || factor <= 1.0 || !factor.is_finite() {
        return points.to_vec();
    }

    let segments = points.len() - 1;
    let per_segment_cap = (ZIGZAG_MAX_INSERTED_POINTS / segments).max(1);
    let detours = (factor.round() as usize)
        .saturating_sub(1)
        .clamp(1, per_segment_cap);
    let mut extended = Vec::with_capacity(points.len() + segments * detours);

    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        extended.push(a);

        let d_lat = b.lat - a.lat;
        let d_lng = b.lng - a.lng;
        let length = (d_lat * d_lat + d_lng * d_lng).sqrt();
        if length == 0.0 {
            continue;
        }

        let mid_lat = (a.lat + b.lat) / 2.0;
        let mid_lng = (a.lng + b.lng) / 2.0;
        // Unit normal, rotated 90°
        let perp_lat = -d_lng / length * ZIGZAG_OFFSET_DEG;
        let perp_lng = d_lat / length * ZIGZAG_OFFSET_DEG;

        for j in 0..detours {
            let side = if j % 2 == 0 { 1.0 } else { -1.0 };
            extended.push(GeoPoint::new_unchecked(
                mid_lat + perp_lat * side,
                mid_lng + perp_lng * side,
            ));
        }
    }

    if let Some(last) = points.last() {
        extended.push(*last);
    }

    extended
}
