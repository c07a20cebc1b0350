//! Seed shapes handed to the street conformer.

use crate::models::{BoundingBox, GeoPoint};
use rand::Rng;
use std::f64::consts::TAU;

/// Closed ring around the box corners, each coordinate nudged by up to
/// `jitter_fraction` of the box span in either direction.
///
/// Corner order: SW, SE, NE, NW, back to SW.
pub fn perimeter<R: Rng + ?Sized>(
    bounds: &BoundingBox,
    jitter_fraction: f64,
    rng: &mut R,
) -> Vec<GeoPoint> {
    let lat_span = bounds.span_lat();
    let lng_span = bounds.span_lng();

    let corners = [
        (bounds.min_lat, bounds.min_lng),
        (bounds.min_lat, bounds.max_lng),
        (bounds.max_lat, bounds.max_lng),
        (bounds.max_lat, bounds.min_lng),
    ];

    let mut ring: Vec<GeoPoint> = corners
        .iter()
        .map(|&(lat, lng)| {
            GeoPoint::new_unchecked(
                lat + jitter(rng, jitter_fraction, lat_span),
                lng + jitter(rng, jitter_fraction, lng_span),
            )
        })
        .collect();
    ring.push(ring[0]);
    ring
}

/// Uniform offset in `[-fraction * span, fraction * span)`.
fn jitter<R: Rng + ?Sized>(rng: &mut R, fraction: f64, span: f64) -> f64 {
    if fraction == 0.0 || span == 0.0 {
        return 0.0;
    }
    (rng.random::<f64>() * 2.0 - 1.0) * fraction * span
}

/// `vertices` points evenly spaced by angle, closed by repeating the first.
/// Vertex `i` sits at `θ = 2πi/n` with `lat = c.lat + r·sin θ`, `lng = c.lng + r·cos θ`.
pub fn regular_polygon(center: &GeoPoint, radius_deg: f64, vertices: usize) -> Vec<GeoPoint> {
    if vertices == 0 {
        return Vec::new();
    }

    let mut ring: Vec<GeoPoint> = (0..vertices)
        .map(|i| {
            let theta = TAU * i as f64 / vertices as f64;
            GeoPoint::new_unchecked(
                center.lat + radius_deg * theta.sin(),
                center.lng + radius_deg * theta.cos(),
            )
        })
        .collect();
    ring.push(ring[0]);
    ring
}

/// Axis-aligned closed square, same corner order as [`perimeter`].
pub fn square(center: &GeoPoint, half_side_deg: f64) -> Vec<GeoPoint> {
    let b = BoundingBox::around(center, half_side_deg);
    vec![
        GeoPoint::new_unchecked(b.min_lat, b.min_lng),
        GeoPoint::new_unchecked(b.min_lat, b.max_lng),
        GeoPoint::new_unchecked(b.max_lat, b.max_lng),
        GeoPoint::new_unchecked(b.max_lat, b.min_lng),
        GeoPoint::new_unchecked(b.min_lat, b.min_lng),
    ]
}

/// Two opposite points on the SW-NE diagonal; the router supplies the way back.
pub fn diametric(center: &GeoPoint, offset_deg: f64) -> Vec<GeoPoint> {
    vec![
        GeoPoint::new_unchecked(center.lat - offset_deg, center.lng - offset_deg),
        GeoPoint::new_unchecked(center.lat + offset_deg, center.lng + offset_deg),
    ]
}
