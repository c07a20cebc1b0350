//! Encoded polyline format (precision 5), as returned by OSRM with
//! `geometries=polyline`.

use crate::constants::POLYLINE_PRECISION;
use crate::models::GeoPoint;

/// Decode into `(lat, lng)` pairs.
///
/// A value cut off mid-chunk or a running total that would overflow ends
/// decoding; a latitude without its longitude is dropped. Invalid input never panics, it only yields a shorter path.
pub fn decode(encoded: &str) -> Vec<(f64, f64)> {
    let bytes = encoded.as_bytes();
    let mut coordinates = Vec::new();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;

    while index < bytes.len() {
        let Some(lat_delta) = next_value(bytes, &mut index) else {
            break;
        };
        let Some(lng_delta) = next_value(bytes, &mut index) else {
            break;
        };

        let (Some(next_lat), Some(next_lng)) =
            (lat.checked_add(lat_delta), lng.checked_add(lng_delta))
        else {
            break;
        };
        lat = next_lat;
        lng = next_lng;
        coordinates.push((
            lat as f64 / POLYLINE_PRECISION,
            lng as f64 / POLYLINE_PRECISION,
        ));
    }

    coordinates
}

/// One zig-zag folded value; `None` when the input ends before its last chunk.
fn next_value(bytes: &[u8], index: &mut usize) -> Option<i64> {
    let mut result: i64 = 0;
    let mut shift = 0u32;

    loop {
        let byte = *bytes.get(*index)?;
        *index += 1;

        let chunk = (byte as i64) - 63;
        // Bound the shift so garbage input cannot overflow
        if shift < 60 {
            result |= (chunk & 0x1f) << shift;
        }
        shift += 5;

        if chunk < 0x20 {
            break;
        }
    }

    Some(if result & 1 == 1 {
        !(result >> 1)
    } else {
        result >> 1
    })
}

/// Encode points in the same format `decode` reads.
pub fn encode(points: &[GeoPoint]) -> String {
    let mut encoded = String::new();
    let mut prev_lat: i64 = 0;
    let mut prev_lng: i64 = 0;

    for point in points {
        let lat = (point.lat * POLYLINE_PRECISION).round() as i64;
        let lng = (point.lng * POLYLINE_PRECISION).round() as i64;
        push_value(&mut encoded, lat - prev_lat);
        push_value(&mut encoded, lng - prev_lng);
        prev_lat = lat;
        prev_lng = lng;
    }

    encoded
}

fn push_value(out: &mut String, value: i64) {
    let mut folded = if value < 0 { !(value << 1) } else { value << 1 };
    while folded >= 0x20 {
        out.push((((folded & 0x1f) | 0x20) as u8 + 63) as char);
        folded >>= 5;
    }
    out.push((folded as u8 + 63) as char);
}
