use crate::error::{AppError, Result};
use crate::models::{path_length_km, GeoPoint, Track};
use std::path::{Path, PathBuf};
use time::OffsetDateTime;

/// Turns uploaded GPX files into [`Track`]s and keeps the raw files on disk so
/// they can be reloaded at startup.
#[derive(Debug, Clone)]
pub struct TrackImporter {
    data_dir: PathBuf,
}

impl TrackImporter {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        TrackImporter {
            data_dir: data_dir.into(),
        }
    }

    /// Validate, parse and persist one upload. Nothing is written unless the
    /// file parses into at least one point.
    pub async fn import(&self, filename: &str, bytes: &[u8]) -> Result<Track> {
        let filename = sanitize_filename(filename)?;
        let track = parse_gpx(filename.clone(), bytes)?;

        tokio::fs::create_dir_all(&self.data_dir).await?;
        tokio::fs::write(self.data_dir.join(&filename), bytes).await?;

        tracing::info!(
            filename = %filename,
            points = track.points.len(),
            distance_km = %format!("{:.2}", track.distance_km),
            "Imported track"
        );
        Ok(track)
    }

    /// Parse every `*.gpx` file in the data directory. Unreadable files are
    /// logged and skipped; a missing directory yields no tracks.
    pub async fn load_existing(&self) -> Result<Vec<Track>> {
        let mut entries = match tokio::fs::read_dir(&self.data_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(dir = %self.data_dir.display(), "Data directory does not exist yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if has_gpx_extension(&path) {
                paths.push(path);
            }
        }
        paths.sort();

        let mut tracks = Vec::with_capacity(paths.len());
        for path in paths {
            let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            let parsed = match tokio::fs::read(&path).await {
                Ok(bytes) => parse_gpx(filename.to_string(), &bytes),
                Err(e) => Err(e.into()),
            };

            match parsed {
                Ok(track) => tracks.push(track),
                Err(e) => tracing::warn!(file = %path.display(), error = %e, "Skipping GPX file"),
            }
        }

        tracing::info!(count = tracks.len(), "Loaded existing GPX files");
        Ok(tracks)
    }
}

/// Reduce an upload name to its final component and require a `.gpx` extension.
pub fn sanitize_filename(filename: &str) -> Result<String> {
    let name = Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| *n == filename)
        .ok_or_else(|| AppError::InvalidTrack(format!("Invalid filename: {}", filename)))?;

    if !has_gpx_extension(Path::new(name)) {
        return Err(AppError::InvalidTrack("File must be a GPX file".to_string()));
    }

    Ok(name.to_string())
}

fn has_gpx_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gpx"))
}

/// Build a track from GPX bytes.
///
/// Points of every track and segment are kept in file order. Distance sums
/// each segment separately so gaps between segments are not counted. Duration
/// spans the first track, from its first timestamped point to its last.
pub fn parse_gpx(filename: String, bytes: &[u8]) -> Result<Track> {
    let gpx = gpx::read(bytes)
        .map_err(|e| AppError::InvalidTrack(format!("Failed to parse GPX: {}", e)))?;

    let mut points = Vec::new();
    let mut distance_km = 0.0;

    for track in &gpx.tracks {
        for segment in &track.segments {
            let segment_points = segment
                .points
                .iter()
                .map(|wp| {
                    let p = wp.point();
                    GeoPoint::new(p.y(), p.x()).map_err(AppError::InvalidTrack)
                })
                .collect::<Result<Vec<_>>>()?;

            distance_km += path_length_km(&segment_points);
            points.extend(segment_points);
        }
    }

    if points.is_empty() {
        return Err(AppError::InvalidTrack(format!(
            "{} contains no track points",
            filename
        )));
    }

    let duration_seconds = gpx
        .tracks
        .first()
        .and_then(|track| {
            let start = track.segments.first()?.points.first()?.time.clone()?;
            let end = track.segments.last()?.points.last()?.time.clone()?;
            let elapsed = OffsetDateTime::from(end) - OffsetDateTime::from(start);
            Some(elapsed.as_seconds_f64())
        })
        .unwrap_or(0.0);

    Ok(Track::new(filename, points, duration_seconds).with_distance_km(distance_km))
}
