//!
//! src/project.rs  Andrew Belles  Oct 19th, 2026
//!
//! Flattens raw chart items into ranked rows. Position is always the
//! 1-based index of the item in the upstream array, nothing is sorted
//! or deduplicated
//!

use serde::Serialize;
use serde_json::Value;

use crate::category::ChartCategory;
use crate::errors::ProjectError;
use crate::fetch::RawChartItem;

pub const MISSING_TEXT: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackRow {
    pub position: usize,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub duration_secs: i64,
    pub preview: Option<String>
}

/// Albums, playlists and podcasts share one shape
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitledRow {
    pub position: usize,
    pub title: String,
    pub link: String
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistRow {
    pub position: usize,
    pub name: String,
    pub link: String
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChartRow {
    Track(TrackRow),
    Titled(TitledRow),
    Artist(ArtistRow)
}

impl ChartRow {
    pub fn position(&self) -> usize {
        match self {
            ChartRow::Track(row)  => row.position,
            ChartRow::Titled(row) => row.position,
            ChartRow::Artist(row) => row.position,
        }
    }
}

/// Scalar text lookup. Absent or null falls back to "N/A", other
/// non-string values keep their JSON text.
fn text_or_default(item: &Value, key: &str) -> String {
    item.get(key).map_or_else(|| MISSING_TEXT.to_string(), scalar_text)
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null      => MISSING_TEXT.to_string(),
        Value::String(s) => s.clone(),
        other            => other.to_string(),
    }
}

/// Scalar numeric lookup, 0 when absent or not a number
fn number_or_zero(item: &Value, key: &str) -> i64 {
    match item.get(key) {
        // fractional seconds truncate, out of range values saturate
        Some(Value::Number(n)) => n.as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        _ => 0,
    }
}

/// Optional scalar text, absent and null both map to None
fn optional_text(item: &Value, key: &str) -> Option<String> {
    match item.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s))   => Some(s.clone()),
        Some(other)              => Some(other.to_string()),
    }
}

/// Nested lookups on tracks have no fallback for an absent object or key,
/// such a gap aborts the projection. A value that is present is rendered
/// like any scalar: strings as-is, null as "N/A", the rest as JSON text.
// TODO: settle with the chart backend owners whether `artist`/`album` are
// guaranteed; if not, default these like the scalar fields.
fn nested_text(item: &Value, position: usize, outer: &str, inner: &str,
    path: &'static str) -> Result<String, ProjectError> {
    item.get(outer)
        .and_then(|o| o.get(inner))
        .map(scalar_text)
        .ok_or(ProjectError::MissingNested { position, path })
}

fn project_track(item: &Value, position: usize) -> Result<ChartRow, ProjectError> {
    Ok( ChartRow::Track(TrackRow {
        position,
        title: text_or_default(item, "title"),
        artist: nested_text(item, position, "artist", "name", "artist.name")?,
        album: nested_text(item, position, "album", "title", "album.title")?,
        duration_secs: number_or_zero(item, "duration"),
        preview: optional_text(item, "preview"),
    }))
}

fn project_titled(item: &Value, position: usize) -> ChartRow {
    ChartRow::Titled(TitledRow {
        position,
        title: text_or_default(item, "title"),
        link: text_or_default(item, "link"),
    })
}

fn project_artist(item: &Value, position: usize) -> ChartRow {
    ChartRow::Artist(ArtistRow {
        position,
        name: text_or_default(item, "name"),
        link: text_or_default(item, "link"),
    })
}

pub fn project(category: ChartCategory, items: &[RawChartItem]) ->
    Result<Vec<ChartRow>, ProjectError> {
    items.iter()
        .enumerate()
        .map(|(i, item)| {
            let position = i + 1;
            match category {
                ChartCategory::Tracks => project_track(item, position),
                ChartCategory::Albums
                | ChartCategory::Playlists
                | ChartCategory::Podcasts => Ok(project_titled(item, position)),
                ChartCategory::Artists => Ok(project_artist(item, position)),
            }
        })
        .collect()
}
