//!
//! src/category.rs  Andrew Belles  Oct 19th, 2026
//!
//! Content categories published by the chart endpoint and the
//! per-category facts (envelope field, label, table columns)
//!

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub const COL_POSITION: &str = "Posición";
pub const COL_TITLE: &str    = "Título";
pub const COL_ARTIST: &str   = "Artista";
pub const COL_ALBUM: &str    = "Álbum";
pub const COL_DURATION: &str = "Duración (s)";
pub const COL_PREVIEW: &str  = "Preview";
pub const COL_LINK: &str     = "Link";
pub const COL_NAME: &str     = "Nombre";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
    Serialize, Deserialize, ValueEnum
)]
#[serde(rename_all = "lowercase")]
pub enum ChartCategory {
    Tracks,
    Albums,
    Artists,
    Playlists,
    Podcasts,
}

impl ChartCategory {
    #[cfg(test)]
    pub const ALL: [ChartCategory; 5] = [
        ChartCategory::Tracks,
        ChartCategory::Albums,
        ChartCategory::Artists,
        ChartCategory::Playlists,
        ChartCategory::Podcasts,
    ];

    /// Top-level field of the envelope holding this category
    pub fn api_field(self) -> &'static str {
        match self {
            ChartCategory::Tracks    => "tracks",
            ChartCategory::Albums    => "albums",
            ChartCategory::Artists   => "artists",
            ChartCategory::Playlists => "playlists",
            ChartCategory::Podcasts  => "podcasts",
        }
    }

    /// User-facing label
    pub fn label(self) -> &'static str {
        match self {
            ChartCategory::Tracks    => "Canciones",
            ChartCategory::Albums    => "Álbumes",
            ChartCategory::Artists   => "Artistas",
            ChartCategory::Playlists => "Playlists",
            ChartCategory::Podcasts  => "Podcasts",
        }
    }

    pub fn columns(self) -> &'static [&'static str] {
        match self {
            ChartCategory::Tracks => &[
                COL_POSITION, COL_TITLE, COL_ARTIST, COL_ALBUM, COL_DURATION, COL_PREVIEW
            ],
            ChartCategory::Albums
            | ChartCategory::Playlists
            | ChartCategory::Podcasts => &[COL_POSITION, COL_TITLE, COL_LINK],
            ChartCategory::Artists => &[COL_POSITION, COL_NAME, COL_LINK],
        }
    }

    pub fn has_charts(self) -> bool {
        matches!(self, ChartCategory::Tracks)
    }
}

impl fmt::Display for ChartCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
