//!
//! src/charts.rs  Andrew Belles  Oct 19th, 2026
//!
//! Series behind the track charts: duration histogram, duration per
//! title, duration per position and the correlation of numeric columns.
//! Only the data is produced here, drawing belongs to the presenter
//!

use serde::Serialize;

use crate::category::{COL_DURATION, COL_POSITION};
use crate::project::TrackRow;

pub const HISTOGRAM_BINS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitlePoint {
    pub title: String,
    pub artist: String,
    pub duration_secs: i64
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionPoint {
    pub position: usize,
    pub duration_secs: i64,
    pub artist: String
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    /// Row-major, `None` where the coefficient is undefined
    pub values: Vec<Vec<Option<f64>>>
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackCharts {
    pub duration_histogram: Vec<HistogramBin>,
    pub duration_by_title: Vec<TitlePoint>,
    pub duration_by_position: Vec<PositionPoint>,
    pub correlation: CorrelationMatrix
}

impl TrackCharts {
    pub fn from_rows(rows: &[TrackRow]) -> Self {
        let durations: Vec<f64> = rows.iter().map(|r| r.duration_secs as f64).collect();
        let positions: Vec<f64> = rows.iter().map(|r| r.position as f64).collect();

        Self {
            duration_histogram: histogram(&durations, HISTOGRAM_BINS),
            duration_by_title: rows.iter()
                .map(|r| TitlePoint {
                    title: r.title.clone(),
                    artist: r.artist.clone(),
                    duration_secs: r.duration_secs
                })
                .collect(),
            duration_by_position: rows.iter()
                .map(|r| PositionPoint {
                    position: r.position,
                    duration_secs: r.duration_secs,
                    artist: r.artist.clone()
                })
                .collect(),
            correlation: correlation_matrix(&[
                (COL_POSITION, positions.as_slice()),
                (COL_DURATION, durations.as_slice()),
            ]),
        }
    }
}

/// Equal width bins over [min, max], the last bin is closed on the right.
/// A constant series collapses to a single bin.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if max == min {
        return vec![HistogramBin { start: min, end: max, count: values.len() }];
    }

    let width = (max - min) / bins as f64;
    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            start: min + width * i as f64,
            end: if i + 1 == bins { max } else { min + width * (i + 1) as f64 },
            count: 0
        })
        .collect();

    for v in values {
        let i = (((v - min) / width) as usize).min(bins - 1);
        out[i].count += 1;
    }
    out
}

/// Pearson coefficient, `None` for fewer than two points or zero variance
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return None;
    }
    let mean_x = xs[..n].iter().sum::<f64>() / n as f64;
    let mean_y = ys[..n].iter().sum::<f64>() / n as f64;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in xs[..n].iter().zip(&ys[..n]) {
        let (dx, dy) = (x - mean_x, y - mean_y);
        cov   += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some(cov / (var_x.sqrt() * var_y.sqrt()))
}

pub fn correlation_matrix(columns: &[(&str, &[f64])]) -> CorrelationMatrix {
    let values = columns.iter()
        .map(|(_, xs)| columns.iter().map(|(_, ys)| pearson(xs, ys)).collect())
        .collect();
    CorrelationMatrix {
        columns: columns.iter().map(|(name, _)| (*name).to_string()).collect(),
        values
    }
}
