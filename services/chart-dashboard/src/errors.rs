//!
//! src/errors.rs  Andrew Belles  Oct 19th, 2026
//!
//! Defines enums and methods of error conversion
//! for errors the dashboard uses
//!
//!

use thiserror::Error;

/// Failures at the fetcher boundary. The dashboard surfaces these as a
/// notice and treats the category as empty, they never escape the pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("decode error: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else {
            FetchError::Network(e.to_string())
        }
    }
}

/// Projection faults. Only nested lookups on track items can fail, scalar
/// fields fall back to defaults.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectError {
    #[error("item at position {position} has no `{path}`")]
    MissingNested { position: usize, path: &'static str },
}

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("config error: {0}")]
    Config(String),
    #[error("http error: {0}")]
    Http(String),
    #[error("projection error: {0}")]
    Project(#[from] ProjectError),
    #[error("serialize error: {0}")]
    Serialize(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error)
}

impl From<reqwest::Error> for DashboardError {
    fn from(e: reqwest::Error) -> Self { DashboardError::Http(e.to_string()) }
}

impl From<serde_json::Error> for DashboardError {
    fn from(e: serde_json::Error) -> Self { DashboardError::Serialize(e.to_string()) }
}
