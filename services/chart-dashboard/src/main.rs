//!
//! src/main.rs  Andrew Belles  Oct 19th, 2026
//!
//! Entry point of the top charts dashboard. Picks the categories from
//! the command line, runs each through the pipeline and prints the tables
//!
//!

mod config;
mod errors;
mod logging;

mod cache;
mod category;
mod charts;
mod dashboard;
mod fetch;
mod project;
mod table;

use std::io::Write;

use clap::{Parser, ValueEnum};
use serde_json::json;

use crate::category::ChartCategory;
use crate::dashboard::{ChartView, Dashboard, DashboardView};
use crate::errors::DashboardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json
}

#[derive(Parser, Debug)]
#[command(name = "chart-dashboard")]
#[command(version, about = "Explore the top tracks, albums, artists, playlists and podcasts charts")]
struct Cli {
    /// Chart category, repeat for several sections
    #[arg(short, long = "category", value_enum, default_values_t = [ChartCategory::Tracks])]
    categories: Vec<ChartCategory>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Also emit the series behind the track charts
    #[arg(long)]
    charts: bool
}

fn render(view: &ChartView, cli: &Cli) -> Result<String, DashboardError> {
    let charts = if cli.charts { view.charts.as_ref() } else { None };
    match cli.format {
        OutputFormat::Table => {
            let mut out = view.table.render_text();
            if let Some(charts) = charts {
                out.push('\n');
                out.push_str(&serde_json::to_string_pretty(charts)?);
                out.push('\n');
            }
            Ok(out)
        }
        OutputFormat::Json => {
            let mut doc = json!({
                "title": view.table.title,
                "category": view.table.category,
                "columns": view.table.columns,
                "rows": view.table.to_records(),
                "fetched_at": view.fetched_at,
            });
            if let Some(charts) = charts {
                doc["charts"] = serde_json::to_value(charts)?;
            }
            Ok(serde_json::to_string_pretty(&doc)? + "\n")
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), DashboardError> {
    let cli  = Cli::parse();
    let cfgs = config::load_config()?;
    let _guard = logging::init_logging(&cfgs.logging)?;

    tracing::info!(
        service="chart-dashboard",
        version=%env!("CARGO_PKG_VERSION"),
        base_url=%cfgs.chart.base_url,
        "starting"
    );

    let client = fetch::ChartClient::new(&cfgs.http, &cfgs.chart)?;
    let mut dashboard = Dashboard::new(client, cfgs.cache.policy);

    let mut stdout = std::io::stdout().lock();
    for (i, category) in cli.categories.iter().copied().enumerate() {
        if i > 0 {
            writeln!(stdout)?;
        }
        match dashboard.load(category).await? {
            DashboardView::Halted(notice) => {
                eprintln!("{}", notice.message());
            }
            DashboardView::Ready(view) => {
                if cli.charts && view.charts.is_none() {
                    eprintln!("Los gráficos solo están disponibles para {}.",
                        ChartCategory::Tracks.label());
                }
                stdout.write_all(render(&view, &cli)?.as_bytes())?;
            }
        }
    }
    stdout.flush()?;

    tracing::info!(
        cache_hits = dashboard.cache().hits(),
        cache_misses = dashboard.cache().misses(),
        "exit"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults_to_tracks_table() {
        let cli = Cli::try_parse_from(["chart-dashboard"]).unwrap();
        assert_eq!(cli.categories, vec![ChartCategory::Tracks]);
        assert_eq!(cli.format, OutputFormat::Table);
        assert!(!cli.charts);
    }

    #[test]
    fn cli_accepts_repeated_categories() {
        let cli = Cli::try_parse_from([
            "chart-dashboard", "-c", "albums", "--category", "artists", "--format", "json"
        ]).unwrap();
        assert_eq!(cli.categories, vec![ChartCategory::Albums, ChartCategory::Artists]);
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(Cli::try_parse_from(["chart-dashboard", "-c", "videos"]).is_err());
    }

    #[test]
    fn json_render_includes_charts_on_request() {
        let rows = project::project(ChartCategory::Tracks, &[serde_json::json!({
            "title": "A", "artist": { "name": "X" }, "album": { "title": "Y" }, "duration": 200
        })]).unwrap();
        let tracks: Vec<_> = rows.iter().filter_map(|r| match r {
            project::ChartRow::Track(t) => Some(t.clone()),
            _ => None
        }).collect();
        let view = ChartView {
            table: table::ChartTable::build(ChartCategory::Tracks, &rows),
            charts: Some(charts::TrackCharts::from_rows(&tracks)),
            fetched_at: None,
        };

        let cli = Cli::try_parse_from(["chart-dashboard", "--format", "json", "--charts"]).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&render(&view, &cli).unwrap()).unwrap();
        assert_eq!(doc["title"], "Top Canciones");
        assert_eq!(doc["category"], "tracks");
        assert_eq!(doc["rows"][0]["Duración (s)"], 200);
        assert_eq!(doc["charts"]["duration_histogram"][0]["count"], 1);

        let cli = Cli::try_parse_from(["chart-dashboard", "--format", "json"]).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&render(&view, &cli).unwrap()).unwrap();
        assert!(doc.get("charts").is_none());
    }
}
