use url::Url;
use std::time;
use crate::errors::DashboardError;

/// Constants for Chart Config
pub const CHART_BASE_URL: &str = "http://34.176.73.40:8501";
pub const CHART_ENDPOINT: &str = "chart";

/// Constants for HTTP Config
pub const HTTP_TIMEOUT: u64 = 8000;
pub const HTTP_CONNECT_TIMEOUT: u64 = 2000;
pub const HTTP_MAX_REDIRECTS: u8 = 4;

/// Wrapper over env::var that treats blank values as unset
fn env_opt(s: &str) -> Option<String> {
    match std::env::var(s) {
        Ok(v) if !v.trim().is_empty() => Some(v.trim().to_string()),
        _ => None,
    }
}

/// Millisecond duration from env, 0 means no limit
fn env_millis(s: &str, default: u64) -> Result<Option<time::Duration>, DashboardError> {
    let ms = match env_opt(s) {
        Some(v) => v.parse::<u64>()
            .map_err(|e| DashboardError::Config(format!("{s} invalid: {e}")))?,
        None => default,
    };
    Ok( (ms > 0).then(|| time::Duration::from_millis(ms)) )
}

/// Ensures that url is http(s) and names a host
fn ensure_web_url(url: &Url) -> Result<(), String> {
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("URL must be http or https: {url}"));
    }
    match url.host_str() {
        Some(_) => Ok(()),
        None => Err(format!("URL missing host: {url}"))
    }
}

///
/// Configuration for the upstream chart endpoint
///
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub base_url: Url,     // http://host:port
    pub endpoint: String,  // sent as ?endpoint=...
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(CHART_BASE_URL).expect("default chart url parses"),
            endpoint: CHART_ENDPOINT.to_string(),
        }
    }
}

fn build_chart() -> Result<ChartConfig, DashboardError> {
    let base_url = env_opt("CHART_BASE_URL")
        .unwrap_or_else(|| CHART_BASE_URL.to_string());
    let base_url = Url::parse(&base_url)
        .map_err(|e| DashboardError::Config(
            format!("CHART_BASE_URL invalid {e}")
        ))?;
    ensure_web_url(&base_url).map_err(DashboardError::Config)?;

    let endpoint = env_opt("CHART_ENDPOINT")
        .unwrap_or_else(|| CHART_ENDPOINT.to_string());

    Ok( ChartConfig { base_url, endpoint } )
}

///
/// Configuration for Http timeouts, redirects. Unlike the bare upstream
/// call, timeouts are on by default (8s total, 2s connect); `None`, set via
/// `=0` in the env, restores an unbounded wait
///
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub timeout: Option<time::Duration>,
    pub connect_timeout: Option<time::Duration>,
    pub max_redirects: u8,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Some(time::Duration::from_millis(HTTP_TIMEOUT)),
            connect_timeout: Some(time::Duration::from_millis(HTTP_CONNECT_TIMEOUT)),
            max_redirects: HTTP_MAX_REDIRECTS,
        }
    }
}

fn build_http() -> Result<HttpConfig, DashboardError> {
    let timeout         = env_millis("CHART_HTTP_TIMEOUT_MS", HTTP_TIMEOUT)?;
    let connect_timeout = env_millis("CHART_HTTP_CONNECT_TIMEOUT_MS", HTTP_CONNECT_TIMEOUT)?;
    Ok( HttpConfig { timeout, connect_timeout, max_redirects: HTTP_MAX_REDIRECTS } )
}

///
/// Configuration for the per-session fetch cache
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    Session,   // never invalidated while the process lives
    Disabled
}

impl CachePolicy {
    pub fn parse(s: &str) -> Option<CachePolicy> {
        match s.to_ascii_lowercase().as_str() {
            "session"  => Some(CachePolicy::Session),
            "disabled" | "off" | "none" => Some(CachePolicy::Disabled),
            _ => None
        }
    }
}

#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub policy: CachePolicy
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { policy: CachePolicy::Session }
    }
}

fn build_cache() -> Result<CacheConfig, DashboardError> {
    let policy = match env_opt("CHART_CACHE") {
        Some(v) => CachePolicy::parse(&v).ok_or_else(|| DashboardError::Config(
            format!("CHART_CACHE must be session or disabled, got {v}")
        ))?,
        None => CachePolicy::Session,
    };
    Ok( CacheConfig { policy } )
}

///
/// Configuration for Logger
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub filter_directives: String,
    pub format: LogFormat,
    pub include_file_line: bool,
    pub include_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter_directives: "warn,chart_dashboard=info,reqwest=warn".to_string(),
            format: LogFormat::Pretty,
            include_file_line: false,
            include_target: true,
        }
    }
}

fn build_logging() -> Result<LoggingConfig, DashboardError> {
    let mut logging = LoggingConfig::default();
    if let Some(v) = env_opt("CHART_LOG_FORMAT") {
        logging.format = match v.to_ascii_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            "json"   => LogFormat::Json,
            _ => return Err(DashboardError::Config(
                format!("CHART_LOG_FORMAT must be pretty or json, got {v}")
            )),
        };
    }
    // json output is meant for collectors, keep the source location
    logging.include_file_line = logging.format == LogFormat::Json;
    Ok( logging )
}

///
/// AppConfig which holds everything the dashboard needs at start
///
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub chart: ChartConfig,
    pub http: HttpConfig,
    pub cache: CacheConfig,
    pub logging: LoggingConfig
}

///
/// Return all environment variables to caller at program start.
///
pub fn load_config() -> Result<AppConfig, DashboardError> {
    dotenvy::dotenv().ok();

    let chart   = build_chart()?;
    let http    = build_http()?;
    let cache   = build_cache()?;
    let logging = build_logging()?;

    Ok( AppConfig { chart, http, cache, logging } )
}
