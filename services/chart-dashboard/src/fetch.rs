//!
//! src/fetch.rs  Andrew Belles  Oct 19th, 2026
//!
//! Defines the client for the chart endpoint and the slicing of
//! its envelope down to the raw items of a single category
//!

use async_trait::async_trait;
use reqwest::{Client, header, redirect, RequestBuilder};
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use crate::category::ChartCategory;
use crate::config::{ChartConfig, HttpConfig};
use crate::errors::{DashboardError, FetchError};

/// Raw, category specific object straight from the envelope
pub type RawChartItem = Value;

/// Anything that can produce the raw items of a chart. The dashboard and
/// cache only talk to this seam.
#[async_trait]
pub trait ChartSource: Send + Sync {
    async fn fetch(&self, category: ChartCategory) -> Result<Vec<RawChartItem>, FetchError>;
}

/// Client building functionality
fn client_helper(http: &HttpConfig) -> reqwest::ClientBuilder {
    let mut builder = Client::builder()
        .redirect(redirect::Policy::limited(http.max_redirects as usize));
    if let Some(timeout) = http.timeout {
        builder = builder.timeout(timeout);
    }
    if let Some(connect_timeout) = http.connect_timeout {
        builder = builder.connect_timeout(connect_timeout);
    }
    builder
}

pub fn base_client(http: &HttpConfig) -> Result<Client, DashboardError> {
    let mut h = header::HeaderMap::new();
    h.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));
    client_helper(http)
        .default_headers(h)
        .user_agent(concat!("chart-dashboard/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| DashboardError::Http(format!("build client: {e}")))
}

/// Picks `<field>.data` out of the envelope. A missing field, a missing
/// `data` key or a non-array `data` all mean "nothing to show".
pub fn extract_items(envelope: &Value, category: ChartCategory) -> Vec<RawChartItem> {
    envelope
        .get(category.api_field())
        .and_then(|section| section.get("data"))
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

#[derive(Clone, Debug)]
pub struct ChartClient {
    pub http: Client,
    pub base: Url,
    pub endpoint: String
}

impl ChartClient {
    pub fn new(http_config: &HttpConfig, cfg: &ChartConfig) ->
        Result<Self, DashboardError> {
        let http = base_client(http_config)?;
        Ok( Self {
            http,
            base: cfg.base_url.clone(),
            endpoint: cfg.endpoint.clone()
        })
    }

    /// GET {base}?endpoint=chart
    pub fn chart_request(&self) -> RequestBuilder {
        self.http.get(self.base.clone()).query(&[("endpoint", self.endpoint.as_str())])
    }
}

#[async_trait]
impl ChartSource for ChartClient {
    async fn fetch(&self, category: ChartCategory) -> Result<Vec<RawChartItem>, FetchError> {
        debug!(url = %self.base, endpoint = %self.endpoint, field = category.api_field(),
            "chart.fetch.request");

        let response = self.chart_request()
            .send()
            .await?
            .error_for_status()?;

        let status = response.status();
        let body = response.bytes().await?;
        let envelope: Value = serde_json::from_slice(&body)
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        let items = extract_items(&envelope, category);
        info!(status = %status, field = category.api_field(), items = items.len(),
            "chart.fetch");
        Ok(items)
    }
}

#[cfg(test)]
pub(crate) mod stub {
    //! Loopback HTTP server answering every connection with one canned
    //! response, enough for reqwest to exercise the real client path.

    use std::net::SocketAddr;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    pub struct StubServer {
        pub addr: SocketAddr,
        pub hits: Arc<AtomicUsize>,
        pub last_request: Arc<tokio::sync::Mutex<String>>,
    }

    impl StubServer {
        pub fn url(&self) -> url::Url {
            url::Url::parse(&format!("http://{}/", self.addr)).unwrap()
        }

        pub fn hits(&self) -> usize {
            self.hits.load(Ordering::SeqCst)
        }
    }

    pub async fn serve(status: u16, body: &str) -> StubServer {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let last_request = Arc::new(tokio::sync::Mutex::new(String::new()));
        let response = format!(
            "HTTP/1.1 {status} STUB\r\ncontent-type: application/json\r\n\
             content-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );

        let (task_hits, task_last) = (hits.clone(), last_request.clone());
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else { break };
                task_hits.fetch_add(1, Ordering::SeqCst);
                let mut buf = vec![0_u8; 4096];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                *task_last.lock().await = String::from_utf8_lossy(&buf[..n]).to_string();
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        StubServer { addr, hits, last_request }
    }

    /// A loopback address nothing listens on
    pub async fn refused_url() -> url::Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        url::Url::parse(&format!("http://{addr}/")).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::config::ChartConfig;

    fn live() -> bool {
        std::env::var("LIVE_HTTP").ok().as_deref() == Some("1")
    }

    fn client_for(base_url: Url) -> ChartClient {
        let cfg = ChartConfig { base_url, endpoint: "chart".to_string() };
        ChartClient::new(&HttpConfig::default(), &cfg).unwrap()
    }

    #[test]
    fn extract_reads_category_data() {
        let envelope = json!({
            "tracks": { "data": [ { "title": "A" }, { "title": "B" } ] },
            "albums": { "data": [ { "title": "Z" } ] }
        });
        let tracks = extract_items(&envelope, ChartCategory::Tracks);
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[1]["title"], "B");
        assert_eq!(extract_items(&envelope, ChartCategory::Albums).len(), 1);
    }

    #[test]
    fn extract_missing_shapes_are_empty() {
        let envelope = json!({
            "tracks": {},
            "albums": { "data": null },
            "artists": { "data": "oops" },
            "playlists": { "data": [] }
        });
        for category in ChartCategory::ALL {
            assert!(extract_items(&envelope, category).is_empty(), "{category:?}");
        }
        assert!(extract_items(&json!([1, 2]), ChartCategory::Tracks).is_empty());
    }

    #[test]
    fn request_carries_endpoint_query() {
        let client = client_for(Url::parse("http://127.0.0.1:8501").unwrap());
        let request = client.chart_request().build().unwrap();
        assert_eq!(request.method(), reqwest::Method::GET);
        assert_eq!(request.url().as_str(), "http://127.0.0.1:8501/?endpoint=chart");
    }

    #[tokio::test]
    async fn fetch_slices_envelope() {
        let body = json!({
            "tracks": { "data": [ { "title": "A" } ] },
            "albums": { "data": [ { "title": "Z" }, { "title": "Y" } ] }
        }).to_string();
        let server = stub::serve(200, &body).await;
        let client = client_for(server.url());

        let albums = client.fetch(ChartCategory::Albums).await.unwrap();
        assert_eq!(albums.len(), 2);
        assert_eq!(albums[0]["title"], "Z");
        assert!(server.last_request.lock().await.starts_with("GET /?endpoint=chart "));

        let podcasts = client.fetch(ChartCategory::Podcasts).await.unwrap();
        assert!(podcasts.is_empty());
    }

    #[tokio::test]
    async fn non_success_status_is_network_error() {
        let server = stub::serve(503, "{}").await;
        let client = client_for(server.url());
        let err = client.fetch(ChartCategory::Tracks).await.unwrap_err();
        assert!(matches!(err, FetchError::Network(_)), "{err:?}");
    }

    #[tokio::test]
    async fn connection_refused_is_network_error() {
        let client = client_for(stub::refused_url().await);
        let err = client.fetch(ChartCategory::Tracks).await.unwrap_err();
        assert!(matches!(err, FetchError::Network(_)), "{err:?}");
    }

    #[tokio::test]
    async fn non_json_body_is_decode_error() {
        let server = stub::serve(200, "<html>down</html>").await;
        let client = client_for(server.url());
        let err = client.fetch(ChartCategory::Tracks).await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)), "{err:?}");
    }

    #[tokio::test]
    async fn live_chart_testbench() {
        if !live() {
            eprintln!("Set LIVE_HTTP=1 to run");
            return;
        }
        let cfgs = crate::config::load_config().unwrap();
        let client = ChartClient::new(&cfgs.http, &cfgs.chart).unwrap();
        let tracks = client.fetch(ChartCategory::Tracks).await.unwrap();
        println!("tracks: {}", serde_json::to_string_pretty(&tracks).unwrap());
    }
}
