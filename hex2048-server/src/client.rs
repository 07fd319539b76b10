//! Clients for the spawn API
//!
//! `HttpSource` talks to a running spawn server over the network.
//! `RouterSource` sends the same requests through the router without opening
//! a socket, so a local game speaks exactly the wire format a remote one does.

use std::fmt::Display;
use std::time::Duration;

use anyhow::Context;
use axum::body::Body;
use axum::http::{header, Request};
use axum::Router;
use hex2048_core::{TileRecord, TileSource};
use tower::ServiceExt;

use crate::{create_router, create_state, ServerConfig};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

// ============================================================================
// NETWORK CLIENT
// ============================================================================

/// Tile source posting to `{base_url}/api/spawn/{side}`
pub struct HttpSource {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let base_url = base_url.trim_end_matches('/');
        let parsed = reqwest::Url::parse(base_url)
            .with_context(|| format!("Invalid spawn server URL: {base_url}"))?;
        if parsed.scheme() != "http" {
            anyhow::bail!("Spawn server URL must use http: {base_url}");
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl TileSource for HttpSource {
    fn request(
        &mut self,
        side_length: u32,
        tiles_json: &str,
    ) -> anyhow::Result<Option<Vec<TileRecord>>> {
        let url = format!("{}/api/spawn/{side_length}", self.base_url);
        let response = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(tiles_json.to_owned())
            .send()
            .with_context(|| format!("Spawn request to {url} failed"))?;

        let status = response.status();
        let body = response
            .bytes()
            .context("Failed to read spawn response")?;
        decode_response(status.is_success(), status, &body)
    }
}

// ============================================================================
// IN-PROCESS CLIENT
// ============================================================================

/// Tile source that answers through the spawn route
pub struct RouterSource {
    runtime: tokio::runtime::Runtime,
    router: Router,
}

impl RouterSource {
    pub fn new(config: &ServerConfig) -> anyhow::Result<Self> {
        let state = create_state(config)?;
        let router = create_router(config, state);
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to build runtime for the spawn client")?;

        Ok(Self { runtime, router })
    }
}

impl TileSource for RouterSource {
    fn request(
        &mut self,
        side_length: u32,
        tiles_json: &str,
    ) -> anyhow::Result<Option<Vec<TileRecord>>> {
        let request = Request::builder()
            .method("POST")
            .uri(format!("/api/spawn/{side_length}"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(tiles_json.to_owned()))?;
        let router = self.router.clone();

        self.runtime.block_on(async move {
            let response = router.oneshot(request).await?;
            let status = response.status();
            let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
            decode_response(status.is_success(), status, &body)
        })
    }
}

// ============================================================================
// HELPERS
// ============================================================================

fn decode_response(
    success: bool,
    status: impl Display,
    body: &[u8],
) -> anyhow::Result<Option<Vec<TileRecord>>> {
    if !success {
        anyhow::bail!(
            "Spawn service answered {status}: {}",
            String::from_utf8_lossy(body)
        );
    }

    serde_json::from_slice(body).context("Malformed spawn response")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{serve, MAX_SIDE};

    fn config() -> ServerConfig {
        ServerConfig {
            seed: Some(3),
            ..Default::default()
        }
    }

    /// Serve the API on an ephemeral port in a background thread
    fn start_server(config: ServerConfig) -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.set_nonblocking(true).unwrap();
        let addr = listener.local_addr().unwrap();

        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).unwrap();
                serve(listener, &config).await.unwrap();
            });
        });

        format!("http://{addr}")
    }

    #[test]
    fn test_router_source_opening() {
        let mut source = RouterSource::new(&config()).unwrap();
        let granted = source.request(3, "[]").unwrap().unwrap();
        assert_eq!(granted.len(), 3);
    }

    #[test]
    fn test_router_source_surfaces_rejections() {
        let mut source = RouterSource::new(&config()).unwrap();
        let err = source.request(0, "[]").unwrap_err();
        assert!(err.to_string().contains("400"));
    }

    #[test]
    fn test_http_source_matches_router_source() {
        let url = start_server(config());
        let mut remote = HttpSource::new(&format!("{url}/")).unwrap();
        let mut local = RouterSource::new(&config()).unwrap();
        assert_eq!(remote.base_url(), url);

        let opening = remote.request(3, "[]").unwrap();
        assert_eq!(opening, local.request(3, "[]").unwrap());
        assert_eq!(opening.map(|tiles| tiles.len()), Some(3));
    }

    #[test]
    fn test_http_source_surfaces_rejections() {
        let url = start_server(config());
        let mut source = HttpSource::new(&url).unwrap();

        let err = source.request(0, "[]").unwrap_err();
        assert!(err.to_string().contains("400"));
        let err = source.request(MAX_SIDE + 1, "[]").unwrap_err();
        assert!(err.to_string().contains("400"));
    }

    #[test]
    fn test_http_source_unreachable_server() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let mut source = HttpSource::new(&format!("http://{addr}")).unwrap();
        assert!(source.request(3, "[]").is_err());
    }

    #[test]
    fn test_http_source_rejects_bad_urls() {
        assert!(HttpSource::new("not a url").is_err());
        assert!(HttpSource::new("ftp://localhost:13337").is_err());
    }
}
