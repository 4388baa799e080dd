//! HTTP-backed quote and image sources.
//!
//! Quotes come straight from the quote provider. Photos go through the
//! `fetch-unsplash` proxy so the provider credential never leaves the server.

use std::time::Duration;

use log::debug;
use serde::Deserialize;

use crate::card::{ImageRef, Quote};
use crate::loader::{ImageSource, QuoteSource};
use crate::{Error, MoodBoardConfig, Result};

fn build_client(config: &MoodBoardConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_millis(config.timeout_ms))
        .user_agent(config.user_agent.clone())
        .build()
        .map_err(|e| Error::ConfigError(format!("Failed to build HTTP client: {}", e)))
}

/// Fetches the whole quote list with a single GET.
pub struct HttpQuoteSource {
    client: reqwest::Client,
    url: String,
}

impl HttpQuoteSource {
    pub fn new(config: &MoodBoardConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config)?,
            url: config.quotes_url.clone(),
        })
    }
}

impl QuoteSource for HttpQuoteSource {
    async fn fetch_quotes(&self) -> Result<Vec<Quote>> {
        debug!("GET {}", self.url);
        let res = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::NetworkError(format!("Quote GET failed: {}", e)))?
            .error_for_status()
            .map_err(|e| Error::NetworkError(format!("Quote provider: {}", e)))?;

        res.json::<Vec<Quote>>()
            .await
            .map_err(|e| Error::NetworkError(format!("Failed to decode quotes: {}", e)))
    }
}

/// Body returned by the proxy: `{ "data": ... }` or `{ "error": "..." }`.
#[derive(Debug, Deserialize)]
struct ProxyEnvelope<T> {
    data: Option<T>,
    error: Option<String>,
}

impl<T> ProxyEnvelope<T> {
    fn into_result(self, status: reqwest::StatusCode) -> Result<T> {
        if let Some(err) = self.error {
            return Err(Error::NetworkError(format!("Proxy returned {}: {}", status, err)));
        }
        self.data
            .ok_or_else(|| Error::NetworkError(format!("Proxy returned {} without data", status)))
    }
}

/// The subset of the provider's photo object the board needs.
#[derive(Debug, Deserialize)]
struct ProviderPhoto {
    urls: PhotoUrls,
    links: PhotoLinks,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    small: String,
}

#[derive(Debug, Deserialize)]
struct PhotoLinks {
    download_location: String,
}

impl From<ProviderPhoto> for ImageRef {
    fn from(p: ProviderPhoto) -> Self {
        ImageRef {
            url: p.urls.small,
            download_location: p.links.download_location,
        }
    }
}

/// Talks to the `fetch-unsplash` proxy endpoint.
pub struct ProxyImageSource {
    client: reqwest::Client,
    proxy_url: String,
}

impl ProxyImageSource {
    pub fn new(config: &MoodBoardConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config)?,
            proxy_url: config.proxy_url.clone(),
        })
    }

    async fn call<T: serde::de::DeserializeOwned>(&self, query: &[(&str, &str)]) -> Result<T> {
        debug!("GET {} {:?}", self.proxy_url, query);
        let res = self
            .client
            .get(&self.proxy_url)
            .query(query)
            .send()
            .await
            .map_err(|e| Error::NetworkError(format!("Proxy GET failed: {}", e)))?;
        let status = res.status();
        let envelope = res
            .json::<ProxyEnvelope<T>>()
            .await
            .map_err(|e| Error::NetworkError(format!("Failed to decode proxy reply: {}", e)))?;
        envelope.into_result(status)
    }
}

impl ImageSource for ProxyImageSource {
    async fn fetch_image(&self) -> Result<ImageRef> {
        let photo: ProviderPhoto = self.call(&[("id", "image")]).await?;
        Ok(photo.into())
    }

    async fn track_download(&self, download_location: &str) -> Result<()> {
        let _: serde_json::Value = self
            .call(&[("id", "download"), ("downloadLocation", download_location)])
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_photo_maps_to_image_ref() {
        let body = r#"{"data":{"id":"abc","urls":{"small":"https://img/s.jpg","full":"x"},
            "links":{"download_location":"https://api/photos/abc/download?ixid=1"}}}"#;
        let env: ProxyEnvelope<ProviderPhoto> = serde_json::from_str(body).unwrap();
        let img: ImageRef = env.into_result(reqwest::StatusCode::OK).unwrap().into();
        assert_eq!(img.url, "https://img/s.jpg");
        assert_eq!(img.download_location, "https://api/photos/abc/download?ixid=1");
    }

    #[test]
    fn proxy_error_body_becomes_network_error() {
        let env: ProxyEnvelope<ProviderPhoto> =
            serde_json::from_str(r#"{"error":"Invalid ID"}"#).unwrap();
        let err = env.into_result(reqwest::StatusCode::NOT_FOUND).unwrap_err();
        assert!(matches!(err, Error::NetworkError(ref m) if m.contains("Invalid ID")));
    }
}
