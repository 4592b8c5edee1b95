//! HTTP fetcher for the tracking sheet page.

use anyhow::{bail, Context, Result};
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use super::{parse_tables, Table};

pub const DEFAULT_SHEET_URL: &str =
    "http://vacationwithoutacar.com/PDF/INTERIM_GVRAT_Tracking_Sheet.html";

/// Fetches the tracking sheet page
pub struct TrackingSheetFetcher {
    client: Client,
}

impl TrackingSheetFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent("racemap/0.1")
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { client })
    }

    /// Download the page body. One attempt, a non-success status is an error.
    pub async fn fetch(&self, url: &Url) -> Result<String> {
        info!("Fetching tracking sheet from {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        let status = response.status();
        if !status.is_success() {
            bail!("Tracking sheet request returned {}", status);
        }

        let body = response
            .text()
            .await
            .context("Failed to read tracking sheet body")?;
        debug!("Tracking sheet: {} bytes", body.len());
        Ok(body)
    }

    /// Download the page and extract every table on it
    pub async fn fetch_tables(&self, url: &Url) -> Result<Vec<Table>> {
        let body = self.fetch(url).await?;
        let tables = parse_tables(&body);
        info!("Found {} tables on tracking sheet", tables.len());
        Ok(tables)
    }
}
