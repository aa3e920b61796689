use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use log::info;
use reqwest::{blocking::Client, header::USER_AGENT};

use crate::{
    config::{DATA_DIR, TRIP_DATA_BASE_URL},
    error::FetchError,
};

const AGENT: &str = concat!("taxi_loader/", env!("CARGO_PKG_VERSION"));

/// Downloads monthly yellow taxi parquet files into a local cache directory.
///
/// A file that is already present in the cache is never downloaded again, and
/// its contents are not checked.
pub struct Fetcher {
    client: Client,
    base_url: String,
    data_dir: PathBuf,
}

impl Fetcher {
    pub fn new(client: Client, base_url: impl Into<String>, data_dir: impl Into<PathBuf>) -> Self {
        Fetcher {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            data_dir: data_dir.into(),
        }
    }

    /// Fetcher against the public TLC host, caching under `data/yellow_taxi`.
    pub fn with_defaults() -> Result<Self, FetchError> {
        Ok(Self::new(build_client()?, TRIP_DATA_BASE_URL, DATA_DIR))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Return the parquet filename for the month.  Does not check if the file exists.
    pub fn local_path(&self, month: &str) -> PathBuf {
        self.data_dir.join(format!("yellow_tripdata_{}.parquet", month))
    }

    pub fn url(&self, month: &str) -> String {
        format!(
            "{}/trip-data/yellow_tripdata_{}.parquet",
            self.base_url, month
        )
    }

    /// Make sure the file for this month is on disk and return its path.
    ///
    /// The response body is held in memory until the request has fully
    /// succeeded, so a failed download never leaves a file behind.
    pub fn fetch(&self, month: &str) -> Result<PathBuf, FetchError> {
        let local_path = self.local_path(month);
        if local_path.exists() {
            info!(
                "File {} already exists. Skipping download.",
                local_path.display()
            );
            return Ok(local_path);
        }

        let url = self.url(month);
        info!("Downloading {} to {}", month, local_path.display());
        let response = self
            .client
            .get(&url)
            .header(USER_AGENT, AGENT)
            .send()
            .map_err(|source| FetchError::Request {
                url: url.clone(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Transfer { url, status });
        }
        let body = response.bytes().map_err(|source| FetchError::Request {
            url: url.clone(),
            source,
        })?;

        if let Some(dir) = local_path.parent() {
            fs::create_dir_all(dir).map_err(|source| FetchError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        fs::write(&local_path, &body).map_err(|source| FetchError::Io {
            path: local_path.clone(),
            source,
        })?;
        info!("Saved {} to {}", month, local_path.display());

        Ok(local_path)
    }
}

/// Blocking client with the default 30s total timeout switched off, a full
/// month of trips is tens of megabytes.
pub fn build_client() -> Result<Client, FetchError> {
    Client::builder()
        .timeout(None::<Duration>)
        .build()
        .map_err(|source| FetchError::Request {
            url: TRIP_DATA_BASE_URL.to_string(),
            source,
        })
}
