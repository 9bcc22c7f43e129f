use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::model::{self, Hotel};

/// Resource fetched relative to the dashboard's base URL.
pub const DATA_PATH: &str = "hotels.json";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Url(String),
}

impl DataSource {
    pub fn describe(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Url(base) => resolve_url(base)
                .map(|u| u.to_string())
                .unwrap_or_else(|_| base.clone()),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("invalid URL: {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build HTTP client: {source}")]
    HttpClientBuild {
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("failed to read data file: {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode hotel data from {origin}: {source}")]
    Decode {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Joins [`DATA_PATH`] onto `base`. A base without a trailing slash is
/// treated as a directory, so `https://host/app` resolves to
/// `https://host/app/hotels.json`.
pub fn resolve_url(base: &str) -> Result<reqwest::Url, LoadError> {
    let mut base = base.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    reqwest::Url::parse(&base)
        .and_then(|u| u.join(DATA_PATH))
        .map_err(|source| LoadError::InvalidUrl {
            url: base.clone(),
            source,
        })
}

pub async fn load(source: &DataSource, timeout: Duration) -> Result<Vec<Hotel>, LoadError> {
    match source {
        DataSource::File(path) => {
            let raw = tokio::fs::read(path)
                .await
                .map_err(|source| LoadError::FileRead {
                    path: path.display().to_string(),
                    source,
                })?;
            model::parse_hotels(&raw).map_err(|source| LoadError::Decode {
                origin: path.display().to_string(),
                source,
            })
        }
        DataSource::Url(base) => fetch(base, timeout).await,
    }
}

async fn fetch(base: &str, timeout: Duration) -> Result<Vec<Hotel>, LoadError> {
    let url = resolve_url(base)?;
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|source| LoadError::HttpClientBuild { source })?;
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|source| LoadError::Request {
            url: url.to_string(),
            source,
        })?;
    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    let body = response
        .bytes()
        .await
        .map_err(|source| LoadError::Request {
            url: url.to_string(),
            source,
        })?;
    model::parse_hotels(&body).map_err(|source| LoadError::Decode {
        origin: url.to_string(),
        source,
    })
}

/// Load once; any failure is logged and replaced by an empty collection.
pub async fn load_or_empty(source: &DataSource, timeout: Duration) -> Vec<Hotel> {
    match load(source, timeout).await {
        Ok(hotels) => {
            log::info!(
                "loaded {} hotels from {}",
                hotels.len(),
                source.describe()
            );
            hotels
        }
        Err(e) => {
            log::error!("error loading hotels: {e}");
            Vec::new()
        }
    }
}

/// Where the session's collection is in its load cycle.
#[derive(Clone, Debug, Default)]
pub enum LoadState {
    #[default]
    Pending,
    Ready(Arc<[Hotel]>),
    /// The load failed; the error was logged and the dashboard renders empty.
    Empty,
    /// A manual reload is in flight; the previous records stay on screen.
    Refreshing(Arc<[Hotel]>),
}

impl LoadState {
    pub fn hotels(&self) -> Arc<[Hotel]> {
        match self {
            Self::Ready(hotels) | Self::Refreshing(hotels) => hotels.clone(),
            Self::Pending | Self::Empty => Arc::from(Vec::new()),
        }
    }

    pub fn records(&self) -> &[Hotel] {
        match self {
            Self::Ready(hotels) | Self::Refreshing(hotels) => &hotels[..],
            Self::Pending | Self::Empty => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Pending | Self::Refreshing(_))
    }

    /// Starts a reload. Returns `false`, leaving the state untouched, while
    /// another load is still outstanding.
    pub fn begin_refresh(&mut self) -> bool {
        if self.is_loading() {
            return false;
        }
        *self = Self::Refreshing(self.hotels());
        true
    }

    pub fn finish(&mut self, result: Result<Vec<Hotel>, LoadError>) {
        *self = match result {
            Ok(hotels) => {
                log::info!("loaded {} hotels", hotels.len());
                Self::Ready(Arc::from(hotels))
            }
            Err(e) => {
                log::error!("error loading hotels: {e}");
                Self::Empty
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn url_resolution_appends_data_path() {
        assert_eq!(
            resolve_url("http://localhost:3000").unwrap().as_str(),
            "http://localhost:3000/hotels.json"
        );
        assert_eq!(
            resolve_url("https://example.com/dash/").unwrap().as_str(),
            "https://example.com/dash/hotels.json"
        );
        assert!(matches!(
            resolve_url("not a url"),
            Err(LoadError::InvalidUrl {
                source: url::ParseError::RelativeUrlWithoutBase,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn file_source_loads_records() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"hotel_name": "Grand", "google_place_id": "p1", "google_rating": 4.2}}]"#
        )
        .unwrap();
        let source = DataSource::File(file.path().to_path_buf());
        let hotels = load(&source, Duration::from_secs(1)).await.unwrap();
        assert_eq!(hotels.len(), 1);
        assert_eq!(hotels[0].google_rating, Some(4.2));
    }

    #[tokio::test]
    async fn failures_fall_back_to_empty() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let broken = DataSource::File(file.path().to_path_buf());
        assert!(matches!(
            load(&broken, Duration::from_secs(1)).await,
            Err(LoadError::Decode { .. })
        ));
        assert!(load_or_empty(&broken, Duration::from_secs(1))
            .await
            .is_empty());

        let missing = DataSource::File(PathBuf::from("/nonexistent/hotels.json"));
        assert!(load_or_empty(&missing, Duration::from_secs(1))
            .await
            .is_empty());
    }

    #[test]
    fn overlapping_refresh_is_ignored() {
        let mut state = LoadState::default();
        assert!(!state.begin_refresh());

        state.finish(Ok(vec![Hotel::default()]));
        assert!(state.begin_refresh());
        assert_eq!(state.hotels().len(), 1);
        assert!(!state.begin_refresh());

        state.finish(Err(LoadError::Status {
            url: "http://x/hotels.json".into(),
            status: 500,
        }));
        assert!(matches!(state, LoadState::Empty));
        assert!(state.hotels().is_empty());
    }
}
