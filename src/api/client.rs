use std::path::PathBuf;

use reqwest::{header, Client, StatusCode};

use super::types::ScheduleData;

/// Where the schedule document lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleSource {
    Url(String),
    File(PathBuf),
}

impl ScheduleSource {
    /// Anything starting with http:// or https:// is fetched over the network,
    /// everything else is read from disk
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        let lower = input.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            ScheduleSource::Url(input.to_string())
        } else {
            ScheduleSource::File(PathBuf::from(input))
        }
    }
}

impl std::fmt::Display for ScheduleSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleSource::Url(url) => f.write_str(url),
            ScheduleSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("could not create HTTP client")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered {status}")]
    Status { url: String, status: StatusCode },
    #[error("could not read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("schedule document is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Fetches the schedule document once at startup
pub struct ScheduleClient {
    client: Client,
    source: ScheduleSource,
}

impl ScheduleClient {
    pub fn new(source: ScheduleSource) -> Result<Self, SourceError> {
        let client = Client::builder().build().map_err(SourceError::Client)?;
        Ok(Self { client, source })
    }

    pub async fn fetch(&self) -> Result<ScheduleData, SourceError> {
        let body = match &self.source {
            ScheduleSource::Url(url) => self.get(url).await?,
            ScheduleSource::File(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|source| SourceError::Io { path: path.clone(), source })?,
        };
        parse_schedule(&body)
    }

    async fn get(&self, url: &str) -> Result<String, SourceError> {
        let request_error = |source| SourceError::Request { url: url.to_string(), source };

        let response = self.client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(request_error)?;

        if !response.status().is_success() {
            return Err(SourceError::Status {
                url: url.to_string(),
                status: response.status(),
            });
        }

        response.text().await.map_err(request_error)
    }
}

pub fn parse_schedule(body: &str) -> Result<ScheduleData, SourceError> {
    Ok(serde_json::from_str(body)?)
}
