use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Serialize};
use url::Url;

pub mod home;
pub mod sos;
pub mod summary;
pub mod tracking;

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("Connection Error: {0}")]
    Connection(#[from] reqwest::Error),
    #[error("Unexpected response `{0}`")]
    Request(StatusCode),
    #[error("Error decoding json, {0}")]
    JsonDecodeError(#[from] serde_json::Error),
    #[error("Url parse error `{0}`")]
    ParseError(#[from] url::ParseError),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Home,
    CurrentDistance,
    SosLocation,
    Alert,
    Summarize,
    FallNotification,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Home => "api/home",
            Endpoint::CurrentDistance => "api/current-distance",
            Endpoint::SosLocation => "api/sos-location",
            Endpoint::Alert => "api/alert",
            Endpoint::Summarize => "api/summarize",
            Endpoint::FallNotification => "api/fall-notification",
        }
    }
}

/// Reads the body of a successful response and decodes it into `$generic`.
/// Any other status is returned as [`ApiError::Request`].
macro_rules! read_response_json {
    ($response:expr, $generic:ty) => {
        match $response.status() {
            status if status.is_success() => {
                let text = $response.text().await?;
                Ok(serde_json::from_str::<$generic>(&text)?)
            }
            status => Err(ApiError::Request(status)),
        }
    };
}

macro_rules! read_response_ack {
    ($response:expr) => {
        match $response.status() {
            status if status.is_success() => Ok(()),
            status => Err(ApiError::Request(status)),
        }
    };
}

/// Thin client for the FallerTrack backend. Requests are never retried.
#[derive(Debug, Clone)]
pub struct FallertrackClient {
    client: reqwest::Client,
    base_url: Url,
}

impl FallertrackClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        // trailing slash so that joining keeps any path prefix
        let base_url = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))?;
        let client = reqwest::Client::builder().build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn url(&self, endpoint: Endpoint) -> Result<Url, ApiError> {
        Ok(self.base_url.join(endpoint.path())?)
    }

    pub async fn fetch<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, ApiError> {
        let url = self.url(endpoint)?;
        log::debug!("GET {url}");
        let res = self.client.get(url).send().await?;
        log::debug!("Received response: {res:?}");
        read_response_json!(res, T)
    }

    pub async fn post<B, T>(&self, endpoint: Endpoint, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(endpoint)?;
        log::debug!("POST {url}");
        let res = self.client.post(url).json(body).send().await?;
        log::debug!("Received response: {res:?}");
        read_response_json!(res, T)
    }

    /// POST where only the status matters, the body may be empty
    pub async fn post_ack<B>(&self, endpoint: Endpoint, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(endpoint)?;
        log::debug!("POST {url}");
        let res = self.client.post(url).json(body).send().await?;
        log::debug!("Received response: {res:?}");
        read_response_ack!(res)
    }

    pub async fn delete(&self, endpoint: Endpoint) -> Result<(), ApiError> {
        let url = self.url(endpoint)?;
        log::debug!("DELETE {url}");
        let res = self.client.delete(url).send().await?;
        log::debug!("Received response: {res:?}");
        read_response_ack!(res)
    }
}
