use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{redirect, Client, ClientBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::SpotlightConfig;
use crate::error::SpotlightError;
use crate::models::{ApiErrorBody, Photo, Photographer, SearchResponse, UserPhotosPage};

const ACCEPT_VERSION: &str = "Accept-Version";
const TOTAL_HEADER: &str = "x-total";

/// Builds the shared HTTP client with the timeout from `config`.
pub fn build_http_client(config: &SpotlightConfig) -> Result<Client, SpotlightError> {
    let client = ClientBuilder::new()
        .redirect(redirect::Policy::limited(5))
        .user_agent(concat!("Spotlight/", env!("CARGO_PKG_VERSION")))
        .timeout(config.request_timeout())
        .build()?;
    Ok(client)
}

/// Thin client over the Unsplash REST API.
#[derive(Clone)]
pub struct UnsplashClient {
    http: Client,
    base_url: Url,
    auth: String,
}

impl std::fmt::Debug for UnsplashClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnsplashClient")
            .field("base_url", &self.base_url.as_str())
            .field("auth", &"<redacted>")
            .finish()
    }
}

impl UnsplashClient {
    pub fn new(http: Client, config: &SpotlightConfig) -> Result<Self, SpotlightError> {
        let base_url = Url::parse(&config.api_base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(SpotlightError::Config(format!(
                "api base url {} cannot carry a path",
                config.api_base_url
            )));
        }
        Ok(Self {
            http,
            base_url,
            auth: format!("Client-ID {}", config.access_key),
        })
    }

    pub async fn get_photo(&self, id: &str) -> Result<Photo, SpotlightError> {
        let url = self.endpoint(&["photos", id])?;
        self.get_json(url).await
    }

    pub async fn random_photos(&self, count: u32) -> Result<Vec<Photo>, SpotlightError> {
        let mut url = self.endpoint(&["photos", "random"])?;
        url.query_pairs_mut()
            .append_pair("count", &count.to_string());
        self.get_json(url).await
    }

    pub async fn search_photos(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
    ) -> Result<SearchResponse, SpotlightError> {
        let mut url = self.endpoint(&["search", "photos"])?;
        url.query_pairs_mut()
            .append_pair("query", query)
            .append_pair("page", &page.to_string())
            .append_pair("per_page", &per_page.to_string());
        self.get_json(url).await
    }

    pub async fn user_profile(&self, username: &str) -> Result<Photographer, SpotlightError> {
        let url = self.endpoint(&["users", username])?;
        self.get_json(url).await
    }

    /// Fetches one page of a user's photos. The total number of photos is
    /// read from the `X-Total` response header.
    pub async fn user_photos(
        &self,
        username: &str,
        page: u32,
        per_page: u32,
    ) -> Result<UserPhotosPage, SpotlightError> {
        let mut url = self.endpoint(&["users", username, "photos"])?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("per_page", &per_page.to_string());
        let response = self.send_authorized(url).await?;
        let total = response
            .headers()
            .get(TOTAL_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<u64>().ok());
        let photos: Vec<Photo> = response.json().await?;
        let total = total.unwrap_or(photos.len() as u64);
        Ok(UserPhotosPage { photos, total })
    }

    /// Reports a download to the service, as its API guidelines require.
    /// Credentials are only sent to the configured API origin.
    pub async fn track_download(&self, download_location: &str) -> Result<(), SpotlightError> {
        let url = Url::parse(download_location)?;
        if url.origin() != self.base_url.origin() {
            return Err(SpotlightError::ForeignOrigin {
                url: url.to_string(),
            });
        }
        self.send_authorized(url).await?;
        Ok(())
    }

    /// Requests the image bytes behind `url`. Image URLs are served by a CDN
    /// and are requested without credentials.
    pub async fn fetch_image(&self, url: &str) -> Result<Response, SpotlightError> {
        let url = Url::parse(url)?;
        debug!(%url, "fetching image");
        let response = self.http.get(url).send().await?;
        check_status(response).await
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, SpotlightError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| SpotlightError::Config("api base url cannot carry a path".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, SpotlightError> {
        let response = self.send_authorized(url).await?;
        Ok(response.json::<T>().await?)
    }

    async fn send_authorized(&self, url: Url) -> Result<Response, SpotlightError> {
        debug!(%url, "photo service request");
        let response = self
            .http
            .get(url)
            .header(AUTHORIZATION, &self.auth)
            .header(ACCEPT_VERSION, HeaderValue::from_static("v1"))
            .send()
            .await?;
        check_status(response).await
    }
}

async fn check_status(response: Response) -> Result<Response, SpotlightError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(SpotlightError::Api {
        status: status.as_u16(),
        message: error_message(&body, status.canonical_reason()),
    })
}

fn error_message(body: &str, reason: Option<&str>) -> String {
    let parsed = serde_json::from_str::<ApiErrorBody>(body).unwrap_or_default();
    if !parsed.errors.is_empty() {
        return parsed.errors.join("; ");
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    reason.unwrap_or("unknown error").to_string()
}
