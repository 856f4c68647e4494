use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A photo as returned by the photo service, plus the locally attached
/// bookmark flag.
///
/// Fields this crate does not use are kept in `extra` so that a bookmarked
/// photo written to disk and read back is the same record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Photo {
    pub id: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub blur_hash: Option<String>,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub alt_description: Option<String>,
    #[serde(default)]
    pub urls: PhotoUrls,
    #[serde(default)]
    pub links: PhotoLinks,
    #[serde(default)]
    pub user: Option<Photographer>,
    // Older bookmark files used `bookmark`
    #[serde(default, alias = "bookmark")]
    pub bookmarked: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Photo {
    /// Minimal record, mostly useful for tests and placeholders.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            created_at: None,
            width: 0,
            height: 0,
            color: None,
            blur_hash: None,
            likes: 0,
            description: None,
            alt_description: None,
            urls: PhotoUrls::default(),
            links: PhotoLinks::default(),
            user: None,
            bookmarked: false,
            extra: Map::new(),
        }
    }

    pub fn with_bookmark(mut self, bookmarked: bool) -> Self {
        self.bookmarked = bookmarked;
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhotoUrls {
    #[serde(default)]
    pub raw: String,
    #[serde(default)]
    pub full: String,
    #[serde(default)]
    pub regular: String,
    #[serde(default)]
    pub small: String,
    #[serde(default)]
    pub thumb: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhotoLinks {
    #[serde(default, rename = "self")]
    pub api: String,
    #[serde(default)]
    pub html: String,
    #[serde(default)]
    pub download: String,
    #[serde(default)]
    pub download_location: String,
}

/// A content-contributing account on the photo service, identified by
/// `username`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Photographer {
    #[serde(default)]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub portfolio_url: Option<String>,
    #[serde(default)]
    pub total_photos: u64,
    #[serde(default)]
    pub total_likes: u64,
    #[serde(default)]
    pub profile_image: Option<ProfileImage>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Photographer {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            username: username.into(),
            name: None,
            bio: None,
            location: None,
            portfolio_url: None,
            total_photos: 0,
            total_likes: 0,
            profile_image: None,
            extra: Map::new(),
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.username)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileImage {
    #[serde(default)]
    pub small: String,
    #[serde(default)]
    pub medium: String,
    #[serde(default)]
    pub large: String,
}

/// Body of `GET /search/photos`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub results: Vec<Photo>,
}

/// One page of a photographer's photos together with the total reported by
/// the service.
#[derive(Debug, Clone)]
pub struct UserPhotosPage {
    pub photos: Vec<Photo>,
    pub total: u64,
}

/// Error payload returned by the photo service on non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub errors: Vec<String>,
}
