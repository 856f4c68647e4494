pub mod bookmarks;
pub mod client;
pub mod config;
pub mod download;
pub mod error;
pub mod models;
pub mod spotlight;
pub mod state;

pub use bookmarks::{BookmarkStore, BOOKMARKS_FILE};
pub use client::{build_http_client, UnsplashClient};
pub use config::SpotlightConfig;
pub use download::download_file_name;
pub use error::SpotlightError;
pub use models::{Photo, PhotoLinks, PhotoUrls, Photographer, ProfileImage, SearchResponse, UserPhotosPage};
pub use spotlight::Spotlight;
pub use state::{AppState, PhotographerView, SearchView, START_PAGE};
