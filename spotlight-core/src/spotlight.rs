use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::bookmarks::BookmarkStore;
use crate::client::{build_http_client, UnsplashClient};
use crate::config::SpotlightConfig;
use crate::download::{content_type, download_file_name, write_stream};
use crate::error::SpotlightError;
use crate::models::{Photo, Photographer};
use crate::state::{total_pages, AppState, PhotographerView, SearchView, START_PAGE};

/// Fetches from the photo service into an owned [`AppState`] and keeps the
/// bookmark list in sync with durable storage.
#[derive(Debug)]
pub struct Spotlight {
    client: UnsplashClient,
    bookmarks: BookmarkStore,
    state: AppState,
    per_page: u32,
    random_count: u32,
}

impl Spotlight {
    pub fn new(client: UnsplashClient, bookmarks: BookmarkStore, config: &SpotlightConfig) -> Self {
        Self {
            client,
            bookmarks,
            state: AppState::default(),
            per_page: config.per_page.max(1),
            random_count: config.random_count,
        }
    }

    /// Validates `config`, builds the HTTP client and hydrates bookmarks from
    /// `data_dir`.
    pub async fn open(config: &SpotlightConfig, data_dir: impl AsRef<Path>) -> Result<Self, SpotlightError> {
        config.validate()?;
        let http = build_http_client(config)?;
        let client = UnsplashClient::new(http, config)?;
        let bookmarks = BookmarkStore::load_from(BookmarkStore::default_path(data_dir)).await;
        info!(count = bookmarks.len(), "bookmarks loaded");
        Ok(Self::new(client, bookmarks, config))
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn bookmarks(&self) -> &[Photo] {
        self.bookmarks.list()
    }

    pub fn is_bookmarked(&self, id: &str) -> bool {
        self.bookmarks.contains(id)
    }

    /// Loads one photo into `current_photo`. Failures are logged and leave
    /// the previous photo in place.
    pub async fn load_photo(&mut self, id: &str) -> Result<Photo, SpotlightError> {
        match self.client.get_photo(id).await {
            Ok(photo) => {
                let photo = self.annotate_one(photo);
                self.state.current_photo = Some(photo.clone());
                Ok(photo)
            }
            Err(e) => {
                warn!(photo_id = id, error = %e, "failed to load photo");
                Err(e)
            }
        }
    }

    pub async fn get_random_photos(&mut self) -> Result<&[Photo], SpotlightError> {
        let photos = self.client.random_photos(self.random_count).await?;
        let photos = self.annotate(photos);
        info!(count = photos.len(), "random photos fetched");
        self.state.all_fetched_photos.extend(photos.iter().cloned());
        self.state.random_photos = photos;
        Ok(self.state.random_photos.as_slice())
    }

    /// Searches photos. An empty result set is an error and leaves the
    /// previous search untouched.
    pub async fn search_photos(&mut self, query: &str, page: u32) -> Result<&SearchView, SpotlightError> {
        let page = page.max(START_PAGE);
        let response = self.client.search_photos(query, page, self.per_page).await?;
        if response.results.is_empty() {
            debug!(query, page, "search returned no results");
            return Err(SpotlightError::EmptyResult {
                query: query.to_string(),
            });
        }
        let results = self.annotate(response.results);
        info!(query, page, total = response.total, "search results fetched");
        self.state.all_fetched_photos.extend(results.iter().cloned());
        let search = &mut self.state.search;
        search.results = results;
        search.total_pages = response.total_pages;
        search.query = query.to_string();
        search.current_page = page;
        Ok(&self.state.search)
    }

    pub async fn search_next_page(&mut self) -> Result<&SearchView, SpotlightError> {
        if !self.state.search.is_active() {
            return Err(SpotlightError::NoActiveSearch);
        }
        let page = self.state.search.next_page().ok_or(SpotlightError::NoMorePages)?;
        let query = self.state.search.query.clone();
        self.search_photos(&query, page).await
    }

    /// Loads the first page (`fresh`) or the page after the last one loaded
    /// for the current photographer. Failures are logged and leave the view
    /// untouched.
    pub async fn get_photographer_photos(&mut self, fresh: bool) -> Result<&PhotographerView, SpotlightError> {
        if let Err(e) = self.load_photographer_page(fresh).await {
            if matches!(e, SpotlightError::NoMorePages) {
                debug!("photographer has no more pages");
            } else {
                warn!(error = %e, "failed to load photographer photos");
            }
            return Err(e);
        }
        Ok(&self.state.photographer)
    }

    async fn load_photographer_page(&mut self, fresh: bool) -> Result<(), SpotlightError> {
        let view = &self.state.photographer;
        let username = view
            .username()
            .ok_or(SpotlightError::NoPhotographerSelected)?
            .to_string();
        let page = if fresh {
            START_PAGE
        } else {
            view.next_page().ok_or(SpotlightError::NoMorePages)?
        };

        let result = self.client.user_photos(&username, page, self.per_page).await?;
        let photos = self.annotate(result.photos);
        let pages = total_pages(result.total, self.per_page);
        debug!(username = %username, page, total_pages = pages, "photographer photos fetched");

        let view = &mut self.state.photographer;
        view.photos = photos;
        view.total_pages = pages;
        view.current_page = page;
        Ok(())
    }

    /// Selects a photographer, using the cached profile when there is one,
    /// and refreshes their first page of photos.
    pub async fn get_photographer_profile(&mut self, username: &str) -> Result<Photographer, SpotlightError> {
        let cached = self.state.find_photographer(username).cloned();
        let profile = match cached {
            Some(known) => {
                debug!(username, "photographer profile cache hit");
                known
            }
            None => {
                let fetched = self.client.user_profile(username).await?;
                self.state.known_photographers.push(fetched.clone());
                fetched
            }
        };
        self.state.photographer.select(profile.clone());
        if self.get_photographer_photos(true).await.is_err() {
            debug!(username, "profile selected without photos");
        }
        Ok(profile)
    }

    /// Saves the full-resolution image of photo `id` into `dir` and reports
    /// the download to the service. Returns the written file.
    pub async fn download_photo(&self, id: &str, dir: impl AsRef<Path>) -> Result<PathBuf, SpotlightError> {
        let photo = self.client.get_photo(id).await?;
        let response = self.client.fetch_image(&photo.urls.full).await?;
        let name = download_file_name(&photo, content_type(&response).as_deref());
        let path = dir.as_ref().join(name);
        let written = write_stream(response, &path).await?;
        info!(photo_id = id, bytes = written, path = %path.display(), "photo downloaded");

        let location = &photo.links.download_location;
        if location.is_empty() {
            warn!(photo_id = id, "photo has no download location to report");
        } else if let Err(e) = self.client.track_download(location).await {
            warn!(photo_id = id, error = %e, "failed to report download");
        }
        Ok(path)
    }

    /// Removes the bookmark on `id` if present, adds it otherwise, then
    /// persists the list. Returns whether the photo is now bookmarked.
    pub async fn switch_bookmark(&mut self, id: &str) -> Result<bool, SpotlightError> {
        let bookmarked = if self.bookmarks.contains(id) {
            self.bookmarks.remove(id);
            false
        } else {
            let fetched = self.state.find_fetched(id).cloned();
            let photo = match fetched {
                Some(photo) => photo,
                None => self.load_photo(id).await?,
            };
            self.bookmarks.add(photo);
            true
        };
        self.state.set_bookmark_flag(id, bookmarked);
        self.bookmarks.persist().await?;
        info!(photo_id = id, bookmarked, "bookmark switched");
        Ok(bookmarked)
    }

    fn annotate_one(&self, mut photo: Photo) -> Photo {
        photo.bookmarked = self.bookmarks.contains(&photo.id);
        photo
    }

    fn annotate(&self, photos: Vec<Photo>) -> Vec<Photo> {
        let ids: HashSet<&str> = self.bookmarks.list().iter().map(|p| p.id.as_str()).collect();
        photos
            .into_iter()
            .map(|mut photo| {
                photo.bookmarked = ids.contains(photo.id.as_str());
                photo
            })
            .collect()
    }
}
