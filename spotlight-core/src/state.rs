use serde::Serialize;

use crate::models::{Photo, Photographer};

pub const START_PAGE: u32 = 1;

/// Everything the frontend renders from. Owned by [`crate::Spotlight`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct AppState {
    pub photographer: PhotographerView,
    pub known_photographers: Vec<Photographer>,
    pub current_photo: Option<Photo>,
    pub all_fetched_photos: Vec<Photo>,
    pub random_photos: Vec<Photo>,
    pub search: SearchView,
}

/// The photographer being browsed. `current_page` is the last page loaded,
/// zero before the first load.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PhotographerView {
    pub profile: Option<Photographer>,
    pub photos: Vec<Photo>,
    pub current_page: u32,
    pub total_pages: u32,
}

impl PhotographerView {
    pub fn select(&mut self, profile: Photographer) {
        *self = Self {
            profile: Some(profile),
            ..Self::default()
        };
    }

    pub fn username(&self) -> Option<&str> {
        self.profile.as_ref().map(|profile| profile.username.as_str())
    }

    pub fn next_page(&self) -> Option<u32> {
        next_page(self.current_page, self.total_pages)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchView {
    pub query: String,
    pub results: Vec<Photo>,
    pub current_page: u32,
    pub total_pages: u32,
}

impl SearchView {
    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
    }

    pub fn next_page(&self) -> Option<u32> {
        if !self.is_active() {
            return None;
        }
        next_page(self.current_page, self.total_pages)
    }
}

impl AppState {
    /// Finds an already fetched copy of a photo, so bookmarking it does not
    /// need another request.
    pub fn find_fetched(&self, id: &str) -> Option<&Photo> {
        self.all_fetched_photos.iter().find(|photo| photo.id == id)
    }

    pub fn find_photographer(&self, username: &str) -> Option<&Photographer> {
        self.known_photographers
            .iter()
            .find(|photographer| photographer.username == username)
    }

    /// Updates the bookmark flag on every held copy of photo `id`.
    pub(crate) fn set_bookmark_flag(&mut self, id: &str, bookmarked: bool) {
        let lists = [
            &mut self.all_fetched_photos,
            &mut self.random_photos,
            &mut self.search.results,
            &mut self.photographer.photos,
        ];
        for list in lists {
            list.iter_mut()
                .filter(|photo| photo.id == id)
                .for_each(|photo| photo.bookmarked = bookmarked);
        }
        if let Some(photo) = self.current_photo.as_mut().filter(|photo| photo.id == id) {
            photo.bookmarked = bookmarked;
        }
    }
}

/// Number of pages needed for `total` items at `per_page` items each.
pub fn total_pages(total: u64, per_page: u32) -> u32 {
    if per_page == 0 {
        return 0;
    }
    let pages = total.div_ceil(u64::from(per_page));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// The page after `current`, if one remains. Nothing has been loaded while
/// `current` is zero, so the first page is always available.
fn next_page(current: u32, total: u32) -> Option<u32> {
    if current < START_PAGE {
        Some(START_PAGE)
    } else if current < total {
        Some(current + 1)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 30), 0);
        assert_eq!(total_pages(1, 30), 1);
        assert_eq!(total_pages(30, 30), 1);
        assert_eq!(total_pages(31, 30), 2);
        assert_eq!(total_pages(5, 0), 0);
    }

    #[test]
    fn last_page_has_no_successor() {
        let view = PhotographerView {
            current_page: 3,
            total_pages: 3,
            ..PhotographerView::default()
        };
        assert_eq!(view.next_page(), None);

        let view = PhotographerView {
            current_page: 2,
            total_pages: 3,
            ..PhotographerView::default()
        };
        assert_eq!(view.next_page(), Some(3));
        assert_eq!(PhotographerView::default().next_page(), Some(1));
    }

    #[test]
    fn inactive_search_has_no_next_page() {
        assert_eq!(SearchView::default().next_page(), None);
    }

    #[test]
    fn bookmark_flag_reaches_every_copy() {
        let mut state = AppState {
            all_fetched_photos: vec![Photo::new("a"), Photo::new("b")],
            random_photos: vec![Photo::new("a")],
            current_photo: Some(Photo::new("a")),
            ..AppState::default()
        };
        state.set_bookmark_flag("a", true);
        assert!(state.all_fetched_photos[0].bookmarked);
        assert!(!state.all_fetched_photos[1].bookmarked);
        assert!(state.random_photos[0].bookmarked);
        assert!(state.current_photo.unwrap().bookmarked);
    }
}
