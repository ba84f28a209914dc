//! Per-page view state and the pure helpers behind it.
//!
//! Everything here is derived, ephemeral state: it is rebuilt from defaults
//! whenever a page is entered and never written back into the shared stores.
//! The sort/slice/filter helpers are pure functions over immutable input.

use std::cmp::Ordering;
use std::time::Instant;

use crate::media::{Image, MediaSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    Title,
    Date,
    Rating,
    #[default]
    Popularity,
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortKey::Title => write!(f, "Title"),
            SortKey::Date => write!(f, "Date"),
            SortKey::Rating => write!(f, "Rating"),
            SortKey::Popularity => write!(f, "Popularity"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOrder::Ascending => write!(f, "Ascending"),
            SortOrder::Descending => write!(f, "Descending"),
        }
    }
}

/// Returns a sorted copy of `items` ordered by `key` in `order` direction.
/// The underlying sort is stable, so ties keep their incoming order.
pub fn sorted_media(items: &[MediaSummary], key: SortKey, order: SortOrder) -> Vec<MediaSummary> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = match key {
            SortKey::Title => a
                .display_title()
                .to_lowercase()
                .cmp(&b.display_title().to_lowercase()),
            SortKey::Date => a.date().cmp(&b.date()),
            SortKey::Rating => a
                .vote_average
                .partial_cmp(&b.vote_average)
                .unwrap_or(Ordering::Equal),
            SortKey::Popularity => a
                .popularity
                .partial_cmp(&b.popularity)
                .unwrap_or(Ordering::Equal),
        };
        match order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
    sorted
}

/// Number of pages needed to show `len` items at `per_page` a page. An empty
/// list still renders as one (empty) page.
pub fn page_count(len: usize, per_page: usize) -> usize {
    if len == 0 {
        1
    } else {
        len.div_ceil(per_page)
    }
}

/// The window shown for 1-based page `page`:
/// `items[(page-1)*per_page .. min(page*per_page, len)]`.
pub fn page_slice<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    let start = (page.saturating_sub(1) * per_page).min(items.len());
    let end = (page * per_page).min(items.len());
    &items[start..end]
}

pub fn has_prev_page(page: usize) -> bool {
    page > 1
}

pub fn has_next_page(len: usize, page: usize, per_page: usize) -> bool {
    page * per_page < len
}

/// Carousel windows are the same slice keyed by a 0-based step index.
pub fn carousel_slice<T>(items: &[T], index: usize, cards: usize) -> &[T] {
    let start = (index * cards).min(items.len());
    let end = ((index + 1) * cards).min(items.len());
    &items[start..end]
}

pub fn has_prev_window(index: usize) -> bool {
    index > 0
}

pub fn has_next_window(len: usize, index: usize, cards: usize) -> bool {
    (index + 1) * cards < len
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Back,
    Forward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselKind {
    PopularMovies,
    PopularSeries,
    TopMovies,
    TopSeries,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingKind {
    Movies,
    Series,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    First,
    Prev,
    Next,
    Last,
}

/// Applies a pagination button to a 1-based cursor over `len` items.
pub fn apply_page_action(page: usize, action: PageAction, len: usize, per_page: usize) -> usize {
    let last = page_count(len, per_page);
    match action {
        PageAction::First => 1,
        PageAction::Prev => page.saturating_sub(1).max(1),
        PageAction::Next => (page + 1).min(last),
        PageAction::Last => last,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaTab {
    #[default]
    Videos,
    Backdrops,
    Posters,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchKind {
    #[default]
    Movie,
    Tv,
}

impl SearchKind {
    pub fn path(&self) -> &'static str {
        match self {
            SearchKind::Movie => "movie",
            SearchKind::Tv => "tv",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SearchKind::Movie => "Movies",
            SearchKind::Tv => "Series",
        }
    }
}

/// Gallery language filter. `NoLanguage` selects the images whose language
/// code is null, distinct from `All` which is the identity.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LanguageFilter {
    #[default]
    All,
    Code(String),
    NoLanguage,
}

impl LanguageFilter {
    pub fn label(&self) -> String {
        match self {
            LanguageFilter::All => String::from("All Languages"),
            LanguageFilter::Code(code) => code.to_uppercase(),
            LanguageFilter::NoLanguage => String::from("No Language"),
        }
    }

    pub fn matches(&self, image: &Image) -> bool {
        match self {
            LanguageFilter::All => true,
            LanguageFilter::Code(code) => image.iso_639_1.as_deref() == Some(code.as_str()),
            LanguageFilter::NoLanguage => image.iso_639_1.is_none(),
        }
    }
}

pub fn filter_images<'a>(images: &'a [Image], filter: &LanguageFilter) -> Vec<&'a Image> {
    images.iter().filter(|i| filter.matches(i)).collect()
}

/// Filter buttons for a gallery: All first, then each language code in order
/// of first appearance, then a No Language bucket if any image lacks a code.
pub fn language_options(images: &[Image]) -> Vec<LanguageFilter> {
    let mut options = vec![LanguageFilter::All];
    let mut has_null = false;
    for image in images {
        match &image.iso_639_1 {
            Some(code) => {
                let filter = LanguageFilter::Code(code.clone());
                if !options.contains(&filter) {
                    options.push(filter);
                }
            }
            None => has_null = true,
        }
    }
    if has_null {
        options.push(LanguageFilter::NoLanguage);
    }
    options
}

pub const HOME_CARDS_PER_WINDOW: usize = 4;
pub const LISTING_ITEMS_PER_PAGE: usize = 8;

#[derive(Debug, Clone, Default)]
pub struct HomeView {
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
    pub popular_movies_index: usize,
    pub popular_series_index: usize,
    pub top_movies_index: usize,
    pub top_series_index: usize,
}

impl HomeView {
    pub fn index(&self, kind: CarouselKind) -> usize {
        match kind {
            CarouselKind::PopularMovies => self.popular_movies_index,
            CarouselKind::PopularSeries => self.popular_series_index,
            CarouselKind::TopMovies => self.top_movies_index,
            CarouselKind::TopSeries => self.top_series_index,
        }
    }

    pub fn index_mut(&mut self, kind: CarouselKind) -> &mut usize {
        match kind {
            CarouselKind::PopularMovies => &mut self.popular_movies_index,
            CarouselKind::PopularSeries => &mut self.popular_series_index,
            CarouselKind::TopMovies => &mut self.top_movies_index,
            CarouselKind::TopSeries => &mut self.top_series_index,
        }
    }

    /// Sort changes restart every carousel from its first window.
    pub fn reset_indices(&mut self) {
        self.popular_movies_index = 0;
        self.popular_series_index = 0;
        self.top_movies_index = 0;
        self.top_series_index = 0;
    }
}

#[derive(Debug, Clone)]
pub struct ListingView {
    pub movies_page: usize,
    pub series_page: usize,
}

impl Default for ListingView {
    fn default() -> Self {
        Self {
            movies_page: 1,
            series_page: 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DetailView {
    pub active_tab: MediaTab,
    pub show_all_reviews: bool,
    pub selected_season: u32,
}

impl Default for DetailView {
    fn default() -> Self {
        Self {
            active_tab: MediaTab::default(),
            show_all_reviews: false,
            selected_season: 1,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GalleryView {
    pub language: LanguageFilter,
}

#[derive(Debug, Clone, Default)]
pub struct SearchView {
    pub query: String,
    pub kind: SearchKind,
    pub suggestions: Vec<MediaSummary>,
    pub show_suggestions: bool,
    pub debounce_timer: Option<Instant>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, title: &str, date: &str, rating: f32, popularity: f32) -> MediaSummary {
        MediaSummary {
            id,
            title: Some(String::from(title)),
            name: None,
            overview: String::new(),
            poster_path: None,
            backdrop_path: None,
            vote_average: rating,
            vote_count: 0,
            popularity,
            release_date: Some(String::from(date)),
            first_air_date: None,
            media_type: None,
            genre_ids: Vec::new(),
        }
    }

    fn sample() -> Vec<MediaSummary> {
        vec![
            item(1, "Brazil", "1985-02-20", 7.8, 22.0),
            item(2, "Alien", "1979-05-25", 8.4, 95.0),
            item(3, "Casablanca", "1942-11-26", 8.1, 14.5),
            item(4, "Dune", "2021-09-15", 7.7, 310.0),
        ]
    }

    fn ids(items: &[MediaSummary]) -> Vec<u64> {
        items.iter().map(|i| i.id).collect()
    }

    #[test]
    fn sorting_orders_each_key_both_directions() {
        let items = sample();
        assert_eq!(
            ids(&sorted_media(&items, SortKey::Title, SortOrder::Ascending)),
            vec![2, 1, 3, 4]
        );
        assert_eq!(
            ids(&sorted_media(&items, SortKey::Title, SortOrder::Descending)),
            vec![4, 3, 1, 2]
        );
        assert_eq!(
            ids(&sorted_media(&items, SortKey::Date, SortOrder::Ascending)),
            vec![3, 2, 1, 4]
        );
        assert_eq!(
            ids(&sorted_media(&items, SortKey::Rating, SortOrder::Descending)),
            vec![2, 3, 1, 4]
        );
        assert_eq!(
            ids(&sorted_media(
                &items,
                SortKey::Popularity,
                SortOrder::Descending
            )),
            vec![4, 2, 1, 3]
        );
    }

    #[test]
    fn sorting_is_a_permutation_and_idempotent() {
        let items = sample();
        let once = sorted_media(&items, SortKey::Rating, SortOrder::Ascending);
        let twice = sorted_media(&once, SortKey::Rating, SortOrder::Ascending);
        assert_eq!(ids(&once), ids(&twice));

        let mut original = ids(&items);
        let mut sorted = ids(&once);
        original.sort_unstable();
        sorted.sort_unstable();
        assert_eq!(original, sorted);
    }

    #[test]
    fn sorting_keeps_ties_stable() {
        let items = vec![
            item(1, "A", "2000-01-01", 7.0, 1.0),
            item(2, "B", "2000-01-01", 7.0, 1.0),
            item(3, "C", "2000-01-01", 7.0, 1.0),
        ];
        assert_eq!(
            ids(&sorted_media(&items, SortKey::Rating, SortOrder::Ascending)),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn page_slice_matches_the_window_formula() {
        let items: Vec<u32> = (0..11).collect();
        assert_eq!(page_slice(&items, 1, 4), &[0, 1, 2, 3]);
        assert_eq!(page_slice(&items, 2, 4), &[4, 5, 6, 7]);
        assert_eq!(page_slice(&items, 3, 4), &[8, 9, 10]);
        assert_eq!(page_slice(&items, 4, 4), &[] as &[u32]);
    }

    #[test]
    fn page_buttons_disable_at_the_boundaries() {
        assert!(!has_prev_page(1));
        assert!(has_prev_page(2));
        assert!(has_next_page(11, 2, 4));
        assert!(!has_next_page(11, 3, 4));
        assert!(!has_next_page(8, 2, 4));
        assert_eq!(page_count(11, 4), 3);
        assert_eq!(page_count(8, 4), 2);
        assert_eq!(page_count(0, 4), 1);
    }

    #[test]
    fn page_actions_stay_in_range() {
        assert_eq!(apply_page_action(1, PageAction::Prev, 20, 8), 1);
        assert_eq!(apply_page_action(1, PageAction::Next, 20, 8), 2);
        assert_eq!(apply_page_action(3, PageAction::Next, 20, 8), 3);
        assert_eq!(apply_page_action(3, PageAction::First, 20, 8), 1);
        assert_eq!(apply_page_action(1, PageAction::Last, 20, 8), 3);
    }

    #[test]
    fn carousel_windows_mirror_pagination() {
        let items: Vec<u32> = (0..9).collect();
        assert_eq!(carousel_slice(&items, 0, 4), &[0, 1, 2, 3]);
        assert_eq!(carousel_slice(&items, 2, 4), &[8]);
        assert!(!has_prev_window(0));
        assert!(has_prev_window(1));
        assert!(has_next_window(9, 1, 4));
        assert!(!has_next_window(9, 2, 4));
        assert!(!has_next_window(4, 0, 4));
    }

    fn image(code: Option<&str>) -> Image {
        Image {
            file_path: String::from("/f.jpg"),
            width: 500,
            height: 750,
            iso_639_1: code.map(String::from),
            vote_average: 0.0,
        }
    }

    #[test]
    fn language_filter_partitions_the_set() {
        let images = vec![
            image(Some("en")),
            image(None),
            image(Some("de")),
            image(Some("en")),
        ];

        assert_eq!(filter_images(&images, &LanguageFilter::All).len(), 4);
        assert_eq!(
            filter_images(&images, &LanguageFilter::Code(String::from("en"))).len(),
            2
        );
        assert_eq!(
            filter_images(&images, &LanguageFilter::Code(String::from("de"))).len(),
            1
        );
        assert_eq!(filter_images(&images, &LanguageFilter::NoLanguage).len(), 1);
    }

    #[test]
    fn language_options_follow_first_appearance() {
        let images = vec![
            image(Some("en")),
            image(None),
            image(Some("de")),
            image(Some("en")),
        ];
        assert_eq!(
            language_options(&images),
            vec![
                LanguageFilter::All,
                LanguageFilter::Code(String::from("en")),
                LanguageFilter::Code(String::from("de")),
                LanguageFilter::NoLanguage,
            ]
        );

        let no_null = vec![image(Some("en"))];
        assert!(!language_options(&no_null).contains(&LanguageFilter::NoLanguage));
    }
}
