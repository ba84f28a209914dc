use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use iced::widget::image::Handle;
use iced::Color;
use serde::Deserialize;

use crate::bundles::{CastCrewBundle, HomeBundle, MovieDetailBundle, PersonBundle, SeriesDetailBundle};
use crate::tmdb::ApiError;
use crate::view_state::{
    CarouselKind, LanguageFilter, ListingKind, MediaTab, PageAction, SearchKind, SortKey, SortOrder,
    StepDirection,
};

fn simple_hash(s: &str) -> String {
    let mut hash: u64 = 5381;
    for byte in s.bytes() {
        hash = hash.wrapping_mul(33).wrapping_add(byte as u64);
    }
    format!("{:016x}", hash)
}

fn get_cache_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(|home| {
        PathBuf::from(home)
            .join(".cache")
            .join("reelview")
            .join("images")
    })
}

pub const BACKGROUND_BLACK: Color = Color::from_rgb(0.0, 0.0, 0.0);
pub const SURFACE_DARK_GRAY: Color = Color::from_rgb(0.078, 0.078, 0.078);
pub const ACCENT_CYAN: Color = Color::from_rgb(0.0, 0.737, 0.831);
pub const TEXT_WHITE: Color = Color::from_rgb(1.0, 1.0, 1.0);
pub const TEXT_GRAY: Color = Color::from_rgb(0.702, 0.702, 0.702);
pub const STAR_GOLD: Color = Color::from_rgb(1.0, 0.843, 0.0);

pub type MediaId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Movie,
    Tv,
}

impl MediaKind {
    pub fn path(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Tv => "tv",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Movie => "Movie",
            MediaKind::Tv => "Series",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    Home,
    Movies,
    Series,
    MovieDetails(MediaId),
    SeriesDetails(MediaId),
    Person(MediaId),
    CastCrew(MediaKind, MediaId),
    Posters(MediaKind, MediaId),
    Backdrops(MediaKind, MediaId),
    SearchResults(SearchKind, String),
}

#[derive(Debug, Clone)]
pub enum LoadingState {
    Idle,
    Loading,
    Error(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenreListResponse {
    pub genres: Vec<Genre>,
}

/// One row of a listing, search or recommendation response. Movies carry
/// `title`/`release_date`, series carry `name`/`first_air_date`; both shapes
/// land here and the accessors merge them.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaSummary {
    pub id: MediaId,
    pub title: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub vote_average: f32,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default)]
    pub popularity: f32,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub media_type: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<u64>,
}

impl MediaSummary {
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("Untitled")
    }

    pub fn date(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .or(self.first_air_date.as_deref())
    }

    pub fn kind(&self) -> MediaKind {
        match self.media_type.as_deref() {
            Some("tv") => MediaKind::Tv,
            Some("movie") => MediaKind::Movie,
            _ if self.first_air_date.is_some() || self.name.is_some() => MediaKind::Tv,
            _ => MediaKind::Movie,
        }
    }
}

/// Full detail payload for one movie or series. Everything beyond the
/// summary fields is optional; the remote API omits whatever it pleases.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaDetails {
    pub id: MediaId,
    pub title: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub overview: String,
    pub tagline: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub vote_average: f32,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default)]
    pub popularity: f32,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub runtime: Option<u32>,
    #[serde(default)]
    pub episode_run_time: Vec<u32>,
    pub number_of_seasons: Option<u32>,
    pub number_of_episodes: Option<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    pub budget: Option<u64>,
    pub revenue: Option<u64>,
    pub status: Option<String>,
    pub original_language: Option<String>,
    pub homepage: Option<String>,
    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
}

impl MediaDetails {
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("Untitled")
    }

    pub fn date(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .or(self.first_air_date.as_deref())
    }

    pub fn year(&self) -> Option<&str> {
        self.date().and_then(|d| d.get(..4))
    }

    pub fn runtime_minutes(&self) -> Option<u32> {
        self.runtime
            .or_else(|| self.episode_run_time.first().copied())
    }

    pub fn genre_names(&self) -> String {
        self.genres
            .iter()
            .map(|g| g.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductionCompany {
    pub id: u64,
    pub name: String,
    pub logo_path: Option<String>,
    #[serde(default)]
    pub origin_country: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CastMember {
    pub id: MediaId,
    pub name: String,
    #[serde(default)]
    pub character: String,
    pub profile_path: Option<String>,
    #[serde(default)]
    pub order: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CrewMember {
    pub id: MediaId,
    pub name: String,
    #[serde(default)]
    pub job: String,
    #[serde(default)]
    pub department: String,
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreditsSet {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Review {
    pub id: String,
    pub author: String,
    pub content: String,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Video {
    pub id: String,
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub site: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub results: Vec<Video>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Image {
    pub file_path: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    pub iso_639_1: Option<String>,
    #[serde(default)]
    pub vote_average: f32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImagesSet {
    #[serde(default)]
    pub posters: Vec<Image>,
    #[serde(default)]
    pub backdrops: Vec<Image>,
    #[serde(default)]
    pub profiles: Vec<Image>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Keyword {
    pub id: u64,
    pub name: String,
}

/// Movie keyword payloads use `keywords`, series payloads use `results`.
#[derive(Debug, Clone, Deserialize)]
pub struct KeywordsResponse {
    pub keywords: Option<Vec<Keyword>>,
    pub results: Option<Vec<Keyword>>,
}

impl KeywordsResponse {
    pub fn into_list(self) -> Vec<Keyword> {
        self.keywords.or(self.results).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExternalIds {
    pub imdb_id: Option<String>,
    pub facebook_id: Option<String>,
    pub twitter_id: Option<String>,
    pub instagram_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseDatesResponse {
    #[serde(default)]
    pub results: Vec<ReleaseDatesResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseDatesResult {
    pub iso_3166_1: String,
    #[serde(default)]
    pub release_dates: Vec<ReleaseDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseDate {
    #[serde(default)]
    pub certification: String,
    pub release_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentRatingsResponse {
    #[serde(default)]
    pub results: Vec<ContentRating>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentRating {
    pub iso_3166_1: String,
    pub rating: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeasonDetails {
    pub id: u64,
    pub season_number: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub overview: String,
    pub air_date: Option<String>,
    pub poster_path: Option<String>,
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Episode {
    pub id: u64,
    pub episode_number: u32,
    pub season_number: u32,
    pub name: String,
    #[serde(default)]
    pub overview: String,
    pub air_date: Option<String>,
    pub still_path: Option<String>,
    pub runtime: Option<u32>,
    #[serde(default)]
    pub vote_average: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersonDetails {
    pub id: MediaId,
    pub name: String,
    #[serde(default)]
    pub biography: String,
    pub birthday: Option<String>,
    pub deathday: Option<String>,
    pub place_of_birth: Option<String>,
    pub profile_path: Option<String>,
    #[serde(default)]
    pub known_for_department: String,
    #[serde(default)]
    pub popularity: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersonCredit {
    pub id: MediaId,
    pub title: Option<String>,
    pub name: Option<String>,
    pub poster_path: Option<String>,
    #[serde(default)]
    pub character: String,
    #[serde(default)]
    pub job: String,
    pub media_type: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub vote_average: f32,
    #[serde(default)]
    pub popularity: f32,
}

impl PersonCredit {
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("Untitled")
    }

    pub fn kind(&self) -> MediaKind {
        match self.media_type.as_deref() {
            Some("tv") => MediaKind::Tv,
            _ => MediaKind::Movie,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonCredits {
    #[serde(default)]
    pub cast: Vec<PersonCredit>,
    #[serde(default)]
    pub crew: Vec<PersonCredit>,
}

/// Remote `/configuration` payload; only the image section is consumed.
#[derive(Debug, Clone, Deserialize)]
pub struct Configuration {
    pub images: ConfigurationImages,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConfigurationImages {
    pub secure_base_url: String,
    #[serde(default)]
    pub poster_sizes: Vec<String>,
    #[serde(default)]
    pub backdrop_sizes: Vec<String>,
}

/// Generic page of a paged listing response.
#[derive(Debug, Clone, Deserialize)]
pub struct Paged<T> {
    #[serde(default)]
    pub page: u32,
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u64,
}

#[derive(Debug, Clone, Default)]
pub struct ImageCache {
    cache: HashMap<String, Handle>,
    pending: HashSet<String>,
    cache_directory: Option<PathBuf>,
}

impl ImageCache {
    pub fn new() -> Self {
        let cache_directory = get_cache_dir();
        if let Some(ref dir) = cache_directory {
            let _ = std::fs::create_dir_all(dir);
        }
        Self {
            cache: HashMap::new(),
            pending: HashSet::new(),
            cache_directory,
        }
    }

    pub fn get(&self, url: &str) -> Option<&Handle> {
        self.cache.get(url)
    }

    pub fn insert(&mut self, url: String, handle: Handle) {
        self.pending.remove(&url);
        self.cache.insert(url, handle);
    }

    pub fn is_pending(&self, url: &str) -> bool {
        self.pending.contains(url)
    }

    pub fn mark_pending(&mut self, url: String) {
        self.pending.insert(url);
    }

    pub fn get_cache_path(&self, url: &str) -> Option<PathBuf> {
        self.cache_directory
            .as_ref()
            .map(|dir| dir.join(simple_hash(url)))
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    Setup(crate::settings::SetupMessage),
    NavigateTo(Page),
    Back,
    RetryLoad,
    ConfigurationLoaded(Result<Configuration, ApiError>),
    GenresLoaded(Result<Vec<Genre>, ApiError>),

    HomeLoaded(Box<HomeBundle>),
    SetSortKey(SortKey),
    SetSortOrder(SortOrder),
    CarouselStep(CarouselKind, StepDirection),

    MoviesLoaded(Result<Vec<MediaSummary>, ApiError>),
    SeriesLoaded(Result<Vec<MediaSummary>, ApiError>),
    ListingPage(ListingKind, PageAction),

    MovieDetailLoaded(Box<MovieDetailBundle>),
    SeriesDetailLoaded(Box<SeriesDetailBundle>),
    SelectMediaTab(MediaTab),
    ToggleAllReviews,
    SelectSeason(u32),
    SeasonLoaded(u32, Result<SeasonDetails, ApiError>),
    EpisodeLoaded(u32, u32, Result<Episode, ApiError>),

    PersonLoaded(Box<PersonBundle>),
    CastCrewLoaded(Box<CastCrewBundle>),

    GalleryLoaded(Result<ImagesSet, ApiError>),
    SelectLanguage(LanguageFilter),

    SearchQueryChanged(String),
    SearchKindChanged(SearchKind),
    SearchSubmit,
    SearchDebounceTriggered,
    SuggestionsLoaded(Result<Vec<MediaSummary>, ApiError>),
    SearchResultsLoaded(Result<Vec<MediaSummary>, ApiError>),
    ClearSearch,

    LoadImage(String),
    ImageLoaded(String, Result<Handle, String>),
}

/// Cuts `text` at the last word boundary before `max_chars` characters and
/// appends an ellipsis. Multi-byte input is cut on character boundaries.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    let trimmed = cut.rfind(' ').map_or(cut.as_str(), |i| &cut[..i]);
    format!("{}...", trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(title: Option<&str>, name: Option<&str>) -> MediaSummary {
        MediaSummary {
            id: 1,
            title: title.map(String::from),
            name: name.map(String::from),
            overview: String::new(),
            poster_path: None,
            backdrop_path: None,
            vote_average: 0.0,
            vote_count: 0,
            popularity: 0.0,
            release_date: None,
            first_air_date: None,
            media_type: None,
            genre_ids: Vec::new(),
        }
    }

    #[test]
    fn display_title_prefers_title_over_name() {
        assert_eq!(
            summary(Some("Heat"), Some("ignored")).display_title(),
            "Heat"
        );
        assert_eq!(summary(None, Some("Dark")).display_title(), "Dark");
        assert_eq!(summary(None, None).display_title(), "Untitled");
    }

    #[test]
    fn kind_falls_back_to_series_markers() {
        let mut movie = summary(Some("Heat"), None);
        movie.release_date = Some(String::from("1995-12-15"));
        assert_eq!(movie.kind(), MediaKind::Movie);

        let mut series = summary(None, Some("Dark"));
        series.first_air_date = Some(String::from("2017-12-01"));
        assert_eq!(series.kind(), MediaKind::Tv);

        let mut tagged = summary(Some("Heat"), None);
        tagged.media_type = Some(String::from("tv"));
        assert_eq!(tagged.kind(), MediaKind::Tv);
    }

    #[test]
    fn truncate_cuts_at_word_boundary() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(
            truncate_text("one two three four", 12),
            "one two..."
        );
    }

    #[test]
    fn truncate_survives_multibyte_text() {
        let text = "héllo wörld ünd mörê wörds here";
        let cut = truncate_text(text, 14);
        assert!(cut.ends_with("..."));
        assert!(cut.chars().count() <= 17);
    }

    #[test]
    fn keywords_merge_both_shapes() {
        let movie_shape = KeywordsResponse {
            keywords: Some(vec![Keyword {
                id: 1,
                name: String::from("heist"),
            }]),
            results: None,
        };
        assert_eq!(movie_shape.into_list().len(), 1);

        let series_shape = KeywordsResponse {
            keywords: None,
            results: Some(vec![Keyword {
                id: 2,
                name: String::from("noir"),
            }]),
        };
        assert_eq!(series_shape.into_list()[0].name, "noir");

        let empty = KeywordsResponse {
            keywords: None,
            results: None,
        };
        assert!(empty.into_list().is_empty());
    }
}
