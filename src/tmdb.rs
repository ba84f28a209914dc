use std::sync::Arc;

use futures::future::join_all;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::media::{
    Configuration, ContentRatingsResponse, CreditsSet, Episode, ExternalIds, Genre,
    GenreListResponse, ImagesSet, Keyword, KeywordsResponse, MediaDetails, MediaId, MediaKind,
    MediaSummary, Paged, PersonCredits, PersonDetails, ReleaseDatesResponse, ReleaseDatesResult,
    Review, SeasonDetails, VideoListResponse,
};
use crate::settings::AppSettings;
use crate::view_state::SearchKind;

/// Remote listings paginate; popular movie/series sets are concatenated up
/// to this many pages, one request per page with no throttling.
pub const MAX_LISTING_PAGES: u32 = 100;

pub fn pages_to_fetch(total_pages: u32) -> u32 {
    total_pages.min(MAX_LISTING_PAGES)
}

/// Appends the settled follow-up pages to page 1's rows in page order,
/// skipping (and logging) any page that failed.
fn concat_pages(
    mut all: Vec<MediaSummary>,
    pages: Vec<Result<Paged<MediaSummary>, ApiError>>,
    endpoint: &str,
) -> Vec<MediaSummary> {
    for (index, result) in pages.into_iter().enumerate() {
        match result {
            Ok(page) => all.extend(page.results),
            Err(error) => {
                warn!(endpoint, page = index as u32 + 2, %error, "skipping failed listing page");
            }
        }
    }
    all
}

#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("failed to parse response: {0}")]
    Parse(String),
    #[error("rate limited by remote API")]
    RateLimit,
    #[error("API key rejected")]
    Unauthorized,
}

#[derive(Clone)]
pub enum ImageSize {
    Poster,
    Strip,
    Backdrop,
    Original,
}

pub async fn fetch_image_bytes(url: String) -> Result<Vec<u8>, String> {
    reqwest::get(&url)
        .await
        .map_err(|e| e.to_string())?
        .error_for_status()
        .map_err(|e| e.to_string())?
        .bytes()
        .await
        .map(|b| b.to_vec())
        .map_err(|e| e.to_string())
}

/// Thin gateway over the TMDB REST surface: one method per endpoint, parsed
/// straight into the typed mirrors. No retries, no timeouts, no validation
/// beyond deserialization; callers get whatever the remote returned.
#[derive(Clone)]
pub struct TmdbClient {
    api_key: String,
    base_url: String,
    image_base_url: String,
    language: String,
    http_client: Arc<reqwest::Client>,
}

impl TmdbClient {
    pub fn new(api_key: String, language: String) -> Self {
        Self {
            api_key,
            base_url: String::from("https://api.themoviedb.org/3"),
            image_base_url: String::from("https://image.tmdb.org/t/p"),
            language,
            http_client: Arc::new(reqwest::Client::new()),
        }
    }

    pub fn from_settings(settings: &AppSettings) -> Self {
        let language = if settings.language.is_empty() {
            String::from("en-US")
        } else {
            settings.language.clone()
        };
        Self::new(settings.api_key.clone(), language)
    }

    /// Adopts the CDN base the remote `/configuration` endpoint advertises.
    pub fn set_image_base(&mut self, secure_base_url: &str) {
        self.image_base_url = secure_base_url.trim_end_matches('/').to_string();
    }

    pub fn image_url(&self, path: &str, size: ImageSize) -> String {
        let size_path = match size {
            ImageSize::Poster => "w500",
            ImageSize::Strip => "w300",
            ImageSize::Backdrop | ImageSize::Original => "original",
        };
        format!("{}/{}{}", self.image_base_url, size_path, path)
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}{}?api_key={}&language={}",
            self.base_url, endpoint, self.api_key, self.language
        )
    }

    fn build_url_with_params(&self, endpoint: &str, params: &str) -> String {
        format!("{}&{}", self.build_url(endpoint), params)
    }

    async fn fetch_response(&self, url: &str) -> Result<reqwest::Response, ApiError> {
        debug!(url, "requesting");
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        match response.status().as_u16() {
            401 => Err(ApiError::Unauthorized),
            429 => Err(ApiError::RateLimit),
            s if s >= 400 => Err(ApiError::Network(format!("HTTP error: {}", s))),
            _ => Ok(response),
        }
    }

    async fn fetch_json<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<T, ApiError> {
        self.fetch_response(url)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn fetch_listing_page(
        &self,
        endpoint: &str,
        page: u32,
    ) -> Result<Paged<MediaSummary>, ApiError> {
        let url = self.build_url_with_params(endpoint, &format!("page={}", page));
        self.fetch_json(&url).await
    }

    /// Walks a paged listing: page 1 first to learn the page count, then the
    /// remaining pages (capped at [`MAX_LISTING_PAGES`]) fired concurrently
    /// and concatenated in page order. A page that fails is logged and its
    /// rows are simply absent.
    async fn fetch_all_pages(&self, endpoint: &str) -> Result<Vec<MediaSummary>, ApiError> {
        let first = self.fetch_listing_page(endpoint, 1).await?;
        let total = pages_to_fetch(first.total_pages);

        let remaining =
            join_all((2..=total).map(|page| self.fetch_listing_page(endpoint, page))).await;
        Ok(concat_pages(first.results, remaining, endpoint))
    }

    async fn fetch_single_listing(&self, endpoint: &str) -> Result<Vec<MediaSummary>, ApiError> {
        let page: Paged<MediaSummary> = self.fetch_json(&self.build_url(endpoint)).await?;
        Ok(page.results)
    }

    pub async fn popular_movies(&self) -> Result<Vec<MediaSummary>, ApiError> {
        self.fetch_all_pages("/movie/popular").await
    }

    pub async fn popular_series(&self) -> Result<Vec<MediaSummary>, ApiError> {
        self.fetch_all_pages("/tv/popular").await
    }

    pub async fn top_rated_movies(&self) -> Result<Vec<MediaSummary>, ApiError> {
        self.fetch_single_listing("/movie/top_rated").await
    }

    pub async fn top_rated_series(&self) -> Result<Vec<MediaSummary>, ApiError> {
        self.fetch_single_listing("/tv/top_rated").await
    }

    pub async fn details(&self, kind: MediaKind, id: MediaId) -> Result<MediaDetails, ApiError> {
        self.fetch_json(&self.build_url(&format!("/{}/{}", kind.path(), id)))
            .await
    }

    pub async fn credits(&self, kind: MediaKind, id: MediaId) -> Result<CreditsSet, ApiError> {
        self.fetch_json(&self.build_url(&format!("/{}/{}/credits", kind.path(), id)))
            .await
    }

    pub async fn videos(&self, kind: MediaKind, id: MediaId) -> Result<Vec<crate::media::Video>, ApiError> {
        let response: VideoListResponse = self
            .fetch_json(&self.build_url(&format!("/{}/{}/videos", kind.path(), id)))
            .await?;
        Ok(response.results)
    }

    pub async fn reviews(&self, kind: MediaKind, id: MediaId) -> Result<Vec<Review>, ApiError> {
        let page: Paged<Review> = self
            .fetch_json(&self.build_url(&format!("/{}/{}/reviews", kind.path(), id)))
            .await?;
        Ok(page.results)
    }

    pub async fn recommendations(
        &self,
        kind: MediaKind,
        id: MediaId,
    ) -> Result<Vec<MediaSummary>, ApiError> {
        self.fetch_single_listing(&format!("/{}/{}/recommendations", kind.path(), id))
            .await
    }

    pub async fn similar(
        &self,
        kind: MediaKind,
        id: MediaId,
    ) -> Result<Vec<MediaSummary>, ApiError> {
        self.fetch_single_listing(&format!("/{}/{}/similar", kind.path(), id))
            .await
    }

    pub async fn images(&self, kind: MediaKind, id: MediaId) -> Result<ImagesSet, ApiError> {
        self.fetch_json(&self.build_url(&format!("/{}/{}/images", kind.path(), id)))
            .await
    }

    pub async fn keywords(&self, kind: MediaKind, id: MediaId) -> Result<Vec<Keyword>, ApiError> {
        let response: KeywordsResponse = self
            .fetch_json(&self.build_url(&format!("/{}/{}/keywords", kind.path(), id)))
            .await?;
        Ok(response.into_list())
    }

    pub async fn external_ids(
        &self,
        kind: MediaKind,
        id: MediaId,
    ) -> Result<ExternalIds, ApiError> {
        self.fetch_json(&self.build_url(&format!("/{}/{}/external_ids", kind.path(), id)))
            .await
    }

    pub async fn movie_release_dates(
        &self,
        id: MediaId,
    ) -> Result<Vec<ReleaseDatesResult>, ApiError> {
        let response: ReleaseDatesResponse = self
            .fetch_json(&self.build_url(&format!("/movie/{}/release_dates", id)))
            .await?;
        Ok(response.results)
    }

    pub async fn series_content_ratings(
        &self,
        id: MediaId,
    ) -> Result<Vec<crate::media::ContentRating>, ApiError> {
        let response: ContentRatingsResponse = self
            .fetch_json(&self.build_url(&format!("/tv/{}/content_ratings", id)))
            .await?;
        Ok(response.results)
    }

    pub async fn season_details(
        &self,
        tv_id: MediaId,
        season_number: u32,
    ) -> Result<SeasonDetails, ApiError> {
        self.fetch_json(&self.build_url(&format!("/tv/{}/season/{}", tv_id, season_number)))
            .await
    }

    pub async fn episode_details(
        &self,
        tv_id: MediaId,
        season_number: u32,
        episode_number: u32,
    ) -> Result<Episode, ApiError> {
        self.fetch_json(&self.build_url(&format!(
            "/tv/{}/season/{}/episode/{}",
            tv_id, season_number, episode_number
        )))
        .await
    }

    pub async fn person_details(&self, id: MediaId) -> Result<PersonDetails, ApiError> {
        self.fetch_json(&self.build_url(&format!("/person/{}", id)))
            .await
    }

    pub async fn person_combined_credits(&self, id: MediaId) -> Result<PersonCredits, ApiError> {
        self.fetch_json(&self.build_url(&format!("/person/{}/combined_credits", id)))
            .await
    }

    pub async fn person_movie_credits(&self, id: MediaId) -> Result<PersonCredits, ApiError> {
        self.fetch_json(&self.build_url(&format!("/person/{}/movie_credits", id)))
            .await
    }

    pub async fn person_tv_credits(&self, id: MediaId) -> Result<PersonCredits, ApiError> {
        self.fetch_json(&self.build_url(&format!("/person/{}/tv_credits", id)))
            .await
    }

    pub async fn person_images(&self, id: MediaId) -> Result<ImagesSet, ApiError> {
        self.fetch_json(&self.build_url(&format!("/person/{}/images", id)))
            .await
    }

    pub async fn person_external_ids(&self, id: MediaId) -> Result<ExternalIds, ApiError> {
        self.fetch_json(&self.build_url(&format!("/person/{}/external_ids", id)))
            .await
    }

    pub async fn search(
        &self,
        kind: SearchKind,
        query: &str,
    ) -> Result<Vec<MediaSummary>, ApiError> {
        let url = self.build_url_with_params(
            &format!("/search/{}", kind.path()),
            &format!("query={}", urlencoding::encode(query)),
        );
        let page: Paged<MediaSummary> = self.fetch_json(&url).await?;
        Ok(page.results)
    }

    /// Movie and series genre lists merged, deduplicated by id and sorted by
    /// name; used to label listing cards by their `genre_ids`.
    pub async fn genres(&self) -> Result<Vec<Genre>, ApiError> {
        let movie_response: GenreListResponse =
            self.fetch_json(&self.build_url("/genre/movie/list")).await?;
        let tv_response: GenreListResponse =
            self.fetch_json(&self.build_url("/genre/tv/list")).await?;

        let mut genres = movie_response.genres;
        for tv_genre in tv_response.genres {
            if !genres.iter().any(|g| g.id == tv_genre.id) {
                genres.push(tv_genre);
            }
        }
        genres.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(genres)
    }

    pub async fn configuration(&self) -> Result<Configuration, ApiError> {
        self.fetch_json(&self.build_url("/configuration")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: MediaId) -> MediaSummary {
        MediaSummary {
            id,
            title: Some(format!("Movie {}", id)),
            name: None,
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

    fn page(ids: std::ops::Range<u64>, total_pages: u32) -> Paged<MediaSummary> {
        Paged {
            page: 0,
            results: ids.map(summary).collect(),
            total_pages,
            total_results: 0,
        }
    }

    #[test]
    fn three_pages_concatenate_in_order() {
        // 205 rows over remote pages of 100/100/5.
        let first = page(0..100, 3).results;
        let rest = vec![Ok(page(100..200, 3)), Ok(page(200..205, 3))];
        let all = concat_pages(first, rest, "/movie/popular");

        assert_eq!(all.len(), 205);
        let mut seen = std::collections::HashSet::new();
        for (index, item) in all.iter().enumerate() {
            assert_eq!(item.id, index as u64);
            assert!(seen.insert(item.id));
        }
    }

    #[test]
    fn a_failed_page_is_skipped_without_losing_the_rest() {
        let first = page(0..100, 3).results;
        let rest = vec![
            Err(ApiError::Network(String::from("boom"))),
            Ok(page(200..205, 3)),
        ];
        let all = concat_pages(first, rest, "/movie/popular");

        assert_eq!(all.len(), 105);
        assert_eq!(all[100].id, 200);
    }

    #[test]
    fn page_cap_bounds_the_listing_walk() {
        assert_eq!(pages_to_fetch(1), 1);
        assert_eq!(pages_to_fetch(3), 3);
        assert_eq!(pages_to_fetch(100), 100);
        assert_eq!(pages_to_fetch(500), 100);
    }

    #[test]
    fn image_url_uses_width_buckets() {
        let client = TmdbClient::new(String::from("k"), String::from("en-US"));
        assert_eq!(
            client.image_url("/abc.jpg", ImageSize::Poster),
            "https://image.tmdb.org/t/p/w500/abc.jpg"
        );
        assert_eq!(
            client.image_url("/abc.jpg", ImageSize::Strip),
            "https://image.tmdb.org/t/p/w300/abc.jpg"
        );
        assert_eq!(
            client.image_url("/abc.jpg", ImageSize::Backdrop),
            "https://image.tmdb.org/t/p/original/abc.jpg"
        );
    }

    #[test]
    fn configured_image_base_replaces_default() {
        let mut client = TmdbClient::new(String::from("k"), String::from("en-US"));
        client.set_image_base("https://cdn.example.org/t/p/");
        assert_eq!(
            client.image_url("/x.png", ImageSize::Poster),
            "https://cdn.example.org/t/p/w500/x.png"
        );
    }

    #[test]
    fn urls_carry_key_language_and_params() {
        let client = TmdbClient::new(String::from("secret"), String::from("de-DE"));
        assert_eq!(
            client.build_url("/movie/11"),
            "https://api.themoviedb.org/3/movie/11?api_key=secret&language=de-DE"
        );
        assert_eq!(
            client.build_url_with_params("/movie/popular", "page=7"),
            "https://api.themoviedb.org/3/movie/popular?api_key=secret&language=de-DE&page=7"
        );
    }
}
