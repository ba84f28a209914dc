//! Per-page fetch bundles.
//!
//! Every routed view fires one fixed bundle of concurrent requests on
//! activation. A bundle is an explicit typed struct of optional results:
//! each fetch that fails is logged and leaves its field `None`, and the page
//! renders from whatever partial state remains. No rollback, no retry.

use tracing::warn;

use crate::media::{
    ContentRating, CreditsSet, ExternalIds, ImagesSet, Keyword, MediaDetails, MediaId, MediaKind,
    MediaSummary, PersonCredits, PersonDetails, ReleaseDatesResult, Review, Video,
};
use crate::state::{MoviesStore, PersonStore, SeriesStore};
use crate::tmdb::{ApiError, TmdbClient};

fn ok_or_log<T>(what: &'static str, result: Result<T, ApiError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            warn!(fetch = what, %error, "bundle fetch failed");
            None
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct HomeBundle {
    pub popular_movies: Option<Vec<MediaSummary>>,
    pub top_movies: Option<Vec<MediaSummary>>,
    pub popular_series: Option<Vec<MediaSummary>>,
    pub top_series: Option<Vec<MediaSummary>>,
}

impl HomeBundle {
    /// True when every fetch in the bundle failed; the home page then shows
    /// the error state with a retry button instead of four empty carousels.
    pub fn is_empty(&self) -> bool {
        self.popular_movies.is_none()
            && self.top_movies.is_none()
            && self.popular_series.is_none()
            && self.top_series.is_none()
    }
}

pub async fn load_home(client: TmdbClient) -> HomeBundle {
    let (popular_movies, top_movies, popular_series, top_series) = tokio::join!(
        client.popular_movies(),
        client.top_rated_movies(),
        client.popular_series(),
        client.top_rated_series(),
    );

    HomeBundle {
        popular_movies: ok_or_log("popular movies", popular_movies),
        top_movies: ok_or_log("top rated movies", top_movies),
        popular_series: ok_or_log("popular series", popular_series),
        top_series: ok_or_log("top rated series", top_series),
    }
}

#[derive(Debug, Clone)]
pub struct MovieDetailBundle {
    pub id: MediaId,
    pub details: Option<MediaDetails>,
    pub credits: Option<CreditsSet>,
    pub videos: Option<Vec<Video>>,
    pub reviews: Option<Vec<Review>>,
    pub recommendations: Option<Vec<MediaSummary>>,
    pub images: Option<ImagesSet>,
    pub keywords: Option<Vec<Keyword>>,
    pub external_ids: Option<ExternalIds>,
    pub release_dates: Option<Vec<ReleaseDatesResult>>,
    pub similar: Option<Vec<MediaSummary>>,
}

pub async fn load_movie_detail(client: TmdbClient, id: MediaId) -> MovieDetailBundle {
    let kind = MediaKind::Movie;
    let (
        details,
        credits,
        videos,
        reviews,
        recommendations,
        images,
        keywords,
        external_ids,
        release_dates,
        similar,
    ) = tokio::join!(
        client.details(kind, id),
        client.credits(kind, id),
        client.videos(kind, id),
        client.reviews(kind, id),
        client.recommendations(kind, id),
        client.images(kind, id),
        client.keywords(kind, id),
        client.external_ids(kind, id),
        client.movie_release_dates(id),
        client.similar(kind, id),
    );

    MovieDetailBundle {
        id,
        details: ok_or_log("movie details", details),
        credits: ok_or_log("movie credits", credits),
        videos: ok_or_log("movie videos", videos),
        reviews: ok_or_log("movie reviews", reviews),
        recommendations: ok_or_log("movie recommendations", recommendations),
        images: ok_or_log("movie images", images),
        keywords: ok_or_log("movie keywords", keywords),
        external_ids: ok_or_log("movie external ids", external_ids),
        release_dates: ok_or_log("movie release dates", release_dates),
        similar: ok_or_log("similar movies", similar),
    }
}

impl MoviesStore {
    /// Applies the settled bundle: every present field replaces its key,
    /// every failed fetch leaves the key at its cleared default.
    pub fn apply_detail(&mut self, bundle: MovieDetailBundle) {
        if let Some(details) = bundle.details {
            self.details = Some(details);
        }
        if let Some(credits) = bundle.credits {
            self.credits = Some(credits);
        }
        if let Some(videos) = bundle.videos {
            self.videos = videos;
        }
        if let Some(reviews) = bundle.reviews {
            self.reviews = reviews;
        }
        if let Some(recommendations) = bundle.recommendations {
            self.recommendations = recommendations;
        }
        if let Some(images) = bundle.images {
            self.images = Some(images);
        }
        if let Some(keywords) = bundle.keywords {
            self.keywords = keywords;
        }
        if let Some(external_ids) = bundle.external_ids {
            self.external_ids = Some(external_ids);
        }
        if let Some(release_dates) = bundle.release_dates {
            self.release_dates = release_dates;
        }
        if let Some(similar) = bundle.similar {
            self.similar = similar;
        }
    }
}

#[derive(Debug, Clone)]
pub struct SeriesDetailBundle {
    pub id: MediaId,
    pub details: Option<MediaDetails>,
    pub credits: Option<CreditsSet>,
    pub videos: Option<Vec<Video>>,
    pub reviews: Option<Vec<Review>>,
    pub recommendations: Option<Vec<MediaSummary>>,
    pub images: Option<ImagesSet>,
    pub keywords: Option<Vec<Keyword>>,
    pub external_ids: Option<ExternalIds>,
    pub content_ratings: Option<Vec<ContentRating>>,
    pub similar: Option<Vec<MediaSummary>>,
}

pub async fn load_series_detail(client: TmdbClient, id: MediaId) -> SeriesDetailBundle {
    let kind = MediaKind::Tv;
    let (
        details,
        credits,
        videos,
        reviews,
        recommendations,
        images,
        keywords,
        external_ids,
        content_ratings,
        similar,
    ) = tokio::join!(
        client.details(kind, id),
        client.credits(kind, id),
        client.videos(kind, id),
        client.reviews(kind, id),
        client.recommendations(kind, id),
        client.images(kind, id),
        client.keywords(kind, id),
        client.external_ids(kind, id),
        client.series_content_ratings(id),
        client.similar(kind, id),
    );

    SeriesDetailBundle {
        id,
        details: ok_or_log("series details", details),
        credits: ok_or_log("series credits", credits),
        videos: ok_or_log("series videos", videos),
        reviews: ok_or_log("series reviews", reviews),
        recommendations: ok_or_log("series recommendations", recommendations),
        images: ok_or_log("series images", images),
        keywords: ok_or_log("series keywords", keywords),
        external_ids: ok_or_log("series external ids", external_ids),
        content_ratings: ok_or_log("series content ratings", content_ratings),
        similar: ok_or_log("similar series", similar),
    }
}

impl SeriesStore {
    pub fn apply_detail(&mut self, bundle: SeriesDetailBundle) {
        if let Some(details) = bundle.details {
            self.details = Some(details);
        }
        if let Some(credits) = bundle.credits {
            self.credits = Some(credits);
        }
        if let Some(videos) = bundle.videos {
            self.videos = videos;
        }
        if let Some(reviews) = bundle.reviews {
            self.reviews = reviews;
        }
        if let Some(recommendations) = bundle.recommendations {
            self.recommendations = recommendations;
        }
        if let Some(images) = bundle.images {
            self.images = Some(images);
        }
        if let Some(keywords) = bundle.keywords {
            self.keywords = keywords;
        }
        if let Some(external_ids) = bundle.external_ids {
            self.external_ids = Some(external_ids);
        }
        if let Some(content_ratings) = bundle.content_ratings {
            self.content_ratings = content_ratings;
        }
        if let Some(similar) = bundle.similar {
            self.similar = similar;
        }
    }
}

#[derive(Debug, Clone)]
pub struct PersonBundle {
    pub id: MediaId,
    pub details: Option<PersonDetails>,
    pub combined_credits: Option<PersonCredits>,
    pub movie_credits: Option<PersonCredits>,
    pub tv_credits: Option<PersonCredits>,
    pub images: Option<ImagesSet>,
    pub external_ids: Option<ExternalIds>,
}

pub async fn load_person(client: TmdbClient, id: MediaId) -> PersonBundle {
    let (details, combined_credits, movie_credits, tv_credits, images, external_ids) = tokio::join!(
        client.person_details(id),
        client.person_combined_credits(id),
        client.person_movie_credits(id),
        client.person_tv_credits(id),
        client.person_images(id),
        client.person_external_ids(id),
    );

    PersonBundle {
        id,
        details: ok_or_log("person details", details),
        combined_credits: ok_or_log("person combined credits", combined_credits),
        movie_credits: ok_or_log("person movie credits", movie_credits),
        tv_credits: ok_or_log("person tv credits", tv_credits),
        images: ok_or_log("person images", images),
        external_ids: ok_or_log("person external ids", external_ids),
    }
}

impl PersonStore {
    pub fn apply(&mut self, bundle: PersonBundle) {
        if let Some(details) = bundle.details {
            self.details = Some(details);
        }
        if let Some(credits) = bundle.combined_credits {
            self.combined_credits = Some(credits);
        }
        if let Some(credits) = bundle.movie_credits {
            self.movie_credits = Some(credits);
        }
        if let Some(credits) = bundle.tv_credits {
            self.tv_credits = Some(credits);
        }
        if let Some(images) = bundle.images {
            self.images = Some(images);
        }
        if let Some(external_ids) = bundle.external_ids {
            self.external_ids = Some(external_ids);
        }
    }
}

#[derive(Debug, Clone)]
pub struct CastCrewBundle {
    pub kind: MediaKind,
    pub id: MediaId,
    pub details: Option<MediaDetails>,
    pub credits: Option<CreditsSet>,
}

pub async fn load_cast_crew(client: TmdbClient, kind: MediaKind, id: MediaId) -> CastCrewBundle {
    let (details, credits) = tokio::join!(client.details(kind, id), client.credits(kind, id));

    CastCrewBundle {
        kind,
        id,
        details: ok_or_log("cast crew details", details),
        credits: ok_or_log("cast crew credits", credits),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::CastMember;

    fn details(id: MediaId, title: &str) -> MediaDetails {
        MediaDetails {
            id,
            title: Some(String::from(title)),
            name: None,
            overview: String::new(),
            tagline: None,
            poster_path: None,
            backdrop_path: None,
            vote_average: 0.0,
            vote_count: 0,
            popularity: 0.0,
            release_date: None,
            first_air_date: None,
            runtime: None,
            episode_run_time: Vec::new(),
            number_of_seasons: None,
            number_of_episodes: None,
            genres: Vec::new(),
            budget: None,
            revenue: None,
            status: None,
            original_language: None,
            homepage: None,
            production_companies: Vec::new(),
        }
    }

    fn credits() -> CreditsSet {
        CreditsSet {
            cast: vec![CastMember {
                id: 7,
                name: String::from("Ana"),
                character: String::from("Lead"),
                profile_path: None,
                order: 0,
            }],
            crew: Vec::new(),
        }
    }

    fn bundle_with_failed_reviews(id: MediaId) -> MovieDetailBundle {
        MovieDetailBundle {
            id,
            details: Some(details(id, "Heat")),
            credits: Some(credits()),
            videos: Some(Vec::new()),
            reviews: None,
            recommendations: Some(Vec::new()),
            images: Some(ImagesSet::default()),
            keywords: Some(Vec::new()),
            external_ids: Some(ExternalIds::default()),
            release_dates: Some(Vec::new()),
            similar: Some(Vec::new()),
        }
    }

    #[test]
    fn one_failed_fetch_still_applies_the_rest() {
        let mut store = MoviesStore::default();
        store.apply_detail(bundle_with_failed_reviews(11));

        assert_eq!(store.details.as_ref().unwrap().id, 11);
        assert_eq!(store.credits.as_ref().unwrap().cast.len(), 1);
        assert!(store.external_ids.is_some());
        assert!(store.reviews.is_empty());
    }

    #[test]
    fn a_second_bundle_replaces_the_first_wholesale() {
        let mut store = MoviesStore::default();
        store.apply_detail(bundle_with_failed_reviews(11));

        store.clear_detail();
        let mut second = bundle_with_failed_reviews(22);
        second.details = Some(details(22, "Ronin"));
        second.reviews = Some(vec![Review {
            id: String::from("r1"),
            author: String::from("critic"),
            content: String::from("tense"),
            created_at: None,
        }]);
        store.apply_detail(second);

        assert_eq!(store.details.as_ref().unwrap().id, 22);
        assert_eq!(store.reviews.len(), 1);
    }

    #[test]
    fn empty_home_bundle_is_detected() {
        assert!(HomeBundle::default().is_empty());
        let partial = HomeBundle {
            top_series: Some(Vec::new()),
            ..HomeBundle::default()
        };
        assert!(!partial.is_empty());
    }
}
