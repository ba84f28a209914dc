//! In-memory state containers, one per domain.
//!
//! Each store holds the last-fetched payload per data kind. Writes are
//! whole-value replacements; nothing is normalized or cross-referenced, and
//! nothing survives past the next fetch for the same route.

use std::collections::HashMap;

use crate::media::{
    ContentRating, CreditsSet, Episode, ExternalIds, ImagesSet, Keyword, MediaDetails,
    MediaSummary, PersonCredits, PersonDetails, ReleaseDatesResult, Review, SeasonDetails, Video,
};

#[derive(Debug, Clone, Default)]
pub struct MoviesStore {
    pub popular: Vec<MediaSummary>,
    pub top_rated: Vec<MediaSummary>,
    pub details: Option<MediaDetails>,
    pub credits: Option<CreditsSet>,
    pub videos: Vec<Video>,
    pub reviews: Vec<Review>,
    pub recommendations: Vec<MediaSummary>,
    pub images: Option<ImagesSet>,
    pub keywords: Vec<Keyword>,
    pub external_ids: Option<ExternalIds>,
    pub release_dates: Vec<ReleaseDatesResult>,
    pub similar: Vec<MediaSummary>,
}

impl MoviesStore {
    /// Fresh mount of a movie detail route: every detail-scoped key is
    /// dropped, the listing keys stay.
    pub fn clear_detail(&mut self) {
        self.details = None;
        self.credits = None;
        self.videos.clear();
        self.reviews.clear();
        self.recommendations.clear();
        self.images = None;
        self.keywords.clear();
        self.external_ids = None;
        self.release_dates.clear();
        self.similar.clear();
    }
}

#[derive(Debug, Clone, Default)]
pub struct SeriesStore {
    pub popular: Vec<MediaSummary>,
    pub top_rated: Vec<MediaSummary>,
    pub details: Option<MediaDetails>,
    pub credits: Option<CreditsSet>,
    pub videos: Vec<Video>,
    pub reviews: Vec<Review>,
    pub recommendations: Vec<MediaSummary>,
    pub images: Option<ImagesSet>,
    pub keywords: Vec<Keyword>,
    pub external_ids: Option<ExternalIds>,
    pub content_ratings: Vec<ContentRating>,
    pub similar: Vec<MediaSummary>,
    /// Season payloads keyed by season number.
    pub seasons: HashMap<u32, SeasonDetails>,
    /// Episode payloads keyed by (season, episode).
    pub episodes: HashMap<(u32, u32), Episode>,
}

impl SeriesStore {
    pub fn clear_detail(&mut self) {
        self.details = None;
        self.credits = None;
        self.videos.clear();
        self.reviews.clear();
        self.recommendations.clear();
        self.images = None;
        self.keywords.clear();
        self.external_ids = None;
        self.content_ratings.clear();
        self.similar.clear();
        self.seasons.clear();
        self.episodes.clear();
    }

    pub fn set_season(&mut self, season: SeasonDetails) {
        self.seasons.insert(season.season_number, season);
    }

    pub fn set_episode(&mut self, episode: Episode) {
        self.episodes
            .insert((episode.season_number, episode.episode_number), episode);
    }
}

#[derive(Debug, Clone, Default)]
pub struct PersonStore {
    pub details: Option<PersonDetails>,
    pub combined_credits: Option<PersonCredits>,
    pub movie_credits: Option<PersonCredits>,
    pub tv_credits: Option<PersonCredits>,
    pub images: Option<ImagesSet>,
    pub external_ids: Option<ExternalIds>,
}

#[derive(Debug, Clone, Default)]
pub struct SearchStore {
    pub results: Vec<MediaSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn season(number: u32, episode_count: usize) -> SeasonDetails {
        SeasonDetails {
            id: number as u64,
            season_number: number,
            name: format!("Season {}", number),
            overview: String::new(),
            air_date: None,
            poster_path: None,
            episodes: (1..=episode_count as u32).map(|e| episode(number, e)).collect(),
        }
    }

    fn episode(season: u32, number: u32) -> Episode {
        Episode {
            id: (season * 100 + number) as u64,
            episode_number: number,
            season_number: season,
            name: format!("S{}E{}", season, number),
            overview: String::new(),
            air_date: None,
            still_path: None,
            runtime: None,
            vote_average: 0.0,
        }
    }

    #[test]
    fn season_writes_land_under_their_number() {
        let mut store = SeriesStore::default();
        store.set_season(season(1, 8));
        store.set_season(season(2, 10));

        assert_eq!(store.seasons.len(), 2);
        assert_eq!(store.seasons[&1].episodes.len(), 8);
        assert_eq!(store.seasons[&2].episodes.len(), 10);

        // A refetch replaces the season wholesale without touching siblings.
        store.set_season(season(1, 9));
        assert_eq!(store.seasons[&1].episodes.len(), 9);
        assert_eq!(store.seasons[&2].episodes.len(), 10);
    }

    #[test]
    fn episode_writes_are_keyed_by_season_and_number() {
        let mut store = SeriesStore::default();
        store.set_episode(episode(1, 1));
        store.set_episode(episode(1, 2));
        store.set_episode(episode(2, 1));

        assert_eq!(store.episodes.len(), 3);
        assert_eq!(store.episodes[&(1, 2)].name, "S1E2");
        assert_eq!(store.episodes[&(2, 1)].name, "S2E1");
    }

    #[test]
    fn clear_detail_resets_detail_keys() {
        let mut store = SeriesStore::default();
        store.set_season(season(1, 8));
        store.content_ratings = vec![ContentRating {
            iso_3166_1: String::from("US"),
            rating: String::from("TV-MA"),
        }];

        store.clear_detail();
        assert!(store.seasons.is_empty());
        assert!(store.episodes.is_empty());
        assert!(store.content_ratings.is_empty());
        assert!(store.details.is_none());
    }
}
