use iced::Task;
use tracing::warn;

use crate::bundles::{
    load_cast_crew, load_home, load_movie_detail, load_person, load_series_detail, CastCrewBundle,
    HomeBundle, MovieDetailBundle, PersonBundle, SeriesDetailBundle,
};
use crate::media::{
    Episode, ImagesSet, LoadingState, MediaId, MediaKind, MediaSummary, Message, Page,
    SeasonDetails,
};
use crate::state::PersonStore;
use crate::tmdb::{fetch_image_bytes, ApiError, ImageSize, TmdbClient};
use crate::view_state::{
    apply_page_action, carousel_slice, sorted_media, CarouselKind, DetailView, GalleryView,
    HomeView, ListingKind, MediaTab, PageAction, SearchKind, SearchView, SortKey, SortOrder,
    StepDirection, HOME_CARDS_PER_WINDOW, LISTING_ITEMS_PER_PAGE,
};
use crate::Reelview;

pub fn handle_message(app: &mut Reelview, message: Message) -> Task<Message> {
    match message {
        Message::Setup(_) => Task::none(),
        Message::NavigateTo(page) => handle_navigate(app, page),
        Message::Back => handle_back(app),
        Message::RetryLoad => handle_retry_load(app),
        Message::ConfigurationLoaded(result) => handle_configuration_loaded(app, result),
        Message::GenresLoaded(result) => handle_genres_loaded(app, result),

        Message::HomeLoaded(bundle) => handle_home_loaded(app, *bundle),
        Message::SetSortKey(key) => handle_set_sort_key(app, key),
        Message::SetSortOrder(order) => handle_set_sort_order(app, order),
        Message::CarouselStep(kind, direction) => handle_carousel_step(app, kind, direction),

        Message::MoviesLoaded(result) => handle_movies_loaded(app, result),
        Message::SeriesLoaded(result) => handle_series_loaded(app, result),
        Message::ListingPage(kind, action) => handle_listing_page(app, kind, action),

        Message::MovieDetailLoaded(bundle) => handle_movie_detail_loaded(app, *bundle),
        Message::SeriesDetailLoaded(bundle) => handle_series_detail_loaded(app, *bundle),
        Message::SelectMediaTab(tab) => handle_select_media_tab(app, tab),
        Message::ToggleAllReviews => {
            app.detail_view.show_all_reviews = !app.detail_view.show_all_reviews;
            Task::none()
        }
        Message::SelectSeason(season) => handle_select_season(app, season),
        Message::SeasonLoaded(season, result) => handle_season_loaded(app, season, result),
        Message::EpisodeLoaded(season, episode, result) => {
            handle_episode_loaded(app, season, episode, result)
        }

        Message::PersonLoaded(bundle) => handle_person_loaded(app, *bundle),
        Message::CastCrewLoaded(bundle) => handle_cast_crew_loaded(app, *bundle),

        Message::GalleryLoaded(result) => handle_gallery_loaded(app, result),
        Message::SelectLanguage(filter) => {
            app.gallery_view.language = filter;
            Task::none()
        }

        Message::SearchQueryChanged(query) => handle_search_query_changed(app, query),
        Message::SearchKindChanged(kind) => handle_search_kind_changed(app, kind),
        Message::SearchSubmit => handle_search_submit(app),
        Message::SearchDebounceTriggered => handle_search_debounce_triggered(app),
        Message::SuggestionsLoaded(result) => handle_suggestions_loaded(app, result),
        Message::SearchResultsLoaded(result) => handle_search_results_loaded(app, result),
        Message::ClearSearch => handle_clear_search(app),

        Message::LoadImage(url) => handle_load_image(app, url),
        Message::ImageLoaded(url, result) => handle_image_loaded(app, url, result),
    }
}

fn handle_navigate(app: &mut Reelview, page: Page) -> Task<Message> {
    if app.current_page != page {
        let previous = app.current_page.clone();
        app.history.push(previous);
    }
    activate_page(app, page)
}

fn handle_back(app: &mut Reelview) -> Task<Message> {
    match app.history.pop() {
        Some(page) => activate_page(app, page),
        None => Task::none(),
    }
}

fn handle_retry_load(app: &mut Reelview) -> Task<Message> {
    app.error_message = None;
    let page = app.current_page.clone();
    activate_page(app, page)
}

/// Mounts a page: resets its view state, clears the stores it replaces and
/// fires its fetch bundle. Re-activating the current page refetches, which
/// is also how Back and Retry remount.
pub fn activate_page(app: &mut Reelview, page: Page) -> Task<Message> {
    app.current_page = page.clone();
    app.search_view.show_suggestions = false;
    let Some(client) = app.tmdb_client.clone() else {
        return Task::none();
    };

    match page {
        Page::Home => {
            app.home_view = HomeView::default();
            app.loading_state = LoadingState::Loading;
            Task::perform(load_home(client), |bundle| {
                Message::HomeLoaded(Box::new(bundle))
            })
        }
        Page::Movies => {
            app.listing_view.movies_page = 1;
            Task::perform(
                async move { client.popular_movies().await },
                Message::MoviesLoaded,
            )
        }
        Page::Series => {
            app.listing_view.series_page = 1;
            Task::perform(
                async move { client.popular_series().await },
                Message::SeriesLoaded,
            )
        }
        Page::MovieDetails(id) => {
            app.movies.clear_detail();
            app.detail_view = DetailView::default();
            Task::perform(load_movie_detail(client, id), |bundle| {
                Message::MovieDetailLoaded(Box::new(bundle))
            })
        }
        Page::SeriesDetails(id) => {
            app.series.clear_detail();
            app.detail_view = DetailView::default();
            let season_task = fetch_season(client.clone(), id, 1);
            let bundle_task = Task::perform(load_series_detail(client, id), |bundle| {
                Message::SeriesDetailLoaded(Box::new(bundle))
            });
            Task::batch([bundle_task, season_task])
        }
        Page::Person(id) => {
            app.person = PersonStore::default();
            Task::perform(load_person(client, id), |bundle| {
                Message::PersonLoaded(Box::new(bundle))
            })
        }
        Page::CastCrew(kind, id) => Task::perform(load_cast_crew(client, kind, id), |bundle| {
            Message::CastCrewLoaded(Box::new(bundle))
        }),
        Page::Posters(kind, id) | Page::Backdrops(kind, id) => {
            app.gallery_view = GalleryView::default();
            Task::perform(
                async move { client.images(kind, id).await },
                Message::GalleryLoaded,
            )
        }
        Page::SearchResults(kind, query) => {
            app.search.results.clear();
            Task::perform(
                async move { client.search(kind, &query).await },
                Message::SearchResultsLoaded,
            )
        }
    }
}

fn fetch_season(client: TmdbClient, tv_id: MediaId, season: u32) -> Task<Message> {
    Task::perform(
        async move { client.season_details(tv_id, season).await },
        move |result| Message::SeasonLoaded(season, result),
    )
}

/// Queues downloads for every image path not already cached or in flight.
fn image_tasks<'a>(
    app: &Reelview,
    paths: impl IntoIterator<Item = &'a str>,
    size: ImageSize,
) -> Task<Message> {
    let Some(client) = &app.tmdb_client else {
        return Task::none();
    };
    let mut tasks = Vec::new();
    for path in paths {
        let url = client.image_url(path, size.clone());
        if app.image_cache.get(&url).is_none() && !app.image_cache.is_pending(&url) {
            tasks.push(Task::done(Message::LoadImage(url)));
        }
    }
    Task::batch(tasks)
}

fn summary_posters<'a>(items: &'a [MediaSummary]) -> impl Iterator<Item = &'a str> {
    items.iter().filter_map(|i| i.poster_path.as_deref())
}

fn handle_configuration_loaded(
    app: &mut Reelview,
    result: Result<crate::media::Configuration, ApiError>,
) -> Task<Message> {
    match result {
        Ok(configuration) => {
            if let Some(client) = &mut app.tmdb_client {
                client.set_image_base(&configuration.images.secure_base_url);
            }
        }
        Err(error) => warn!(%error, "configuration fetch failed, keeping default image base"),
    }
    Task::none()
}

fn handle_genres_loaded(
    app: &mut Reelview,
    result: Result<Vec<crate::media::Genre>, ApiError>,
) -> Task<Message> {
    match result {
        Ok(genres) => app.genre_list = genres,
        Err(error) => warn!(%error, "genre list fetch failed"),
    }
    Task::none()
}

fn home_window_images(app: &Reelview) -> Task<Message> {
    let kinds = [
        CarouselKind::PopularMovies,
        CarouselKind::PopularSeries,
        CarouselKind::TopMovies,
        CarouselKind::TopSeries,
    ];
    let mut tasks = Vec::new();
    for kind in kinds {
        let sorted = sorted_media(
            app.carousel_items(kind),
            app.home_view.sort_key,
            app.home_view.sort_order,
        );
        let window = carousel_slice(&sorted, app.home_view.index(kind), HOME_CARDS_PER_WINDOW);
        let paths: Vec<String> = window
            .iter()
            .filter_map(|i| i.poster_path.clone())
            .collect();
        tasks.push(image_tasks(
            app,
            paths.iter().map(String::as_str),
            ImageSize::Poster,
        ));
    }
    Task::batch(tasks)
}

fn handle_home_loaded(app: &mut Reelview, bundle: HomeBundle) -> Task<Message> {
    if bundle.is_empty() {
        app.loading_state = LoadingState::Error(String::from("Failed to load content"));
        return Task::none();
    }

    if let Some(items) = bundle.popular_movies {
        app.movies.popular = items;
    }
    if let Some(items) = bundle.top_movies {
        app.movies.top_rated = items;
    }
    if let Some(items) = bundle.popular_series {
        app.series.popular = items;
    }
    if let Some(items) = bundle.top_series {
        app.series.top_rated = items;
    }
    app.loading_state = LoadingState::Idle;
    home_window_images(app)
}

fn handle_set_sort_key(app: &mut Reelview, key: SortKey) -> Task<Message> {
    app.home_view.sort_key = key;
    app.home_view.reset_indices();
    home_window_images(app)
}

fn handle_set_sort_order(app: &mut Reelview, order: SortOrder) -> Task<Message> {
    app.home_view.sort_order = order;
    app.home_view.reset_indices();
    home_window_images(app)
}

fn handle_carousel_step(
    app: &mut Reelview,
    kind: CarouselKind,
    direction: StepDirection,
) -> Task<Message> {
    let len = app.carousel_items(kind).len();
    let index = app.home_view.index_mut(kind);
    match direction {
        StepDirection::Back => {
            *index = index.saturating_sub(1);
        }
        StepDirection::Forward => {
            if crate::view_state::has_next_window(len, *index, HOME_CARDS_PER_WINDOW) {
                *index += 1;
            }
        }
    }
    home_window_images(app)
}

fn listing_window_images(app: &Reelview, kind: ListingKind) -> Task<Message> {
    let (items, page) = match kind {
        ListingKind::Movies => (&app.movies.popular, app.listing_view.movies_page),
        ListingKind::Series => (&app.series.popular, app.listing_view.series_page),
    };
    let window = crate::view_state::page_slice(items, page, LISTING_ITEMS_PER_PAGE);
    image_tasks(app, summary_posters(window), ImageSize::Poster)
}

fn handle_movies_loaded(
    app: &mut Reelview,
    result: Result<Vec<MediaSummary>, ApiError>,
) -> Task<Message> {
    match result {
        Ok(items) => {
            app.movies.popular = items;
            listing_window_images(app, ListingKind::Movies)
        }
        Err(error) => {
            warn!(%error, "popular movies fetch failed");
            app.error_message = Some(error.to_string());
            Task::none()
        }
    }
}

fn handle_series_loaded(
    app: &mut Reelview,
    result: Result<Vec<MediaSummary>, ApiError>,
) -> Task<Message> {
    match result {
        Ok(items) => {
            app.series.popular = items;
            listing_window_images(app, ListingKind::Series)
        }
        Err(error) => {
            warn!(%error, "popular series fetch failed");
            app.error_message = Some(error.to_string());
            Task::none()
        }
    }
}

fn handle_listing_page(app: &mut Reelview, kind: ListingKind, action: PageAction) -> Task<Message> {
    match kind {
        ListingKind::Movies => {
            app.listing_view.movies_page = apply_page_action(
                app.listing_view.movies_page,
                action,
                app.movies.popular.len(),
                LISTING_ITEMS_PER_PAGE,
            );
        }
        ListingKind::Series => {
            app.listing_view.series_page = apply_page_action(
                app.listing_view.series_page,
                action,
                app.series.popular.len(),
                LISTING_ITEMS_PER_PAGE,
            );
        }
    }
    listing_window_images(app, kind)
}

const CAST_STRIP_LEN: usize = 5;
const MEDIA_TAB_PREVIEW_LEN: usize = 4;

fn detail_image_tasks(app: &Reelview, kind: MediaKind) -> Task<Message> {
    let (details, credits, images, recommendations, similar) = match kind {
        MediaKind::Movie => (
            &app.movies.details,
            &app.movies.credits,
            &app.movies.images,
            &app.movies.recommendations,
            &app.movies.similar,
        ),
        MediaKind::Tv => (
            &app.series.details,
            &app.series.credits,
            &app.series.images,
            &app.series.recommendations,
            &app.series.similar,
        ),
    };

    let mut tasks = Vec::new();

    if let Some(details) = details {
        if let Some(path) = &details.poster_path {
            tasks.push(image_tasks(app, [path.as_str()], ImageSize::Poster));
        }
    }
    if let Some(credits) = credits {
        let profiles = credits
            .cast
            .iter()
            .take(CAST_STRIP_LEN)
            .filter_map(|m| m.profile_path.as_deref());
        tasks.push(image_tasks(app, profiles, ImageSize::Poster));
    }
    if let Some(images) = images {
        let backdrops = images
            .backdrops
            .iter()
            .take(MEDIA_TAB_PREVIEW_LEN)
            .map(|i| i.file_path.as_str());
        tasks.push(image_tasks(app, backdrops, ImageSize::Strip));
        let posters = images
            .posters
            .iter()
            .take(MEDIA_TAB_PREVIEW_LEN)
            .map(|i| i.file_path.as_str());
        tasks.push(image_tasks(app, posters, ImageSize::Strip));
    }
    tasks.push(image_tasks(
        app,
        summary_posters(recommendations),
        ImageSize::Strip,
    ));
    tasks.push(image_tasks(app, summary_posters(similar), ImageSize::Strip));

    Task::batch(tasks)
}

fn handle_movie_detail_loaded(app: &mut Reelview, bundle: MovieDetailBundle) -> Task<Message> {
    app.movies.apply_detail(bundle);
    detail_image_tasks(app, MediaKind::Movie)
}

fn handle_series_detail_loaded(app: &mut Reelview, bundle: SeriesDetailBundle) -> Task<Message> {
    app.series.apply_detail(bundle);
    detail_image_tasks(app, MediaKind::Tv)
}

fn handle_select_media_tab(app: &mut Reelview, tab: MediaTab) -> Task<Message> {
    app.detail_view.active_tab = tab;
    let kind = match app.current_page {
        Page::SeriesDetails(_) => MediaKind::Tv,
        _ => MediaKind::Movie,
    };
    detail_image_tasks(app, kind)
}

fn handle_select_season(app: &mut Reelview, season: u32) -> Task<Message> {
    app.detail_view.selected_season = season;
    let Page::SeriesDetails(tv_id) = app.current_page else {
        return Task::none();
    };
    let Some(client) = app.tmdb_client.clone() else {
        return Task::none();
    };
    fetch_season(client, tv_id, season)
}

fn handle_season_loaded(
    app: &mut Reelview,
    season: u32,
    result: Result<SeasonDetails, ApiError>,
) -> Task<Message> {
    let details = match result {
        Ok(details) => details,
        Err(error) => {
            warn!(season, %error, "season fetch failed");
            return Task::none();
        }
    };

    let stills: Vec<String> = details
        .episodes
        .iter()
        .take(MEDIA_TAB_PREVIEW_LEN)
        .filter_map(|e| e.still_path.clone())
        .collect();
    let first_episode = details.episodes.first().map(|e| e.episode_number);
    app.series.set_season(details);

    let image_task = image_tasks(app, stills.iter().map(String::as_str), ImageSize::Strip);

    // The first episode of a freshly loaded season is expanded by default.
    let episode_task = match (app.current_page.clone(), first_episode) {
        (Page::SeriesDetails(tv_id), Some(episode)) => {
            let Some(client) = app.tmdb_client.clone() else {
                return image_task;
            };
            Task::perform(
                async move { client.episode_details(tv_id, season, episode).await },
                move |result| Message::EpisodeLoaded(season, episode, result),
            )
        }
        _ => Task::none(),
    };

    Task::batch([image_task, episode_task])
}

fn handle_episode_loaded(
    app: &mut Reelview,
    season: u32,
    episode: u32,
    result: Result<Episode, ApiError>,
) -> Task<Message> {
    match result {
        Ok(details) => app.series.set_episode(details),
        Err(error) => warn!(season, episode, %error, "episode fetch failed"),
    }
    Task::none()
}

fn handle_person_loaded(app: &mut Reelview, bundle: PersonBundle) -> Task<Message> {
    app.person.apply(bundle);

    let mut tasks = Vec::new();
    if let Some(details) = &app.person.details {
        if let Some(path) = &details.profile_path {
            tasks.push(image_tasks(app, [path.as_str()], ImageSize::Poster));
        }
    }
    if let Some(credits) = &app.person.combined_credits {
        let posters = credits
            .cast
            .iter()
            .take(10)
            .filter_map(|c| c.poster_path.as_deref());
        tasks.push(image_tasks(app, posters, ImageSize::Poster));
    }
    Task::batch(tasks)
}

fn handle_cast_crew_loaded(app: &mut Reelview, bundle: CastCrewBundle) -> Task<Message> {
    let (details_slot, credits_slot) = match bundle.kind {
        MediaKind::Movie => (&mut app.movies.details, &mut app.movies.credits),
        MediaKind::Tv => (&mut app.series.details, &mut app.series.credits),
    };
    if let Some(details) = bundle.details {
        *details_slot = Some(details);
    }
    if let Some(credits) = bundle.credits {
        *credits_slot = Some(credits);
    }

    let credits = match bundle.kind {
        MediaKind::Movie => &app.movies.credits,
        MediaKind::Tv => &app.series.credits,
    };
    let Some(credits) = credits else {
        return Task::none();
    };
    let profiles: Vec<String> = credits
        .cast
        .iter()
        .filter_map(|m| m.profile_path.clone())
        .chain(credits.crew.iter().filter_map(|m| m.profile_path.clone()))
        .collect();
    image_tasks(app, profiles.iter().map(String::as_str), ImageSize::Poster)
}

fn handle_gallery_loaded(
    app: &mut Reelview,
    result: Result<ImagesSet, ApiError>,
) -> Task<Message> {
    let images = match result {
        Ok(images) => images,
        Err(error) => {
            warn!(%error, "gallery fetch failed");
            app.error_message = Some(error.to_string());
            return Task::none();
        }
    };

    let paths: Vec<String> = match app.current_page {
        Page::Posters(..) => images.posters.iter().map(|i| i.file_path.clone()).collect(),
        Page::Backdrops(..) => images
            .backdrops
            .iter()
            .map(|i| i.file_path.clone())
            .collect(),
        _ => Vec::new(),
    };

    match app.current_page {
        Page::Posters(MediaKind::Movie, _) | Page::Backdrops(MediaKind::Movie, _) => {
            app.movies.images = Some(images);
        }
        Page::Posters(MediaKind::Tv, _) | Page::Backdrops(MediaKind::Tv, _) => {
            app.series.images = Some(images);
        }
        _ => {}
    }

    image_tasks(app, paths.iter().map(String::as_str), ImageSize::Poster)
}

const SEARCH_DEBOUNCE: std::time::Duration = std::time::Duration::from_millis(300);

fn handle_search_query_changed(app: &mut Reelview, query: String) -> Task<Message> {
    app.search_view.query = query;

    if app.search_view.query.trim().is_empty() {
        return Task::done(Message::ClearSearch);
    }

    app.search_view.show_suggestions = true;
    app.search_view.debounce_timer = Some(std::time::Instant::now());
    Task::none()
}

fn handle_search_kind_changed(app: &mut Reelview, kind: SearchKind) -> Task<Message> {
    app.search_view.kind = kind;
    if !app.search_view.query.trim().is_empty() {
        app.search_view.debounce_timer = Some(std::time::Instant::now());
    }
    Task::none()
}

fn handle_search_debounce_triggered(app: &mut Reelview) -> Task<Message> {
    let Some(timer) = app.search_view.debounce_timer else {
        return Task::none();
    };
    if timer.elapsed() < SEARCH_DEBOUNCE {
        return Task::none();
    }
    app.search_view.debounce_timer = None;

    let query = app.search_view.query.trim().to_string();
    if query.chars().count() < 2 {
        app.search_view.suggestions.clear();
        return Task::none();
    }

    let Some(client) = app.tmdb_client.clone() else {
        return Task::none();
    };
    let kind = app.search_view.kind;
    Task::perform(
        async move { client.search(kind, &query).await },
        Message::SuggestionsLoaded,
    )
}

fn handle_suggestions_loaded(
    app: &mut Reelview,
    result: Result<Vec<MediaSummary>, ApiError>,
) -> Task<Message> {
    let items = match result {
        Ok(items) => items,
        Err(error) => {
            warn!(%error, "suggestion fetch failed");
            app.search_view.suggestions.clear();
            return Task::none();
        }
    };
    app.search_view.suggestions = items;
    let paths: Vec<String> = app
        .search_view
        .suggestions
        .iter()
        .take(8)
        .filter_map(|i| i.poster_path.clone())
        .collect();
    image_tasks(app, paths.iter().map(String::as_str), ImageSize::Poster)
}

fn handle_search_submit(app: &mut Reelview) -> Task<Message> {
    let query = app.search_view.query.trim().to_string();
    if query.is_empty() {
        return Task::none();
    }
    app.search_view.show_suggestions = false;
    Task::done(Message::NavigateTo(Page::SearchResults(
        app.search_view.kind,
        query,
    )))
}

fn handle_search_results_loaded(
    app: &mut Reelview,
    result: Result<Vec<MediaSummary>, ApiError>,
) -> Task<Message> {
    match result {
        Ok(items) => {
            app.search.results = items;
            image_tasks(app, summary_posters(&app.search.results), ImageSize::Poster)
        }
        Err(error) => {
            warn!(%error, "search fetch failed");
            app.error_message = Some(error.to_string());
            Task::none()
        }
    }
}

fn handle_clear_search(app: &mut Reelview) -> Task<Message> {
    let kind = app.search_view.kind;
    app.search_view = SearchView {
        kind,
        ..SearchView::default()
    };
    Task::none()
}

fn handle_load_image(app: &mut Reelview, url: String) -> Task<Message> {
    if app.image_cache.get(&url).is_some() || app.image_cache.is_pending(&url) {
        return Task::none();
    }
    app.image_cache.mark_pending(url.clone());
    let image_url = url.clone();
    let cache_path = app.image_cache.get_cache_path(&url);

    Task::perform(
        async move {
            if let Some(ref path) = cache_path {
                if path.exists() {
                    if let Ok(bytes) = tokio::fs::read(path).await {
                        return (image_url, Ok(bytes), cache_path, true);
                    }
                }
            }
            let bytes = fetch_image_bytes(image_url.clone()).await;
            (image_url, bytes, cache_path, false)
        },
        |(url, result, cache_path, from_cache)| match result {
            Ok(bytes) => {
                if !from_cache {
                    if let Some(path) = cache_path {
                        let bytes_clone = bytes.clone();
                        std::thread::spawn(move || {
                            let _ = std::fs::write(path, &bytes_clone);
                        });
                    }
                }
                Message::ImageLoaded(url, Ok(iced::widget::image::Handle::from_bytes(bytes)))
            }
            Err(error) => Message::ImageLoaded(url, Err(error)),
        },
    )
}

fn handle_image_loaded(
    app: &mut Reelview,
    url: String,
    result: Result<iced::widget::image::Handle, String>,
) -> Task<Message> {
    if let Ok(handle) = result {
        app.image_cache.insert(url, handle);
    }
    Task::none()
}
