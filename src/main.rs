mod bundles;
mod cards;
mod components;
mod details;
mod gallery;
mod handlers;
mod home;
mod listing;
mod media;
mod people;
mod search;
mod settings;
mod state;
mod tmdb;
mod view_state;

use iced::widget::container;
use iced::{Element, Font, Length, Size, Subscription, Task, Theme};
use tracing_subscriber::EnvFilter;

use media::{Genre, ImageCache, LoadingState, Message, Page, BACKGROUND_BLACK};
use settings::{AppSettings, SetupPage};
use state::{MoviesStore, PersonStore, SearchStore, SeriesStore};
use tmdb::TmdbClient;
use view_state::{DetailView, GalleryView, HomeView, ListingView, SearchView};

pub struct Reelview {
    pub setup_page: Option<SetupPage>,
    pub tmdb_client: Option<TmdbClient>,
    pub current_page: Page,
    pub history: Vec<Page>,
    pub loading_state: LoadingState,
    pub error_message: Option<String>,
    pub image_cache: ImageCache,
    pub genre_list: Vec<Genre>,

    pub movies: MoviesStore,
    pub series: SeriesStore,
    pub person: PersonStore,
    pub search: SearchStore,

    pub home_view: HomeView,
    pub listing_view: ListingView,
    pub detail_view: DetailView,
    pub gallery_view: GalleryView,
    pub search_view: SearchView,
}

impl Default for Reelview {
    fn default() -> Self {
        Self {
            setup_page: None,
            tmdb_client: None,
            current_page: Page::Home,
            history: Vec::new(),
            loading_state: LoadingState::Loading,
            error_message: None,
            image_cache: ImageCache::new(),
            genre_list: Vec::new(),
            movies: MoviesStore::default(),
            series: SeriesStore::default(),
            person: PersonStore::default(),
            search: SearchStore::default(),
            home_view: HomeView::default(),
            listing_view: ListingView::default(),
            detail_view: DetailView::default(),
            gallery_view: GalleryView::default(),
            search_view: SearchView::default(),
        }
    }
}

impl Reelview {
    fn new() -> (Self, Task<Message>) {
        let settings = match AppSettings::load() {
            Some(s) if s.is_valid() => s,
            _ => {
                return (
                    Self {
                        setup_page: Some(SetupPage::default()),
                        ..Default::default()
                    },
                    Task::none(),
                );
            }
        };

        let mut app = Self::default();
        let task = app.initialize_with_settings(settings);
        (app, task)
    }

    fn initialize_with_settings(&mut self, settings: AppSettings) -> Task<Message> {
        let client = TmdbClient::from_settings(&settings);
        self.tmdb_client = Some(client.clone());
        self.setup_page = None;
        self.loading_state = LoadingState::Loading;

        let config_client = client.clone();
        let genres_client = client;

        let startup = Task::batch([
            Task::perform(
                async move { config_client.configuration().await },
                Message::ConfigurationLoaded,
            ),
            Task::perform(
                async move { genres_client.genres().await },
                Message::GenresLoaded,
            ),
        ]);

        Task::batch([startup, handlers::activate_page(self, Page::Home)])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        if let Message::Setup(setup_msg) = message {
            if let Some(ref mut setup) = self.setup_page {
                if let Some(settings) = setup.update(setup_msg) {
                    return self.initialize_with_settings(settings);
                }
            }
            return Task::none();
        }
        handlers::handle_message(self, message)
    }

    fn view(&self) -> Element<'_, Message> {
        if let Some(ref setup) = self.setup_page {
            return setup.view().map(Message::Setup);
        }

        container(self.view_main_content())
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Color(BACKGROUND_BLACK)),
                ..Default::default()
            })
            .into()
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        // Only live timer: the search-suggestion debounce window.
        if self.search_view.debounce_timer.is_some() {
            return iced::time::every(std::time::Duration::from_millis(50))
                .map(|_| Message::SearchDebounceTriggered);
        }
        Subscription::none()
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> iced::Result {
    init_tracing();

    iced::application(Reelview::new, Reelview::update, Reelview::view)
        .title("Reelview")
        .theme(Reelview::theme)
        .window_size(Size::new(1280.0, 720.0))
        .font(iced_fonts::BOOTSTRAP_FONT_BYTES)
        .default_font(Font::DEFAULT)
        .subscription(Reelview::subscription)
        .run()
}
