use iced::widget::{button, column, container, row, text, Column, Row, Space};
use iced::{Border, Color, Element, Length, Padding, Shadow};

use crate::components::{
    accent_button_style, bold_text, icon, ICON_CHEVRON_DOUBLE_LEFT, ICON_CHEVRON_DOUBLE_RIGHT,
    ICON_CHEVRON_LEFT, ICON_CHEVRON_RIGHT, ICON_FILM,
};
use crate::media::{MediaKind, MediaSummary, Message, Page, SURFACE_DARK_GRAY, TEXT_GRAY, TEXT_WHITE};
use crate::tmdb::ImageSize;
use crate::view_state::{
    carousel_slice, has_next_page, has_next_window, has_prev_page, has_prev_window, sorted_media,
    CarouselKind, ListingKind, PageAction, StepDirection, HOME_CARDS_PER_WINDOW,
    LISTING_ITEMS_PER_PAGE,
};
use crate::Reelview;

pub const POSTER_CARD_WIDTH: f32 = 200.0;
pub const POSTER_CARD_HEIGHT: f32 = 300.0;
pub const STRIP_CARD_WIDTH: f32 = 140.0;
pub const STRIP_CARD_HEIGHT: f32 = 210.0;

fn detail_page(item: &MediaSummary) -> Page {
    match item.kind() {
        MediaKind::Movie => Page::MovieDetails(item.id),
        MediaKind::Tv => Page::SeriesDetails(item.id),
    }
}

fn card_style(_theme: &iced::Theme) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(SURFACE_DARK_GRAY)),
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: 10.0.into(),
        },
        shadow: Shadow {
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.4),
            offset: iced::Vector::new(0.0, 3.0),
            blur_radius: 6.0,
        },
        ..Default::default()
    }
}

impl Reelview {
    fn first_genre_name(&self, item: &MediaSummary) -> Option<String> {
        let id = item.genre_ids.first()?;
        self.genre_list
            .iter()
            .find(|g| g.id == *id)
            .map(|g| g.name.clone())
    }

    /// Poster-only card used by the popular carousels on the home page.
    pub fn view_plain_poster_card(&self, item: &MediaSummary) -> Element<'_, Message> {
        let handle = self.cached_image(item.poster_path.as_ref(), ImageSize::Poster);
        let poster = Self::image_or_placeholder(
            handle,
            POSTER_CARD_WIDTH,
            POSTER_CARD_HEIGHT,
            10.0,
            ICON_FILM,
        );

        button(container(poster).style(card_style))
            .padding(0)
            .style(|_theme, _status| button::Style {
                background: Some(iced::Background::Color(Color::TRANSPARENT)),
                text_color: TEXT_WHITE,
                border: Border::default(),
                shadow: Shadow::default(),
                snap: false,
            })
            .on_press(Message::NavigateTo(detail_page(item)))
            .into()
    }

    /// Card with title, star rating and a Details button; used by listings,
    /// top-rated carousels and search results.
    pub fn view_media_card(&self, item: &MediaSummary) -> Element<'_, Message> {
        let handle = self.cached_image(item.poster_path.as_ref(), ImageSize::Poster);
        let poster = Self::image_or_placeholder(
            handle,
            POSTER_CARD_WIDTH,
            POSTER_CARD_HEIGHT,
            10.0,
            ICON_FILM,
        );

        let title = text(item.display_title().to_string())
            .size(14)
            .color(TEXT_WHITE);

        let rating = row![
            text(format!("Rating: {:.1}", item.vote_average))
                .size(12)
                .color(TEXT_GRAY),
            Self::view_star_rating(item.vote_average),
        ]
        .spacing(8)
        .align_y(iced::Alignment::Center);

        let mut body = column![title, rating].spacing(6);
        if let Some(genre) = self.first_genre_name(item) {
            body = body.push(text(genre).size(11).color(TEXT_GRAY));
        }

        let details_button = button(text("Details").size(12).color(TEXT_WHITE))
            .padding(Padding::new(6.0).left(14.0).right(14.0))
            .style(accent_button_style)
            .on_press(Message::NavigateTo(detail_page(item)));

        let body = body.push(details_button);

        container(column![poster, container(body).padding(Padding::new(10.0))])
            .width(Length::Fixed(POSTER_CARD_WIDTH))
            .style(card_style)
            .into()
    }

    /// Narrow card for the recommendation and similar-title strips.
    pub fn view_strip_card(&self, item: &MediaSummary) -> Element<'_, Message> {
        let handle = self.cached_image(item.poster_path.as_ref(), ImageSize::Strip);
        let poster = Self::image_or_placeholder(
            handle,
            STRIP_CARD_WIDTH,
            STRIP_CARD_HEIGHT,
            10.0,
            ICON_FILM,
        );

        let title = text(crate::media::truncate_text(item.display_title(), 24))
            .size(12)
            .color(TEXT_WHITE);

        let details_button = button(text("Details").size(11).color(TEXT_WHITE))
            .padding(Padding::new(4.0).left(10.0).right(10.0))
            .style(accent_button_style)
            .on_press(Message::NavigateTo(detail_page(item)));

        container(
            column![
                poster,
                container(column![title, details_button].spacing(6)).padding(Padding::new(8.0))
            ],
        )
        .width(Length::Fixed(STRIP_CARD_WIDTH))
        .style(card_style)
        .into()
    }

    pub fn carousel_items(&self, kind: CarouselKind) -> &[MediaSummary] {
        match kind {
            CarouselKind::PopularMovies => &self.movies.popular,
            CarouselKind::PopularSeries => &self.series.popular,
            CarouselKind::TopMovies => &self.movies.top_rated,
            CarouselKind::TopSeries => &self.series.top_rated,
        }
    }

    /// One home-page carousel: heading, the current four-card window and
    /// step arrows that disable at both boundaries.
    pub fn view_carousel(
        &self,
        title: &str,
        kind: CarouselKind,
        with_info: bool,
    ) -> Element<'_, Message> {
        let items = self.carousel_items(kind);
        let sorted = sorted_media(items, self.home_view.sort_key, self.home_view.sort_order);
        let index = self.home_view.index(kind);
        let window = carousel_slice(&sorted, index, HOME_CARDS_PER_WINDOW);

        let cards: Vec<Element<Message>> = window
            .iter()
            .map(|item| {
                if with_info {
                    self.view_media_card(item)
                } else {
                    self.view_plain_poster_card(item)
                }
            })
            .collect();

        let cards_row = Row::with_children(cards)
            .spacing(16)
            .align_y(iced::Alignment::Start);

        let prev_enabled = has_prev_window(index);
        let next_enabled = has_next_window(sorted.len(), index, HOME_CARDS_PER_WINDOW);

        let prev = step_arrow(ICON_CHEVRON_LEFT, prev_enabled, kind, StepDirection::Back);
        let next = step_arrow(ICON_CHEVRON_RIGHT, next_enabled, kind, StepDirection::Forward);

        let heading = bold_text(title, 22, TEXT_WHITE);

        let body: Element<Message> = if sorted.is_empty() {
            crate::components::empty_notice("Nothing to show yet")
        } else {
            row![prev, cards_row, Space::new().width(Length::Fill), next]
                .spacing(16)
                .align_y(iced::Alignment::Center)
                .into()
        };

        column![heading, body]
            .spacing(16)
            .width(Length::Fill)
            .into()
    }

    /// First / prev / current / next / last pagination controls for the
    /// movie and series listing pages.
    pub fn view_pagination_bar(
        &self,
        kind: ListingKind,
        page: usize,
        len: usize,
    ) -> Element<'_, Message> {
        let prev_enabled = has_prev_page(page);
        let next_enabled = has_next_page(len, page, LISTING_ITEMS_PER_PAGE);

        let first = page_button(ICON_CHEVRON_DOUBLE_LEFT, prev_enabled, kind, PageAction::First);
        let prev = page_button(ICON_CHEVRON_LEFT, prev_enabled, kind, PageAction::Prev);
        let label = text(format!("{}", page)).size(16).color(TEXT_WHITE);
        let next = page_button(ICON_CHEVRON_RIGHT, next_enabled, kind, PageAction::Next);
        let last = page_button(
            ICON_CHEVRON_DOUBLE_RIGHT,
            next_enabled,
            kind,
            PageAction::Last,
        );

        container(
            row![first, prev, label, next, last]
                .spacing(12)
                .align_y(iced::Alignment::Center),
        )
        .width(Length::Fill)
        .align_x(iced::alignment::Horizontal::Center)
        .padding(Padding::new(16.0))
        .into()
    }

    /// Lays cards out in rows of four, the grid used by every listing view.
    pub fn view_card_grid(&self, items: &[MediaSummary]) -> Element<'_, Message> {
        let mut grid = Column::new().spacing(16);
        for chunk in items.chunks(4) {
            let cards: Vec<Element<Message>> =
                chunk.iter().map(|item| self.view_media_card(item)).collect();
            grid = grid.push(Row::with_children(cards).spacing(16));
        }
        container(grid)
            .width(Length::Fill)
            .align_x(iced::alignment::Horizontal::Center)
            .into()
    }
}

fn step_arrow(
    glyph: char,
    enabled: bool,
    kind: CarouselKind,
    direction: StepDirection,
) -> Element<'static, Message> {
    let mut arrow = button(
        container(icon(glyph).size(20).color(TEXT_WHITE))
            .center_x(Length::Fill)
            .center_y(Length::Fill),
    )
    .width(Length::Fixed(40.0))
    .height(Length::Fixed(64.0))
    .padding(0)
    .style(move |_theme, status| {
        let bg_alpha = if !enabled {
            0.2
        } else if matches!(status, button::Status::Hovered) {
            0.9
        } else {
            0.6
        };
        button::Style {
            background: Some(iced::Background::Color(Color::from_rgba(
                0.0, 0.0, 0.0, bg_alpha,
            ))),
            text_color: if enabled { TEXT_WHITE } else { TEXT_GRAY },
            border: Border {
                color: Color::TRANSPARENT,
                width: 0.0,
                radius: 4.0.into(),
            },
            shadow: Shadow::default(),
            snap: false,
        }
    });

    if enabled {
        arrow = arrow.on_press(Message::CarouselStep(kind, direction));
    }
    arrow.into()
}

fn page_button(
    glyph: char,
    enabled: bool,
    kind: ListingKind,
    action: PageAction,
) -> Element<'static, Message> {
    let mut control = button(icon(glyph).size(18).color(if enabled {
        TEXT_WHITE
    } else {
        TEXT_GRAY
    }))
    .padding(Padding::new(6.0).left(16.0).right(16.0))
    .style(move |_theme, status| {
        let bg = if enabled && matches!(status, button::Status::Hovered) {
            Color::from_rgba(1.0, 1.0, 1.0, 0.15)
        } else {
            Color::TRANSPARENT
        };
        button::Style {
            background: Some(iced::Background::Color(bg)),
            text_color: if enabled { TEXT_WHITE } else { TEXT_GRAY },
            border: Border {
                color: if enabled { TEXT_WHITE } else { TEXT_GRAY },
                width: 1.0,
                radius: 6.0.into(),
            },
            shadow: Shadow::default(),
            snap: false,
        }
    });

    if enabled {
        control = control.on_press(Message::ListingPage(kind, action));
    }
    control.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view_state::page_count;

    #[test]
    fn pagination_page_count_matches_listing_size() {
        // 205 items at 8 a page, the populated-listing shape after a
        // three-page remote fetch of 100/100/5.
        assert_eq!(page_count(205, LISTING_ITEMS_PER_PAGE), 26);
        assert!(has_next_page(205, 25, LISTING_ITEMS_PER_PAGE));
        assert!(!has_next_page(205, 26, LISTING_ITEMS_PER_PAGE));
    }
}
