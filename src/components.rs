use iced::widget::{button, column, container, row, scrollable, text, Row, Space};
use iced::{Border, Color, Element, Length, Padding, Shadow};

use crate::media::{
    Message, Page, ACCENT_CYAN, STAR_GOLD, SURFACE_DARK_GRAY, TEXT_GRAY, TEXT_WHITE,
};
use crate::tmdb::ImageSize;
use crate::Reelview;

pub const ICON_SEARCH: char = '\u{F52A}';
pub const ICON_PERSON_FILL: char = '\u{F4DA}';
pub const ICON_FILM: char = '\u{F3A9}';
pub const ICON_CHEVRON_LEFT: char = '\u{F284}';
pub const ICON_CHEVRON_RIGHT: char = '\u{F285}';
pub const ICON_CHEVRON_DOUBLE_LEFT: char = '\u{F27F}';
pub const ICON_CHEVRON_DOUBLE_RIGHT: char = '\u{F280}';
pub const ICON_STAR_FILL: char = '\u{F586}';
pub const ICON_STAR: char = '\u{F588}';

pub fn icon(icon_char: char) -> iced::widget::Text<'static> {
    text(icon_char.to_string()).font(iced::Font {
        family: iced::font::Family::Name("bootstrap-icons"),
        ..Default::default()
    })
}

pub fn bold_text<'a>(s: impl ToString, size: u16, color: Color) -> iced::widget::Text<'a> {
    text(s.to_string()).size(f32::from(size)).color(color).font(iced::Font {
        weight: iced::font::Weight::Bold,
        ..Default::default()
    })
}

pub fn hidden_scrollbar_style(
    _theme: &iced::Theme,
    _status: scrollable::Status,
) -> scrollable::Style {
    scrollable::Style {
        container: container::Style::default(),
        vertical_rail: scrollable::Rail {
            background: None,
            border: Border::default(),
            scroller: scrollable::Scroller {
                background: iced::Background::Color(Color::TRANSPARENT),
                border: Border::default(),
            },
        },
        horizontal_rail: scrollable::Rail {
            background: None,
            border: Border::default(),
            scroller: scrollable::Scroller {
                background: iced::Background::Color(Color::TRANSPARENT),
                border: Border::default(),
            },
        },
        gap: None,
        auto_scroll: scrollable::AutoScroll {
            background: iced::Background::Color(Color::TRANSPARENT),
            border: Border::default(),
            shadow: Shadow::default(),
            icon: Color::TRANSPARENT,
        },
    }
}

pub fn rounded_style(radius: f32, bg: Option<Color>) -> container::Style {
    container::Style {
        background: bg.map(iced::Background::Color),
        border: Border {
            radius: radius.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn accent_button_style(_theme: &iced::Theme, status: button::Status) -> button::Style {
    let bg = match status {
        button::Status::Hovered => Color::from_rgb(0.0, 0.6, 0.68),
        _ => ACCENT_CYAN,
    };
    button::Style {
        background: Some(iced::Background::Color(bg)),
        text_color: TEXT_WHITE,
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: 6.0.into(),
        },
        shadow: Shadow::default(),
        snap: false,
    }
}

pub fn outline_button_style(active: bool) -> impl Fn(&iced::Theme, button::Status) -> button::Style {
    move |_theme, status| {
        let bg = if active {
            ACCENT_CYAN
        } else {
            match status {
                button::Status::Hovered => Color::from_rgba(1.0, 1.0, 1.0, 0.1),
                _ => Color::TRANSPARENT,
            }
        };
        button::Style {
            background: Some(iced::Background::Color(bg)),
            text_color: TEXT_WHITE,
            border: Border {
                color: if active { ACCENT_CYAN } else { TEXT_GRAY },
                width: 1.0,
                radius: 6.0.into(),
            },
            shadow: Shadow::default(),
            snap: false,
        }
    }
}

impl Reelview {
    pub fn cached_image(
        &self,
        path: Option<&String>,
        size: ImageSize,
    ) -> Option<iced::widget::image::Handle> {
        let url = self.tmdb_client.as_ref()?.image_url(path?, size);
        self.image_cache.get(&url).cloned()
    }

    pub fn image_or_placeholder<'a>(
        handle: Option<iced::widget::image::Handle>,
        width: f32,
        height: f32,
        radius: f32,
        placeholder_icon: char,
    ) -> Element<'a, Message> {
        match handle {
            Some(h) => container(
                iced::widget::image(h)
                    .width(Length::Fixed(width))
                    .height(Length::Fixed(height))
                    .content_fit(iced::ContentFit::Cover),
            )
            .style(move |_| rounded_style(radius, None))
            .into(),
            None => container(icon(placeholder_icon).size(32).color(TEXT_GRAY))
                .width(Length::Fixed(width))
                .height(Length::Fixed(height))
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .style(move |_| rounded_style(radius, Some(Color::from_rgba(0.2, 0.2, 0.2, 0.5))))
                .into(),
        }
    }

    /// Five-star row: a vote of 0..=10 maps to 0..=5 filled stars.
    pub fn view_star_rating(vote_average: f32) -> Element<'static, Message> {
        let filled = ((vote_average / 2.0).floor() as usize).min(5);
        let stars: Vec<Element<Message>> = (0..5)
            .map(|i| {
                let glyph = if i < filled { ICON_STAR_FILL } else { ICON_STAR };
                icon(glyph).size(12).color(STAR_GOLD).into()
            })
            .collect();
        Row::with_children(stars).spacing(2).into()
    }

    pub fn view_header(&self) -> Element<'_, Message> {
        let logo = button(bold_text("Reelview", 28, TEXT_WHITE))
            .padding(0)
            .style(|_theme, _status| button::Style {
                background: Some(iced::Background::Color(Color::TRANSPARENT)),
                text_color: TEXT_WHITE,
                border: Border::default(),
                shadow: Shadow::default(),
                snap: false,
            })
            .on_press(Message::NavigateTo(Page::Home));

        let navigation = self.view_navigation();
        let search_bar = self.view_search_bar();

        let left_section = row![logo, navigation]
            .spacing(32)
            .align_y(iced::Alignment::Center);

        let header_content = row![left_section, Space::new().width(Length::Fill), search_bar]
            .padding(Padding::new(16.0).left(48.0).right(48.0))
            .align_y(iced::Alignment::Center);

        container(header_content)
            .width(Length::Fill)
            .height(Length::Fixed(80.0))
            .into()
    }

    fn view_navigation(&self) -> Element<'_, Message> {
        let nav_items = [
            ("Home", Page::Home),
            ("Movies", Page::Movies),
            ("Series", Page::Series),
        ];

        let nav_buttons: Vec<Element<Message>> = nav_items
            .into_iter()
            .map(|(label, page)| self.view_nav_button(label, page))
            .collect();

        Row::with_children(nav_buttons)
            .spacing(24)
            .align_y(iced::Alignment::Center)
            .into()
    }

    fn view_nav_button(&self, label: &'static str, page: Page) -> Element<'_, Message> {
        let is_active = self.current_page == page;
        let text_color = if is_active { TEXT_WHITE } else { TEXT_GRAY };

        let button_content: Element<Message> = if is_active {
            let label_text = text(label).size(14).color(text_color);
            let underline = container(Space::new().width(Length::Fill).height(2)).style(|_theme| {
                container::Style {
                    background: Some(iced::Background::Color(ACCENT_CYAN)),
                    ..Default::default()
                }
            });
            column![label_text, underline]
                .spacing(4)
                .align_x(iced::Alignment::Center)
                .into()
        } else {
            text(label).size(14).color(text_color).into()
        };

        button(button_content)
            .padding(Padding::new(8.0).left(12.0).right(12.0))
            .style(move |_theme, status| {
                let final_color = match status {
                    button::Status::Hovered => TEXT_WHITE,
                    _ if is_active => TEXT_WHITE,
                    _ => TEXT_GRAY,
                };
                button::Style {
                    background: Some(iced::Background::Color(Color::TRANSPARENT)),
                    text_color: final_color,
                    border: Border::default(),
                    shadow: Shadow::default(),
                    snap: false,
                }
            })
            .on_press(Message::NavigateTo(page))
            .into()
    }

    pub fn view_footer(&self) -> Element<'_, Message> {
        let line = row![
            text("Reelview").size(12).color(ACCENT_CYAN),
            text(" © 2025 All Rights Reserved  |  About  |  Terms of Use  |  Privacy")
                .size(12)
                .color(TEXT_GRAY),
        ]
        .align_y(iced::Alignment::Center);

        container(line)
            .width(Length::Fill)
            .padding(Padding::new(12.0))
            .align_x(iced::alignment::Horizontal::Center)
            .style(|_theme| container::Style {
                border: Border {
                    color: SURFACE_DARK_GRAY,
                    width: 1.0,
                    radius: 0.0.into(),
                },
                ..Default::default()
            })
            .into()
    }

    pub fn view_back_button(&self) -> Element<'_, Message> {
        button(text("Back").size(14).color(TEXT_WHITE))
            .padding(Padding::new(8.0).left(20.0).right(20.0))
            .style(accent_button_style)
            .on_press(Message::Back)
            .into()
    }

    pub fn view_loading(&self) -> Element<'_, Message> {
        container(text("Loading...").size(18).color(TEXT_GRAY))
            .width(Length::Fill)
            .height(Length::Fixed(400.0))
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    pub fn view_error_state<'a>(&'a self, error_message: &'a str) -> Element<'a, Message> {
        let error_text = text(error_message).size(18).color(ACCENT_CYAN);
        let retry_button = button(text("Retry").size(16).color(TEXT_WHITE))
            .padding(Padding::new(12.0).left(24.0).right(24.0))
            .style(accent_button_style)
            .on_press(Message::RetryLoad);

        container(
            column![error_text, retry_button]
                .spacing(16)
                .align_x(iced::Alignment::Center),
        )
        .width(Length::Fill)
        .height(Length::Fixed(400.0))
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
    }

    pub fn view_page_heading(&self, title: &str) -> Element<'_, Message> {
        container(bold_text(title, 32, ACCENT_CYAN))
            .width(Length::Fill)
            .align_x(iced::alignment::Horizontal::Center)
            .padding(Padding::new(16.0))
            .into()
    }

    pub fn view_main_content(&self) -> Element<'_, Message> {
        let page_content: Element<Message> = match &self.current_page {
            Page::Home => self.view_home(),
            Page::Movies => self.view_movies(),
            Page::Series => self.view_series(),
            Page::MovieDetails(_) => self.view_movie_details(),
            Page::SeriesDetails(_) => self.view_series_details(),
            Page::Person(_) => self.view_person(),
            Page::CastCrew(kind, _) => self.view_cast_crew(*kind),
            Page::Posters(kind, _) => {
                self.view_gallery(*kind, crate::gallery::GallerySection::Posters)
            }
            Page::Backdrops(kind, _) => {
                self.view_gallery(*kind, crate::gallery::GallerySection::Backdrops)
            }
            Page::SearchResults(kind, query) => self.view_search_results(*kind, query),
        };

        let main_column = column![self.view_header(), page_content, self.view_footer()]
            .width(Length::Fill);

        let scrolled = scrollable(main_column)
            .direction(scrollable::Direction::Vertical(
                scrollable::Scrollbar::new().width(0).scroller_width(0),
            ))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(hidden_scrollbar_style);

        if self.search_view.show_suggestions && !self.search_view.suggestions.is_empty() {
            let dropdown = container(self.view_search_suggestions())
                .width(Length::Fill)
                .align_x(iced::alignment::Horizontal::Right)
                .padding(Padding::new(0.0).top(72.0).right(48.0));

            iced::widget::stack![scrolled, dropdown]
                .width(Length::Fill)
                .height(Length::Fill)
                .into()
        } else {
            scrolled.into()
        }
    }
}

pub fn empty_notice<'a>(message: &str) -> Element<'a, Message> {
    container(text(message.to_string()).size(14).color(TEXT_GRAY))
        .width(Length::Fill)
        .padding(Padding::new(24.0))
        .align_x(iced::alignment::Horizontal::Center)
        .into()
}

pub fn loading_placeholder<'a>() -> Element<'a, Message> {
    container(text("Loading...").size(14).color(TEXT_GRAY))
        .width(Length::Fill)
        .padding(Padding::new(24.0))
        .align_x(iced::alignment::Horizontal::Center)
        .into()
}

pub fn section_heading<'a>(title: &str) -> Element<'a, Message> {
    bold_text(title, 20, ACCENT_CYAN).into()
}

pub fn info_line<'a>(label: &str, value: String) -> Element<'a, Message> {
    row![
        bold_text(format!("{}: ", label), 13, TEXT_WHITE),
        text(value).size(13).color(TEXT_GRAY),
    ]
    .spacing(4)
    .into()
}
