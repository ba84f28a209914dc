use iced::widget::{button, column, container, pick_list, row, text, text_input, Column};
use iced::{Border, Color, Element, Length, Padding, Shadow};

use crate::components::{empty_notice, icon, ICON_FILM, ICON_SEARCH};
use crate::media::{
    truncate_text, MediaSummary, Message, Page, SURFACE_DARK_GRAY, TEXT_GRAY, TEXT_WHITE,
};
use crate::tmdb::ImageSize;
use crate::view_state::SearchKind;
use crate::Reelview;

const SUGGESTION_LIMIT: usize = 8;

fn kind_from_label(label: &str) -> SearchKind {
    match label {
        "Series" => SearchKind::Tv,
        _ => SearchKind::Movie,
    }
}

impl Reelview {
    /// Header search control: media-type picker, query input and submit.
    pub fn view_search_bar(&self) -> Element<'_, Message> {
        let kind_options = vec![
            String::from(SearchKind::Movie.label()),
            String::from(SearchKind::Tv.label()),
        ];
        let selected = String::from(self.search_view.kind.label());
        let kind_picker = pick_list(kind_options, Some(selected), |label| {
            Message::SearchKindChanged(kind_from_label(&label))
        })
        .text_size(13)
        .padding(Padding::new(6.0).left(10.0).right(10.0));

        let search_icon = icon(ICON_SEARCH).size(14).color(TEXT_GRAY);

        let search_input = text_input("Search Movies or Series...", &self.search_view.query)
            .on_input(Message::SearchQueryChanged)
            .on_submit(Message::SearchSubmit)
            .padding(8)
            .size(14)
            .width(Length::Fixed(220.0))
            .style(|_theme, _status| text_input::Style {
                background: iced::Background::Color(Color::TRANSPARENT),
                border: Border::default(),
                icon: TEXT_GRAY,
                placeholder: TEXT_GRAY,
                value: TEXT_WHITE,
                selection: crate::media::ACCENT_CYAN,
            });

        let input_box = container(
            row![search_icon, search_input]
                .spacing(8)
                .align_y(iced::Alignment::Center),
        )
        .padding(Padding::new(4.0).left(12.0).right(8.0))
        .style(|_theme| container::Style {
            background: Some(iced::Background::Color(Color::from_rgba(0.0, 0.0, 0.0, 0.7))),
            border: Border {
                color: TEXT_GRAY,
                width: 1.0,
                radius: 24.0.into(),
            },
            ..Default::default()
        });

        row![kind_picker, input_box]
            .spacing(8)
            .align_y(iced::Alignment::Center)
            .into()
    }

    /// Dropdown under the search bar while a query is being typed.
    pub fn view_search_suggestions(&self) -> Element<'_, Message> {
        let rows: Vec<Element<Message>> = self
            .search_view
            .suggestions
            .iter()
            .take(SUGGESTION_LIMIT)
            .map(|item| self.view_suggestion_row(item))
            .collect();

        container(Column::with_children(rows))
            .width(Length::Fixed(320.0))
            .style(|_theme| container::Style {
                background: Some(iced::Background::Color(SURFACE_DARK_GRAY)),
                border: Border {
                    color: Color::TRANSPARENT,
                    width: 0.0,
                    radius: 8.0.into(),
                },
                shadow: Shadow {
                    color: Color::from_rgba(0.0, 0.0, 0.0, 0.5),
                    offset: iced::Vector::new(0.0, 4.0),
                    blur_radius: 8.0,
                },
                ..Default::default()
            })
            .into()
    }

    fn view_suggestion_row<'a>(&'a self, item: &'a MediaSummary) -> Element<'a, Message> {
        let handle = self.cached_image(item.poster_path.as_ref(), ImageSize::Poster);
        let thumb = Self::image_or_placeholder(handle, 32.0, 48.0, 4.0, ICON_FILM);

        let label = text(truncate_text(item.display_title(), 30))
            .size(13)
            .color(TEXT_WHITE);

        let content = row![thumb, label]
            .spacing(12)
            .align_y(iced::Alignment::Center);

        let page = match self.search_view.kind {
            SearchKind::Movie => Page::MovieDetails(item.id),
            SearchKind::Tv => Page::SeriesDetails(item.id),
        };

        button(container(content).padding(Padding::new(8.0)).width(Length::Fill))
            .padding(0)
            .width(Length::Fill)
            .style(|_theme, status| {
                let bg = match status {
                    button::Status::Hovered => Color::from_rgba(1.0, 1.0, 1.0, 0.1),
                    _ => Color::TRANSPARENT,
                };
                button::Style {
                    background: Some(iced::Background::Color(bg)),
                    text_color: TEXT_WHITE,
                    border: Border::default(),
                    shadow: Shadow::default(),
                    snap: false,
                }
            })
            .on_press(Message::NavigateTo(page))
            .into()
    }

    pub fn view_search_results<'a>(
        &'a self,
        kind: SearchKind,
        query: &str,
    ) -> Element<'a, Message> {
        let heading = self.view_page_heading(&format!(
            "Search Results for \"{}\" ({})",
            query,
            kind.label()
        ));

        let body: Element<Message> = if self.search.results.is_empty() {
            if let Some(ref message) = self.error_message {
                self.view_error_state(message)
            } else {
                empty_notice("No results found")
            }
        } else {
            self.view_card_grid(&self.search.results)
        };

        container(column![heading, self.view_back_button(), body].spacing(16))
            .width(Length::Fill)
            .padding(Padding::new(24.0).left(48.0).right(48.0))
            .into()
    }
}
