use iced::widget::{button, column, container, row, text};
use iced::{Element, Length, Padding};

use crate::components::{bold_text, outline_button_style};
use crate::media::{LoadingState, Message, TEXT_WHITE};
use crate::view_state::{CarouselKind, SortKey, SortOrder};
use crate::Reelview;

impl Reelview {
    pub fn view_home(&self) -> Element<'_, Message> {
        match &self.loading_state {
            LoadingState::Loading => self.view_loading(),
            LoadingState::Error(message) => self.view_error_state(message),
            LoadingState::Idle => self.view_home_content(),
        }
    }

    fn view_home_content(&self) -> Element<'_, Message> {
        let heading = self.view_page_heading("Home");
        let sort_controls = self.view_sort_controls();

        let carousels = column![
            self.view_carousel("Movies", CarouselKind::PopularMovies, false),
            self.view_carousel("Series", CarouselKind::PopularSeries, false),
            self.view_carousel("Top Movies", CarouselKind::TopMovies, true),
            self.view_carousel("Top Series", CarouselKind::TopSeries, true),
        ]
        .spacing(40);

        container(column![heading, sort_controls, carousels].spacing(16))
            .width(Length::Fill)
            .padding(Padding::new(24.0).left(48.0).right(48.0))
            .into()
    }

    fn view_sort_controls(&self) -> Element<'_, Message> {
        let keys = [
            SortKey::Title,
            SortKey::Popularity,
            SortKey::Date,
            SortKey::Rating,
        ];
        let key_buttons: Vec<Element<Message>> = keys
            .into_iter()
            .map(|key| {
                let active = self.home_view.sort_key == key;
                button(text(key.to_string()).size(13).color(TEXT_WHITE))
                    .padding(Padding::new(6.0).left(14.0).right(14.0))
                    .style(outline_button_style(active))
                    .on_press(Message::SetSortKey(key))
                    .into()
            })
            .collect();

        let orders = [SortOrder::Descending, SortOrder::Ascending];
        let order_buttons: Vec<Element<Message>> = orders
            .into_iter()
            .map(|order| {
                let active = self.home_view.sort_order == order;
                button(text(order.to_string()).size(13).color(TEXT_WHITE))
                    .padding(Padding::new(6.0).left(14.0).right(14.0))
                    .style(outline_button_style(active))
                    .on_press(Message::SetSortOrder(order))
                    .into()
            })
            .collect();

        let key_group = column![
            bold_text("SORT BY", 13, TEXT_WHITE),
            iced::widget::Row::with_children(key_buttons).spacing(8),
        ]
        .spacing(8);

        let order_group = column![
            bold_text("SORT ORDER", 13, TEXT_WHITE),
            iced::widget::Row::with_children(order_buttons).spacing(8),
        ]
        .spacing(8);

        container(row![key_group, order_group].spacing(48))
            .width(Length::Fill)
            .align_x(iced::alignment::Horizontal::Center)
            .padding(Padding::new(8.0))
            .into()
    }
}
