use iced::widget::{column, container, text};
use iced::{Element, Length, Padding};

use crate::components::empty_notice;
use crate::media::{MediaSummary, Message, TEXT_WHITE};
use crate::view_state::{page_count, page_slice, ListingKind, LISTING_ITEMS_PER_PAGE};
use crate::Reelview;

impl Reelview {
    pub fn view_movies(&self) -> Element<'_, Message> {
        self.view_listing(
            "Movies",
            ListingKind::Movies,
            &self.movies.popular,
            self.listing_view.movies_page,
        )
    }

    pub fn view_series(&self) -> Element<'_, Message> {
        self.view_listing(
            "Series",
            ListingKind::Series,
            &self.series.popular,
            self.listing_view.series_page,
        )
    }

    /// Paginated poster grid over one popular listing.
    fn view_listing<'a>(
        &'a self,
        title: &str,
        kind: ListingKind,
        items: &'a [MediaSummary],
        page: usize,
    ) -> Element<'a, Message> {
        let heading = self.view_page_heading(title);

        if items.is_empty() {
            if let Some(ref message) = self.error_message {
                return column![heading, self.view_error_state(message)].into();
            }
            return column![heading, empty_notice("Loading...")].into();
        }

        let total = page_count(items.len(), LISTING_ITEMS_PER_PAGE);
        let page_label = container(
            text(format!("Page {} of {}", page, total))
                .size(16)
                .color(TEXT_WHITE),
        )
        .width(Length::Fill)
        .align_x(iced::alignment::Horizontal::Center);

        let window = page_slice(items, page, LISTING_ITEMS_PER_PAGE);
        let grid = self.view_card_grid(window);
        let pagination = self.view_pagination_bar(kind, page, items.len());

        container(column![heading, page_label, grid, pagination].spacing(16))
            .width(Length::Fill)
            .padding(Padding::new(24.0).left(48.0).right(48.0))
            .into()
    }
}
