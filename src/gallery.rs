use iced::widget::{button, column, container, scrollable, text, Column, Row};
use iced::{Element, Length, Padding};

use crate::components::{
    empty_notice, hidden_scrollbar_style, info_line, loading_placeholder, outline_button_style,
    ICON_FILM,
};
use crate::media::{Image, MediaKind, Message, TEXT_WHITE};
use crate::tmdb::ImageSize;
use crate::view_state::{filter_images, language_options};
use crate::Reelview;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GallerySection {
    Posters,
    Backdrops,
}

impl GallerySection {
    fn title(&self, kind: MediaKind) -> String {
        match self {
            GallerySection::Posters => format!("{} Posters", kind.label()),
            GallerySection::Backdrops => format!("{} Backdrops", kind.label()),
        }
    }

    fn empty_message(&self) -> &'static str {
        match self {
            GallerySection::Posters => "No posters available for this language",
            GallerySection::Backdrops => "No backdrops available for this language",
        }
    }
}

impl Reelview {
    /// Full image grid for one media item with a language filter bar.
    pub fn view_gallery(&self, kind: MediaKind, section: GallerySection) -> Element<'_, Message> {
        let images = match kind {
            MediaKind::Movie => &self.movies.images,
            MediaKind::Tv => &self.series.images,
        };

        let heading = self.view_page_heading(&section.title(kind));
        let back = self.view_back_button();

        let Some(images) = images else {
            let fallback: Element<Message> = if let Some(ref message) = self.error_message {
                self.view_error_state(message)
            } else {
                loading_placeholder()
            };
            return column![heading, fallback].into();
        };

        let set: &[Image] = match section {
            GallerySection::Posters => &images.posters,
            GallerySection::Backdrops => &images.backdrops,
        };

        let filter_bar = self.view_language_bar(set);
        let filtered = filter_images(set, &self.gallery_view.language);

        let body: Element<Message> = if filtered.is_empty() {
            empty_notice(section.empty_message())
        } else {
            self.view_image_grid(&filtered, section)
        };

        container(column![heading, back, filter_bar, body].spacing(16))
            .width(Length::Fill)
            .padding(Padding::new(24.0).left(48.0).right(48.0))
            .into()
    }

    fn view_language_bar<'a>(&'a self, images: &'a [Image]) -> Element<'a, Message> {
        let buttons: Vec<Element<Message>> = language_options(images)
            .into_iter()
            .map(|option| {
                let active = self.gallery_view.language == option;
                button(text(option.label()).size(12).color(TEXT_WHITE))
                    .padding(Padding::new(6.0).left(14.0).right(14.0))
                    .style(outline_button_style(active))
                    .on_press(Message::SelectLanguage(option))
                    .into()
            })
            .collect();

        scrollable(Row::with_children(buttons).spacing(8))
            .direction(scrollable::Direction::Horizontal(
                scrollable::Scrollbar::new().width(0).scroller_width(0),
            ))
            .width(Length::Fill)
            .style(hidden_scrollbar_style)
            .into()
    }

    fn view_image_grid<'a>(
        &'a self,
        images: &[&'a Image],
        section: GallerySection,
    ) -> Element<'a, Message> {
        let (cell_width, cell_height) = match section {
            GallerySection::Posters => (200.0, 300.0),
            GallerySection::Backdrops => (280.0, 158.0),
        };

        let mut grid = Column::new().spacing(16);
        for chunk in images.chunks(5) {
            let mut cells = Row::new().spacing(16);
            for image in chunk {
                cells = cells.push(self.view_image_cell(image, cell_width, cell_height));
            }
            grid = grid.push(cells);
        }
        grid.into()
    }

    fn view_image_cell<'a>(
        &'a self,
        image: &'a Image,
        width: f32,
        height: f32,
    ) -> Element<'a, Message> {
        let handle = self.cached_image(Some(&image.file_path), ImageSize::Poster);
        let picture = Self::image_or_placeholder(handle, width, height, 6.0, ICON_FILM);

        let info = column![
            info_line("Size", format!("{}x{}", image.width, image.height)),
            info_line(
                "Language",
                image
                    .iso_639_1
                    .as_deref()
                    .map(str::to_uppercase)
                    .unwrap_or_else(|| String::from("N/A")),
            ),
            info_line("Score", format!("{:.1}", image.vote_average)),
        ]
        .spacing(2);

        container(column![picture, container(info).padding(Padding::new(8.0))])
            .width(Length::Fixed(width))
            .style(|_theme| crate::components::rounded_style(
                6.0,
                Some(iced::Color::from_rgb(0.102, 0.102, 0.102)),
            ))
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_titles_name_the_media_kind() {
        assert_eq!(
            GallerySection::Posters.title(MediaKind::Movie),
            "Movie Posters"
        );
        assert_eq!(
            GallerySection::Backdrops.title(MediaKind::Tv),
            "Series Backdrops"
        );
    }
}
