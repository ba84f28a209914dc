use iced::widget::{button, column, container, row, scrollable, text, Column, Row};
use iced::{Border, Color, Element, Length, Padding, Shadow};

use crate::components::{
    accent_button_style, bold_text, empty_notice, hidden_scrollbar_style, info_line,
    loading_placeholder, outline_button_style, section_heading, ICON_FILM, ICON_PERSON_FILL,
};
use crate::media::{
    truncate_text, CastMember, ExternalIds, Keyword, MediaDetails, MediaId, MediaKind, Message,
    Page, Review, Video, ACCENT_CYAN, SURFACE_DARK_GRAY, TEXT_GRAY, TEXT_WHITE,
};
use crate::tmdb::ImageSize;
use crate::view_state::MediaTab;
use crate::Reelview;

const REVIEW_PREVIEW_LEN: usize = 2;
const REVIEW_EXCERPT_CHARS: usize = 150;
const CAST_STRIP_LEN: usize = 5;
const MEDIA_TAB_PREVIEW_LEN: usize = 4;
const KEYWORD_PREVIEW_LEN: usize = 5;

pub fn format_with_commas(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn panel_style(_theme: &iced::Theme) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(Color::from_rgb(0.102, 0.102, 0.102))),
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

fn horizontal_strip(content: Row<'_, Message>) -> Element<'_, Message> {
    scrollable(content)
        .direction(scrollable::Direction::Horizontal(
            scrollable::Scrollbar::new().width(0).scroller_width(0),
        ))
        .width(Length::Fill)
        .style(hidden_scrollbar_style)
        .into()
}

impl Reelview {
    pub fn view_movie_details(&self) -> Element<'_, Message> {
        let Page::MovieDetails(id) = self.current_page else {
            return loading_placeholder();
        };
        let store = &self.movies;
        let Some(details) = &store.details else {
            return column![self.view_page_heading("Movie Details"), loading_placeholder()].into();
        };

        let main_column = column![
            self.view_cast_section(MediaKind::Movie, id, store.credits.as_ref()),
            self.view_reviews_section(&store.reviews, details),
            self.view_media_section(
                MediaKind::Movie,
                id,
                &store.videos,
                store.images.as_ref()
            ),
            self.view_summary_strip("Recommendations", &store.recommendations),
            self.view_summary_strip("Similar Movies", &store.similar),
        ]
        .spacing(32);

        let sidebar = self.view_movie_sidebar(details);

        let body = row![
            self.view_info_card(details),
            container(main_column).width(Length::FillPortion(2)),
            sidebar,
        ]
        .spacing(24);

        container(
            column![
                self.view_page_heading("Movie Details"),
                self.view_back_button(),
                body
            ]
            .spacing(16),
        )
        .width(Length::Fill)
        .padding(Padding::new(24.0).left(48.0).right(48.0))
        .into()
    }

    pub fn view_series_details(&self) -> Element<'_, Message> {
        let Page::SeriesDetails(id) = self.current_page else {
            return loading_placeholder();
        };
        let store = &self.series;
        let Some(details) = &store.details else {
            return column![self.view_page_heading("Series Details"), loading_placeholder()].into();
        };

        let main_column = column![
            self.view_cast_section(MediaKind::Tv, id, store.credits.as_ref()),
            self.view_seasons_section(details),
            self.view_reviews_section(&store.reviews, details),
            self.view_media_section(MediaKind::Tv, id, &store.videos, store.images.as_ref()),
            self.view_summary_strip("Recommendations", &store.recommendations),
            self.view_summary_strip("Similar Series", &store.similar),
        ]
        .spacing(32);

        let sidebar = self.view_series_sidebar(details);

        let body = row![
            self.view_info_card(details),
            container(main_column).width(Length::FillPortion(2)),
            sidebar,
        ]
        .spacing(24);

        container(
            column![
                self.view_page_heading("Series Details"),
                self.view_back_button(),
                body
            ]
            .spacing(16),
        )
        .width(Length::Fill)
        .padding(Padding::new(24.0).left(48.0).right(48.0))
        .into()
    }

    fn view_info_card<'a>(&'a self, details: &'a MediaDetails) -> Element<'a, Message> {
        let handle = self.cached_image(details.poster_path.as_ref(), ImageSize::Poster);
        let poster = Self::image_or_placeholder(handle, 300.0, 450.0, 10.0, ICON_FILM);

        let mut info = Column::new().spacing(8);
        info = info.push(bold_text(details.display_title(), 18, TEXT_WHITE));
        info = info.push(info_line(
            "Tagline",
            details
                .tagline
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| String::from("N/A")),
        ));
        let overview = if details.overview.is_empty() {
            String::from("No overview available")
        } else {
            details.overview.clone()
        };
        info = info.push(info_line("Overview", overview));
        info = info.push(info_line(
            "Release Date",
            details.date().unwrap_or("N/A").to_string(),
        ));
        info = info.push(info_line(
            "Runtime",
            details
                .runtime_minutes()
                .map(|m| format!("{} min", m))
                .unwrap_or_else(|| String::from("N/A")),
        ));
        let genres = details.genre_names();
        info = info.push(info_line(
            "Genres",
            if genres.is_empty() {
                String::from("N/A")
            } else {
                genres
            },
        ));
        info = info.push(info_line(
            "Vote Average",
            format!("{:.1} ({} votes)", details.vote_average, details.vote_count),
        ));

        container(
            column![
                poster,
                container(info).padding(Padding::new(16.0)).width(Length::Fill)
            ],
        )
        .width(Length::Fixed(300.0))
        .style(panel_style)
        .into()
    }

    fn view_cast_section<'a>(
        &'a self,
        kind: MediaKind,
        id: MediaId,
        credits: Option<&'a crate::media::CreditsSet>,
    ) -> Element<'a, Message> {
        let heading = section_heading("Top Billed Cast");

        let Some(credits) = credits else {
            return column![heading, loading_placeholder()].spacing(12).into();
        };
        if credits.cast.is_empty() {
            return column![heading, empty_notice("No cast information available")]
                .spacing(12)
                .into();
        }

        let mut cards: Vec<Element<Message>> = credits
            .cast
            .iter()
            .take(CAST_STRIP_LEN)
            .map(|member| self.view_cast_card(member))
            .collect();

        if credits.cast.len() > CAST_STRIP_LEN {
            let view_more = button(text("View More").size(12).color(TEXT_WHITE))
                .padding(Padding::new(6.0).left(14.0).right(14.0))
                .style(accent_button_style)
                .on_press(Message::NavigateTo(Page::CastCrew(kind, id)));
            cards.push(
                container(view_more)
                    .height(Length::Fixed(150.0))
                    .center_y(Length::Fill)
                    .into(),
            );
        }

        let strip = horizontal_strip(
            Row::with_children(cards)
                .spacing(16)
                .align_y(iced::Alignment::Start),
        );

        column![heading, strip].spacing(12).into()
    }

    fn view_cast_card<'a>(&'a self, member: &'a CastMember) -> Element<'a, Message> {
        let handle = self.cached_image(member.profile_path.as_ref(), ImageSize::Poster);
        let portrait = Self::image_or_placeholder(handle, 100.0, 150.0, 10.0, ICON_PERSON_FILL);

        let card = column![
            portrait,
            text(member.name.clone()).size(12).color(TEXT_WHITE),
            text(member.character.clone()).size(11).color(TEXT_GRAY),
        ]
        .spacing(4)
        .width(Length::Fixed(110.0))
        .align_x(iced::Alignment::Center);

        button(card)
            .padding(0)
            .style(|_theme, _status| button::Style {
                background: Some(iced::Background::Color(Color::TRANSPARENT)),
                text_color: TEXT_WHITE,
                border: Border::default(),
                shadow: Shadow::default(),
                snap: false,
            })
            .on_press(Message::NavigateTo(Page::Person(member.id)))
            .into()
    }

    fn view_reviews_section<'a>(
        &'a self,
        reviews: &'a [Review],
        details: &'a MediaDetails,
    ) -> Element<'a, Message> {
        let heading = section_heading("Social");
        let count_line = bold_text(format!("Reviews ({})", reviews.len()), 14, TEXT_WHITE);

        if reviews.is_empty() {
            let notice = empty_notice(&format!(
                "We don't have any reviews for {}.",
                details.display_title()
            ));
            return column![heading, count_line, notice].spacing(12).into();
        }

        let mut body = Column::new().spacing(12);
        for review in reviews.iter().take(REVIEW_PREVIEW_LEN) {
            body = body.push(view_review_card(review));
        }

        if reviews.len() > REVIEW_PREVIEW_LEN {
            let label = if self.detail_view.show_all_reviews {
                String::from("View Less")
            } else {
                format!("View More ({})", reviews.len() - REVIEW_PREVIEW_LEN)
            };
            body = body.push(
                button(text(label).size(12).color(TEXT_WHITE))
                    .padding(Padding::new(6.0).left(14.0).right(14.0))
                    .style(accent_button_style)
                    .on_press(Message::ToggleAllReviews),
            );
        }

        if self.detail_view.show_all_reviews {
            for review in reviews.iter().skip(REVIEW_PREVIEW_LEN) {
                body = body.push(view_review_card(review));
            }
        }

        column![heading, count_line, body].spacing(12).into()
    }

    fn view_media_section<'a>(
        &'a self,
        kind: MediaKind,
        id: MediaId,
        videos: &'a [Video],
        images: Option<&'a crate::media::ImagesSet>,
    ) -> Element<'a, Message> {
        let heading = section_heading("Media");

        let backdrops_len = images.map_or(0, |i| i.backdrops.len());
        let posters_len = images.map_or(0, |i| i.posters.len());

        let tabs = [
            (MediaTab::Videos, format!("Videos ({})", videos.len())),
            (MediaTab::Backdrops, format!("Backdrops ({})", backdrops_len)),
            (MediaTab::Posters, format!("Posters ({})", posters_len)),
        ];
        let tab_buttons: Vec<Element<Message>> = tabs
            .into_iter()
            .map(|(tab, label)| {
                let active = self.detail_view.active_tab == tab;
                button(text(label).size(13).color(TEXT_WHITE))
                    .padding(Padding::new(6.0).left(14.0).right(14.0))
                    .style(outline_button_style(active))
                    .on_press(Message::SelectMediaTab(tab))
                    .into()
            })
            .collect();
        let tab_bar = Row::with_children(tab_buttons).spacing(10);

        let tab_content: Element<Message> = match self.detail_view.active_tab {
            MediaTab::Videos => view_videos_tab(videos),
            MediaTab::Backdrops => self.view_images_tab(
                images.map(|i| i.backdrops.as_slice()).unwrap_or(&[]),
                Page::Backdrops(kind, id),
            ),
            MediaTab::Posters => self.view_images_tab(
                images.map(|i| i.posters.as_slice()).unwrap_or(&[]),
                Page::Posters(kind, id),
            ),
        };

        column![heading, tab_bar, tab_content].spacing(12).into()
    }

    fn view_images_tab<'a>(
        &'a self,
        images: &'a [crate::media::Image],
        gallery_page: Page,
    ) -> Element<'a, Message> {
        if images.is_empty() {
            return empty_notice("No images available");
        }

        let mut cells: Vec<Element<Message>> = images
            .iter()
            .take(MEDIA_TAB_PREVIEW_LEN)
            .map(|image| {
                let handle = self.cached_image(Some(&image.file_path), ImageSize::Strip);
                Self::image_or_placeholder(handle, 180.0, 120.0, 10.0, ICON_FILM)
            })
            .collect();

        if images.len() > MEDIA_TAB_PREVIEW_LEN {
            let view_more = button(text("View More").size(12).color(TEXT_WHITE))
                .padding(Padding::new(6.0).left(14.0).right(14.0))
                .style(accent_button_style)
                .on_press(Message::NavigateTo(gallery_page));
            cells.push(
                container(view_more)
                    .height(Length::Fixed(120.0))
                    .center_y(Length::Fill)
                    .into(),
            );
        }

        horizontal_strip(
            Row::with_children(cells)
                .spacing(16)
                .align_y(iced::Alignment::Center),
        )
    }

    fn view_summary_strip<'a>(
        &'a self,
        title: &str,
        items: &'a [crate::media::MediaSummary],
    ) -> Element<'a, Message> {
        let heading = section_heading(title);
        if items.is_empty() {
            return column![heading, empty_notice("Nothing to show")]
                .spacing(12)
                .into();
        }

        let cards: Vec<Element<Message>> =
            items.iter().map(|item| self.view_strip_card(item)).collect();

        let strip = horizontal_strip(
            Row::with_children(cards)
                .spacing(16)
                .align_y(iced::Alignment::Start),
        );
        column![heading, strip].spacing(12).into()
    }

    fn view_seasons_section<'a>(&'a self, details: &'a MediaDetails) -> Element<'a, Message> {
        let heading = section_heading("Seasons");
        let season_count = details.number_of_seasons.unwrap_or(0);
        if season_count == 0 {
            return column![heading, empty_notice("No season information available")]
                .spacing(12)
                .into();
        }

        let season_buttons: Vec<Element<Message>> = (1..=season_count)
            .map(|season| {
                let active = self.detail_view.selected_season == season;
                button(text(format!("Season {}", season)).size(12).color(TEXT_WHITE))
                    .padding(Padding::new(6.0).left(12.0).right(12.0))
                    .style(outline_button_style(active))
                    .on_press(Message::SelectSeason(season))
                    .into()
            })
            .collect();
        let picker = horizontal_strip(Row::with_children(season_buttons).spacing(8));

        let selected = self.detail_view.selected_season;
        let body: Element<Message> = match self.series.seasons.get(&selected) {
            None => loading_placeholder(),
            Some(season) => {
                let air_date = info_line(
                    "Air Date",
                    season.air_date.clone().unwrap_or_else(|| String::from("N/A")),
                );
                let episodes = info_line("Episodes", season.episodes.len().to_string());

                let episode_cards: Vec<Element<Message>> = season
                    .episodes
                    .iter()
                    .take(MEDIA_TAB_PREVIEW_LEN)
                    .map(|episode| {
                        let handle =
                            self.cached_image(episode.still_path.as_ref(), ImageSize::Strip);
                        let still =
                            Self::image_or_placeholder(handle, 180.0, 100.0, 10.0, ICON_FILM);
                        column![
                            still,
                            text(format!("Episode {}", episode.episode_number))
                                .size(11)
                                .color(TEXT_GRAY),
                            text(truncate_text(&episode.name, 22)).size(12).color(TEXT_WHITE),
                        ]
                        .spacing(4)
                        .width(Length::Fixed(190.0))
                        .into()
                    })
                    .collect();
                let strip = horizontal_strip(Row::with_children(episode_cards).spacing(16));

                let mut body = column![air_date, episodes, strip].spacing(8);
                if let Some(episode) = self
                    .series
                    .episodes
                    .get(&(selected, season.episodes.first().map_or(1, |e| e.episode_number)))
                {
                    let overview = if episode.overview.is_empty() {
                        String::from("No overview available")
                    } else {
                        truncate_text(&episode.overview, 220)
                    };
                    body = body.push(info_line(
                        &format!("Episode {} Overview", episode.episode_number),
                        overview,
                    ));
                }
                body.into()
            }
        };

        column![heading, picker, body].spacing(12).into()
    }

    fn view_movie_sidebar<'a>(&'a self, details: &'a MediaDetails) -> Element<'a, Message> {
        let mut card = Column::new().spacing(10);
        card = card.push(section_heading("Details"));
        card = card.push(info_line(
            "Status",
            details.status.clone().unwrap_or_else(|| String::from("Released")),
        ));
        card = card.push(info_line(
            "Original Language",
            details
                .original_language
                .as_deref()
                .map(str::to_uppercase)
                .unwrap_or_else(|| String::from("N/A")),
        ));
        card = card.push(info_line(
            "Budget",
            details
                .budget
                .filter(|b| *b > 0)
                .map(|b| format!("${}", format_with_commas(b)))
                .unwrap_or_else(|| String::from("N/A")),
        ));
        card = card.push(info_line(
            "Revenue",
            details
                .revenue
                .filter(|r| *r > 0)
                .map(|r| format!("${}", format_with_commas(r)))
                .unwrap_or_else(|| String::from("N/A")),
        ));
        card = self.push_production_companies(card, details);
        card = self.push_keywords(card, &self.movies.keywords);
        card = push_social_links(card, self.movies.external_ids.as_ref());

        container(card)
            .width(Length::Fixed(280.0))
            .padding(Padding::new(16.0))
            .style(panel_style)
            .into()
    }

    fn view_series_sidebar<'a>(&'a self, details: &'a MediaDetails) -> Element<'a, Message> {
        let mut card = Column::new().spacing(10);
        card = card.push(section_heading("Details"));
        card = card.push(info_line(
            "Status",
            details.status.clone().unwrap_or_else(|| String::from("N/A")),
        ));
        card = card.push(info_line(
            "Original Language",
            details
                .original_language
                .as_deref()
                .map(str::to_uppercase)
                .unwrap_or_else(|| String::from("N/A")),
        ));
        card = card.push(info_line(
            "Seasons",
            details
                .number_of_seasons
                .map(|n| n.to_string())
                .unwrap_or_else(|| String::from("N/A")),
        ));
        card = card.push(info_line(
            "Episodes",
            details
                .number_of_episodes
                .map(|n| n.to_string())
                .unwrap_or_else(|| String::from("N/A")),
        ));

        if !self.series.content_ratings.is_empty() {
            card = card.push(bold_text("Content Ratings", 14, ACCENT_CYAN));
            let mut pills = Row::new().spacing(6);
            for rating in self.series.content_ratings.iter().take(6) {
                pills = pills.push(keyword_pill(format!(
                    "{} {}",
                    rating.iso_3166_1, rating.rating
                )));
            }
            card = card.push(pills);
        }

        card = self.push_production_companies(card, details);
        card = self.push_keywords(card, &self.series.keywords);
        card = push_social_links(card, self.series.external_ids.as_ref());

        container(card)
            .width(Length::Fixed(280.0))
            .padding(Padding::new(16.0))
            .style(panel_style)
            .into()
    }

    fn push_production_companies<'a>(
        &'a self,
        mut card: Column<'a, Message>,
        details: &'a MediaDetails,
    ) -> Column<'a, Message> {
        if details.production_companies.is_empty() {
            return card;
        }
        card = card.push(bold_text("Production", 14, ACCENT_CYAN));
        let names = details
            .production_companies
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        card.push(text(names).size(12).color(TEXT_GRAY))
    }

    fn push_keywords<'a>(
        &'a self,
        mut card: Column<'a, Message>,
        keywords: &'a [Keyword],
    ) -> Column<'a, Message> {
        card = card.push(bold_text("Keywords", 14, ACCENT_CYAN));
        if keywords.is_empty() {
            return card.push(text("N/A").size(12).color(TEXT_GRAY));
        }
        let mut pills = Row::new().spacing(6);
        for keyword in keywords.iter().take(KEYWORD_PREVIEW_LEN) {
            pills = pills.push(keyword_pill(keyword.name.clone()));
        }
        card.push(pills)
    }
}

fn view_review_card(review: &Review) -> Element<'_, Message> {
    let excerpt = truncate_text(&review.content, REVIEW_EXCERPT_CHARS);
    container(
        column![
            bold_text(review.author.clone(), 13, ACCENT_CYAN),
            text(excerpt).size(12).color(TEXT_WHITE),
        ]
        .spacing(6),
    )
    .width(Length::Fill)
    .padding(Padding::new(12.0))
    .style(|_theme| container::Style {
        background: Some(iced::Background::Color(SURFACE_DARK_GRAY)),
        border: Border {
            radius: 10.0.into(),
            ..Default::default()
        },
        ..Default::default()
    })
    .into()
}

fn view_videos_tab(videos: &[Video]) -> Element<'_, Message> {
    if videos.is_empty() {
        return empty_notice("No videos available");
    }

    let mut list = Column::new().spacing(8);
    for video in videos.iter().take(MEDIA_TAB_PREVIEW_LEN) {
        list = list.push(
            container(
                column![
                    text(video.name.clone()).size(13).color(TEXT_WHITE),
                    text(format!("{} · youtube.com/watch?v={}", video.kind, video.key))
                        .size(11)
                        .color(TEXT_GRAY),
                ]
                .spacing(4),
            )
            .width(Length::Fill)
            .padding(Padding::new(10.0))
            .style(|_theme| container::Style {
                background: Some(iced::Background::Color(SURFACE_DARK_GRAY)),
                border: Border {
                    radius: 10.0.into(),
                    ..Default::default()
                },
                ..Default::default()
            }),
        );
    }
    list.into()
}

fn keyword_pill<'a>(label: String) -> Element<'a, Message> {
    container(text(label).size(11).color(TEXT_WHITE))
        .padding(Padding::new(4.0).left(10.0).right(10.0))
        .style(|_theme| container::Style {
            background: Some(iced::Background::Color(ACCENT_CYAN)),
            border: Border {
                radius: 12.0.into(),
                ..Default::default()
            },
            ..Default::default()
        })
        .into()
}

fn push_social_links<'a>(
    mut card: Column<'a, Message>,
    external_ids: Option<&'a ExternalIds>,
) -> Column<'a, Message> {
    card = card.push(bold_text("Social Media", 14, ACCENT_CYAN));
    let Some(ids) = external_ids else {
        return card.push(text("N/A").size(12).color(TEXT_GRAY));
    };

    let mut any = false;
    let mut links = Column::new().spacing(4);
    if let Some(imdb) = &ids.imdb_id {
        links = links.push(info_line("IMDb", imdb.clone()));
        any = true;
    }
    if let Some(facebook) = &ids.facebook_id {
        links = links.push(info_line("Facebook", facebook.clone()));
        any = true;
    }
    if let Some(twitter) = &ids.twitter_id {
        links = links.push(info_line("Twitter", format!("@{}", twitter)));
        any = true;
    }
    if let Some(instagram) = &ids.instagram_id {
        links = links.push(info_line("Instagram", format!("@{}", instagram)));
        any = true;
    }

    if any {
        card.push(links)
    } else {
        card.push(text("N/A").size(12).color(TEXT_GRAY))
    }
}

#[cfg(test)]
mod tests {
    use super::format_with_commas;

    #[test]
    fn commas_group_thousands() {
        assert_eq!(format_with_commas(0), "0");
        assert_eq!(format_with_commas(999), "999");
        assert_eq!(format_with_commas(1000), "1,000");
        assert_eq!(format_with_commas(63000000), "63,000,000");
        assert_eq!(format_with_commas(1234567890), "1,234,567,890");
    }
}
