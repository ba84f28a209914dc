use iced::widget::{button, column, container, row, scrollable, text, Column, Row};
use iced::{Border, Color, Element, Length, Padding, Shadow};

use crate::components::{
    bold_text, empty_notice, hidden_scrollbar_style, info_line, loading_placeholder,
    section_heading, ICON_FILM, ICON_PERSON_FILL,
};
use crate::media::{
    truncate_text, CrewMember, MediaKind, Message, Page, PersonCredit, TEXT_GRAY, TEXT_WHITE,
};
use crate::tmdb::ImageSize;
use crate::Reelview;

const KNOWN_FOR_LEN: usize = 10;
const CREDIT_LIST_LEN: usize = 12;

fn credit_detail_page(credit: &PersonCredit) -> Page {
    match credit.kind() {
        MediaKind::Movie => Page::MovieDetails(credit.id),
        MediaKind::Tv => Page::SeriesDetails(credit.id),
    }
}

impl Reelview {
    pub fn view_person(&self) -> Element<'_, Message> {
        let heading = self.view_page_heading("Person Details");
        let Some(details) = &self.person.details else {
            return column![heading, loading_placeholder()].into();
        };

        let handle = self.cached_image(details.profile_path.as_ref(), ImageSize::Poster);
        let portrait = Self::image_or_placeholder(handle, 300.0, 450.0, 10.0, ICON_PERSON_FILL);

        let biography = if details.biography.is_empty() {
            String::from("No biography available")
        } else {
            details.biography.clone()
        };

        let personal_info = column![
            section_heading("Personal Info"),
            info_line("Name", details.name.clone()),
            info_line(
                "Known For",
                if details.known_for_department.is_empty() {
                    String::from("N/A")
                } else {
                    details.known_for_department.clone()
                },
            ),
            info_line(
                "Birthday",
                details.birthday.clone().unwrap_or_else(|| String::from("N/A")),
            ),
            info_line(
                "Place of Birth",
                details
                    .place_of_birth
                    .clone()
                    .unwrap_or_else(|| String::from("N/A")),
            ),
            info_line("Biography", truncate_text(&biography, 600)),
        ]
        .spacing(8);

        let left = column![portrait, personal_info]
            .spacing(16)
            .width(Length::Fixed(300.0));

        let right = column![
            self.view_known_for(),
            self.view_credit_lists(),
            self.view_person_social(),
        ]
        .spacing(24)
        .width(Length::Fill);

        let body = row![left, right].spacing(32);

        container(column![heading, self.view_back_button(), body].spacing(16))
            .width(Length::Fill)
            .padding(Padding::new(24.0).left(48.0).right(48.0))
            .into()
    }

    fn view_known_for(&self) -> Element<'_, Message> {
        let heading = section_heading("Known For");
        let Some(credits) = &self.person.combined_credits else {
            return column![heading, loading_placeholder()].spacing(12).into();
        };
        if credits.cast.is_empty() {
            return column![heading, empty_notice("No credits available")]
                .spacing(12)
                .into();
        }

        let cards: Vec<Element<Message>> = credits
            .cast
            .iter()
            .take(KNOWN_FOR_LEN)
            .map(|credit| self.view_known_for_card(credit))
            .collect();

        let strip = scrollable(Row::with_children(cards).spacing(16))
            .direction(scrollable::Direction::Horizontal(
                scrollable::Scrollbar::new().width(0).scroller_width(0),
            ))
            .width(Length::Fill)
            .style(hidden_scrollbar_style);

        column![heading, strip].spacing(12).into()
    }

    fn view_known_for_card<'a>(&'a self, credit: &'a PersonCredit) -> Element<'a, Message> {
        let handle = self.cached_image(credit.poster_path.as_ref(), ImageSize::Poster);
        let poster = Self::image_or_placeholder(handle, 100.0, 150.0, 10.0, ICON_FILM);

        let card = column![
            poster,
            text(truncate_text(credit.display_title(), 18))
                .size(12)
                .color(TEXT_WHITE),
            text(truncate_text(&credit.character, 18))
                .size(11)
                .color(TEXT_GRAY),
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
            .on_press(Message::NavigateTo(credit_detail_page(credit)))
            .into()
    }

    fn view_credit_lists(&self) -> Element<'_, Message> {
        let heading = section_heading("Credits");

        let acting = self
            .person
            .combined_credits
            .as_ref()
            .map(|credits| credit_line("Acting", &credits.cast))
            .unwrap_or_else(|| info_line("Acting", String::from("N/A")));
        let crew = self
            .person
            .combined_credits
            .as_ref()
            .map(|credits| crew_line(&credits.crew))
            .unwrap_or_else(|| info_line("Crew", String::from("N/A")));

        let mut filmography = Column::new().spacing(6);
        if let Some(movies) = &self.person.movie_credits {
            filmography = filmography.push(info_line(
                "Movies",
                format!("{} credits", movies.cast.len() + movies.crew.len()),
            ));
        }
        if let Some(shows) = &self.person.tv_credits {
            filmography = filmography.push(info_line(
                "TV Shows",
                format!("{} credits", shows.cast.len() + shows.crew.len()),
            ));
        }

        column![heading, acting, crew, filmography].spacing(10).into()
    }

    fn view_person_social(&self) -> Element<'_, Message> {
        let heading = section_heading("Social Media");
        let Some(ids) = &self.person.external_ids else {
            return column![heading, empty_notice("N/A")].spacing(12).into();
        };

        let mut links = Column::new().spacing(4);
        let mut any = false;
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

        let body: Element<Message> = if any {
            links.into()
        } else {
            empty_notice("N/A")
        };
        column![heading, body].spacing(12).into()
    }

    pub fn view_cast_crew(&self, kind: MediaKind) -> Element<'_, Message> {
        let (details, credits) = match kind {
            MediaKind::Movie => (&self.movies.details, &self.movies.credits),
            MediaKind::Tv => (&self.series.details, &self.series.credits),
        };

        let (Some(details), Some(credits)) = (details, credits) else {
            return column![self.view_page_heading("Cast & Crew"), loading_placeholder()].into();
        };

        let title = match details.year() {
            Some(year) => format!("{} ({})", details.display_title(), year),
            None => details.display_title().to_string(),
        };
        let heading = self.view_page_heading(&title);

        let cast_column = column![
            bold_text(format!("Cast {}", credits.cast.len()), 18, TEXT_WHITE),
            self.view_people_grid(
                credits
                    .cast
                    .iter()
                    .map(|m| (m.id, m.name.clone(), m.character.clone(), m.profile_path.clone()))
                    .collect(),
            ),
        ]
        .spacing(12)
        .width(Length::FillPortion(1));

        let crew_column = column![
            bold_text(format!("Crew {}", credits.crew.len()), 18, TEXT_WHITE),
            self.view_people_grid(
                credits
                    .crew
                    .iter()
                    .map(crew_entry)
                    .collect(),
            ),
        ]
        .spacing(12)
        .width(Length::FillPortion(1));

        let body = row![cast_column, crew_column].spacing(32);

        container(column![heading, self.view_back_button(), body].spacing(16))
            .width(Length::Fill)
            .padding(Padding::new(24.0).left(48.0).right(48.0))
            .into()
    }

    fn view_people_grid(
        &self,
        entries: Vec<(u64, String, String, Option<String>)>,
    ) -> Element<'_, Message> {
        if entries.is_empty() {
            return empty_notice("Nobody listed");
        }

        let mut grid = Column::new().spacing(16);
        for chunk in entries.chunks(3) {
            let mut cells = Row::new().spacing(16);
            for (id, name, role, profile_path) in chunk {
                let handle = self.cached_image(profile_path.as_ref(), ImageSize::Poster);
                let portrait =
                    Self::image_or_placeholder(handle, 100.0, 150.0, 50.0, ICON_PERSON_FILL);
                let card = column![
                    portrait,
                    text(name.clone()).size(12).color(TEXT_WHITE),
                    text(role.clone()).size(11).color(TEXT_GRAY),
                ]
                .spacing(4)
                .width(Length::Fixed(110.0))
                .align_x(iced::Alignment::Center);

                cells = cells.push(
                    button(card)
                        .padding(0)
                        .style(|_theme, _status| button::Style {
                            background: Some(iced::Background::Color(Color::TRANSPARENT)),
                            text_color: TEXT_WHITE,
                            border: Border::default(),
                            shadow: Shadow::default(),
                            snap: false,
                        })
                        .on_press(Message::NavigateTo(Page::Person(*id))),
                );
            }
            grid = grid.push(cells);
        }
        grid.into()
    }
}

fn crew_entry(member: &CrewMember) -> (u64, String, String, Option<String>) {
    (
        member.id,
        member.name.clone(),
        member.job.clone(),
        member.profile_path.clone(),
    )
}

fn credit_line<'a>(label: &str, credits: &[PersonCredit]) -> Element<'a, Message> {
    if credits.is_empty() {
        return info_line(label, String::from("N/A"));
    }
    let listing = credits
        .iter()
        .take(CREDIT_LIST_LEN)
        .map(|c| format!("{} ({})", c.display_title(), c.character))
        .collect::<Vec<_>>()
        .join(", ");
    info_line(label, listing)
}

fn crew_line<'a>(credits: &[PersonCredit]) -> Element<'a, Message> {
    if credits.is_empty() {
        return info_line("Crew", String::from("N/A"));
    }
    let listing = credits
        .iter()
        .take(CREDIT_LIST_LEN)
        .map(|c| format!("{} ({})", c.display_title(), c.job))
        .collect::<Vec<_>>()
        .join(", ");
    info_line("Crew", listing)
}
