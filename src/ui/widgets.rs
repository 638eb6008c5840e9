use iced::widget::{button, column, container, pick_list, row, scrollable, text, Column, Row};
use iced::{Color, Element, Length, Theme};

use super::presenter::{DetailView, ListItem, ListView};
use crate::state::options::{FilterChoice, OptionIndex};
use crate::state::query::{FilterField, FilterSelection, SortKey};
use crate::Message;

/// Colour of the error line
const ERROR_COLOR: Color = Color::from_rgb(0.95, 0.4, 0.4);

/// Filter dropdowns (one per field) followed by the sort dropdown
pub fn filter_bar<'a>(
    options: &'a OptionIndex,
    filter: &FilterSelection,
    sort: SortKey,
) -> Element<'a, Message> {
    let mut controls = Row::new().spacing(16);

    for field in FilterField::ALL {
        let selected = FilterChoice::from_criterion(filter.get(field));
        let picker = pick_list(options.options(field), Some(selected), move |choice| {
            Message::FilterPicked(field, choice)
        });

        controls = controls.push(labelled(field.label(), picker.into()));
    }

    let sorter = pick_list(SortKey::ALL, Some(sort), Message::SortPicked);
    controls.push(labelled("Sort by", sorter.into())).into()
}

fn labelled<'a>(label: &'a str, control: Element<'a, Message>) -> Element<'a, Message> {
    column![text(label).size(14), control].spacing(4).into()
}

/// The course list, or the "no matches" notice
pub fn course_list<'a>(view: ListView) -> Element<'a, Message> {
    match view {
        ListView::Empty(notice) => container(text(notice)).padding(10).into(),
        ListView::Items(items) => {
            let rows = items.into_iter().map(course_row);
            scrollable(Column::with_children(rows).spacing(4))
                .height(Length::Fill)
                .into()
        }
    }
}

fn course_row<'a>(item: ListItem) -> Element<'a, Message> {
    let style: fn(&Theme, button::Status) -> button::Style = if item.selected {
        button::primary
    } else {
        button::text
    };

    button(text(item.summary))
        .width(Length::Fill)
        .style(style)
        .on_press(Message::CourseClicked(item.position))
        .into()
}

/// Every field of the selected course
pub fn detail_panel<'a>(detail: DetailView) -> Element<'a, Message> {
    let mut body = Column::new().spacing(8).push(text(detail.heading).size(24));

    for (label, value) in detail.rows {
        body = body.push(
            row![
                text(format!("{}:", label)).width(Length::Fixed(110.0)),
                text(value),
            ]
            .spacing(8),
        );
    }

    container(body).padding(16).width(Length::Fill).into()
}

/// Status line plus the error region (empty when there is no error)
pub fn status_bar<'a>(status: &'a str, error: &'a str) -> Element<'a, Message> {
    column![text(status).size(16), text(error).size(16).color(ERROR_COLOR)]
        .spacing(4)
        .into()
}
