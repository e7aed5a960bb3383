use iced::widget::{button, column, container, row, scrollable, text, text_input, Column, Row};
use iced::{Alignment, Element, Length, Theme};

use crate::state::data::TableRow;
use crate::state::log::LogLine;
use crate::state::Table;
use crate::Message;

type ButtonStyle = fn(&Theme, button::Status) -> button::Style;

/// A titled, scrollable table whose rows select on click
pub fn table<'a, R: TableRow>(
    title: &'a str,
    rows: &'a [R],
    kind: Table,
    selected: Option<usize>,
) -> Element<'a, Message> {
    let header: Row<'a, Message> = R::COLUMNS.iter().fold(Row::new().spacing(8), |header, heading| {
        header.push(text(*heading).size(14).width(Length::FillPortion(1)))
    });

    let body: Column<'a, Message> =
        rows.iter()
            .enumerate()
            .fold(Column::new().spacing(2), |body, (index, record)| {
                let cells: Row<'a, Message> = record
                    .cells()
                    .into_iter()
                    .fold(Row::new().spacing(8), |cells, cell| {
                        cells.push(text(cell).size(14).width(Length::FillPortion(1)))
                    });

                let style: ButtonStyle = if selected == Some(index) {
                    button::primary
                } else {
                    button::text
                };

                body.push(
                    button(cells)
                        .width(Length::Fill)
                        .padding([2, 6])
                        .style(style)
                        .on_press(Message::RowSelected(kind, index)),
                )
            });

    bordered(column![
        text(title).size(18),
        header,
        scrollable(body).height(Length::Fill).width(Length::Fill),
    ])
}

/// Label, text box and Edit button under a table
pub fn edit_row<'a>(
    label: &'a str,
    value: &'a str,
    on_input: fn(String) -> Message,
    on_edit: Option<Message>,
) -> Element<'a, Message> {
    row![
        text(label).width(Length::Fixed(60.0)),
        text_input(label, value).on_input(on_input).width(Length::Fill),
        button("Edit").on_press_maybe(on_edit),
    ]
    .spacing(8)
    .align_y(Alignment::Center)
    .into()
}

/// The log panel, oldest line first
pub fn log_list(lines: &[LogLine]) -> Element<'_, Message> {
    let list: Column<'_, Message> = lines
        .iter()
        .fold(Column::new().spacing(2), |list, line| {
            list.push(text(line.display()).size(13))
        });

    bordered(column![
        text("Log").size(18),
        scrollable(list).height(Length::Fill).width(Length::Fill),
    ])
}

fn bordered<'a>(content: Column<'a, Message>) -> Element<'a, Message> {
    container(content.spacing(6))
        .padding(8)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(container::bordered_box)
        .into()
}
