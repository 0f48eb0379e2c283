use iced::{
    Color, Element, Length, Task, Theme, border,
    widget::{Column, Row, button, column, container, container::Style, row, scrollable, text},
};
use iced_widget::container::bordered_box;
use rfd::{AsyncMessageDialog, MessageButtons, MessageLevel};

use crate::core::sync::{TABLE_HEADERS, TableRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Departments,
    Reports,
}

impl Tab {
    const ALL: [Tab; 2] = [Tab::Departments, Tab::Reports];

    fn label(self) -> &'static str {
        match self {
            Tab::Departments => "Departamentos",
            Tab::Reports => "Informes",
        }
    }

    fn style(self, active: Self) -> impl Fn(&Theme) -> Style {
        move |theme: &Theme| {
            let style = bordered_box(theme).border(border::width(2));
            // darken the active tab
            if self == active {
                let mut color_rgba = theme.palette().background.into_rgba8();
                color_rgba[0] /= 2;
                color_rgba[1] /= 2;
                color_rgba[2] /= 2;
                style.background(Color::from_rgb8(color_rgba[0], color_rgba[1], color_rgba[2]))
            } else {
                style.background(theme.palette().background)
            }
        }
    }
}

/// Tab row on top, screen content below.
pub fn layout<'a, Message>(
    active: Tab,
    on_select: impl Fn(Tab) -> Message,
    content: impl Into<Element<'a, Message>>,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    let tabs = Row::with_children(Tab::ALL.map(|tab| {
        container(button(text(tab.label())).on_press(on_select(tab)).style(button::text))
            .style(tab.style(active))
            .padding(5)
            .into()
    }))
    .spacing(10);

    container(column![tabs, container(content).height(Length::Fill)].spacing(15))
        .padding(20)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Read-only grid; clicking a row reports its id.
pub fn table<'a, Message>(
    rows: &'a [TableRow],
    picked: Option<i64>,
    on_pick: impl Fn(i64) -> Message,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    let cell = |value: &'a str| text(value).width(Length::FillPortion(1));

    let header = Row::with_children(TABLE_HEADERS.map(|title| cell(title).into())).padding(5);
    let body = Column::with_children(rows.iter().map(|table_row| {
        let cells = Row::with_children(
            table_row
                .cells
                .iter()
                .map(|value| cell(value.as_str()).into()),
        );
        let style = if picked == Some(table_row.id) {
            button::primary
        } else {
            button::secondary
        };
        button(cells)
            .width(Length::Fill)
            .style(style)
            .on_press(on_pick(table_row.id))
            .into()
    }))
    .spacing(2);

    container(column![header, scrollable(body).height(Length::Fill)])
        .style(bordered_box)
        .padding(10)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Shows a dismissable dialog and yields `on_close` once it is closed.
pub fn notice<Message>(
    level: MessageLevel,
    title: &str,
    description: &str,
    on_close: Message,
) -> Task<Message>
where
    Message: Send + 'static,
{
    let dialog = AsyncMessageDialog::new()
        .set_level(level)
        .set_title(title)
        .set_description(description)
        .set_buttons(MessageButtons::Ok);
    Task::perform(dialog.show(), move |_| on_close)
}

pub fn labeled<'a, Message: 'a>(
    label: &'a str,
    input: impl Into<Element<'a, Message>>,
) -> Element<'a, Message> {
    row![text(label).width(Length::Fixed(180.0)), input.into()]
        .spacing(10)
        .into()
}
