//! Draws a [`WidgetView`] with ratatui.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use cirrus_widget::view::{FAVORITES_HEADING, FAVORITE_LABEL, LOADING_TEXT, SUBMIT_LABEL, TITLE};
use cirrus_widget::{StatusKind, WeatherDetails, WidgetView};

use crate::app::{InputMode, UiState};

const ACCENT: Color = Color::Rgb(126, 200, 180);
const TEXT_DIM: Color = Color::Rgb(160, 160, 160);
const ERROR: Color = Color::Rgb(204, 90, 90);
const INFO: Color = Color::Rgb(120, 190, 110);
const LOADING: Color = Color::Rgb(222, 196, 120);

/// Content lines in the weather panel, plus its two borders
const PANEL_HEIGHT: u16 = 7;

pub fn render(frame: &mut Frame, view: &WidgetView, ui: &UiState) {
    let [title_area, form_area, status_area, panel_area, favorites_area, help_area] =
        Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(PANEL_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(frame.area());

    let title = Line::from(Span::styled(
        TITLE,
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    ))
    .centered();
    frame.render_widget(Paragraph::new(title), title_area);

    render_form(frame, form_area, view, ui);
    render_status(frame, status_area, view);
    render_panel(frame, panel_area, view);
    render_favorites(frame, favorites_area, view, ui);
    render_help(frame, help_area, ui);
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(TEXT_DIM)
    }
}

fn render_form(frame: &mut Frame, area: Rect, view: &WidgetView, ui: &UiState) {
    let button_width = SUBMIT_LABEL.len() as u16 + 4;
    let [input_area, button_area] =
        Layout::horizontal([Constraint::Min(10), Constraint::Length(button_width)]).areas(area);

    let editing = ui.mode == InputMode::Editing;
    let input = Paragraph::new(view.input.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .title("City")
            .border_style(border_style(editing)),
    );
    frame.render_widget(input, input_area);

    let button = Paragraph::new(SUBMIT_LABEL)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(border_style(false)));
    frame.render_widget(button, button_area);

    if editing {
        let typed = view.input.chars().count() as u16;
        let max_x = input_area.right().saturating_sub(2);
        let x = (input_area.x + 1 + typed).min(max_x);
        frame.set_cursor_position((x, input_area.y + 1));
    }
}

fn render_status(frame: &mut Frame, area: Rect, view: &WidgetView) {
    let Some(status) = &view.status else {
        return;
    };
    let color = match status.kind {
        StatusKind::Error => ERROR,
        StatusKind::Info => INFO,
    };
    let line = Line::from(Span::styled(status.text.as_str(), Style::default().fg(color)));
    frame.render_widget(Paragraph::new(line), area);
}

fn render_panel(frame: &mut Frame, area: Rect, view: &WidgetView) {
    if view.loading {
        let loading = Paragraph::new(Line::from(Span::styled(
            LOADING_TEXT,
            Style::default().fg(LOADING),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(border_style(false)));
        frame.render_widget(loading, area);
        return;
    }

    if let Some(details) = &view.details {
        frame.render_widget(details_paragraph(details), area);
    }
}

fn details_paragraph(details: &WeatherDetails) -> Paragraph<'_> {
    let label = Style::default().fg(TEXT_DIM);
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Temperature: ", label),
            Span::styled(
                details.temperature.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Condition:   ", label),
            Span::raw(details.condition.as_str()),
        ]),
        Line::from(vec![
            Span::styled("Humidity:    ", label),
            Span::raw(details.humidity.as_str()),
        ]),
    ];
    if let Some(background) = &details.background {
        lines.push(Line::from(vec![
            Span::styled("Background:  ", label),
            Span::raw(background.as_str()),
        ]));
    }
    lines.push(Line::from(Span::styled(
        format!("[f] {}", FAVORITE_LABEL),
        Style::default().fg(ACCENT),
    )));

    Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Weather in {}", details.city))
            .border_style(border_style(true)),
    )
}

fn render_favorites(frame: &mut Frame, area: Rect, view: &WidgetView, ui: &UiState) {
    let normal = ui.mode == InputMode::Normal;
    let items: Vec<ListItem> = view
        .favorites
        .iter()
        .enumerate()
        .map(|(i, city)| ListItem::new(format!("{}. {}", i + 1, city)))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(FAVORITES_HEADING)
                .border_style(border_style(normal)),
        )
        .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if normal && !view.favorites.is_empty() {
        state.select(Some(ui.selected.min(view.favorites.len() - 1)));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_help(frame: &mut Frame, area: Rect, ui: &UiState) {
    let text = match ui.mode {
        InputMode::Editing => "Enter search | Esc commands | Ctrl-C quit",
        InputMode::Normal => "f favorite | 1-9/Enter open | j/k select | i edit | q quit",
    };
    let help = Paragraph::new(Line::from(Span::styled(text, Style::default().fg(TEXT_DIM))));
    frame.render_widget(help, area);
}

#[cfg(test)]
pub(crate) fn draw_to_string(view: &WidgetView, ui: &UiState, width: u16, height: u16) -> String {
    use ratatui::{backend::TestBackend, Terminal};

    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|frame| render(frame, view, ui)).unwrap();

    let buffer = terminal.backend().buffer();
    buffer
        .content()
        .chunks(width as usize)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cirrus_widget::Status;

    fn idle_view() -> WidgetView {
        WidgetView {
            input: String::new(),
            status: None,
            loading: false,
            details: None,
            favorites: Vec::new(),
        }
    }

    fn paris_details() -> WeatherDetails {
        WeatherDetails {
            city: "Paris".into(),
            temperature: "18°C".into(),
            condition: "light rain".into(),
            humidity: "60%".into(),
            background: Some("/images/rain.avif".into()),
        }
    }

    #[test]
    fn test_render_always_has_form_and_favorites() {
        let output = draw_to_string(&idle_view(), &UiState::default(), 60, 20);
        assert!(output.contains(TITLE));
        assert!(output.contains("City"));
        assert!(output.contains(SUBMIT_LABEL));
        assert!(output.contains(FAVORITES_HEADING));
        assert!(!output.contains(LOADING_TEXT));
        assert!(!output.contains("Weather in"));
    }

    #[test]
    fn test_render_loading() {
        let view = WidgetView {
            input: "Paris".into(),
            loading: true,
            ..idle_view()
        };
        let output = draw_to_string(&view, &UiState::default(), 60, 20);
        assert!(output.contains("Paris"));
        assert!(output.contains(LOADING_TEXT));
    }

    #[test]
    fn test_render_weather_details() {
        let view = WidgetView {
            input: "Paris".into(),
            details: Some(paris_details()),
            ..idle_view()
        };
        let output = draw_to_string(&view, &UiState::default(), 60, 20);
        assert!(output.contains("Weather in Paris"));
        assert!(output.contains("18°C"));
        assert!(output.contains("light rain"));
        assert!(output.contains("60%"));
        assert!(output.contains("/images/rain.avif"));
        assert!(output.contains(FAVORITE_LABEL));
    }

    #[test]
    fn test_render_status_and_favorites_in_order() {
        let view = WidgetView {
            status: Some(Status::favorite_added("Paris")),
            favorites: vec!["Paris".into(), "Oslo".into()],
            ..idle_view()
        };
        let output = draw_to_string(&view, &UiState::default(), 60, 20);
        assert!(output.contains("Paris added to favorites!"));

        let paris = output.find("1. Paris").unwrap();
        let oslo = output.find("2. Oslo").unwrap();
        assert!(paris < oslo);
    }

    #[test]
    fn test_render_selected_favorite_in_normal_mode() {
        let view = WidgetView {
            favorites: vec!["Paris".into(), "Oslo".into()],
            ..idle_view()
        };
        let ui = UiState {
            mode: InputMode::Normal,
            selected: 1,
        };
        let output = draw_to_string(&view, &ui, 60, 20);
        assert!(output.contains("> 2. Oslo"));
        assert!(output.contains("q quit"));
    }

    #[test]
    fn test_render_error_status() {
        let view = WidgetView {
            status: Some(Status::fetch_failed()),
            ..idle_view()
        };
        let output = draw_to_string(&view, &UiState::default(), 60, 20);
        assert!(output.contains("Error fetching weather data."));
    }
}
