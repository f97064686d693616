//! Key handling for the terminal host.
//!
//! Every widget operation that awaits (startup, search, opening a favorite)
//! runs on a spawned task with a cloned widget handle, so the event loop
//! keeps drawing while it is in flight.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use cirrus_widget::WeatherWidget;

use crate::tui::AppEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Keys edit the city input
    #[default]
    Editing,
    /// Keys act on the weather panel and the favorites list
    Normal,
}

/// Host-side UI state that the widget does not own
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub mode: InputMode,
    /// Highlighted favorite, 0-based
    pub selected: usize,
}

pub struct App {
    pub widget: WeatherWidget,
    pub ui: UiState,
    pub should_quit: bool,
}

impl App {
    pub fn new(widget: WeatherWidget) -> Self {
        Self {
            widget,
            ui: UiState::default(),
            should_quit: false,
        }
    }

    /// Run the widget's startup sequence in the background.
    pub fn start(&self) {
        let widget = self.widget.clone();
        tokio::spawn(async move { widget.mount().await });
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Resize | AppEvent::Tick => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.ui.mode {
            InputMode::Editing => self.handle_editing(key),
            InputMode::Normal => self.handle_normal(key),
        }
    }

    fn handle_editing(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.spawn_submit(),
            KeyCode::Esc | KeyCode::Tab => self.ui.mode = InputMode::Normal,
            KeyCode::Backspace => {
                let mut city = self.widget.state().city;
                city.pop();
                self.widget.set_city(city);
            }
            KeyCode::Char(c) => {
                let mut city = self.widget.state().city;
                city.push(c);
                self.widget.set_city(city);
            }
            _ => {}
        }
    }

    fn handle_normal(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('i') | KeyCode::Char('/') | KeyCode::Tab => {
                self.ui.mode = InputMode::Editing;
            }
            KeyCode::Char('f') => self.widget.add_to_favorites(),
            KeyCode::Char('j') | KeyCode::Down => {
                let count = self.widget.state().favorites.len();
                if self.ui.selected + 1 < count {
                    self.ui.selected += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.ui.selected = self.ui.selected.saturating_sub(1);
            }
            KeyCode::Enter => self.spawn_favorite(self.ui.selected + 1),
            KeyCode::Char(c @ '1'..='9') => {
                if let Some(position) = c.to_digit(10) {
                    self.spawn_favorite(position as usize);
                }
            }
            _ => {}
        }
    }

    fn spawn_submit(&self) {
        let widget = self.widget.clone();
        tokio::spawn(async move { widget.submit().await });
    }

    fn spawn_favorite(&self, position: usize) {
        let widget = self.widget.clone();
        tokio::spawn(async move { widget.fetch_favorite(position).await });
    }
}
