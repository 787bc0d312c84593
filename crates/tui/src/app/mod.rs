use std::time::Duration;

use chrono_tz::Tz;
use crossterm::event::{self, Event, KeyEvent};

use crate::{
    client::{Client, ClientError},
    config::AppConfig,
    error::{AppError, Result},
    ui,
};

use api_types::masjid::{MasjidWithBanksView, Pagination};

/// Transient UI state: the directory page on screen and which masjid the
/// cursor sits on. Nothing here is persisted.
#[derive(Debug)]
pub struct AppState {
    pub masjids: Vec<MasjidWithBanksView>,
    pub pagination: Option<Pagination>,
    pub selected: usize,
    pub page: u64,
    pub error: Option<String>,
    pub timezone: Tz,
    pub base_url: String,
}

impl AppState {
    pub fn selected_masjid(&self) -> Option<&MasjidWithBanksView> {
        self.masjids.get(self.selected)
    }

    fn select_next(&mut self) {
        if self.masjids.is_empty() {
            return;
        }
        self.selected = (self.selected + 1).min(self.masjids.len() - 1);
    }

    fn select_prev(&mut self) {
        if self.masjids.is_empty() {
            return;
        }
        self.selected = self.selected.saturating_sub(1);
    }

    fn pages(&self) -> u64 {
        self.pagination.map(|p| p.pages).unwrap_or(0)
    }
}

pub struct App {
    config: AppConfig,
    client: Client,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Client::new(&config.base_url)?;
        let timezone: Tz = config.timezone.parse().unwrap_or(chrono_tz::UTC);
        let state = AppState {
            masjids: Vec::new(),
            pagination: None,
            selected: 0,
            page: 1,
            error: None,
            timezone,
            base_url: config.base_url.clone(),
        };

        Ok(Self {
            config,
            client,
            state,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        self.load_masjids().await;

        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key).await,
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }

        Ok(())
    }

    async fn handle_key(&mut self, key: KeyEvent) {
        match ui::keymap::map_key(key) {
            ui::keymap::AppAction::Quit => {
                self.should_quit = true;
            }
            ui::keymap::AppAction::Up => {
                self.state.select_prev();
            }
            ui::keymap::AppAction::Down => {
                self.state.select_next();
            }
            ui::keymap::AppAction::Input(ch) => self.handle_char(ch).await,
            ui::keymap::AppAction::None => {}
        }
    }

    async fn handle_char(&mut self, ch: char) {
        match ch {
            'j' | 'J' => self.state.select_next(),
            'k' | 'K' => self.state.select_prev(),
            'r' | 'R' => self.load_masjids().await,
            'n' | 'N' => {
                if self.state.page < self.state.pages() {
                    self.state.page += 1;
                    self.load_masjids().await;
                }
            }
            'p' | 'P' => {
                if self.state.page > 1 {
                    self.state.page -= 1;
                    self.load_masjids().await;
                }
            }
            _ => {}
        }
    }

    async fn load_masjids(&mut self) {
        let res = self
            .client
            .masjids_list(self.state.page, self.config.page_size)
            .await;

        match res {
            Ok(response) => {
                self.state.masjids = response.data;
                self.state.pagination = Some(response.pagination);
                self.state.selected = 0;
                self.state.error = None;
            }
            Err(err) => {
                self.state.error = Some(message_for_error(err));
            }
        }
    }
}

fn message_for_error(err: ClientError) -> String {
    match err {
        ClientError::Validation(message) => format!("Validation error: {message}"),
        ClientError::Server(message) => format!("Server error: {message}"),
        ClientError::Transport(err) => format!("Server unreachable: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn masjid(name: &str) -> MasjidWithBanksView {
        MasjidWithBanksView {
            id: name.to_string(),
            name: name.to_string(),
            address: "1 Example Road".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            zip_code: "10001".to_string(),
            country: "USA".to_string(),
            phone: None,
            email: None,
            website: None,
            banks: Vec::new(),
        }
    }

    fn state_with(names: &[&str]) -> AppState {
        AppState {
            masjids: names.iter().map(|name| masjid(name)).collect(),
            pagination: None,
            selected: 0,
            page: 1,
            error: None,
            timezone: chrono_tz::UTC,
            base_url: String::new(),
        }
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut state = state_with(&["a", "b"]);
        state.select_next();
        state.select_next();
        assert_eq!(state.selected, 1);
        state.select_prev();
        state.select_prev();
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn selection_noop_when_empty() {
        let mut state = state_with(&[]);
        state.select_next();
        state.select_prev();
        assert_eq!(state.selected, 0);
        assert!(state.selected_masjid().is_none());
    }
}
