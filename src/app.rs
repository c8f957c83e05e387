use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::warn;

use crate::clock::Clock;
use crate::config::Config;
use crate::corpus::{Category, PracticeText, TextProvider, ALL_CATEGORIES, CUSTOM_CATEGORY};
use crate::progress::{ProgressAnalyzer, ProgressReport};
use crate::result::SessionResult;
use crate::runtime::AppEvent;
use crate::session::{SessionEngine, SessionMode, SessionSummary};
use crate::storage::Storage;
use crate::store::{ResultStore, SortKey, SortOrder};

/// Countdown presets cycled with Tab; `None` is an untimed session.
pub const TIMED_PRESETS: [Option<u32>; 5] = [None, Some(15), Some(30), Some(60), Some(120)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppScreen {
    Typing,
    Results,
    History,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

#[derive(Debug, Default)]
pub struct HistoryView {
    pub scroll_offset: usize,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
}

/// Terminal adapter around the session engine and the result store.
///
/// Keys become engine calls, ticks poll the countdown, and a finished session
/// is appended to the store before the results screen is shown.
pub struct App<S: Storage> {
    pub engine: SessionEngine,
    pub store: ResultStore<S>,
    pub provider: TextProvider,
    pub analyzer: ProgressAnalyzer,
    pub screen: AppScreen,
    pub history: HistoryView,
    pub mode: SessionMode,
    pub custom_text: Option<String>,
    pub last_result: Option<SessionResult>,
    pub report: Option<ProgressReport>,
    /// One-line message for the status bar, e.g. a failed save.
    pub notice: Option<String>,
    category: String,
}

impl<S: Storage> App<S> {
    pub fn new(
        config: &Config,
        custom_text: Option<String>,
        provider: TextProvider,
        store: ResultStore<S>,
        clock: impl Clock + 'static,
    ) -> Self {
        let category = match custom_text {
            Some(_) => CUSTOM_CATEGORY.to_string(),
            None => Category::from_id_or_default(&config.category).id().to_string(),
        };
        let mode = SessionMode::from_secs(config.timed_secs);
        let text = next_text(&provider, &category, custom_text.as_deref());
        let engine = SessionEngine::with_clock(text, mode, clock).with_segmentation(config.segmentation);

        Self {
            engine,
            store,
            provider,
            analyzer: ProgressAnalyzer::new(config.history_window, config.trend_span, config.tiers),
            screen: AppScreen::Typing,
            history: HistoryView::default(),
            mode,
            custom_text,
            last_result: None,
            report: None,
            notice: None,
            category,
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn handle_event(&mut self, event: AppEvent) -> Control {
        match event {
            AppEvent::Tick => {
                if let Some(summary) = self.engine.poll_timer() {
                    self.on_finished(summary);
                }
                Control::Continue
            }
            AppEvent::Resize => Control::Continue,
            AppEvent::Key(key) => self.on_key(key),
        }
    }

    fn on_key(&mut self, key: KeyEvent) -> Control {
        if key.code == KeyCode::Esc
            || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
        {
            return Control::Quit;
        }

        match self.screen {
            AppScreen::Typing => self.on_typing_key(key),
            AppScreen::Results => match key.code {
                KeyCode::Char('r') | KeyCode::Left => self.restart(),
                KeyCode::Char('n') | KeyCode::Right => self.new_text(),
                KeyCode::Char('h') => self.screen = AppScreen::History,
                _ => {}
            },
            AppScreen::History => self.on_history_key(key),
        }
        Control::Continue
    }

    fn on_typing_key(&mut self, key: KeyEvent) {
        let finished = match key.code {
            KeyCode::Char(c) => self.engine.type_char(c),
            KeyCode::Backspace => self.engine.backspace(),
            KeyCode::Left => {
                self.restart();
                None
            }
            KeyCode::Right => {
                self.new_text();
                None
            }
            KeyCode::Up => {
                self.cycle_category(false);
                None
            }
            KeyCode::Down => {
                self.cycle_category(true);
                None
            }
            KeyCode::Tab => {
                self.cycle_timed_mode();
                None
            }
            _ => None,
        };
        if let Some(summary) = finished {
            self.on_finished(summary);
        }
    }

    fn on_history_key(&mut self, key: KeyEvent) {
        let rows = self.store.len();
        match key.code {
            KeyCode::Char('b') | KeyCode::Backspace => {
                self.screen = if self.last_result.is_some() {
                    AppScreen::Results
                } else {
                    AppScreen::Typing
                };
            }
            KeyCode::Char('n') => self.new_text(),
            KeyCode::Char('c') => {
                if let Err(e) = self.store.clear() {
                    self.notice = Some(format!("history cleared in memory only: {e}"));
                }
                self.history.scroll_offset = 0;
                self.report = None;
            }
            KeyCode::Up => self.history.scroll_offset = self.history.scroll_offset.saturating_sub(1),
            KeyCode::Down => {
                self.history.scroll_offset = (self.history.scroll_offset + 1).min(rows.saturating_sub(1));
            }
            KeyCode::Home => self.history.scroll_offset = 0,
            KeyCode::Char('1') => self.sort_history(SortKey::Date),
            KeyCode::Char('2') => self.sort_history(SortKey::Wpm),
            KeyCode::Char('3') => self.sort_history(SortKey::Accuracy),
            KeyCode::Char(' ') => {
                self.history.sort_order = self.history.sort_order.toggled();
                self.history.scroll_offset = 0;
            }
            _ => {}
        }
    }

    fn sort_history(&mut self, key: SortKey) {
        self.history.sort_key = key;
        self.history.scroll_offset = 0;
    }

    fn on_finished(&mut self, summary: SessionSummary) {
        let Some(result) = self.engine.finish_result() else {
            warn!("session finished without a result: {summary:?}");
            return;
        };
        self.notice = match self.store.append(result.clone()) {
            Ok(()) => None,
            Err(e) => Some(format!("result not saved: {e}")),
        };
        self.report = Some(self.analyzer.analyze(self.store.results()));
        self.last_result = Some(result);
        self.screen = AppScreen::Results;
    }

    /// Same text again.
    pub fn restart(&mut self) {
        let text = PracticeText::new(self.category.clone(), self.engine.state().target_text.clone());
        self.begin(text);
    }

    /// Fresh text from the current category.
    pub fn new_text(&mut self) {
        let text = next_text(&self.provider, &self.category, self.custom_text.as_deref());
        self.begin(text);
    }

    pub fn cycle_category(&mut self, forward: bool) {
        let current = ALL_CATEGORIES.iter().position(|c| c.id() == self.category);
        let len = ALL_CATEGORIES.len();
        let next = match (current, forward) {
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
            (None, _) => 0,
        };
        self.category = ALL_CATEGORIES[next].id().to_string();
        self.new_text();
    }

    pub fn cycle_timed_mode(&mut self) {
        let current = TIMED_PRESETS
            .iter()
            .position(|p| *p == self.mode.duration_secs())
            .unwrap_or(0);
        self.mode = SessionMode::from_secs(TIMED_PRESETS[(current + 1) % TIMED_PRESETS.len()]);
        self.new_text();
    }

    fn begin(&mut self, text: PracticeText) {
        self.engine.reset(text, self.mode);
        self.screen = AppScreen::Typing;
        self.notice = None;
    }
}

fn next_text(provider: &TextProvider, category: &str, custom_text: Option<&str>) -> PracticeText {
    match custom_text {
        Some(text) if category == CUSTOM_CATEGORY => PracticeText::new(CUSTOM_CATEGORY, text),
        _ => provider.get_text(category),
    }
}
