use ratatui::Frame;

use crate::app::{App, AppScreen};
use crate::storage::Storage;
use crate::ui::history::render_history;

/// A UI Screen boundary: responsible for rendering one `AppScreen`
pub trait Screen<S: Storage> {
    fn render(&self, app: &App<S>, f: &mut Frame);
}

/// Typing and results both render through the `App` widget
pub struct SessionScreen;

impl<S: Storage> Screen<S> for SessionScreen {
    fn render(&self, app: &App<S>, f: &mut Frame) {
        f.render_widget(app, f.area());
    }
}

pub struct HistoryScreen;

impl<S: Storage> Screen<S> for HistoryScreen {
    fn render(&self, app: &App<S>, f: &mut Frame) {
        render_history(app, f);
    }
}

pub fn current_screen<S: Storage>(screen: AppScreen) -> Box<dyn Screen<S>> {
    match screen {
        AppScreen::Typing | AppScreen::Results => Box::new(SessionScreen),
        AppScreen::History => Box::new(HistoryScreen),
    }
}

/// Draws whatever the app is currently showing.
pub fn draw<S: Storage>(app: &App<S>, f: &mut Frame) {
    current_screen::<S>(app.screen).render(app, f);
}
