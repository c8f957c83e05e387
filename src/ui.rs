pub mod charting;
pub mod history;
pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, AppScreen};
use crate::script;
use crate::session::{Phase, SessionMode, SessionState};
use crate::storage::Storage;
use crate::ui::charting::{compute_chart_params, format_label, format_trend};
use crate::ui::history::{accuracy_color, category_label, wpm_color};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

impl<S: Storage> Widget for &App<S> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.screen {
            AppScreen::Results => render_results(self, area, buf),
            _ => render_typing(self, area, buf),
        }
    }
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

/// Target text coloured by what has been typed so far.
fn prompt_spans(state: &SessionState) -> Vec<Span<'static>> {
    let green_bold_style = bold().fg(Color::Green);
    let red_bold_style = bold().fg(Color::Red);
    let dim_bold_style = bold().add_modifier(Modifier::DIM);
    let underlined_dim_bold_style = dim_bold_style.add_modifier(Modifier::UNDERLINED);

    let target = script::units(&state.target_text, state.script);
    let typed = script::units(&state.typed_so_far, state.script);
    let cursor = typed.len();

    let mut spans: Vec<Span> = typed
        .iter()
        .enumerate()
        .map(|(idx, unit)| {
            if state.error_positions.contains(&idx) {
                let shown = if *unit == " " { "·" } else { *unit };
                Span::styled(shown.to_string(), red_bold_style)
            } else {
                Span::styled(target[idx].to_string(), green_bold_style)
            }
        })
        .collect();

    if let Some(next) = target.get(cursor) {
        spans.push(Span::styled(next.to_string(), underlined_dim_bold_style));
    }
    if cursor + 1 < target.len() {
        spans.push(Span::styled(target[cursor + 1..].concat(), dim_bold_style));
    }
    spans
}

fn render_typing<S: Storage>(app: &App<S>, area: Rect, buf: &mut Buffer) {
    let state = app.engine.state();
    let live = app.engine.live_metrics();

    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
    let prompt_width = state.target_text.width() as u16;
    let prompt_occupied_lines = if prompt_width <= max_chars_per_line {
        1
    } else {
        prompt_width.div_ceil(max_chars_per_line) + 1
    };
    let padding = area.height.saturating_sub(prompt_occupied_lines + 4) / 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Length(padding),
            Constraint::Length(2), // live metrics
            Constraint::Length(prompt_occupied_lines),
            Constraint::Min(0),
            Constraint::Length(1), // legend
        ])
        .split(area);

    let mode = match state.mode {
        SessionMode::Normal => "untimed".to_string(),
        SessionMode::Timed(secs) => format!("{secs}s"),
    };
    let header = Paragraph::new(Span::styled(
        format!("{}  ·  {mode}", category_label(app.category())),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center);
    header.render(chunks[0], buf);

    let mut metrics = vec![
        Span::styled(format!("{} wpm", live.wpm), bold().fg(wpm_color(live.wpm))),
        Span::raw("   "),
        Span::styled(format!("{}% acc", live.accuracy), bold().fg(accuracy_color(live.accuracy))),
        Span::raw("   "),
        Span::styled(format!("{} errors", live.error_count), bold()),
    ];
    if let SessionMode::Timed(_) = state.mode {
        metrics.push(Span::raw("   "));
        metrics.push(Span::styled(
            format!("{}s left", state.remaining_seconds),
            bold().fg(Color::Magenta),
        ));
    }
    if state.phase() == Phase::Idle {
        metrics = vec![Span::styled(
            "start typing to begin",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
        )];
    }
    Paragraph::new(Line::from(metrics))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);

    Paragraph::new(Line::from(prompt_spans(state)))
        .alignment(if prompt_occupied_lines == 1 {
            // short prompts sit in the middle
            Alignment::Center
        } else {
            Alignment::Left
        })
        .wrap(Wrap { trim: true })
        .render(chunks[3], buf);

    Paragraph::new(Span::styled(
        "(←) retry / (→) new / (↑↓) category / (tab) timer / (esc)ape",
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .render(chunks[5], buf);
}

fn render_results<S: Storage>(app: &App<S>, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Min(1),    // chart
            Constraint::Length(1), // stats
            Constraint::Length(1), // tier and trend
            Constraint::Length(1), // notice
            Constraint::Length(1), // legend
        ])
        .split(area);

    let points = app
        .report
        .as_ref()
        .map(|report| report.chart_data())
        .unwrap_or_default();
    let (last_attempt, highest_wpm) = compute_chart_params(&points);

    let datasets = vec![Dataset::default()
        .marker(ratatui::symbols::Marker::Braille)
        .style(Style::default().fg(Color::Magenta))
        .graph_type(GraphType::Line)
        .data(&points)];
    Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title("attempt")
                .bounds([1.0, last_attempt])
                .labels(vec![
                    Span::styled("1", bold()),
                    Span::styled(format_label(last_attempt), bold()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("wpm")
                .bounds([0.0, highest_wpm])
                .labels(vec![
                    Span::styled("0", bold()),
                    Span::styled(format_label(highest_wpm), bold()),
                ]),
        )
        .render(chunks[0], buf);

    if let Some(result) = &app.last_result {
        Paragraph::new(Line::from(vec![
            Span::styled(format!("{} wpm", result.wpm), bold().fg(wpm_color(result.wpm))),
            Span::raw("   "),
            Span::styled(
                format!("{}% acc", result.accuracy),
                bold().fg(accuracy_color(result.accuracy)),
            ),
            Span::raw("   "),
            Span::styled(format!("{}s", result.elapsed_seconds), bold()),
            Span::raw("   "),
            Span::styled(format!("{} errors", result.error_count), bold()),
        ]))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);
    }

    if let Some(report) = &app.report {
        let tier = report.tier.map(|t| t.to_string()).unwrap_or_default();
        let spread = report
            .consistency
            .map(|sd| format!("   spread ±{sd:.1} wpm"))
            .unwrap_or_default();
        Paragraph::new(Span::styled(
            format!("{tier}   trend {}{spread}", format_trend(report.trend)),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);
    }

    if let Some(notice) = &app.notice {
        Paragraph::new(Span::styled(notice.clone(), Style::default().fg(Color::Red)))
            .alignment(Alignment::Center)
            .render(chunks[3], buf);
    }

    Paragraph::new(Span::styled(
        "(r)etry / (n)ew / (h)istory / (esc)ape",
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .render(chunks[4], buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::config::Config;
    use crate::corpus::{FormatterSettings, TextProvider};
    use crate::runtime::AppEvent;
    use crate::storage::MemoryStorage;
    use crate::store::ResultStore;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn create_test_app(prompt: &str) -> App<MemoryStorage> {
        App::new(
            &Config::default(),
            Some(prompt.to_string()),
            TextProvider::new(FormatterSettings::default()).unwrap(),
            ResultStore::load(MemoryStorage::new()),
            ManualClock::default(),
        )
    }

    fn type_str(app: &mut App<MemoryStorage>, s: &str) {
        for c in s.chars() {
            app.handle_event(AppEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)));
        }
    }

    fn rendered(app: &App<MemoryStorage>, area: Rect) -> String {
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn typing_screen_shows_prompt() {
        let app = create_test_app("hello world");
        let text = rendered(&app, Rect::new(0, 0, 80, 24));
        assert!(text.contains("hello world"));
        assert!(text.contains("start typing"));
    }

    #[test]
    fn typing_screen_shows_live_metrics() {
        let mut app = create_test_app("hello world");
        type_str(&mut app, "hx");
        let text = rendered(&app, Rect::new(0, 0, 80, 24));
        assert!(text.contains("1 errors"));
        assert!(text.contains("50% acc"));
    }

    #[test]
    fn results_screen_shows_numbers_and_legend() {
        let mut app = create_test_app("ab");
        type_str(&mut app, "ab");
        assert_eq!(app.screen, AppScreen::Results);

        let text = rendered(&app, Rect::new(0, 0, 80, 24));
        assert!(text.contains("100% acc"));
        assert!(text.contains("(h)istory"));
        assert!(text.contains("spread"));
    }

    #[test]
    fn prompt_marks_errors() {
        let mut app = create_test_app("a b");
        type_str(&mut app, "ax");
        let spans = prompt_spans(app.engine.state());
        assert_eq!(spans[1].content, "x");
        assert_eq!(spans[1].style.fg, Some(Color::Red));
        assert_eq!(spans[2].content, "b");
    }

    #[test]
    fn tiny_and_huge_areas_do_not_panic() {
        let app = create_test_app("a long prompt that has to wrap across several lines of output");
        for area in [Rect::new(0, 0, 5, 3), Rect::new(0, 0, 20, 5), Rect::new(0, 0, 400, 200)] {
            let mut buffer = Buffer::empty(area);
            (&app).render(area, &mut buffer);
            assert_eq!(*buffer.area(), area);
        }
    }

    #[test]
    fn burmese_prompt_renders() {
        let app = create_test_app("မင်္ဂလာပါ");
        let mut buffer = Buffer::empty(Rect::new(0, 0, 40, 10));
        (&app).render(*buffer.area(), &mut buffer);
    }
}
