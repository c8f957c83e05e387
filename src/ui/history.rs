use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::app::App;
use crate::corpus::Category;
use crate::result::SessionResult;
use crate::storage::Storage;
use crate::store::{SortKey, SortOrder};

pub fn wpm_color(wpm: u32) -> Color {
    if wpm >= 60 {
        Color::Green
    } else if wpm >= 40 {
        Color::Yellow
    } else {
        Color::Red
    }
}

pub fn accuracy_color(accuracy: u32) -> Color {
    if accuracy >= 95 {
        Color::Green
    } else if accuracy >= 85 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Display name for a result's category label; unknown labels pass through.
pub fn category_label(id: &str) -> String {
    Category::from_id(id)
        .map(|c| c.info().display_name.to_string())
        .unwrap_or_else(|| id.to_string())
}

pub fn present_row(result: &SessionResult) -> Row<'static> {
    let date = result
        .completed_at
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string();

    Row::new(vec![
        Cell::from(date),
        Cell::from(result.wpm.to_string()).style(
            Style::default()
                .fg(wpm_color(result.wpm))
                .add_modifier(Modifier::BOLD),
        ),
        Cell::from(format!("{}%", result.accuracy)).style(Style::default().fg(accuracy_color(result.accuracy))),
        Cell::from(format!("{}s", result.elapsed_seconds)),
        Cell::from(result.error_count.to_string()),
        Cell::from(category_label(&result.category)),
    ])
}

fn sort_arrow(order: SortOrder) -> &'static str {
    match order {
        SortOrder::Asc => "↑",
        SortOrder::Desc => "↓",
    }
}

/// Render the result history screen
pub fn render_history<S: Storage>(app: &App<S>, f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    let view = &app.history;
    let arrow = sort_arrow(view.sort_order);
    let agg = app.store.aggregates();

    let title = Paragraph::new(format!(
        "{} tests   avg {} wpm / {}%   best {} wpm / {}%   (sort: {} {arrow})",
        agg.count, agg.average_wpm, agg.average_accuracy, agg.best_wpm, agg.best_accuracy, view.sort_key
    ))
    .block(Block::default().borders(Borders::ALL).title("History"))
    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    if app.store.is_empty() {
        let empty = Paragraph::new("No results yet. Finish a test to start your history.")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(empty, chunks[1]);
    } else {
        let indicator = |key: SortKey| if view.sort_key == key { arrow } else { "" };
        let header = Row::new(vec![
            Cell::from(format!("Date {}", indicator(SortKey::Date))),
            Cell::from(format!("WPM {}", indicator(SortKey::Wpm))),
            Cell::from(format!("Accuracy {}", indicator(SortKey::Accuracy))),
            Cell::from("Time"),
            Cell::from("Errors"),
            Cell::from("Text"),
        ])
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

        let table_height = chunks[1].height.saturating_sub(3) as usize;
        let rows: Vec<Row> = app
            .store
            .sorted(view.sort_key, view.sort_order)
            .into_iter()
            .skip(view.scroll_offset)
            .take(table_height)
            .map(present_row)
            .collect();

        let widths = [
            Constraint::Length(17),
            Constraint::Length(6),
            Constraint::Length(11),
            Constraint::Length(6),
            Constraint::Length(7),
            Constraint::Min(10),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL))
            .column_spacing(2);
        f.render_widget(table, chunks[1]);
    }

    let instructions = Paragraph::new(
        "(↑/↓) scroll  (1) date (2) wpm (3) accuracy  (space) order  (c) clear  (b) back  (n) new",
    )
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    f.render_widget(instructions, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colour_bands() {
        assert_eq!(wpm_color(60), Color::Green);
        assert_eq!(wpm_color(59), Color::Yellow);
        assert_eq!(wpm_color(40), Color::Yellow);
        assert_eq!(wpm_color(39), Color::Red);
        assert_eq!(accuracy_color(95), Color::Green);
        assert_eq!(accuracy_color(85), Color::Yellow);
        assert_eq!(accuracy_color(84), Color::Red);
    }

    #[test]
    fn category_labels() {
        assert_eq!(category_label("mixed-case"), "Mixed Case");
        assert_eq!(category_label("custom"), "custom");
    }
}
