//! Foreground content layered over the backdrop: a condition badge and
//! a key-hint line.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::Paragraph,
};

use crate::app::state::AppState;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    render_condition_badge(frame, area, state);
    render_key_hints(frame, area);
}

fn render_condition_badge(frame: &mut Frame, area: Rect, state: &AppState) {
    let scheme = if state.dark_mode { "dark" } else { "light" };
    let phase = if state.last_icon.is_night() {
        "night"
    } else {
        "day"
    };
    let text = format!(
        " {} · {} · {} · {} ",
        state.condition.label(),
        state.last_icon,
        phase,
        scheme
    );

    let width = (text.chars().count() as u16).min(area.width);
    let badge_area = Rect {
        x: area.right().saturating_sub(width + 1),
        y: area.y,
        width,
        height: 1,
    };
    let badge = Paragraph::new(Line::from(text)).style(
        Style::default()
            .fg(Color::White)
            .bg(Color::Black)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(badge, badge_area);
}

fn render_key_hints(frame: &mut Frame, area: Rect) {
    let text = " 1-6 weather · n day/night · d scheme · q quit ";
    let width = (text.chars().count() as u16).min(area.width);
    let hint_area = Rect {
        x: area.x,
        y: area.bottom().saturating_sub(1),
        width,
        height: 1,
    };
    let hints =
        Paragraph::new(Line::from(text)).style(Style::default().fg(Color::Gray).bg(Color::Black));
    frame.render_widget(hints, hint_area);
}
