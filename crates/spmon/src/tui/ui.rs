//! UI rendering for the TUI.
//!
//! ```text
//! spmon  ● Connected  localhost:1883  42 msgs
//! ┌Messages [follow]──────┐┌Detail─────────────────────┐
//! │◆ 12:00:01.250 spBv… 1k││ Topic: …                  │
//! │● 12:00:01.300 te/…  9 B││ Metrics (3)               │
//! └───────────────────────┘└───────────────────────────┘
//!   ↑/↓  select    …    q  quit
//! ```

use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use spmon_timeline::RawMessage;

use super::detail::render_detail;
use super::format::{clock_time, format_size, truncate};
use super::state::Monitor;
use super::theme::{Theme, category_icon};

const HELP: &str = "  ↑/↓  select    scroll wheel / PgUp/PgDn  detail    g/G  top/bottom    c  clear    R  rebirth    q  quit";

/// Share of the width given to the message list
const LIST_PERCENT: u16 = 36;

/// Columns of a list row besides the topic: icon, time, size and separators
const ROW_FIXED_WIDTH: usize = 1 + 1 + 12 + 1 + 1 + 5;

/// Draw the whole screen
pub fn draw(frame: &mut Frame, monitor: &mut Monitor, theme: &Theme) {
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let [list_area, detail_area] = Layout::horizontal([
        Constraint::Percentage(LIST_PERCENT),
        Constraint::Min(20),
    ])
    .areas(body_area);

    frame.render_widget(Paragraph::new(header_line(monitor, theme)), header_area);
    draw_list(frame, list_area, monitor, theme);
    draw_detail(frame, detail_area, monitor, theme);
    frame.render_widget(Paragraph::new(footer_line(monitor, theme)), footer_area);
}

fn header_line(monitor: &Monitor, theme: &Theme) -> Line<'static> {
    let mut spans = vec![Span::styled("spmon", theme.header_style()), Span::raw("  ")];

    if monitor.connected {
        spans.push(Span::styled("● Connected  ", theme.success_style()));
        spans.push(Span::styled(monitor.broker.clone(), theme.muted_style()));
    } else {
        spans.push(Span::styled("○ Connecting…", theme.muted_style()));
    }

    if !monitor.timeline.is_empty() {
        spans.push(Span::styled(
            format!("  {} msgs", monitor.timeline.len()),
            theme.muted_style(),
        ));
    }

    Line::from(spans)
}

fn footer_line(monitor: &Monitor, theme: &Theme) -> Line<'static> {
    match monitor.status.text() {
        Some(text) if text.starts_with('✗') => {
            Line::styled(format!("  {text}"), theme.error_style())
        }
        Some(text) => Line::styled(format!("  {text}"), theme.success_style()),
        None => Line::styled(HELP, theme.muted_style()),
    }
}

// =============================================================================
// Message list
// =============================================================================

fn draw_list(frame: &mut Frame, area: Rect, monitor: &mut Monitor, theme: &Theme) {
    // Size the window first so the title reflects this frame's scroll
    let block = Block::bordered().border_style(theme.border_style());
    let inner = block.inner(area);
    monitor.timeline.set_window_height(usize::from(inner.height));

    let mut title = vec![Span::styled("Messages", theme.header_style())];
    if monitor.timeline.is_following() {
        title.push(Span::styled(" [follow]", theme.muted_style()));
    }
    let above = monitor.timeline.offset();
    if above > 0 {
        title.push(Span::styled(format!(" ↑{above}"), theme.muted_style()));
    }
    frame.render_widget(block.title(Line::from(title)), area);

    let width = usize::from(inner.width);
    let selected = monitor.timeline.selected_index();
    let rows: Vec<Line> = monitor
        .timeline
        .visible()
        .map(|(index, msg)| list_row(msg, width, index == selected, theme))
        .collect();

    frame.render_widget(Paragraph::new(rows), inner);
}

fn list_row(msg: &RawMessage, width: usize, selected: bool, theme: &Theme) -> Line<'static> {
    let topic_width = width.saturating_sub(ROW_FIXED_WIDTH);
    let topic = truncate(&msg.topic, topic_width);
    let topic = format!("{topic:<topic_width$}");
    let icon = category_icon(msg.category);
    let time = clock_time(&msg.received_at.with_timezone(&Local));
    let size = format_size(msg.size());

    if selected {
        // One span so the highlight covers the whole row
        let plain = format!("{icon} {time} {topic} {size}");
        return Line::from(Span::styled(format!("{plain:<width$}"), theme.selected_style()));
    }

    let style = theme.category_style(msg.category);
    Line::from(vec![
        Span::styled(icon, style),
        Span::raw(" "),
        Span::styled(time, theme.muted_style()),
        Span::raw(" "),
        Span::styled(topic, style),
        Span::raw(" "),
        Span::styled(size, theme.muted_style()),
    ])
}

// =============================================================================
// Detail pane
// =============================================================================

fn draw_detail(frame: &mut Frame, area: Rect, monitor: &mut Monitor, theme: &Theme) {
    let block = Block::bordered()
        .border_style(theme.border_style())
        .title(Span::styled("Detail", theme.header_style()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let view = render_detail(
        monitor.timeline.selected(),
        usize::from(inner.width),
        theme,
    );

    let meta_height = u16::try_from(view.meta.len()).unwrap_or(u16::MAX);
    let [meta_area, body_area] =
        Layout::vertical([Constraint::Length(meta_height), Constraint::Min(1)]).areas(inner);

    // Pull back scrolls past the end of the body
    monitor.detail_height = body_area.height.max(1);
    let body_len = u16::try_from(view.body.len()).unwrap_or(u16::MAX);
    let max_scroll = body_len.saturating_sub(body_area.height);
    monitor.detail_scroll = monitor.detail_scroll.min(max_scroll);

    frame.render_widget(Paragraph::new(view.meta), meta_area);
    frame.render_widget(
        Paragraph::new(view.body).scroll((monitor.detail_scroll, 0)),
        body_area,
    );
}

#[cfg(test)]
#[path = "ui_test.rs"]
mod tests;
