//! Detail pane content for the selected message.
//!
//! The payload is decoded here, on every draw, straight from the stored
//! bytes. Sparkplug messages get a metadata header and a metrics table;
//! everything else is shown as pretty JSON or plain text.
//!
//! The header (`meta`) stays pinned; the `body` scrolls.

use chrono::Local;
use ratatui::text::{Line, Span};
use spmon_protocol::{Metric, MetricValue, Payload, decode_payload};
use spmon_timeline::{Category, RawMessage};
use tracing::debug;

use super::format::{clock_time, full_time, hex, metric_value, pad, pretty_json, truncate};
use super::theme::Theme;

/// Width of the metric type column
const TYPE_WIDTH: usize = 10;

/// Rendered detail pane
#[derive(Debug, Default)]
pub struct DetailView {
    pub meta: Vec<Line<'static>>,
    pub body: Vec<Line<'static>>,
}

/// Render the detail of `message` for a pane `width` columns wide
pub fn render_detail(message: Option<&RawMessage>, width: usize, theme: &Theme) -> DetailView {
    let Some(msg) = message else {
        return DetailView {
            meta: Vec::new(),
            body: vec![Line::styled("  No messages yet.", theme.muted_style())],
        };
    };

    match msg.category {
        Category::BinaryProtocol => render_sparkplug(msg, width, theme),
        _ => render_text(msg, width, theme),
    }
}

// =============================================================================
// Sparkplug
// =============================================================================

fn render_sparkplug(msg: &RawMessage, width: usize, theme: &Theme) -> DetailView {
    let mut meta = vec![divider(width, theme)];
    meta.push(field(
        "Topic:    ",
        Span::styled(
            truncate(&msg.topic, width.saturating_sub(14)),
            theme.category_style(msg.category),
        ),
        theme,
    ));

    let (payload, error) = match decode_payload(&msg.payload) {
        Ok(payload) => (payload, None),
        Err(partial) => {
            debug!(topic = %msg.topic, error = %partial.error, "sparkplug decode failed");
            let (payload, error) = partial.into_parts();
            (payload, Some(error))
        }
    };

    if let Some(ts) = &payload.timestamp {
        meta.push(field("Timestamp:", Span::raw(full_time(ts)), theme));
    }
    meta.push(field("Seq:      ", Span::raw(payload.seq.to_string()), theme));
    if !payload.uuid.is_empty() {
        meta.push(field("UUID:     ", Span::raw(payload.uuid.clone()), theme));
    }
    meta.push(field(
        "Size:     ",
        Span::raw(format!("{} bytes", msg.size())),
        theme,
    ));
    if let Some(e) = &error {
        meta.push(Line::styled(
            format!("  Decode error: {e}"),
            theme.error_style(),
        ));
    }
    meta.push(divider(width, theme));

    let mut body = metrics_table(&payload, width, theme);
    if error.is_some() {
        body.push(Line::raw(""));
        body.push(Line::styled(
            format!("  Raw ({} bytes):", msg.size()),
            theme.muted_style(),
        ));
        body.push(Line::styled(
            format!("  {}", hex(&msg.payload)),
            theme.muted_style(),
        ));
    }

    DetailView { meta, body }
}

fn metrics_table(payload: &Payload, width: usize, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::styled(
            format!("  Metrics ({})", payload.metrics.len()),
            theme.header_style(),
        ),
        divider(width, theme),
    ];

    if payload.metrics.is_empty() {
        lines.push(Line::styled("  (no metrics)", theme.muted_style()));
        return lines;
    }

    let name_width = name_column_width(&payload.metrics, width);
    lines.push(Line::from(vec![
        Span::raw("  "),
        Span::styled(pad("Name", name_width), theme.header_style()),
        Span::raw("  "),
        Span::styled(pad("Type", TYPE_WIDTH), theme.header_style()),
        Span::raw("  "),
        Span::styled("Value", theme.header_style()),
    ]));
    lines.push(divider(width, theme));

    for metric in &payload.metrics {
        let mut spans = vec![
            Span::raw("  "),
            Span::styled(
                pad(&truncate(&metric.display_name(), name_width), name_width),
                theme.category_style(Category::BinaryProtocol),
            ),
            Span::raw("  "),
            Span::styled(pad(&metric.data_type.to_string(), TYPE_WIDTH), theme.muted_style()),
            Span::raw("  "),
            value_span(metric, theme),
        ];
        if let Some(ts) = metric.timestamp
            && Some(ts) != payload.timestamp
        {
            spans.push(Span::styled(
                format!("  @ {}", clock_time(&ts.with_timezone(&Local))),
                theme.muted_style(),
            ));
        }
        lines.push(Line::from(spans));
    }

    lines
}

/// Longest metric name, capped so the table still fits the pane
fn name_column_width(metrics: &[Metric], width: usize) -> usize {
    let min = "Name".len();
    let longest = metrics
        .iter()
        .map(|m| m.display_name().chars().count())
        .max()
        .unwrap_or(0)
        .max(min);
    let cap = width.saturating_sub(TYPE_WIDTH + 20).max(min);
    longest.min(cap)
}

fn value_span(metric: &Metric, theme: &Theme) -> Span<'static> {
    let text = metric_value(metric);
    let style = match (&metric.value, metric.is_null) {
        (_, true) | (MetricValue::None, _) => theme.muted_style(),
        (MetricValue::Bool(true), _) => theme.success_style(),
        (MetricValue::Bool(false), _) => theme.muted_style(),
        _ => Default::default(),
    };
    Span::styled(text, style)
}

// =============================================================================
// Other topics
// =============================================================================

fn render_text(msg: &RawMessage, width: usize, theme: &Theme) -> DetailView {
    let meta = vec![
        divider(width, theme),
        field(
            "Topic:   ",
            Span::styled(
                truncate(&msg.topic, width.saturating_sub(14)),
                theme.category_style(msg.category),
            ),
            theme,
        ),
        field("Received:", Span::raw(full_time(&msg.received_at)), theme),
        field("Size:    ", Span::raw(format!("{} bytes", msg.size())), theme),
        divider(width, theme),
    ];

    let body = match pretty_json(&msg.payload) {
        Some(pretty) => pretty.lines().map(|l| json_line(l, theme)).collect(),
        None => String::from_utf8_lossy(&msg.payload)
            .lines()
            .map(|l| Line::raw(format!("  {l}")))
            .collect(),
    };

    DetailView { meta, body }
}

/// Indent one pretty-printed JSON line and highlight its key
fn json_line(line: &str, theme: &Theme) -> Line<'static> {
    let trimmed = line.trim_start_matches(' ');
    let indent = &line[..line.len() - trimmed.len()];

    if trimmed.starts_with('"')
        && let Some(idx) = trimmed.find("\": ")
    {
        return Line::from(vec![
            Span::raw(format!("  {indent}")),
            Span::styled(trimmed[..=idx].to_string(), theme.header_style()),
            Span::raw(trimmed[idx + 1..].to_string()),
        ]);
    }

    Line::raw(format!("  {line}"))
}

// =============================================================================
// Shared pieces
// =============================================================================

fn divider(width: usize, theme: &Theme) -> Line<'static> {
    Line::styled("─".repeat(width), theme.muted_style())
}

fn field(label: &'static str, value: Span<'static>, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(label, theme.header_style()),
        Span::raw("  "),
        value,
    ])
}

#[cfg(test)]
#[path = "detail_test.rs"]
mod tests;
