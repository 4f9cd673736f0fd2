//! Trip and stay table views for the Travelog TUI.
//!
//! Renders bordered [`ratatui::widgets::Table`]s with one row per transport
//! segment or stay interval plus a highlighted totals row at the bottom.

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use travelog_core::formatting;
use travelog_core::models::{StayInterval, TransportSegment};

use crate::themes::Theme;

/// Render the transport-segment table into `area`.
///
/// One row per segment, followed by a totals row carrying the trip count
/// and the kilometre rollup. The `selected` row (if any) is highlighted.
pub fn render_trip_table(
    frame: &mut Frame,
    area: Rect,
    trips: &[TransportSegment],
    total_km: f64,
    selected: Option<usize>,
    theme: &Theme,
) {
    let header_cells = ["Trip", "Mode", "Date", "Distance"]
        .iter()
        .map(|h| Cell::from(*h).style(theme.table_header));
    let header = Row::new(header_cells).height(1);

    let data_rows: Vec<Row> = trips
        .iter()
        .enumerate()
        .map(|(i, trip)| {
            let style = if selected == Some(i) {
                theme.table_selected
            } else if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            Row::new(vec![
                Cell::from(trip.title()),
                Cell::from(trip.kind.clone()).style(theme.mode_style(trip.mode())),
                Cell::from(trip.date_label()),
                Cell::from(formatting::format_km(trip.distance_km.unwrap_or(0.0))),
            ])
            .style(style)
        })
        .collect();

    // Totals row – styled separately to stand out.
    let total_row = Row::new(vec![
        Cell::from("TOTAL").style(theme.table_total),
        Cell::from(format!("{} trips", trips.len())),
        Cell::from(""),
        Cell::from(formatting::format_km(total_km)),
    ])
    .style(theme.table_total);

    let mut all_rows = data_rows;
    all_rows.push(total_row);

    let widths = [
        Constraint::Min(24),
        Constraint::Length(10),
        Constraint::Length(24),
        Constraint::Length(12),
    ];

    let table = Table::new(all_rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(" Trips "),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Render the stay-interval table into `area`.
///
/// One row per stay, followed by a totals row carrying the stay count and
/// the nights rollup.
pub fn render_stay_table(
    frame: &mut Frame,
    area: Rect,
    stays: &[StayInterval],
    total_nights: i64,
    theme: &Theme,
) {
    let header_cells = ["City", "Type", "Dates", "Nights"]
        .iter()
        .map(|h| Cell::from(*h).style(theme.table_header));
    let header = Row::new(header_cells).height(1);

    let data_rows: Vec<Row> = stays
        .iter()
        .enumerate()
        .map(|(i, stay)| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            Row::new(vec![
                Cell::from(stay.city.clone()),
                Cell::from(stay.kind.clone()),
                Cell::from(stay.date_label()),
                Cell::from(formatting::format_nights(stay.nights.unwrap_or(0))),
            ])
            .style(style)
        })
        .collect();

    let total_row = Row::new(vec![
        Cell::from("TOTAL").style(theme.table_total),
        Cell::from(format!("{} stays", stays.len())),
        Cell::from(""),
        Cell::from(formatting::format_nights(total_nights)),
    ])
    .style(theme.table_total);

    let mut all_rows = data_rows;
    all_rows.push(total_row);

    let widths = [
        Constraint::Min(18),
        Constraint::Length(12),
        Constraint::Length(24),
        Constraint::Length(10),
    ];

    let table = Table::new(all_rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(" Stays "),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Render a "no data" placeholder when the feed produced nothing.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No trip records found", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            "Point --data at a trip feed file or place cities.json next to the binary.",
            theme.dim,
        )),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Travelog "),
        ),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────
