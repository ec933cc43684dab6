//! UI rendering

use super::app::{App, Focus};
use crate::bar::{bar_width_fraction, days_label};
use crate::catalog::VehicleRecord;
use crate::clipboard::ClipboardWriter;
use crate::state::View;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap},
};

const ACCENT: Color = Color::Rgb(26, 188, 156);
const COPIED: Color = Color::Rgb(39, 174, 96);
const ERROR: Color = Color::Rgb(231, 76, 60);

/// Sample rows shown at once; longer lists scroll with the selection.
const MAX_SAMPLE_ROWS: u16 = 6;

/// Colors for one theme.
struct Palette {
    fg: Color,
    bg: Color,
    muted: Color,
}

impl Palette {
    fn for_mode(dark_mode: bool) -> Self {
        if dark_mode {
            Self {
                fg: Color::Rgb(230, 230, 230),
                bg: Color::Rgb(30, 30, 30),
                muted: Color::Rgb(150, 150, 150),
            }
        } else {
            Self {
                fg: Color::Rgb(34, 34, 34),
                bg: Color::Rgb(249, 249, 249),
                muted: Color::Rgb(119, 119, 119),
            }
        }
    }

    fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    fn muted(&self) -> Style {
        Style::default().fg(self.muted).bg(self.bg)
    }
}

/// Render the entire UI
pub fn render<C: ClipboardWriter>(frame: &mut Frame, app: &App<'_, C>) {
    let state = app.presentation.state();
    let palette = Palette::for_mode(state.dark_mode());
    frame.render_widget(Block::default().style(palette.base()), frame.area());

    let header_height = if app.presentation.options().show_blurb { 2 } else { 1 };
    let sample_rows = u16::try_from(app.presentation.store().len())
        .unwrap_or(u16::MAX)
        .min(MAX_SAMPLE_ROWS);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header_height),
            Constraint::Length(3), // VIN input
            Constraint::Length(sample_rows + 2),
            Constraint::Length(1), // error line
            Constraint::Min(8),    // vehicle details
            Constraint::Length(1), // shortcuts
        ])
        .split(frame.area());

    render_header(frame, app, &palette, chunks[0]);
    render_search_input(frame, app, &palette, chunks[1]);
    render_samples(frame, app, &palette, chunks[2]);
    render_error_line(frame, state.error_message(), &palette, chunks[3]);
    if let View::Showing(record) = state.view() {
        let max = app.presentation.store().max_dwell_days();
        render_details(frame, record, max, &palette, chunks[4]);
    }
    render_status_bar(frame, &palette, chunks[5]);

    if let Some(message) = &app.alert.message {
        render_alert(frame, message, &palette);
    }
}

fn render_header<C: ClipboardWriter>(
    frame: &mut Frame,
    app: &App<'_, C>,
    palette: &Palette,
    area: Rect,
) {
    let mut lines = vec![Line::from(Span::styled(
        "Fahrzeugsuche",
        palette.base().add_modifier(Modifier::BOLD),
    ))];
    if app.presentation.options().show_blurb {
        lines.push(Line::from(Span::styled(
            "Fahrzeugdetails per VIN-Suche & Standzeit-Visualisierung",
            palette.muted().add_modifier(Modifier::ITALIC),
        )));
    }
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(palette.base()),
        area,
    );
}

fn render_search_input<C: ClipboardWriter>(
    frame: &mut Frame,
    app: &App<'_, C>,
    palette: &Palette,
    area: Rect,
) {
    let border = if app.focus == Focus::Search {
        Style::default().fg(ACCENT)
    } else {
        palette.muted()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(" VIN eingeben ");

    let width = usize::from(area.width.saturating_sub(2));
    let (visible, cursor_col) = visible_input(&app.input.text, app.input.cursor, width);
    let content = if app.input.text.is_empty() {
        Span::styled("z.B. 1HGCM82633A004352", palette.muted())
    } else {
        Span::styled(visible, palette.base())
    };
    frame.render_widget(
        Paragraph::new(Line::from(content))
            .block(block)
            .style(palette.base()),
        area,
    );

    if app.focus == Focus::Search && !app.alert.is_open() {
        let cursor_col = u16::try_from(cursor_col).unwrap_or(u16::MAX);
        let x = area
            .x
            .saturating_add(1)
            .saturating_add(cursor_col)
            .min(area.right().saturating_sub(2));
        frame.set_cursor_position((x, area.y + 1));
    }
}

/// Tail of `text` that fits in `width` cells with the cursor still visible,
/// and the cursor's column within it.
fn visible_input(text: &str, cursor: usize, width: usize) -> (&str, usize) {
    let cursor_col = text[..cursor].chars().count();
    // one cell stays free for the cursor after the last character
    let skip = (cursor_col + 1).saturating_sub(width);
    let start = text
        .char_indices()
        .nth(skip)
        .map_or(text.len(), |(i, _)| i);
    (&text[start..], cursor_col - skip.min(cursor_col))
}

fn render_samples<C: ClipboardWriter>(
    frame: &mut Frame,
    app: &App<'_, C>,
    palette: &Palette,
    area: Rect,
) {
    let state = app.presentation.state();
    let border = if app.focus == Focus::Samples {
        Style::default().fg(ACCENT)
    } else {
        palette.muted()
    };

    let rows = usize::from(area.height.saturating_sub(2)).max(1);
    let offset = app.selected_sample.saturating_sub(rows - 1);

    let lines: Vec<Line> = app
        .presentation
        .store()
        .iter()
        .enumerate()
        .skip(offset)
        .take(rows)
        .map(|(i, record)| {
            let selected = app.focus == Focus::Samples && i == app.selected_sample;
            let marker = if selected { "▶ " } else { "  " };
            let button = if state.is_copied(&record.identifier) {
                Span::styled(
                    "[Kopiert]",
                    Style::default().fg(COPIED).add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled("[Kopieren]", Style::default().fg(ACCENT))
            };
            Line::from(vec![
                Span::styled(marker, Style::default().fg(ACCENT)),
                Span::styled(
                    record.identifier.as_str(),
                    palette.base().add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!(" - {}  ", record.model), palette.base()),
                button,
            ])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(" Beispiel-VINs zum Testen ");
    frame.render_widget(
        Paragraph::new(lines).block(block).style(palette.base()),
        area,
    );
}

fn render_error_line(frame: &mut Frame, message: Option<&str>, palette: &Palette, area: Rect) {
    let Some(message) = message else {
        return;
    };
    frame.render_widget(
        Paragraph::new(Span::styled(
            message,
            Style::default()
                .fg(ERROR)
                .bg(palette.bg)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        area,
    );
}

fn render_details(
    frame: &mut Frame,
    record: &VehicleRecord,
    max_dwell_days: u32,
    palette: &Palette,
    area: Rect,
) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(ACCENT))
        .title(" Fahrzeugdetails ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // attributes
            Constraint::Length(1),
            Constraint::Length(1), // bar heading
            Constraint::Length(1), // bar
            Constraint::Min(0),
        ])
        .split(inner);

    let label = palette.base().add_modifier(Modifier::BOLD);
    let attributes = vec![
        Line::from(vec![
            Span::styled("Modell:  ", label),
            Span::styled(record.model.as_str(), palette.base()),
        ]),
        Line::from(vec![
            Span::styled("Baujahr: ", label),
            Span::styled(record.year.to_string(), palette.base()),
        ]),
        Line::from(vec![
            Span::styled("Preis:   ", label),
            Span::styled(record.formatted_price(), palette.base()),
        ]),
    ];
    frame.render_widget(Paragraph::new(attributes).style(palette.base()), rows[0]);

    frame.render_widget(
        Paragraph::new(Span::styled(format!("Standzeit (Tage): {}", record.model), label)),
        rows[2],
    );
    frame.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(ACCENT).bg(palette.bg))
            .ratio(bar_width_fraction(record.dwell_days, max_dwell_days))
            .label(days_label(record.dwell_days)),
        rows[3],
    );
}

fn render_status_bar(frame: &mut Frame, palette: &Palette, area: Rect) {
    let key = Style::default().fg(ACCENT).bg(palette.bg);
    let text = palette.muted();
    let line = Line::from(vec![
        Span::styled("Enter", key),
        Span::styled(" Suchen/Kopieren  ", text),
        Span::styled("Tab", key),
        Span::styled(" Beispiel-VINs  ", text),
        Span::styled("Ctrl+T", key),
        Span::styled(" Hell/Dunkel  ", text),
        Span::styled("Esc", key),
        Span::styled(" Beenden", text),
    ]);
    frame.render_widget(Paragraph::new(line).style(palette.base()), area);
}

fn render_alert(frame: &mut Frame, message: &str, palette: &Palette) {
    let area = centered_rect(50, 7, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ERROR))
        .title(" Hinweis ")
        .style(palette.base());
    let body = vec![
        Line::from(Span::styled(message, palette.base())),
        Line::from(""),
        Line::from(Span::styled("Enter/Esc: OK", palette.muted())),
    ];
    frame.render_widget(
        Paragraph::new(body)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
