//! UI rendering

use pomo::Mode;
use pomo_core::format;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, SettingsField, SettingsForm, View};

/// Frame color per mode
fn mode_color(mode: Mode) -> Color {
    match mode {
        Mode::Focus => Color::Red,
        Mode::ShortBreak => Color::Green,
        Mode::LongBreak => Color::Blue,
    }
}

/// Main draw function
pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Footer
        ])
        .split(f.area());

    draw_header(f, app, chunks[0]);

    match &app.view {
        View::Timer => draw_timer_view(f, app, chunks[1]),
        View::Settings(form) => draw_settings(f, form, chunks[1]),
    }

    draw_footer(f, app, chunks[2]);

    if app.show_help {
        draw_help_overlay(f);
    }
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let color = mode_color(app.snapshot.mode);

    let mut spans = vec![
        Span::styled(" Pomo ", Style::default().fg(color).bold()),
        Span::raw(" "),
    ];

    for (idx, mode) in Mode::ALL.iter().enumerate() {
        let style = if *mode == app.snapshot.mode {
            Style::default().fg(Color::White).bg(Color::DarkGray).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} {} ", idx + 1, mode.label()), style));
        spans.push(Span::raw(" "));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );

    f.render_widget(header, area);
}

fn draw_timer_view(f: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(11), Constraint::Min(0)])
        .split(area);

    draw_timer_card(f, app, rows[0]);
    draw_events_panel(f, app, rows[1]);
}

fn draw_timer_card(f: &mut Frame, app: &App, area: Rect) {
    let snapshot = &app.snapshot;
    let color = mode_color(snapshot.mode);

    let (status, status_color) = if snapshot.is_running {
        ("RUNNING", Color::Green)
    } else {
        ("PAUSED", Color::Yellow)
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            snapshot.clock.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(status, Style::default().fg(status_color).bold())),
        Line::from(vec![
            Span::styled("Sessions: ", Style::default().fg(Color::Cyan)),
            Span::raw(format!(
                "{}/{}",
                snapshot.completed_focus_count, snapshot.settings.long_break_interval
            )),
        ]),
    ];

    if let Some(ends_at) = app.ends_at() {
        lines.push(Line::from(vec![
            Span::styled("Ends at: ", Style::default().fg(Color::Cyan)),
            Span::raw(format::time(ends_at)),
        ]));
    }

    let action = if snapshot.is_running { "[ PAUSE ]" } else { "[ START ]" };
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(action, Style::default().fg(color).bold())));

    let card = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(format!(" {} ", snapshot.label))
            .title_style(Style::default().fg(color).bold())
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );

    f.render_widget(card, area);
}

fn draw_events_panel(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<Line> = app
        .events
        .iter()
        .rev()
        .take(area.height.saturating_sub(2) as usize)
        .map(|e| {
            Line::from(vec![
                Span::styled(
                    format!("{} ", e.timestamp.format("%H:%M:%S")),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(e.message.as_str()),
            ])
        })
        .collect();

    let block = Block::default()
        .title(" Event Log ")
        .title_style(Style::default().fg(Color::Yellow).bold())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::LightYellow));

    let paragraph = Paragraph::new(items).block(block).wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn draw_settings(f: &mut Frame, form: &SettingsForm, area: Rect) {
    let lines: Vec<Line> = SettingsField::ALL
        .iter()
        .map(|field| {
            let selected = *field == form.selected;
            let marker = if selected { "> " } else { "  " };
            let label_style = if selected {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default()
            };
            let value_style = if field.is_toggle() {
                Style::default().fg(Color::Magenta)
            } else {
                Style::default().fg(Color::Cyan)
            };

            Line::from(vec![
                Span::styled(marker, label_style),
                Span::styled(format!("{:<22}", field.label()), label_style),
                Span::styled(form.value(*field), value_style),
            ])
        })
        .collect();

    let width = 40.min(area.width);
    let height = (SettingsField::ALL.len() as u16 + 2).min(area.height);
    let popup = Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    );

    let form_block = Paragraph::new(lines).block(
        Block::default()
            .title(" Settings ")
            .title_style(Style::default().fg(Color::Yellow).bold())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );

    f.render_widget(form_block, popup);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Cyan).bold());

    let help = match app.view {
        View::Settings(_) => Line::from(vec![
            key(" Up/Dn"),
            Span::raw(" field  "),
            key("Left/Right"),
            Span::raw(" adjust  "),
            key("0-9"),
            Span::raw(" type  "),
            key("Space"),
            Span::raw(" flip  "),
            key("Enter"),
            Span::raw(" save  "),
            key("Esc"),
            Span::raw(" back"),
        ]),
        View::Timer => {
            let toggle = if app.snapshot.is_running { " pause  " } else { " start  " };
            let mut spans = vec![
                key(" q"),
                Span::raw(" quit  "),
                key("1/2/3"),
                Span::raw(" mode  "),
                key("Space"),
                Span::raw(toggle),
            ];
            if app.snapshot.is_running {
                spans.push(key("n"));
                spans.push(Span::raw(" skip  "));
            }
            spans.extend([
                key("s"),
                Span::raw(" settings  "),
                key("?"),
                Span::raw(" help"),
            ]);
            Line::from(spans)
        }
    };

    let footer = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    f.render_widget(footer, area);
}

fn draw_help_overlay(f: &mut Frame) {
    let area = f.area();

    let popup_width = 44.min(area.width);
    let popup_height = 14.min(area.height);
    let x = (area.width.saturating_sub(popup_width)) / 2;
    let y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(x, y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);

    let entry = |keys: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(keys, Style::default().fg(Color::Cyan)),
            Span::raw(what),
        ])
    };

    let help_text = vec![
        Line::from(""),
        entry("  1 / 2 / 3   ", "Pomodoro / Short / Long"),
        entry("  Space/Enter ", "Start or pause"),
        entry("  n           ", "Skip to next stage"),
        entry("  s           ", "Open settings"),
        entry("  q / Esc     ", "Quit"),
        Line::from(""),
        entry("  Enter       ", "Save settings"),
        entry("  Esc         ", "Leave settings unsaved"),
        Line::from(""),
        Line::from(Span::styled(
            "Press ? to close",
            Style::default().fg(Color::DarkGray),
        ))
        .centered(),
    ];

    let help_popup = Paragraph::new(help_text).block(
        Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(Style::default().fg(Color::Yellow).bold())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );

    f.render_widget(help_popup, popup_area);
}
