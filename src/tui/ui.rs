//! UI rendering for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::cli::args::SettingKey;
use crate::cli::Context;
use crate::core::{format_mmss, format_reminder, SystemClock};
use crate::exercises::RULES;
use crate::features::progress::{
    mini_heatmap, month_calendar, render_calendar, render_mini_heatmap, summary,
};
use crate::features::session::{SessionController, SessionStatus};
use crate::output::side_label_key;
use crate::state::{Configuration, Language, Side};
use crate::tui::app::{App, Route, SETTING_FIELDS};

/// Render the application UI.
pub fn render(frame: &mut Frame<'_>, app: &App<'_>) {
    // Create layout: tabs, body, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_tabs(frame, app, chunks[0]);
    match app.route {
        Route::Home => render_home(frame, app, chunks[1]),
        Route::Session => render_session(frame, app, chunks[1]),
        Route::Exercises => render_exercises(frame, app, chunks[1]),
        Route::Settings => render_settings(frame, app, chunks[1]),
        Route::Progress => render_progress(frame, app, chunks[1]),
    }
    render_status_bar(frame, app, chunks[2]);

    if app.notice.is_some() {
        render_notice(frame, app);
    }
}

fn bordered(title: String) -> Block<'static> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
}

/// Render the route tabs.
fn render_tabs(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let tr = &app.ctx.translator;
    let titles: Vec<Line<'_>> = Route::ALL
        .iter()
        .enumerate()
        .map(|(i, route)| Line::from(format!("{} {}", i + 1, tr.t(route.title_key()))))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.route.index())
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .title(format!(" {} ", tr.t("app.title")))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    frame.render_widget(tabs, area);
}

fn render_home(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let tr = &app.ctx.translator;
    let heatmap = mini_heatmap(&app.ctx.store.logs().sessions, Context::today());
    let reminder = app.ctx.store.config().reminder_time.map_or_else(
        || tr.t("home.noReminder"),
        |time| tr.t_with("home.todayReminder", &[("time", format_reminder(time).as_str())]),
    );

    let mut lines = vec![
        Line::from(Span::styled(
            tr.t("home.title"),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(tr.t("home.streak"), Style::default().fg(Color::DarkGray))),
    ];
    lines.extend(
        render_mini_heatmap(&heatmap, &tr.t_list("calendar.weekdays"))
            .lines()
            .map(|l| Line::from(l.to_string())),
    );
    lines.push(Line::from(""));
    lines.push(Line::from(format!("{}: {reminder}", tr.t("home.reminder"))));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("▶ {} (Enter)", tr.t("home.start")),
        Style::default().fg(Color::Green),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        tr.t("home.rules"),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for (idx, rule) in RULES.iter().enumerate() {
        let text = match tr.lang() {
            Language::Cs => rule.cs,
            Language::En => rule.en,
        };
        lines.push(Line::from(format!("{:>2}. {text}", idx + 1)));
    }

    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(bordered(tr.t("nav.home")));
    frame.render_widget(body, area);
}

fn render_session(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let tr = &app.ctx.translator;
    let block = bordered(tr.t("nav.session"));
    let Some(session) = app.session.as_ref() else {
        let loading = Paragraph::new(tr.t("app.loading")).block(block);
        frame.render_widget(loading, area);
        return;
    };

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),    // Segment
            Constraint::Length(3), // Gauge
            Constraint::Length(1), // Keys
        ])
        .split(inner);

    if session.status() == SessionStatus::Completed {
        render_completed(frame, app, session, chunks[0]);
    } else {
        render_segment(frame, app, session, chunks[0]);
    }

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Green))
        .percent(u16::from(session.progress_percent()))
        .label(format!(
            "{}/{}  {}%",
            session.index().min(session.segments().len()),
            session.segments().len(),
            session.progress_percent()
        ));
    frame.render_widget(gauge, chunks[1]);

    let keys = Paragraph::new(tr.t("session.keys")).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(keys, chunks[2]);
}

fn render_segment(
    frame: &mut Frame<'_>,
    app: &App<'_>,
    session: &SessionController<SystemClock>,
    area: Rect,
) {
    let tr = &app.ctx.translator;
    let lang = tr.lang();
    let name = session.current_exercise().map_or("", |e| e.name_in(lang));

    let mut lines = vec![Line::from(Span::styled(
        name.to_string(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))];

    if let Some(segment) = session.current_segment() {
        lines.push(Line::from(tr.t(segment.kind.label_key())));
        if let Some(side) = segment.side {
            lines.push(Line::from(Span::styled(
                tr.t(side_label_key(side)),
                Style::default().fg(Color::Yellow),
            )));
        }
    }

    let run_state = match session.status() {
        SessionStatus::Running => tr.t("session.pause"),
        _ => tr.t("session.start"),
    };
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(
            format_mmss(session.remaining_secs()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("   [space] {run_state}"), Style::default().fg(Color::DarkGray)),
    ]));

    let breath = if app.breath_in() {
        tr.t("session.breathIn")
    } else {
        tr.t("session.breathOut")
    };
    lines.push(Line::from(Span::styled(breath, Style::default().fg(Color::Blue))));

    if let Some(guard) = session.guard() {
        lines.push(Line::from(Span::styled(
            tr.t(guard.message_key()),
            Style::default().fg(Color::Red),
        )));
    }

    if let Some(exercise) = session.current_exercise() {
        lines.push(Line::from(""));
        for cue in exercise.cues_in(lang) {
            lines.push(Line::from(Span::styled(
                format!("• {cue}"),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn render_completed(
    frame: &mut Frame<'_>,
    app: &App<'_>,
    session: &SessionController<SystemClock>,
    area: Rect,
) {
    let tr = &app.ctx.translator;
    let mut lines = vec![
        Line::from(Span::styled(
            tr.t("session.completed"),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(format_mmss(session.total_seconds())),
        Line::from(""),
    ];

    if session.is_saved() {
        lines.push(Line::from(tr.t("session.saved")));
    } else {
        let notes = if session.notes().is_empty() {
            Span::styled(tr.t("session.notesPlaceholder"), Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(format!("{}▏", session.notes()))
        };
        lines.push(Line::from(notes));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("[Enter] {}", tr.t("session.saveNotes")),
            Style::default().fg(Color::Green),
        )));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn render_exercises(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let tr = &app.ctx.translator;
    let lang = tr.lang();
    let block = bordered(tr.t("exercises.title"));

    let Ok(exercises) = app.ctx.catalog.exercises() else {
        frame.render_widget(Paragraph::new(tr.t("app.loading")).block(block), area);
        return;
    };

    let items: Vec<ListItem<'_>> = exercises
        .iter()
        .enumerate()
        .map(|(idx, exercise)| {
            let tag = if exercise.asym {
                Span::styled(tr.t("exercises.asym"), Style::default().fg(Color::Yellow))
            } else {
                Span::styled(tr.t("exercises.sym"), Style::default().fg(Color::Green))
            };
            let mut lines = vec![Line::from(vec![
                Span::raw(format!("{:>2}. ", idx + 1)),
                Span::styled(
                    exercise.name_in(lang).to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                tag,
            ])];
            lines.extend(exercise.cues_in(lang).iter().map(|cue| {
                Line::from(Span::styled(
                    format!("      • {cue}"),
                    Style::default().fg(Color::DarkGray),
                ))
            }));
            ListItem::new(lines)
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn setting_row(app: &App<'_>, key: SettingKey, config: &Configuration) -> (String, String) {
    let tr = &app.ctx.translator;
    let on_off = |value: bool| tr.t(if value { "settings.on" } else { "settings.off" });
    match key {
        SettingKey::Goal => (tr.t("settings.goalLabel"), tr.t(config.goal.label_key())),
        SettingKey::Minutes => (tr.t("settings.minutes"), config.minutes_per_day.to_string()),
        SettingKey::Lang => (tr.t("settings.language"), config.lang.code().to_uppercase()),
        SettingKey::Sound => (tr.t("settings.sound"), on_off(config.sound)),
        SettingKey::Partner => (tr.t("settings.partner"), on_off(config.partner_mode)),
        SettingKey::Reminder => (
            tr.t("settings.reminder"),
            config
                .reminder_time
                .map_or_else(|| "—".to_string(), format_reminder),
        ),
        SettingKey::StartSide => (
            tr.t("settings.startSide"),
            tr.t(match config.start_side {
                Side::Left => "settings.startLeft",
                Side::Right => "settings.startRight",
            }),
        ),
    }
}

fn render_settings(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let tr = &app.ctx.translator;
    let config = app.ctx.store.config();

    let rows: Vec<(String, String)> = SETTING_FIELDS
        .iter()
        .map(|key| setting_row(app, *key, config))
        .collect();
    let width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);

    let mut items: Vec<ListItem<'_>> = rows
        .into_iter()
        .map(|(label, value)| {
            let pad = " ".repeat(width - label.chars().count());
            ListItem::new(Line::from(vec![
                Span::styled(format!("{label}{pad}  "), Style::default().fg(Color::DarkGray)),
                Span::raw(value),
            ]))
        })
        .collect();
    items.push(ListItem::new(Line::from(Span::styled(
        format!("[X] {}", tr.t("settings.reset")),
        Style::default().fg(Color::Red),
    ))));

    let list = List::new(items)
        .block(bordered(tr.t("settings.title")))
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = ListState::default();
    state.select(Some(app.settings_field));

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_progress(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let tr = &app.ctx.translator;
    let sessions = &app.ctx.store.logs().sessions;
    let today = Context::today();
    let block = bordered(tr.t("progress.title"));

    let Some(totals) = summary(sessions, today) else {
        let empty = Paragraph::new(tr.t("progress.empty"))
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    };

    let mut lines = vec![Line::from(Span::styled(
        tr.t("progress.month"),
        Style::default().fg(Color::DarkGray),
    ))];
    lines.extend(
        render_calendar(&month_calendar(sessions, today), &tr.t_list("calendar.weekdays"))
            .lines()
            .map(|l| Line::from(l.to_string())),
    );
    lines.push(Line::from(""));
    lines.push(Line::from(format!(
        "{}: {}",
        tr.t("progress.totalSessions"),
        totals.total_sessions
    )));
    lines.push(Line::from(format!(
        "{}: {}",
        tr.t("progress.avgPerWeek"),
        totals.avg_per_week_display()
    )));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Render the back-off safety notice over the current screen.
fn render_notice(frame: &mut Frame<'_>, app: &App<'_>) {
    let Some(notice) = app.notice else {
        return;
    };
    let tr = &app.ctx.translator;
    let area = centered(frame.area(), 60, 9);

    let body = Paragraph::new(vec![
        Line::from(tr.t(notice.body_key)),
        Line::from(""),
        Line::from(Span::styled(
            format!("[Esc] {}", tr.t("general.close")),
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .wrap(Wrap { trim: true })
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .title(format!(" {} ", tr.t(notice.title_key)))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    );

    frame.render_widget(Clear, area);
    frame.render_widget(body, area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Render the status bar.
fn render_status_bar(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let text = app
        .status
        .clone()
        .unwrap_or_else(|| "1-5: screens | q: quit".to_string());

    let status = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(status, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_fits_inside() {
        let outer = Rect::new(0, 0, 100, 40);
        let inner = centered(outer, 60, 9);
        assert_eq!(inner, Rect::new(20, 15, 60, 9));

        let small = centered(Rect::new(0, 0, 30, 5), 60, 9);
        assert_eq!(small, Rect::new(0, 0, 30, 5));
    }
}
