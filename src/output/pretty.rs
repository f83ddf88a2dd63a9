use chrono::NaiveTime;
use colored::Colorize;

use crate::core::{format_mmss, format_reminder};
use crate::exercises::{Exercise, Rule};
use crate::features::progress::{
    render_calendar, render_mini_heatmap, render_summary_box, HeatmapDay, MonthCalendar,
    ProgressSummary,
};
use crate::features::session::{Segment, SegmentKind};
use crate::i18n::Translator;
use crate::state::{Configuration, Side};

/// Translation key for a side label.
#[must_use]
pub const fn side_label_key(side: Side) -> &'static str {
    match side {
        Side::Left => "session.sideLeft",
        Side::Right => "session.sideRight",
    }
}

/// Segment label such as "Phase A · Left side".
#[must_use]
pub fn segment_label(tr: &Translator, segment: &Segment) -> String {
    let kind = tr.t(segment.kind.label_key());
    match segment.side {
        Some(side) => format!("{kind} · {}", tr.t(side_label_key(side))),
        None => kind,
    }
}

fn on_off(tr: &Translator, value: bool) -> String {
    tr.t(if value { "settings.on" } else { "settings.off" })
}

fn reminder_line(tr: &Translator, reminder: Option<NaiveTime>) -> String {
    reminder.map_or_else(
        || tr.t("home.noReminder"),
        |time| tr.t_with("home.todayReminder", &[("time", format_reminder(time).as_str())]),
    )
}

/// Format the home summary.
#[must_use]
pub fn format_home_pretty(
    tr: &Translator,
    heatmap: &[HeatmapDay],
    reminder: Option<NaiveTime>,
) -> String {
    let mut output = format!("{}\n", tr.t("home.title").bold());
    output.push_str(&"─".repeat(48));
    output.push('\n');
    output.push_str(&format!("{}\n", tr.t("home.streak").dimmed()));
    output.push_str(&render_mini_heatmap(heatmap, &tr.t_list("calendar.weekdays")));
    output.push_str("\n\n");
    output.push_str(&format!(
        "{}: {}\n",
        tr.t("home.reminder").bold(),
        reminder_line(tr, reminder)
    ));
    output
}

/// Format planned segments as a numbered list.
#[must_use]
pub fn format_plan_pretty(tr: &Translator, segments: &[Segment], exercises: &[Exercise]) -> String {
    let total: u64 = segments.iter().map(|s| s.seconds).sum();
    let mut output = format!(
        "{} ({})\n",
        tr.t("plan.title").bold(),
        tr.t_with(
            "plan.segments",
            &[
                ("count", segments.len().to_string().as_str()),
                ("total", format_mmss(total).as_str()),
            ]
        )
    );
    output.push_str(&"─".repeat(60));
    output.push('\n');

    let mut offset = 0;
    for (idx, segment) in segments.iter().enumerate() {
        let name = exercises
            .iter()
            .find(|e| e.id == segment.exercise_id)
            .map_or("?", |e| e.name_in(tr.lang()));
        let label = segment_label(tr, segment);
        let label = match segment.kind {
            SegmentKind::Transition => label.dimmed(),
            SegmentKind::SideSwitch => label.yellow(),
            SegmentKind::Phase(_) => label.normal(),
        };
        output.push_str(&format!(
            "{:>3}  {}  {:>3}s  {}  {}\n",
            idx + 1,
            format_mmss(offset).dimmed(),
            segment.seconds,
            label,
            name.cyan()
        ));
        offset += segment.seconds;
    }

    output
}

/// Format the exercise list.
#[must_use]
pub fn format_exercises_pretty(tr: &Translator, exercises: &[Exercise]) -> String {
    let lang = tr.lang();
    let mut output = format!("{} ({})\n", tr.t("exercises.title").bold(), exercises.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for (idx, exercise) in exercises.iter().enumerate() {
        let tag = if exercise.asym {
            tr.t("exercises.asym").yellow()
        } else {
            tr.t("exercises.sym").green()
        };
        output.push_str(&format!(
            "{:>2}. {}  {}\n",
            idx + 1,
            exercise.name_in(lang).bold(),
            tag
        ));
        for cue in exercise.cues_in(lang) {
            output.push_str(&format!("      • {cue}\n"));
        }
    }

    output
}

/// Format the current preferences.
#[must_use]
pub fn format_settings_pretty(tr: &Translator, config: &Configuration) -> String {
    let start_side = match config.start_side {
        Side::Left => tr.t("settings.startLeft"),
        Side::Right => tr.t("settings.startRight"),
    };
    let reminder = config
        .reminder_time
        .map_or_else(|| "—".to_string(), format_reminder);

    let rows = [
        (tr.t("settings.goalLabel"), tr.t(config.goal.label_key())),
        (tr.t("settings.minutes"), config.minutes_per_day.to_string()),
        (tr.t("settings.language"), config.lang.code().to_uppercase()),
        (tr.t("settings.sound"), on_off(tr, config.sound)),
        (tr.t("settings.partner"), on_off(tr, config.partner_mode)),
        (tr.t("settings.reminder"), reminder),
        (tr.t("settings.startSide"), start_side),
    ];

    let width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let mut output = format!("{}\n", tr.t("settings.title").bold());
    output.push_str(&"─".repeat(48));
    output.push('\n');
    for (label, value) in rows {
        let pad = " ".repeat(width - label.chars().count());
        output.push_str(&format!("  {}{pad}  {}\n", label.dimmed(), value));
    }
    output
}

/// Format the progress screen.
#[must_use]
pub fn format_progress_pretty(
    tr: &Translator,
    summary: Option<&ProgressSummary>,
    calendar: &MonthCalendar,
) -> String {
    let mut output = format!("{}\n", tr.t("progress.title").bold());
    output.push_str(&"─".repeat(48));
    output.push('\n');

    let Some(summary) = summary else {
        output.push_str(&format!("  {}\n", tr.t("progress.empty").dimmed()));
        return output;
    };

    output.push_str(&format!("{}\n", tr.t("progress.month").dimmed()));
    output.push_str(&render_calendar(calendar, &tr.t_list("calendar.weekdays")));
    output.push_str("\n\n");
    output.push_str(&render_summary_box(
        &tr.t("progress.title"),
        &[
            (
                tr.t("progress.totalSessions"),
                summary.total_sessions.to_string(),
            ),
            (tr.t("progress.avgPerWeek"), summary.avg_per_week_display()),
        ],
    ));
    output.push('\n');
    output
}

/// Format the rules, Czech over English.
#[must_use]
pub fn format_rules_pretty(rules: &[Rule]) -> String {
    let mut output = format!("{}\n", "Pravidla / Rules".bold());
    output.push_str(&"─".repeat(60));
    output.push('\n');
    for (idx, rule) in rules.iter().enumerate() {
        output.push_str(&format!("{:>2}. {}\n", idx + 1, rule.cs));
        output.push_str(&format!("    {}\n", rule.en.dimmed()));
    }
    output
}
