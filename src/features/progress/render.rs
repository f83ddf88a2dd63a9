//! Plain-text rendering of progress data for the terminal.

use super::calendar::{HeatmapDay, MonthCalendar, CALENDAR_COUNT_CAP};

const FULL_BLOCK: char = '█';

/// Shade for a capped calendar count.
fn intensity(count: usize) -> char {
    match count {
        0 => '·',
        1 => '░',
        2..=3 => '▒',
        c if c < CALENDAR_COUNT_CAP => '▓',
        _ => FULL_BLOCK,
    }
}

fn label(labels: &[String], idx: usize) -> &str {
    labels.get(idx).map_or("", String::as_str)
}

/// Render the seven-day heatmap as two lines: weekday labels over day
/// numbers, with active days marked.
#[must_use]
pub fn render_mini_heatmap(days: &[HeatmapDay], weekday_labels: &[String]) -> String {
    let header: Vec<String> = days
        .iter()
        .map(|d| format!("{:^5}", label(weekday_labels, d.weekday)))
        .collect();
    let cells: Vec<String> = days
        .iter()
        .map(|d| {
            if d.active {
                format!("[{:>2}]", d.day)
            } else {
                format!(" {:>2} ", d.day)
            }
        })
        .collect();

    format!("{}\n{}", header.join(" "), cells.join(" "))
}

/// Render a Monday-first month grid with a shade per day.
#[must_use]
pub fn render_calendar(calendar: &MonthCalendar, weekday_labels: &[String]) -> String {
    let mut lines = vec![format!("{:04}-{:02}", calendar.year, calendar.month)];
    lines.push(
        (0..7)
            .map(|i| format!("{:<5}", label(weekday_labels, i)))
            .collect::<String>()
            .trim_end()
            .to_string(),
    );

    let mut row = "     ".repeat(calendar.leading_blanks);
    let mut column = calendar.leading_blanks;
    for day in &calendar.days {
        row.push_str(&format!("{:>2} {} ", day.day, intensity(day.display_count())));
        column += 1;
        if column == 7 {
            lines.push(row.trim_end().to_string());
            row.clear();
            column = 0;
        }
    }
    if !row.is_empty() {
        lines.push(row.trim_end().to_string());
    }

    lines.join("\n")
}

/// Render a bordered box of label/value pairs.
#[must_use]
pub fn render_summary_box(title: &str, items: &[(String, String)]) -> String {
    let width_of = |s: &str| s.chars().count();
    let max_label = items.iter().map(|(l, _)| width_of(l)).max().unwrap_or(0);
    let max_value = items.iter().map(|(_, v)| width_of(v)).max().unwrap_or(0);
    let inner = (max_label + max_value + 3).max(width_of(title)) + 2;

    let mut lines = vec![format!("┌{}┐", "─".repeat(inner))];
    let pad = inner - width_of(title);
    lines.push(format!(
        "│{}{}{}│",
        " ".repeat(pad / 2),
        title,
        " ".repeat(pad - pad / 2)
    ));
    lines.push(format!("├{}┤", "─".repeat(inner)));
    for (label, value) in items {
        let item = format!(
            "{}{} : {}",
            " ".repeat(max_label - width_of(label)),
            label,
            value
        );
        lines.push(format!("│ {}{} │", item, " ".repeat(inner - 2 - width_of(&item))));
    }
    lines.push(format!("└{}┘", "─".repeat(inner)));

    lines.join("\n")
}
