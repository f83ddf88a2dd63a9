//! Practice history: the home heatmap, the monthly calendar, totals, and
//! the JSON export.

pub mod calendar;
pub mod export;
pub mod render;

pub use calendar::{
    mini_heatmap, month_calendar, summary, CalendarDay, HeatmapDay, MonthCalendar,
    ProgressSummary,
};
pub use export::{export_file_name, write_export};
pub use render::{render_calendar, render_mini_heatmap, render_summary_box};
