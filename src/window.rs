//! View-window arithmetic for the day/week/month calendar views.

use chrono::{Datelike, Days, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Day,
    #[default]
    Week,
    Month,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

/// Inclusive start/end instants of the visible calendar range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

pub fn start_of_day(day: NaiveDate) -> NaiveDateTime {
    day.and_time(NaiveTime::MIN)
}

pub fn end_of_day(day: NaiveDate) -> NaiveDateTime {
    day.and_hms_milli_opt(23, 59, 59, 999)
        .unwrap_or(NaiveDateTime::MAX)
}

/// The Sunday on or before `anchor`.
pub fn week_start(anchor: NaiveDate) -> NaiveDate {
    let offset = anchor.weekday().num_days_from_sunday() as u64;
    anchor.checked_sub_days(Days::new(offset)).unwrap_or(anchor)
}

pub fn month_start(anchor: NaiveDate) -> NaiveDate {
    anchor.with_day(1).unwrap_or(anchor)
}

pub fn month_end(anchor: NaiveDate) -> NaiveDate {
    month_start(anchor)
        .checked_add_months(Months::new(1))
        .map(|next| next - Duration::days(1))
        .unwrap_or(anchor)
}

/// Computes the visible window for `anchor` in the given mode: the anchor
/// day itself, the Sunday-to-Saturday week around it, or its full calendar
/// month. Both bounds are inclusive.
pub fn compute_window(anchor: NaiveDate, mode: ViewMode) -> ViewWindow {
    match mode {
        ViewMode::Day => ViewWindow {
            start: start_of_day(anchor),
            end: end_of_day(anchor),
        },
        ViewMode::Week => {
            let sunday = week_start(anchor);
            let saturday = sunday.checked_add_days(Days::new(6)).unwrap_or(anchor);
            ViewWindow {
                start: start_of_day(sunday),
                end: end_of_day(saturday),
            }
        }
        ViewMode::Month => ViewWindow {
            start: start_of_day(month_start(anchor)),
            end: end_of_day(month_end(anchor)),
        },
    }
}

/// Shifts the anchor by one unit of the current mode. Month steps use
/// calendar arithmetic, clamping to the last valid day of the target month.
/// A step that would leave the representable date range returns the anchor
/// unchanged.
pub fn navigate(anchor: NaiveDate, mode: ViewMode, direction: Direction) -> NaiveDate {
    match (mode, direction) {
        (ViewMode::Day, Direction::Next) => {
            anchor.checked_add_days(Days::new(1)).unwrap_or(anchor)
        }
        (ViewMode::Day, Direction::Prev) => {
            anchor.checked_sub_days(Days::new(1)).unwrap_or(anchor)
        }
        (ViewMode::Week, Direction::Next) => {
            anchor.checked_add_days(Days::new(7)).unwrap_or(anchor)
        }
        (ViewMode::Week, Direction::Prev) => {
            anchor.checked_sub_days(Days::new(7)).unwrap_or(anchor)
        }
        (ViewMode::Month, Direction::Next) => anchor
            .checked_add_months(Months::new(1))
            .unwrap_or(anchor),
        (ViewMode::Month, Direction::Prev) => anchor
            .checked_sub_months(Months::new(1))
            .unwrap_or(anchor),
    }
}

/// The chronological day sequence a view renders, fed to the bucketing
/// engine: the anchor day, Sunday through Saturday, or every day of the
/// anchor's month.
pub fn view_days(anchor: NaiveDate, mode: ViewMode) -> Vec<NaiveDate> {
    match mode {
        ViewMode::Day => vec![anchor],
        ViewMode::Week => {
            let sunday = week_start(anchor);
            (0..7)
                .filter_map(|offset| sunday.checked_add_days(Days::new(offset)))
                .collect()
        }
        ViewMode::Month => {
            let first = month_start(anchor);
            let span = (month_end(anchor) - first).num_days();
            (0..=span)
                .filter_map(|offset| first.checked_add_days(Days::new(offset as u64)))
                .collect()
        }
    }
}

/// Compressed label for a date range, Chinese date convention. The four
/// cases collapse in priority order: same day, same month, same year, and
/// the fully-spelled fallback. Range ordering is the caller's problem.
pub fn format_range_label(start: NaiveDateTime, end: NaiveDateTime) -> String {
    let from = start.date();
    let to = end.date();

    if from == to {
        return from.format("%Y年%m月%d日").to_string();
    }
    if from.year() == to.year() && from.month() == to.month() {
        return format!("{}-{}", from.format("%Y年%m月%d日"), to.format("%d日"));
    }
    if from.year() == to.year() {
        return format!("{}-{}", from.format("%Y年%m月%d日"), to.format("%m月%d日"));
    }
    format!(
        "{}-{}",
        from.format("%Y年%m月%d日"),
        to.format("%Y年%m月%d日")
    )
}

pub fn format_time(instant: NaiveDateTime) -> String {
    instant.format("%H:%M").to_string()
}

pub fn format_time_range(start: NaiveDateTime, end: NaiveDateTime) -> String {
    format!("{}-{}", format_time(start), format_time(end))
}

/// Human-readable duration, e.g. `1小时30分钟`. Zero-valued parts are
/// omitted; zero minutes total yields an empty string.
pub fn format_duration(minutes: i64) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    let mut label = String::new();
    if hours > 0 {
        label.push_str(&format!("{hours}小时"));
    }
    if mins > 0 {
        label.push_str(&format!("{mins}分钟"));
    }
    label
}
