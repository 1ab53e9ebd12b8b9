//! Day and hour bucketing of course sessions for the calendar grid.

use std::ops::RangeInclusive;

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::models::CourseSession;
use crate::window::start_of_day;

pub const DEFAULT_FIRST_HOUR: u32 = 7;
pub const DEFAULT_LAST_HOUR: u32 = 23;
pub const DEFAULT_DISPLAY_CAP: usize = 5;

/// Visible hour band and per-hour display cap. Values are clamped on
/// construction so the band always stays within a single day.
#[derive(Debug, Clone)]
pub struct BucketConfig {
    first_hour: u32,
    last_hour: u32,
    display_cap: usize,
}

impl BucketConfig {
    pub fn new(first_hour: u32, last_hour: u32, display_cap: usize) -> Self {
        let first_hour = first_hour.min(23);
        let last_hour = last_hour.min(23).max(first_hour);
        Self {
            first_hour,
            last_hour,
            display_cap,
        }
    }

    pub fn first_hour(&self) -> u32 {
        self.first_hour
    }

    pub fn last_hour(&self) -> u32 {
        self.last_hour
    }

    pub fn display_cap(&self) -> usize {
        self.display_cap
    }

    pub fn hours(&self) -> RangeInclusive<u32> {
        self.first_hour..=self.last_hour
    }
}

impl Default for BucketConfig {
    fn default() -> Self {
        Self::new(DEFAULT_FIRST_HOUR, DEFAULT_LAST_HOUR, DEFAULT_DISPLAY_CAP)
    }
}

/// One calendar day's visible span and the sessions starting inside it.
#[derive(Debug)]
pub struct DayBucket<'a> {
    pub day: NaiveDate,
    pub sessions: Vec<&'a CourseSession>,
}

/// One hour-of-day inside a [`DayBucket`]. Sessions beyond the display cap
/// are represented only by `hidden_count`.
#[derive(Debug)]
pub struct HourBucket<'a> {
    pub hour: u32,
    pub displayed: Vec<&'a CourseSession>,
    pub hidden_count: usize,
}

impl HourBucket<'_> {
    pub fn total(&self) -> usize {
        self.displayed.len() + self.hidden_count
    }
}

/// Partitions `sessions` by calendar day, in the caller-supplied day order.
/// A session belongs to a day when its start instant lies inside the visible
/// band, both ends inclusive. Sessions starting before the band never reach
/// any bucket.
pub fn bucket_by_day<'a>(
    sessions: &'a [CourseSession],
    days: &[NaiveDate],
    config: &BucketConfig,
) -> Vec<DayBucket<'a>> {
    days.iter()
        .map(|&day| {
            let band_start = start_of_day(day) + Duration::hours(config.first_hour as i64);
            // The hours are clamped to 0..=23, so both band ends stay inside
            // `day` and the additions hold for any representable date.
            let band_end = start_of_day(day)
                + (Duration::hours(config.last_hour as i64 + 1) - Duration::milliseconds(1));
            let sessions = sessions
                .iter()
                .filter(|session| {
                    session.start_time >= band_start && session.start_time <= band_end
                })
                .collect();
            DayBucket { day, sessions }
        })
        .collect()
}

/// Splits a day bucket into per-hour buckets over the visible band. Hour
/// membership is half-open: a start exactly on `HH:00` belongs to hour `HH`.
/// Input order is preserved within an hour; the first `display_cap` sessions
/// are displayed and the rest only counted.
pub fn bucket_by_hour<'a>(bucket: &DayBucket<'a>, config: &BucketConfig) -> Vec<HourBucket<'a>> {
    config
        .hours()
        .map(|hour| {
            let slot_start = start_of_day(bucket.day) + Duration::hours(hour as i64);
            // Hour 23 on the last representable day has no next midnight.
            let slot_end = slot_start
                .checked_add_signed(Duration::hours(1))
                .unwrap_or(NaiveDateTime::MAX);
            let in_hour: Vec<&CourseSession> = bucket
                .sessions
                .iter()
                .copied()
                .filter(|session| {
                    session.start_time >= slot_start && session.start_time < slot_end
                })
                .collect();
            let total = in_hour.len();
            let displayed: Vec<&CourseSession> =
                in_hour.into_iter().take(config.display_cap).collect();
            let hidden_count = total - displayed.len();
            HourBucket {
                hour,
                displayed,
                hidden_count,
            }
        })
        .collect()
}
