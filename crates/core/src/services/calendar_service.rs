use chrono::{Datelike, Local, NaiveDate};
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::errors::CoreError;
use crate::models::calendar::{iso_date, CalendarCell};

/// Builds the cell sequence of a month view.
///
/// Pure computation — no clock access unless `build_for_today` is used.
/// Output is blanks first (one per weekday before day 1, Sunday-first),
/// then every day of the month in ascending order. No trailing blanks:
/// squaring the grid off is the renderer's job.
pub struct CalendarGridBuilder;

impl CalendarGridBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build the grid for `month` (zero-based) of `year`.
    ///
    /// `activity_dates` holds `YYYY-MM-DD` strings; dates outside the month
    /// are ignored. `is_today` is decided by comparing calendar fields with
    /// `today`, never timestamps.
    pub fn build(
        &self,
        year: i32,
        month: i32,
        activity_dates: &HashSet<String>,
        today: NaiveDate,
    ) -> Result<Vec<CalendarCell>, CoreError> {
        let first = first_of_month(year, month)?;
        let days = days_in_month_from(first)?;
        let blanks = first.weekday().num_days_from_sunday() as usize;

        let mut cells = Vec::with_capacity(blanks + days as usize);
        cells.extend(std::iter::repeat_with(CalendarCell::blank).take(blanks));

        let viewing_today = today.year() == year && today.month0() as i32 == month;
        for date in first.iter_days().take(days as usize) {
            let iso_date = iso_date(date);
            let has_activity = activity_dates.contains(&iso_date);
            cells.push(CalendarCell {
                day: Some(date.day()),
                iso_date,
                has_activity,
                is_today: viewing_today && today.day() == date.day(),
            });
        }

        debug!(year, month, blanks, days, "built calendar grid");
        Ok(cells)
    }

    /// Same as [`build`](Self::build), evaluated against the local date.
    pub fn build_for_today(
        &self,
        year: i32,
        month: i32,
        activity_dates: &HashSet<String>,
    ) -> Result<Vec<CalendarCell>, CoreError> {
        self.build(year, month, activity_dates, Local::now().date_naive())
    }

    /// Number of days in `month` (zero-based) of `year`.
    pub fn days_in_month(&self, year: i32, month: i32) -> Result<u32, CoreError> {
        days_in_month_from(first_of_month(year, month)?)
    }

    /// Blank cells before day 1 (weekday of the 1st, Sunday = 0).
    pub fn leading_blanks(&self, year: i32, month: i32) -> Result<u32, CoreError> {
        Ok(first_of_month(year, month)?.weekday().num_days_from_sunday())
    }
}

impl Default for CalendarGridBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn first_of_month(year: i32, month: i32) -> Result<NaiveDate, CoreError> {
    if !(0..12).contains(&month) {
        warn!(month, "rejected calendar month outside 0..=11");
        return Err(CoreError::InvalidArgument(format!(
            "month must be in 0..=11, got {month}"
        )));
    }
    NaiveDate::from_ymd_opt(year, month as u32 + 1, 1).ok_or_else(|| {
        warn!(year, "rejected unrepresentable calendar year");
        CoreError::InvalidArgument(format!("year {year} is out of the supported range"))
    })
}

/// "Day 0 of next month": the day before the 1st of the following month.
fn days_in_month_from(first: NaiveDate) -> Result<u32, CoreError> {
    let next_first = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    next_first
        .and_then(|d| d.pred_opt())
        .map(|last| last.day())
        .ok_or_else(|| {
            CoreError::InvalidArgument(format!(
                "year {} is out of the supported range",
                first.year()
            ))
        })
}

