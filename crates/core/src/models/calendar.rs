use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Column headers of a Sunday-first calendar grid.
pub const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// One grid position of a month view: either a day or a leading blank.
///
/// The UI renders these in order, wrapping every seven cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarCell {
    /// Day of the month (1..=31), `None` for padding cells
    pub day: Option<u32>,

    /// `YYYY-MM-DD`, empty for padding cells
    pub iso_date: String,

    /// At least one transaction was recorded on `iso_date`
    pub has_activity: bool,

    /// `iso_date` is the evaluation date
    pub is_today: bool,
}

impl CalendarCell {
    /// A padding cell placed before day 1.
    pub fn blank() -> Self {
        Self {
            day: None,
            iso_date: String::new(),
            has_activity: false,
            is_today: false,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.day.is_none()
    }
}

/// `YYYY-MM-DD` key shared by calendar cells and transactions.
///
/// Years outside 0..=9999 carry an explicit sign (`-0005`, `+12345`).
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// A viewed month: calendar year plus zero-based month (0 = January).
///
/// Navigation is discrete: one step per `next`/`prev` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCalendarMonth")]
pub struct CalendarMonth {
    year: i32,

    /// Zero-based month, always 0..=11
    month: u32,
}

#[derive(Deserialize)]
struct RawCalendarMonth {
    year: i32,
    month: u32,
}

impl TryFrom<RawCalendarMonth> for CalendarMonth {
    type Error = String;

    fn try_from(raw: RawCalendarMonth) -> Result<Self, Self::Error> {
        CalendarMonth::new(raw.year, raw.month)
            .ok_or_else(|| format!("month must be in 0..=11, got {}", raw.month))
    }
}

impl CalendarMonth {
    /// Returns `None` if `month` is not in 0..=11.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (month < 12).then_some(Self { year, month })
    }

    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month0(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Zero-based month (0 = January).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Following month, rolling over into January of the next year.
    pub fn next(self) -> Option<Self> {
        self.shift(1)
    }

    /// Preceding month, rolling back into December of the previous year.
    pub fn prev(self) -> Option<Self> {
        self.shift(-1)
    }

    /// Move by `delta` months in either direction.
    /// `None` if the resulting year does not fit in an `i32`.
    pub fn shift(self, delta: i32) -> Option<Self> {
        let index = self.year as i64 * 12 + self.month as i64 + delta as i64;
        let year = i32::try_from(index.div_euclid(12)).ok()?;
        Some(Self {
            year,
            month: index.rem_euclid(12) as u32,
        })
    }

    /// English month name, e.g. `"February"`.
    pub fn name(&self) -> &'static str {
        MONTH_NAMES[self.month as usize]
    }

    /// Header text, e.g. `"February 2024"`.
    pub fn title(&self) -> String {
        format!("{} {}", self.name(), self.year)
    }

    /// Whether `date` falls inside this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month0() == self.month
    }
}

impl std::fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month + 1)
    }
}
