use chrono::{Datelike, Duration, NaiveDate};

/// Converts a year and a 1-based day of year into a calendar date.
///
/// Returns `None` for day 0 or a day past the end of the year.
pub fn date_from_year_doy(year: i32, day_of_year: u32) -> Option<NaiveDate> {
    NaiveDate::from_yo_opt(year, day_of_year)
}

/// Converts a packed `YYYYDDD` value (as stored in TIMED/SEE archives) into a
/// calendar date.
pub fn date_from_yyyyddd(value: f64) -> Option<NaiveDate> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }

    let packed = value.round() as i64;
    let year = i32::try_from(packed / 1000).ok()?;
    let day = (packed % 1000) as u32;

    date_from_year_doy(year, day)
}

/// Year plus the elapsed fraction of it, `year + doy / (days_in_year + 1)`.
pub fn fractional_year(date: NaiveDate) -> f64 {
    let days_in_year = if date.leap_year() { 366.0 } else { 365.0 };
    date.year() as f64 + date.ordinal() as f64 / (days_in_year + 1.0)
}

/// Inclusive iterator over every calendar day between two dates.
#[derive(Debug, Clone)]
pub struct DailyDates {
    next: NaiveDate,
    end: NaiveDate,
}

pub fn daily_dates(start: NaiveDate, end: NaiveDate) -> DailyDates {
    DailyDates { next: start, end }
}

impl Iterator for DailyDates {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next <= self.end {
            let current = self.next;
            self.next = current.checked_add_signed(Duration::days(1))?;
            Some(current)
        } else {
            None
        }
    }
}

/// Number of calendar days between the first and last date that are absent
/// from `dates`. Expects strictly increasing dates.
pub fn missing_days(dates: &[NaiveDate]) -> usize {
    match (dates.first(), dates.last()) {
        (Some(&first), Some(&last)) => {
            let span = daily_dates(first, last).count();
            span.saturating_sub(dates.len())
        }
        _ => 0,
    }
}
