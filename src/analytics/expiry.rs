//! Weekly and monthly expiry dates for index derivatives.
//!
//! NSE index contracts settle on a fixed weekday. The weekly contract expires
//! on the next such weekday (today included); the monthly contract expires on
//! the last such weekday of the month, rolling to the following month once
//! that day is today or already past.

use chrono::{Datelike, Days, Local, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Settlement weekday for NSE index derivatives.
pub const EXPIRY_WEEKDAY: Weekday = Weekday::Thu;

/// Next weekly and monthly expiry relative to a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryPair {
    pub week: NaiveDate,
    pub month: NaiveDate,
}

/// Computes both expiries once at construction and serves them read-only.
#[derive(Debug, Clone, Copy)]
pub struct ExpiryCalculator {
    today: NaiveDate,
    weekday: Weekday,
    expiry: ExpiryPair,
}

impl ExpiryCalculator {
    pub fn new(today: NaiveDate) -> Self {
        Self::with_weekday(today, EXPIRY_WEEKDAY)
    }

    /// Calculator for contracts settling on a weekday other than Thursday.
    pub fn with_weekday(today: NaiveDate, weekday: Weekday) -> Self {
        let expiry = ExpiryPair {
            week: next_weekday_on_or_after(today, weekday),
            month: next_monthly_expiry(today, weekday),
        };
        Self { today, weekday, expiry }
    }

    /// Calculator anchored on the local system date.
    pub fn from_local_date() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    pub fn get_expiry(&self) -> ExpiryPair {
        self.expiry
    }
}

/// First `weekday` on or after `date`.
pub fn next_weekday_on_or_after(date: NaiveDate, weekday: Weekday) -> NaiveDate {
    let offset = (weekday.num_days_from_monday() as i64
        - date.weekday().num_days_from_monday() as i64)
        .rem_euclid(7);
    date + Days::new(offset as u64)
}

/// Last `weekday` of the given month, `None` for an invalid year/month.
pub fn last_weekday_of_month(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1).map(|first| last_weekday_in_month_of(first, weekday))
}

fn last_weekday_in_month_of(date: NaiveDate, weekday: Weekday) -> NaiveDate {
    let first_of_month = date - Days::new(date.day0() as u64);
    let last_day = first_of_month + Months::new(1) - Days::new(1);
    let days_since = (last_day.weekday().num_days_from_monday() as i64
        - weekday.num_days_from_monday() as i64)
        .rem_euclid(7);
    last_day - Days::new(days_since as u64)
}

/// Last `weekday` of the current month if strictly after `today`,
/// otherwise the last `weekday` of the next month.
fn next_monthly_expiry(today: NaiveDate, weekday: Weekday) -> NaiveDate {
    let this_month = last_weekday_in_month_of(today, weekday);
    if this_month > today {
        this_month
    } else {
        last_weekday_in_month_of(today + Months::new(1), weekday)
    }
}
