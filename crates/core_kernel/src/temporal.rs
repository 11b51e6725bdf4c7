//! Calendar types for month-by-month calculations
//!
//! This module provides the two temporal notions the engines work with:
//! - Competence month: the calendar month a ledger row represents
//! - Date range: the inclusive calculation window supplied by the caller

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid period: start {start} must not be after end {end}")]
    InvalidPeriod {
        start: String,
        end: String,
    },

    #[error("Invalid competence month: {0}")]
    InvalidMonth(String),
}

/// A calendar month (year + month), ordered chronologically
///
/// Internally anchored on the first day of the month so that comparisons
/// and month arithmetic delegate to chrono.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompetenceMonth(NaiveDate);

impl CompetenceMonth {
    /// Creates a competence month, validating the month number
    pub fn new(year: i32, month: u32) -> Result<Self, TemporalError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Self)
            .ok_or_else(|| TemporalError::InvalidMonth(format!("{year}-{month:02}")))
    }

    /// The competence month a date falls in
    pub fn from_date(date: NaiveDate) -> Self {
        // day 1 exists in every month chrono can represent
        Self(date.with_day(1).unwrap_or(date))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// First calendar day of the month
    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    /// Last calendar day of the month
    pub fn last_day(&self) -> NaiveDate {
        self.0
            .checked_add_months(Months::new(1))
            .and_then(|following| following.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    /// Number of calendar days in the month
    pub fn days_in_month(&self) -> i64 {
        (self.last_day() - self.first_day()).num_days() + 1
    }

    /// The following competence month
    ///
    /// Saturates at the last month chrono can represent.
    pub fn next(&self) -> Self {
        self.0
            .checked_add_months(Months::new(1))
            .map(Self)
            .unwrap_or(*self)
    }

    /// Returns true if the date falls within this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::from_date(date) == *self
    }
}

impl fmt::Display for CompetenceMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for CompetenceMonth {
    type Err = TemporalError;

    /// Parses `YYYY-MM`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TemporalError::InvalidMonth(s.to_string());
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.trim().parse().map_err(|_| invalid())?;
        let month: u32 = month.trim().parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl Serialize for CompetenceMonth {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CompetenceMonth {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        CompetenceMonth::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl From<NaiveDate> for CompetenceMonth {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

/// An inclusive calendar window `[start, end]`
///
/// Deserialization does not validate ordering; callers run
/// [`DateRange::validate`] (or construct through [`DateRange::new`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, TemporalError> {
        let range = Self { start, end };
        range.validate()?;
        Ok(range)
    }

    /// Window covering whole competence months, first day to last day
    pub fn months(from: CompetenceMonth, to: CompetenceMonth) -> Result<Self, TemporalError> {
        Self::new(from.first_day(), to.last_day())
    }

    pub fn validate(&self) -> Result<(), TemporalError> {
        if self.start > self.end {
            return Err(TemporalError::InvalidPeriod {
                start: self.start.to_string(),
                end: self.end.to_string(),
            });
        }
        Ok(())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Every competence month touched by the window, in order
    ///
    /// A window whose start and end share a month yields exactly one month;
    /// an inverted window yields none.
    pub fn competence_months(&self) -> Vec<CompetenceMonth> {
        let last = CompetenceMonth::from_date(self.end);
        let mut months = Vec::new();
        let mut current = CompetenceMonth::from_date(self.start);
        while current <= last {
            months.push(current);
            let following = current.next();
            if following == current {
                break;
            }
            current = following;
        }
        months
    }

    /// Number of competence months touched by the window
    pub fn month_count(&self) -> u32 {
        self.competence_months().len() as u32
    }

    /// Fraction of the month's calendar days that fall inside the window,
    /// clamped to `[0, 1]`
    pub fn overlap_fraction(&self, month: CompetenceMonth) -> Decimal {
        let from = self.start.max(month.first_day());
        let to = self.end.min(month.last_day());
        if to < from {
            return Decimal::ZERO;
        }
        let covered = (to - from).num_days() + 1;
        let fraction = Decimal::from(covered) / Decimal::from(month.days_in_month());
        fraction.clamp(Decimal::ZERO, Decimal::ONE)
    }

    /// Returns true if the window spans more than the given number of years
    pub fn exceeds_years(&self, years: u32) -> bool {
        match self.start.checked_add_months(Months::new(years.saturating_mul(12))) {
            Some(limit) => self.end > limit,
            None => false,
        }
    }
}
