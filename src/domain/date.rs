//! Date values picked on the numeric wheel and their display formats

use crate::domain::preferences::DateStyle;
use crate::error::{Result, TimelineError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A (year, month, day) triple as selected on the date wheel.
///
/// No cross-field validation happens here: `1993-02-30` is a valid value.
/// Field order matters, the derived `Ord` compares year, then month, then day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DateValue {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

/// Largest day reachable on the wheel
const MAX_DAY: u32 = 31;

impl DateValue {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        DateValue { year, month, day }
    }

    /// Zero-padded `YYYY-MM-DD`, no calendar involved
    pub fn to_iso(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }

    /// Calendar date, or `None` when the triple does not exist (e.g. Feb 30)
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    pub fn with_day_tens(self, tens: u32) -> Self {
        let day = tens * 10 + self.day % 10;
        self.with_day(day)
    }

    pub fn with_day_ones(self, ones: u32) -> Self {
        let day = (self.day / 10) * 10 + ones;
        self.with_day(day)
    }

    pub fn with_month(self, month: u32) -> Self {
        DateValue { month, ..self }
    }

    pub fn with_century(self, century: u32) -> Self {
        let year = century as i32 * 100 + self.year.rem_euclid(100);
        DateValue { year, ..self }
    }

    pub fn with_year_tens(self, tens: u32) -> Self {
        let century = self.year.div_euclid(100);
        let ones = self.year.rem_euclid(10);
        let year = century * 100 + tens as i32 * 10 + ones;
        DateValue { year, ..self }
    }

    pub fn with_year_ones(self, ones: u32) -> Self {
        let century = self.year.div_euclid(100);
        let tens = self.year.rem_euclid(100) / 10;
        let year = century * 100 + tens * 10 + ones as i32;
        DateValue { year, ..self }
    }

    /// Apply one wheel selection
    pub fn apply(self, pick: WheelPick) -> Self {
        match pick {
            WheelPick::DayTens(d) => self.with_day_tens(d),
            WheelPick::DayOnes(d) => self.with_day_ones(d),
            WheelPick::Month(m) => self.with_month(m),
            WheelPick::Century(c) => self.with_century(c),
            WheelPick::YearTens(d) => self.with_year_tens(d),
            WheelPick::YearOnes(d) => self.with_year_ones(d),
        }
    }

    // A day of 0 becomes 1; anything past the last wheel day is held at 31.
    fn with_day(self, day: u32) -> Self {
        let day = day.clamp(1, MAX_DAY);
        DateValue { day, ..self }
    }
}

impl Default for DateValue {
    /// The picker's initial date
    fn default() -> Self {
        DateValue::new(1993, 1, 1)
    }
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso())
    }
}

impl FromStr for DateValue {
    type Err = TimelineError;

    /// Parse `YYYY-MM-DD`. Month must be 1-12 and day 1-31; the pair is not
    /// checked against the calendar.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || TimelineError::InvalidDate(s.to_string());
        let mut parts = s.trim().splitn(3, '-');

        let year: i32 = parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or_else(invalid)?;
        let month: u32 = parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or_else(invalid)?;
        let day: u32 = parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or_else(invalid)?;

        if !(1..=12).contains(&month) || !(1..=MAX_DAY).contains(&day) {
            return Err(invalid());
        }

        Ok(DateValue::new(year, month, day))
    }
}

/// One selection on one column of the date wheel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelPick {
    DayTens(u32),
    DayOnes(u32),
    Month(u32),
    Century(u32),
    YearTens(u32),
    YearOnes(u32),
}

impl WheelPick {
    /// Build a pick from a column name and digit, enforcing the column's bounds
    pub fn parse(column: &str, digit: &str) -> Result<Self> {
        let value: u32 = digit.parse().map_err(|_| {
            TimelineError::InvalidDate(format!("'{}' is not a wheel digit", digit))
        })?;

        let (pick, range) = match column {
            "day-tens" => (WheelPick::DayTens(value), 0..=3),
            "day-ones" => (WheelPick::DayOnes(value), 0..=9),
            "month" => (WheelPick::Month(value), 1..=12),
            "century" => (WheelPick::Century(value), 0..=99),
            "year-tens" => (WheelPick::YearTens(value), 0..=9),
            "year-ones" => (WheelPick::YearOnes(value), 0..=9),
            _ => {
                return Err(TimelineError::InvalidDate(format!(
                    "Unknown wheel column: '{}'. Valid columns are: day-tens, day-ones, month, century, year-tens, year-ones",
                    column
                )))
            }
        };

        if !range.contains(&value) {
            return Err(TimelineError::InvalidDate(format!(
                "{} is out of range for {} ({}-{})",
                value,
                column,
                range.start(),
                range.end()
            )));
        }

        Ok(pick)
    }
}

/// How dates are turned into display strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DateFormatting {
    /// Manual zero padding, always `YYYY-MM-DD`
    Iso,
    /// Calendar-aware rendering with a weekday, styled by [`DateStyle`]
    #[default]
    LocaleWeekday,
}

impl DateFormatting {
    pub fn format(&self, date: &DateValue, style: DateStyle) -> String {
        match self {
            DateFormatting::Iso => date.to_iso(),
            DateFormatting::LocaleWeekday => match date.to_naive_date() {
                Some(naive) => match style {
                    DateStyle::Locale => naive.format("%a, %b %-d, %Y").to_string(),
                    DateStyle::IsoWeekday => {
                        format!("{}, {}", date.to_iso(), naive.format("%a"))
                    }
                },
                None => date.to_iso(),
            },
        }
    }
}

impl FromStr for DateFormatting {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "iso" => Ok(DateFormatting::Iso),
            "locale-weekday" => Ok(DateFormatting::LocaleWeekday),
            _ => Err(format!(
                "Invalid date formatting: '{}'. Valid values are: iso, locale-weekday",
                s
            )),
        }
    }
}

impl fmt::Display for DateFormatting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateFormatting::Iso => f.write_str("iso"),
            DateFormatting::LocaleWeekday => f.write_str("locale-weekday"),
        }
    }
}
