//! Month grid construction and month navigation tokens.
//!
//! A month grid is a list of Monday-first weeks of seven cells each. Cells
//! before the first and after the last day of the month are empty.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DAYS_PER_WEEK: usize = 7;

const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// Error raised for month tokens or year/month pairs that do not name a month
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("month token must look like YYYY-M")]
    MissingSeparator,

    #[error("month token has more than two parts")]
    TooManyParts,

    #[error("{part} '{value}' is not a number")]
    InvalidNumber { part: &'static str, value: String },

    #[error("month {0} is out of range 1..=12")]
    MonthOutOfRange(u32),

    #[error("year {0} is out of range 1..=9999")]
    YearOutOfRange(i32),
}

/// A calendar month, written as `YYYY-M` in query strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthToken {
    pub year: i32,
    pub month: u32,
}

impl MonthToken {
    pub fn new(year: i32, month: u32) -> Result<Self, FormatError> {
        if !(1..=12).contains(&month) {
            return Err(FormatError::MonthOutOfRange(month));
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(FormatError::YearOutOfRange(year));
        }
        Ok(Self { year, month })
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn pred(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn succ(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl From<NaiveDate> for MonthToken {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for MonthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.month)
    }
}

impl FromStr for MonthToken {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('-');
        let year_raw = parts.next().unwrap_or_default();
        let month_raw = parts.next().ok_or(FormatError::MissingSeparator)?;
        if parts.next().is_some() {
            return Err(FormatError::TooManyParts);
        }

        let year = year_raw
            .trim()
            .parse::<i32>()
            .map_err(|_| FormatError::InvalidNumber {
                part: "year",
                value: year_raw.to_string(),
            })?;
        let month = month_raw
            .trim()
            .parse::<u32>()
            .map_err(|_| FormatError::InvalidNumber {
                part: "month",
                value: month_raw.to_string(),
            })?;

        Self::new(year, month)
    }
}

/// One slot of a month grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "date")]
pub enum CalendarCell {
    Empty,
    Day(NaiveDate),
}

impl CalendarCell {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Empty => None,
            Self::Day(date) => Some(*date),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<[CalendarCell; DAYS_PER_WEEK]>,
}

impl MonthGrid {
    pub fn token(&self) -> MonthToken {
        MonthToken {
            year: self.year,
            month: self.month,
        }
    }

    /// Dates of the month in grid order, skipping padding
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.weeks
            .iter()
            .flat_map(|week| week.iter().filter_map(CalendarCell::date))
    }
}

pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = MonthToken::from(first).succ();
    let next_first = NaiveDate::from_ymd_opt(next.year, next.month, 1)?;
    Some(next_first.pred_opt()?.day())
}

pub fn build_month_grid(year: i32, month: u32) -> Result<MonthGrid, FormatError> {
    let token = MonthToken::new(year, month)?;
    let (first, day_count) = token
        .first_day()
        .zip(days_in_month(year, month))
        .ok_or(FormatError::YearOutOfRange(year))?;

    let mut weeks = Vec::new();
    let mut week = [CalendarCell::Empty; DAYS_PER_WEEK];
    let mut column = first.weekday().num_days_from_monday() as usize;

    for date in first.iter_days().take(day_count as usize) {
        week[column] = CalendarCell::Day(date);
        column += 1;
        if column == DAYS_PER_WEEK {
            weeks.push(week);
            week = [CalendarCell::Empty; DAYS_PER_WEEK];
            column = 0;
        }
    }
    if column > 0 {
        weeks.push(week);
    }

    Ok(MonthGrid { year, month, weeks })
}

/// Token of the month before the one containing `date`.
///
/// Stays on the month of `date` when the previous one is before year 1.
pub fn prev_month_token(date: NaiveDate) -> MonthToken {
    let first = date.with_day(1).unwrap_or(date);
    let prev = first
        .pred_opt()
        .map(MonthToken::from)
        .unwrap_or_else(|| MonthToken::from(first).pred());
    within_range(prev, first)
}

/// Token of the month after the one containing `date`.
///
/// Stays on the month of `date` when the next one is after year 9999.
pub fn next_month_token(date: NaiveDate) -> MonthToken {
    let last = days_in_month(date.year(), date.month())
        .and_then(|day| date.with_day(day))
        .unwrap_or(date);
    let next = last
        .succ_opt()
        .map(MonthToken::from)
        .unwrap_or_else(|| MonthToken::from(last).succ());
    within_range(next, date)
}

fn within_range(token: MonthToken, fallback: NaiveDate) -> MonthToken {
    if (MIN_YEAR..=MAX_YEAR).contains(&token.year) {
        token
    } else {
        MonthToken::from(fallback)
    }
}

/// Resolve the `month` query parameter to the first day of that month.
///
/// A missing or empty token selects the current month.
pub fn parse_month_token(token: Option<&str>) -> Result<NaiveDate, FormatError> {
    parse_month_token_at(token, Local::now().date_naive())
}

pub fn parse_month_token_at(token: Option<&str>, today: NaiveDate) -> Result<NaiveDate, FormatError> {
    let token = match token.map(str::trim) {
        Some(raw) if !raw.is_empty() => raw.parse::<MonthToken>()?,
        _ => MonthToken::from(today),
    };

    token
        .first_day()
        .ok_or(FormatError::YearOutOfRange(token.year))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_grid_shape_for_every_month_of_several_years() {
        for year in [1900, 2000, 2023, 2024, 2100] {
            for month in 1..=12 {
                let grid = build_month_grid(year, month).unwrap();
                let days: Vec<NaiveDate> = grid.days().collect();

                assert_eq!(days.len() as u32, days_in_month(year, month).unwrap());
                assert!(days.windows(2).all(|pair| pair[0] < pair[1]));
                assert_eq!(days.first(), Some(&date(year, month, 1)));
                assert!(grid.weeks.len() >= 4 && grid.weeks.len() <= 6);

                for week in &grid.weeks {
                    for (column, cell) in week.iter().enumerate() {
                        if let CalendarCell::Day(day) = cell {
                            assert_eq!(day.weekday().num_days_from_monday() as usize, column);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_grid_padding() {
        // March 2024 starts on a Friday and ends on a Sunday
        let grid = build_month_grid(2024, 3).unwrap();
        assert_eq!(grid.weeks.len(), 5);
        assert_eq!(&grid.weeks[0][..4], &[CalendarCell::Empty; 4]);
        assert_eq!(grid.weeks[0][4], CalendarCell::Day(date(2024, 3, 1)));
        assert_eq!(grid.weeks[4][6], CalendarCell::Day(date(2024, 3, 31)));

        // February 2021 fills exactly four rows
        let grid = build_month_grid(2021, 2).unwrap();
        assert_eq!(grid.weeks.len(), 4);
        assert!(grid.weeks.iter().flatten().all(|cell| cell.date().is_some()));
    }

    #[test]
    fn test_grid_rejects_invalid_month() {
        assert_eq!(build_month_grid(2023, 13), Err(FormatError::MonthOutOfRange(13)));
        assert_eq!(build_month_grid(2023, 0), Err(FormatError::MonthOutOfRange(0)));
        assert_eq!(build_month_grid(0, 5), Err(FormatError::YearOutOfRange(0)));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2023, 2), Some(28));
        assert_eq!(days_in_month(1900, 2), Some(28));
        assert_eq!(days_in_month(2023, 12), Some(31));
        assert_eq!(days_in_month(2023, 13), None);
    }

    #[test]
    fn test_prev_and_next_tokens() {
        assert_eq!(prev_month_token(date(2024, 3, 15)).to_string(), "2024-2");
        assert_eq!(prev_month_token(date(2024, 1, 31)).to_string(), "2023-12");
        assert_eq!(next_month_token(date(2024, 1, 31)).to_string(), "2024-2");
        assert_eq!(next_month_token(date(2023, 12, 1)).to_string(), "2024-1");
    }

    #[test]
    fn test_tokens_stay_within_year_range() {
        assert_eq!(prev_month_token(date(1, 1, 20)).to_string(), "1-1");
        assert_eq!(next_month_token(date(9999, 12, 5)).to_string(), "9999-12");
        assert_eq!(prev_month_token(date(9999, 12, 5)).to_string(), "9999-11");
        assert_eq!(next_month_token(date(1, 1, 20)).to_string(), "1-2");

        for token in [prev_month_token(date(1, 1, 1)), next_month_token(date(9999, 12, 31))] {
            assert!(parse_month_token_at(Some(&token.to_string()), date(2024, 1, 1)).is_ok());
        }
    }

    #[test]
    fn test_navigation_round_trips_through_parse() {
        let mut day = date(2022, 1, 1);
        while day < date(2026, 1, 1) {
            let this_month = MonthToken::from(day);

            let prev = prev_month_token(day).to_string();
            let parsed = parse_month_token_at(Some(&prev), day).unwrap();
            assert_eq!(MonthToken::from(parsed), this_month.pred());
            assert_eq!(parsed.day(), 1);

            let next = next_month_token(day).to_string();
            let parsed = parse_month_token_at(Some(&next), day).unwrap();
            assert_eq!(MonthToken::from(parsed), this_month.succ());

            day += chrono::Duration::days(9);
        }
    }

    #[test]
    fn test_parse_month_token() {
        let today = date(2024, 7, 19);
        assert_eq!(parse_month_token_at(Some("2024-2"), today), Ok(date(2024, 2, 1)));
        assert_eq!(parse_month_token_at(Some("2024-02"), today), Ok(date(2024, 2, 1)));
        assert_eq!(parse_month_token_at(None, today), Ok(date(2024, 7, 1)));
        assert_eq!(parse_month_token_at(Some(""), today), Ok(date(2024, 7, 1)));
    }

    #[test]
    fn test_parse_month_token_defaults_to_current_month() {
        let parsed = parse_month_token(None).unwrap();
        let today = Local::now().date_naive();
        assert_eq!(parsed.day(), 1);
        // tolerate a month boundary between the two clock reads
        assert!(parsed <= today);
        assert!(today - parsed < chrono::Duration::days(32));
    }

    #[test]
    fn test_parse_month_token_errors() {
        let today = date(2024, 7, 19);
        assert_eq!(
            parse_month_token_at(Some("2023-13"), today),
            Err(FormatError::MonthOutOfRange(13))
        );
        assert_eq!(
            parse_month_token_at(Some("202402"), today),
            Err(FormatError::MissingSeparator)
        );
        assert_eq!(
            parse_month_token_at(Some("2024-2-1"), today),
            Err(FormatError::TooManyParts)
        );
        assert_eq!(
            parse_month_token_at(Some("twenty-2"), today),
            Err(FormatError::InvalidNumber {
                part: "year",
                value: "twenty".to_string(),
            })
        );
        assert!(matches!(
            parse_month_token_at(Some("2024-"), today),
            Err(FormatError::InvalidNumber { part: "month", .. })
        ));
    }

    #[test]
    fn test_cell_serialization() {
        let json = serde_json::to_value(CalendarCell::Day(date(2024, 3, 1))).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "day", "date": "2024-03-01"}));
        let json = serde_json::to_value(CalendarCell::Empty).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "empty"}));
    }
}
