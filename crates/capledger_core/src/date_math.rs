//! Calendar helpers: day counts, quarter boundaries, and the two accepted
//! date formats.
//!
//! All comparisons and arithmetic operate on `jiff::civil::Date`; display
//! strings (`DD-MMM-YYYY`, the statement format) never participate in
//! ordering.

use jiff::civil::Date;

use crate::error::{LedgerError, Result};

/// Fast leap year check.
#[inline]
pub fn is_leap_year(year: i16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Days in a calendar month without constructing a `jiff::civil::Date`.
#[inline]
pub fn days_in_month(year: i16, month: i8) -> i8 {
    const DAYS: [i8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    if month == 2 && is_leap_year(year) {
        29
    } else {
        DAYS[(month - 1) as usize]
    }
}

/// Number of days between two dates (`end - start`), negative when
/// `end < start`.
#[inline]
pub fn days_between(start: Date, end: Date) -> i32 {
    (end - start).get_days()
}

/// Number of days in `[start, end]` counting both endpoints.
///
/// The first day of a new investment accrues interest on its own day, so a
/// single-day period counts as one day, not zero.
#[inline]
pub fn days_inclusive(start: Date, end: Date) -> i32 {
    days_between(start, end) + 1
}

/// A calendar quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    /// Quarter containing `date`.
    pub fn containing(date: Date) -> Quarter {
        match (date.month() - 1) / 3 {
            0 => Quarter::Q1,
            1 => Quarter::Q2,
            2 => Quarter::Q3,
            _ => Quarter::Q4,
        }
    }

    fn index(self) -> i32 {
        match self {
            Quarter::Q1 => 0,
            Quarter::Q2 => 1,
            Quarter::Q3 => 2,
            Quarter::Q4 => 3,
        }
    }

    fn from_index(index: i32) -> Quarter {
        match index.rem_euclid(4) {
            0 => Quarter::Q1,
            1 => Quarter::Q2,
            2 => Quarter::Q3,
            _ => Quarter::Q4,
        }
    }

    /// First and last calendar day of this quarter in `year`.
    pub fn bounds(self, year: i16) -> (Date, Date) {
        let start_month = (self.index() * 3 + 1) as i8;
        let end_month = start_month + 2;
        let start = jiff::civil::date(year, start_month, 1);
        let end = jiff::civil::date(year, end_month, days_in_month(year, end_month));
        (start, end)
    }
}

impl std::fmt::Display for Quarter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Quarter::Q1 => "Q1",
            Quarter::Q2 => "Q2",
            Quarter::Q3 => "Q3",
            Quarter::Q4 => "Q4",
        };
        write!(f, "{label}")
    }
}

impl std::str::FromStr for Quarter {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Quarter> {
        match s.trim().to_ascii_uppercase().as_str() {
            "Q1" => Ok(Quarter::Q1),
            "Q2" => Ok(Quarter::Q2),
            "Q3" => Ok(Quarter::Q3),
            "Q4" => Ok(Quarter::Q4),
            other => Err(LedgerError::InvalidDate(format!(
                "unrecognized quarter '{other}', expected Q1..Q4"
            ))),
        }
    }
}

/// Bounds of the quarter `offset` quarters after the one containing `today`,
/// rolling the year as needed. `offset` is 1-based: 1 is the next quarter.
pub fn upcoming_quarter(today: Date, offset: i32) -> (Date, Date) {
    let absolute = today.year() as i32 * 4 + Quarter::containing(today).index() + offset;
    let year = absolute.div_euclid(4) as i16;
    let quarter = Quarter::from_index(absolute.rem_euclid(4));
    quarter.bounds(year)
}

/// Parse a date in either accepted format: ISO `YYYY-MM-DD` or the statement
/// format `DD-MMM-YYYY` (e.g. `01-Jan-2023`).
pub fn parse_date(input: &str) -> Result<Date> {
    let trimmed = input.trim();
    if let Ok(date) = trimmed.parse::<Date>() {
        return Ok(date);
    }
    Date::strptime("%d-%b-%Y", trimmed)
        .map_err(|_| LedgerError::InvalidDate(format!("unparseable date '{trimmed}'")))
}

/// Format a date in the statement display format, `DD-MMM-YYYY`.
pub fn format_display(date: Date) -> String {
    date.strftime("%d-%b-%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn test_days_in_month_leap_feb() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2023, 12), 31);
    }

    #[test]
    fn test_days_inclusive_counts_both_endpoints() {
        let d = date(2023, 6, 15);
        assert_eq!(days_inclusive(d, d), 1);
        assert_eq!(days_inclusive(date(2023, 1, 1), date(2023, 3, 31)), 90);
        assert_eq!(days_inclusive(date(2024, 1, 1), date(2024, 3, 31)), 91);
    }

    #[test]
    fn test_quarter_bounds() {
        assert_eq!(
            Quarter::Q1.bounds(2023),
            (date(2023, 1, 1), date(2023, 3, 31))
        );
        assert_eq!(
            Quarter::Q2.bounds(2023),
            (date(2023, 4, 1), date(2023, 6, 30))
        );
        assert_eq!(
            Quarter::Q4.bounds(2024),
            (date(2024, 10, 1), date(2024, 12, 31))
        );
    }

    #[test]
    fn test_quarter_containing() {
        assert_eq!(Quarter::containing(date(2023, 2, 14)), Quarter::Q1);
        assert_eq!(Quarter::containing(date(2023, 12, 31)), Quarter::Q4);
    }

    #[test]
    fn test_upcoming_quarter_rolls_year() {
        // From Q4 2023, the next quarter is Q1 2024
        let (start, end) = upcoming_quarter(date(2023, 11, 5), 1);
        assert_eq!(start, date(2024, 1, 1));
        assert_eq!(end, date(2024, 3, 31));

        let (start, _) = upcoming_quarter(date(2023, 11, 5), 4);
        assert_eq!(start, date(2024, 10, 1));
    }

    #[test]
    fn test_parse_date_both_formats() {
        assert_eq!(parse_date("2023-01-02").unwrap(), date(2023, 1, 2));
        assert_eq!(parse_date("02-Jan-2023").unwrap(), date(2023, 1, 2));
        assert_eq!(parse_date(" 15-Jun-2023 ").unwrap(), date(2023, 6, 15));
        assert!(parse_date("Jan 2, 2023").is_err());
        assert!(parse_date("2023-13-01").is_err());
    }

    #[test]
    fn test_format_display() {
        assert_eq!(format_display(date(2023, 1, 2)), "02-Jan-2023");
        assert_eq!(format_display(date(2023, 12, 31)), "31-Dec-2023");
    }

    #[test]
    fn test_quarter_parse() {
        assert_eq!("q2".parse::<Quarter>().unwrap(), Quarter::Q2);
        assert!("Q5".parse::<Quarter>().is_err());
    }
}
