//! Date range expansion
//!
//! Drivers iterate over report periods: one per calendar day, or one per
//! calendar month for monthly reports. A missing end date means a single
//! period starting at `start`.

use chrono::{Datelike, Months, NaiveDate};

use crate::error::EtlError;

/// Period granularity of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Day,
    Month,
}

/// Expand `[start, end]` into report periods
///
/// Monthly periods give one date per calendar month touched by the range,
/// each keeping the day of month of `start` clamped to the month length.
///
/// # Examples
///
/// ```
/// # use chrono::NaiveDate;
/// # use energo_reports::periods::{expand_periods, Granularity};
/// let d = |m, day| NaiveDate::from_ymd_opt(2018, m, day).unwrap();
///
/// assert_eq!(expand_periods(d(10, 1), None, Granularity::Day).unwrap(), vec![d(10, 1)]);
/// assert_eq!(expand_periods(d(10, 1), Some(d(10, 3)), Granularity::Day).unwrap().len(), 3);
/// assert_eq!(
///     expand_periods(d(1, 31), Some(d(3, 31)), Granularity::Month).unwrap(),
///     vec![d(1, 31), d(2, 28), d(3, 31)]
/// );
/// ```
pub fn expand_periods(
    start: NaiveDate,
    end: Option<NaiveDate>,
    granularity: Granularity,
) -> Result<Vec<NaiveDate>, EtlError> {
    let end = match end {
        None => return Ok(vec![start]),
        Some(end) if end < start => {
            return Err(EtlError::Config(format!(
                "End date {} is before start date {}",
                end, start
            )))
        }
        Some(end) => end,
    };

    match granularity {
        Granularity::Day => Ok(start.iter_days().take_while(|d| *d <= end).collect()),
        Granularity::Month => {
            let count = calendar_months_between(start, end) + 1;
            (0..count)
                .map(|n| {
                    start.checked_add_months(Months::new(n)).ok_or_else(|| {
                        EtlError::Config(format!("Month offset {} from {} overflows", n, start))
                    })
                })
                .collect()
        }
    }
}

/// Month boundaries crossed from `start` to `end` (`end >= start`)
fn calendar_months_between(start: NaiveDate, end: NaiveDate) -> u32 {
    let months = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    months.max(0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_single_date() {
        assert_eq!(
            expand_periods(d(2018, 10, 1), None, Granularity::Month).unwrap(),
            vec![d(2018, 10, 1)]
        );
    }

    #[test]
    fn test_daily_range_is_inclusive() {
        let periods = expand_periods(d(2018, 9, 29), Some(d(2018, 10, 2)), Granularity::Day).unwrap();
        assert_eq!(
            periods,
            vec![d(2018, 9, 29), d(2018, 9, 30), d(2018, 10, 1), d(2018, 10, 2)]
        );
    }

    #[test]
    fn test_same_start_and_end() {
        let periods = expand_periods(d(2018, 10, 1), Some(d(2018, 10, 1)), Granularity::Day).unwrap();
        assert_eq!(periods, vec![d(2018, 10, 1)]);
    }

    #[test]
    fn test_monthly_across_year() {
        let periods =
            expand_periods(d(2017, 11, 1), Some(d(2018, 2, 1)), Granularity::Month).unwrap();
        assert_eq!(
            periods,
            vec![d(2017, 11, 1), d(2017, 12, 1), d(2018, 1, 1), d(2018, 2, 1)]
        );
    }

    #[test]
    fn test_monthly_partial_last_month_included() {
        let periods =
            expand_periods(d(2018, 1, 15), Some(d(2018, 3, 10)), Granularity::Month).unwrap();
        assert_eq!(periods, vec![d(2018, 1, 15), d(2018, 2, 15), d(2018, 3, 15)]);
    }

    #[test]
    fn test_monthly_clamped_to_month_end() {
        let periods =
            expand_periods(d(2018, 1, 30), Some(d(2018, 2, 28)), Granularity::Month).unwrap();
        assert_eq!(periods, vec![d(2018, 1, 30), d(2018, 2, 28)]);
    }

    #[test]
    fn test_monthly_within_one_month() {
        let periods =
            expand_periods(d(2018, 3, 5), Some(d(2018, 3, 25)), Granularity::Month).unwrap();
        assert_eq!(periods, vec![d(2018, 3, 5)]);
    }

    #[test]
    fn test_end_before_start_rejected() {
        let result = expand_periods(d(2018, 10, 2), Some(d(2018, 10, 1)), Granularity::Day);
        assert!(matches!(result, Err(EtlError::Config(_))));
    }
}
