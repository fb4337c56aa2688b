use crate::error::{PortfolioAnalyticsError, Result};
use chrono::{Datelike, Days, Months, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

pub fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap()
        .checked_sub_days(Days::new(1))
        .unwrap()
}

/// First day of the month that lies `months_back` whole months before the
/// month containing `date`.
pub fn shift_month_start_back(date: NaiveDate, months_back: u32) -> Result<NaiveDate> {
    first_day_of_month(date)
        .checked_sub_months(Months::new(months_back))
        .ok_or_else(|| {
            PortfolioAnalyticsError::DateError(format!(
                "{} months before {} is out of the representable date range",
                months_back, date
            ))
        })
}

/// Whole calendar months between two dates, ignoring the day-of-month:
/// `(end.year - start.year) * 12 + (end.month - start.month)`.
/// Negative when `end` precedes `start`'s month.
pub fn months_between(start: NaiveDate, end: NaiveDate) -> i32 {
    let year_diff = end.year() - start.year();
    let month_diff = end.month() as i32 - start.month() as i32;
    year_diff * 12 + month_diff
}

/// Rounds to 2 decimal places, midpoint away from zero. Applied only at
/// output boundaries so intermediate sums keep full precision.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
