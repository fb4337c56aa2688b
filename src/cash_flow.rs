use crate::error::Result;
use crate::frequency::monthly_equivalent;
use crate::schema::{Expense, IncomeStream};
use crate::utils::{last_day_of_month, round_money, shift_month_start_back};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One entry of the trailing cash-flow series. The label is a short month
/// name for display only; the window is at most 12 months so labels never
/// need to disambiguate years.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyCashFlow {
    pub month: String,
    pub income: Decimal,
    pub expenses: Decimal,
    pub net_cash_flow: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowSummary {
    pub income: Decimal,
    pub expenses: Decimal,
    pub net_cash_flow: Decimal,
}

fn stream_active_in_window(stream: &IncomeStream, start: NaiveDate, end: NaiveDate) -> bool {
    stream.start_date <= end && stream.end_date.map_or(true, |e| e >= start)
}

fn income_for_window(streams: &[IncomeStream], start: NaiveDate, end: NaiveDate) -> Decimal {
    streams
        .iter()
        .filter(|s| s.is_recurring && stream_active_in_window(s, start, end))
        .map(|s| monthly_equivalent(s.amount, s.frequency))
        .sum()
}

fn expenses_for_window(expenses: &[Expense], start: NaiveDate, end: NaiveDate) -> Decimal {
    expenses
        .iter()
        .filter(|e| {
            if e.recurring {
                // Once a recurring expense has started it counts toward every
                // month from then on; there is no end-date concept for expenses.
                e.date <= end
            } else {
                e.date >= start && e.date <= end
            }
        })
        .map(|e| e.amount)
        .sum()
}

/// Builds the trailing income/expense/net series: exactly `months_back`
/// entries, oldest first, ending at the month containing `today`.
///
/// `today` is injected rather than read from the system clock so results
/// are reproducible.
pub fn generate_series(
    income_streams: &[IncomeStream],
    expenses: &[Expense],
    months_back: u32,
    today: NaiveDate,
) -> Result<Vec<MonthlyCashFlow>> {
    let mut series = Vec::with_capacity(months_back as usize);

    for i in (0..months_back).rev() {
        let month_start = shift_month_start_back(today, i)?;
        let month_end = last_day_of_month(month_start.year(), month_start.month());

        let income = income_for_window(income_streams, month_start, month_end);
        let month_expenses = expenses_for_window(expenses, month_start, month_end);

        series.push(MonthlyCashFlow {
            month: month_start.format("%b").to_string(),
            income: round_money(income),
            expenses: round_money(month_expenses),
            net_cash_flow: round_money(income - month_expenses),
        });
    }

    Ok(series)
}

/// Net recurring cash flow as of the single instant `today`: income streams
/// active on that day and recurring expenses that have started by then.
pub fn current_cash_flow(
    income_streams: &[IncomeStream],
    expenses: &[Expense],
    today: NaiveDate,
) -> CashFlowSummary {
    let income: Decimal = income_streams
        .iter()
        .filter(|s| s.is_recurring && stream_active_in_window(s, today, today))
        .map(|s| monthly_equivalent(s.amount, s.frequency))
        .sum();

    let month_expenses: Decimal = expenses
        .iter()
        .filter(|e| e.recurring && e.date <= today)
        .map(|e| e.amount)
        .sum();

    CashFlowSummary {
        income: round_money(income),
        expenses: round_money(month_expenses),
        net_cash_flow: round_money(income - month_expenses),
    }
}
