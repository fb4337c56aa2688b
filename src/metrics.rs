use crate::frequency::monthly_equivalent;
use crate::schema::{PortfolioSnapshot, PropertySnapshot};
use crate::utils::months_between;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Yield and financing metrics for a single property.
///
/// Every ratio with a potentially zero denominator resolves to 0 instead of
/// erroring; the engine operates on whatever the storage layer hands it and
/// has no failure path of its own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyMetrics {
    pub monthly_rent: Decimal,
    /// Operating expenses only; mortgage payments are tracked separately.
    pub monthly_expenses: Decimal,
    pub monthly_mortgage_payment: Decimal,
    /// Annualized net operating income, independent of debt service.
    pub noi: Decimal,
    /// NOI over current value, in percent.
    pub cap_rate: Decimal,
    pub total_mortgage_debt: Decimal,
    pub original_loan_amount: Decimal,
    /// Cost basis minus original loans. May be negative when the purchase
    /// was financed beyond basis; left unclamped.
    pub cash_invested: Decimal,
    pub annual_cash_flow: Decimal,
    /// Annual cash flow after debt service over cash invested, in percent.
    pub coc_return: Decimal,
    /// Outstanding mortgage balance over current value, in percent.
    pub ltv: Decimal,
    /// Internal rate of return is not implemented; `None` rather than a
    /// misleading zero.
    pub irr: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total_value: Decimal,
    pub total_cost_basis: Decimal,
    pub total_debt: Decimal,
    pub total_equity: Decimal,
    pub total_original_loans: Decimal,
    /// Lifetime nominal income: whole calendar months each recurring stream
    /// has been active, times its monthly equivalent.
    pub total_income_earned: Decimal,
    pub property_appreciation: Decimal,
    /// Net cash put in across the portfolio: cost basis minus original loans.
    pub money_in: Decimal,
    /// Blends unrealized appreciation with lifetime nominal income over net
    /// cash invested, in percent. Not annualized or time-weighted.
    pub total_roi: Decimal,
}

fn pct_of(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator > Decimal::ZERO {
        numerator / denominator * dec!(100)
    } else {
        Decimal::ZERO
    }
}

pub fn property_metrics(property: &PropertySnapshot) -> PropertyMetrics {
    let monthly_rent: Decimal = property
        .income_streams
        .iter()
        .filter(|s| s.is_recurring)
        .map(|s| monthly_equivalent(s.amount, s.frequency))
        .sum();

    let monthly_expenses: Decimal = property
        .expenses
        .iter()
        .filter(|e| e.recurring)
        .map(|e| e.amount)
        .sum();

    let monthly_mortgage_payment: Decimal =
        property.mortgages.iter().map(|m| m.monthly_payment).sum();

    let total_mortgage_debt: Decimal =
        property.mortgages.iter().map(|m| m.current_balance).sum();

    let original_loan_amount: Decimal =
        property.mortgages.iter().map(|m| m.original_amount).sum();

    let noi = (monthly_rent - monthly_expenses) * dec!(12);
    let cash_invested = property.cost_basis - original_loan_amount;
    let annual_cash_flow = (monthly_rent - monthly_expenses - monthly_mortgage_payment) * dec!(12);

    PropertyMetrics {
        monthly_rent,
        monthly_expenses,
        monthly_mortgage_payment,
        noi,
        cap_rate: pct_of(noi, property.current_value),
        total_mortgage_debt,
        original_loan_amount,
        cash_invested,
        annual_cash_flow,
        coc_return: pct_of(annual_cash_flow, cash_invested),
        ltv: pct_of(total_mortgage_debt, property.current_value),
        irr: None,
    }
}

/// Per-property metrics for every property in the snapshot, keyed by
/// property id.
pub fn portfolio_metrics(portfolio: &PortfolioSnapshot) -> BTreeMap<String, PropertyMetrics> {
    portfolio
        .properties
        .iter()
        .map(|p| (p.id.clone(), property_metrics(p)))
        .collect()
}

/// Lifetime nominal income of one property's streams as of `today`.
fn income_earned(property: &PropertySnapshot, today: NaiveDate) -> Decimal {
    property
        .income_streams
        .iter()
        .filter(|s| s.is_recurring && s.start_date <= today)
        .map(|s| {
            let effective_end = s.end_date.map_or(today, |e| e.min(today));
            let months_active = months_between(s.start_date, effective_end).max(0);
            Decimal::from(months_active) * monthly_equivalent(s.amount, s.frequency)
        })
        .sum()
}

pub fn portfolio_summary(portfolio: &PortfolioSnapshot, today: NaiveDate) -> PortfolioSummary {
    let total_value: Decimal = portfolio.properties.iter().map(|p| p.current_value).sum();
    let total_cost_basis: Decimal = portfolio.properties.iter().map(|p| p.cost_basis).sum();

    let total_debt: Decimal = portfolio
        .properties
        .iter()
        .flat_map(|p| p.mortgages.iter())
        .map(|m| m.current_balance)
        .sum();

    let total_original_loans: Decimal = portfolio
        .properties
        .iter()
        .flat_map(|p| p.mortgages.iter())
        .map(|m| m.original_amount)
        .sum();

    let total_income_earned: Decimal = portfolio
        .properties
        .iter()
        .map(|p| income_earned(p, today))
        .sum();

    let property_appreciation = total_value - total_cost_basis;
    let money_in = total_cost_basis - total_original_loans;

    PortfolioSummary {
        total_value,
        total_cost_basis,
        total_debt,
        total_equity: total_value - total_debt,
        total_original_loans,
        total_income_earned,
        property_appreciation,
        money_in,
        total_roi: pct_of(property_appreciation + total_income_earned, money_in),
    }
}
