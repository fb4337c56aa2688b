use crate::cash_flow::{current_cash_flow, CashFlowSummary};
use crate::error::Result;
use crate::metrics::{portfolio_metrics, portfolio_summary, PortfolioSummary, PropertyMetrics};
use crate::schema::{PortfolioSnapshot, PropertySnapshot};
use crate::utils::round_money;
use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One line of the report's property table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyReportRow {
    pub id: String,
    pub name: String,
    pub current_value: Decimal,
    pub cost_basis: Decimal,
    pub appreciation: Decimal,
    pub appreciation_pct: Decimal,
    pub mortgage_debt: Decimal,
    pub equity: Decimal,
}

/// The in-memory portfolio document handed to the exporter. Display values
/// are rounded here; the underlying metrics stay at full precision.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioReport {
    pub generated_on: NaiveDate,
    pub property_count: usize,
    pub summary: PortfolioSummary,
    pub appreciation_pct: Decimal,
    pub current_cash_flow: CashFlowSummary,
    pub monthly_mortgage_payments: Decimal,
    pub net_monthly_cash_flow: Decimal,
    pub properties: Vec<PropertyReportRow>,
    pub metrics: BTreeMap<String, PropertyMetrics>,
}

fn property_row(property: &PropertySnapshot) -> PropertyReportRow {
    let mortgage_debt: Decimal = property.mortgages.iter().map(|m| m.current_balance).sum();
    let appreciation = property.current_value - property.cost_basis;
    let appreciation_pct = if property.cost_basis > Decimal::ZERO {
        round_money(appreciation / property.cost_basis * dec!(100))
    } else {
        Decimal::ZERO
    };

    PropertyReportRow {
        id: property.id.clone(),
        name: property.name.clone(),
        current_value: property.current_value,
        cost_basis: property.cost_basis,
        appreciation,
        appreciation_pct,
        mortgage_debt,
        equity: property.current_value - mortgage_debt,
    }
}

pub fn build_report(portfolio: &PortfolioSnapshot, today: NaiveDate) -> PortfolioReport {
    debug!(
        "Building portfolio report for {} properties as of {}",
        portfolio.properties.len(),
        today
    );

    let summary = portfolio_summary(portfolio, today);
    let metrics = portfolio_metrics(portfolio);

    // Cash flow across all properties: the report treats the investor's
    // records as one pooled ledger.
    let all_income: Vec<_> = portfolio
        .properties
        .iter()
        .flat_map(|p| p.income_streams.iter().cloned())
        .collect();
    let all_expenses: Vec<_> = portfolio
        .properties
        .iter()
        .flat_map(|p| p.expenses.iter().cloned())
        .collect();
    let cash_flow = current_cash_flow(&all_income, &all_expenses, today);

    let monthly_mortgage_payments: Decimal = portfolio
        .properties
        .iter()
        .flat_map(|p| p.mortgages.iter())
        .map(|m| m.monthly_payment)
        .sum();

    let appreciation_pct = if summary.total_cost_basis > Decimal::ZERO {
        round_money(summary.property_appreciation / summary.total_cost_basis * dec!(100))
    } else {
        Decimal::ZERO
    };

    PortfolioReport {
        generated_on: today,
        property_count: portfolio.properties.len(),
        appreciation_pct,
        net_monthly_cash_flow: round_money(cash_flow.net_cash_flow - monthly_mortgage_payments),
        monthly_mortgage_payments: round_money(monthly_mortgage_payments),
        current_cash_flow: cash_flow,
        properties: portfolio.properties.iter().map(property_row).collect(),
        metrics,
        summary,
    }
}

impl PortfolioReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Expense, Frequency, IncomeStream, Mortgage};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_portfolio() -> PortfolioSnapshot {
        PortfolioSnapshot {
            properties: vec![PropertySnapshot {
                id: "prop-1".to_string(),
                name: "Maple Street Duplex".to_string(),
                current_value: dec!(450000),
                cost_basis: dec!(380000),
                purchase_date: date(2020, 4, 1),
                income_streams: vec![IncomeStream {
                    name: "Rent".to_string(),
                    amount: dec!(2800),
                    frequency: Frequency::Monthly,
                    start_date: date(2020, 4, 1),
                    end_date: None,
                    is_recurring: true,
                }],
                expenses: vec![Expense {
                    amount: dec!(900),
                    date: date(2020, 4, 1),
                    recurring: true,
                    category: Some("management".to_string()),
                }],
                mortgages: vec![Mortgage {
                    lender: "First Bank".to_string(),
                    original_amount: dec!(304000),
                    current_balance: dec!(285000),
                    interest_rate: dec!(6.5),
                    term_months: 360,
                    start_date: date(2020, 4, 1),
                    monthly_payment: dec!(1850),
                }],
            }],
        }
    }

    #[test]
    fn test_report_rows_match_route_formulas() {
        let report = build_report(&sample_portfolio(), date(2024, 6, 15));

        assert_eq!(report.property_count, 1);
        let row = &report.properties[0];
        assert_eq!(row.appreciation, dec!(70000));
        assert_eq!(row.mortgage_debt, dec!(285000));
        assert_eq!(row.equity, dec!(165000));
        // 70000 / 380000 * 100 = 18.421...
        assert_eq!(row.appreciation_pct, dec!(18.42));
    }

    #[test]
    fn test_report_cash_flow_block() {
        let report = build_report(&sample_portfolio(), date(2024, 6, 15));

        assert_eq!(report.current_cash_flow.income, dec!(2800.00));
        assert_eq!(report.current_cash_flow.expenses, dec!(900.00));
        assert_eq!(report.monthly_mortgage_payments, dec!(1850.00));
        // 2800 - 900 - 1850
        assert_eq!(report.net_monthly_cash_flow, dec!(50.00));
    }

    #[test]
    fn test_report_includes_metrics_map() {
        let report = build_report(&sample_portfolio(), date(2024, 6, 15));
        let metrics = report.metrics.get("prop-1").unwrap();
        assert_eq!(metrics.noi, dec!(22800));
    }

    #[test]
    fn test_empty_portfolio_report() {
        let portfolio = PortfolioSnapshot { properties: vec![] };
        let report = build_report(&portfolio, date(2024, 6, 15));

        assert_eq!(report.property_count, 0);
        assert_eq!(report.appreciation_pct, dec!(0));
        assert_eq!(report.net_monthly_cash_flow, dec!(0));
        assert!(report.properties.is_empty());
        assert!(report.metrics.is_empty());
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = build_report(&sample_portfolio(), date(2024, 6, 15));
        let json = report.to_json().unwrap();
        assert!(json.contains("Maple Street Duplex"));
        assert!(json.contains("generatedOn"));
        assert!(json.contains("netMonthlyCashFlow"));
    }
}
