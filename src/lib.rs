//! # Portfolio Analytics
//!
//! A library for turning raw ledgers of dated, frequency-tagged cash events
//! into cash-flow projections and investment-performance metrics for
//! real-estate portfolios.
//!
//! ## Core Concepts
//!
//! - **Monthly Equivalent**: any periodic amount (monthly/quarterly/annual)
//!   amortized to a per-month figure so differing frequencies compare on a
//!   common basis
//! - **Cash Flow Series**: a trailing month-by-month income/expense/net view
//!   ending at the evaluation month
//! - **Property Metrics**: NOI, cap rate, cash-on-cash return and
//!   loan-to-value per property
//! - **Portfolio Summary**: equity, appreciation and total ROI across all of
//!   an investor's properties
//!
//! All monetary arithmetic uses `rust_decimal`; 2-decimal rounding is applied
//! only at output boundaries. Every time-sensitive operation takes an explicit
//! `today` so results are reproducible.
//!
//! ## Example
//!
//! ```rust,ignore
//! use portfolio_analytics::*;
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//!
//! let portfolio = PortfolioSnapshot {
//!     properties: vec![PropertySnapshot {
//!         id: "prop-1".to_string(),
//!         name: "Maple Street Duplex".to_string(),
//!         current_value: dec!(450000),
//!         cost_basis: dec!(380000),
//!         purchase_date: NaiveDate::from_ymd_opt(2020, 4, 1).unwrap(),
//!         income_streams: vec![],
//!         expenses: vec![],
//!         mortgages: vec![],
//!     }],
//! };
//!
//! let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
//! let analysis = PortfolioAnalyzer::new(6).analyze(&portfolio, today).unwrap();
//! println!("{}", analysis.report.to_json().unwrap());
//! ```

pub mod cash_flow;
pub mod error;
pub mod frequency;
pub mod metrics;
pub mod report;
pub mod schema;
pub mod utils;

pub use cash_flow::{current_cash_flow, generate_series, CashFlowSummary, MonthlyCashFlow};
pub use error::{PortfolioAnalyticsError, Result};
pub use frequency::monthly_equivalent;
pub use metrics::{
    portfolio_metrics, portfolio_summary, property_metrics, PortfolioSummary, PropertyMetrics,
};
pub use report::{build_report, PortfolioReport, PropertyReportRow};
pub use schema::*;
pub use utils::*;

use chrono::NaiveDate;
use log::{debug, info};
use std::collections::BTreeMap;

/// Everything the presentation layer consumes in one shot: the portfolio
/// report (summary, per-property metrics, current cash flow) plus a trailing
/// cash-flow series per property.
#[derive(Debug, Clone)]
pub struct PortfolioAnalysis {
    pub report: PortfolioReport,
    pub cash_flow_series: BTreeMap<String, Vec<MonthlyCashFlow>>,
}

pub struct PortfolioAnalyzer {
    months_back: u32,
}

impl PortfolioAnalyzer {
    /// `months_back` is the length of the trailing cash-flow series produced
    /// per property.
    pub fn new(months_back: u32) -> Self {
        Self { months_back }
    }

    pub fn analyze(
        &self,
        portfolio: &PortfolioSnapshot,
        today: NaiveDate,
    ) -> Result<PortfolioAnalysis> {
        info!(
            "Analyzing portfolio of {} properties as of {}",
            portfolio.properties.len(),
            today
        );

        let mut cash_flow_series = BTreeMap::new();
        for property in &portfolio.properties {
            debug!(
                "Generating {}-month cash flow series for property {}",
                self.months_back, property.id
            );
            let series = generate_series(
                &property.income_streams,
                &property.expenses,
                self.months_back,
                today,
            )?;
            cash_flow_series.insert(property.id.clone(), series);
        }

        Ok(PortfolioAnalysis {
            report: build_report(portfolio, today),
            cash_flow_series,
        })
    }
}

impl Default for PortfolioAnalyzer {
    fn default() -> Self {
        // Dashboards show the last half year by default.
        Self::new(6)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_analyze_produces_series_per_property() {
        let portfolio = PortfolioSnapshot {
            properties: vec![
                PropertySnapshot {
                    id: "prop-a".to_string(),
                    name: "A".to_string(),
                    current_value: dec!(100000),
                    cost_basis: dec!(90000),
                    purchase_date: date(2020, 1, 1),
                    income_streams: vec![],
                    expenses: vec![],
                    mortgages: vec![],
                },
                PropertySnapshot {
                    id: "prop-b".to_string(),
                    name: "B".to_string(),
                    current_value: dec!(200000),
                    cost_basis: dec!(150000),
                    purchase_date: date(2021, 1, 1),
                    income_streams: vec![],
                    expenses: vec![],
                    mortgages: vec![],
                },
            ],
        };

        let analysis = PortfolioAnalyzer::new(6)
            .analyze(&portfolio, date(2024, 6, 15))
            .unwrap();

        assert_eq!(analysis.cash_flow_series.len(), 2);
        assert_eq!(analysis.cash_flow_series["prop-a"].len(), 6);
        assert_eq!(analysis.report.property_count, 2);
        assert_eq!(analysis.report.summary.total_value, dec!(300000));
    }

    #[test]
    fn test_analyze_empty_portfolio() {
        let portfolio = PortfolioSnapshot { properties: vec![] };
        let analysis = PortfolioAnalyzer::default()
            .analyze(&portfolio, date(2024, 6, 15))
            .unwrap();

        assert!(analysis.cash_flow_series.is_empty());
        assert_eq!(analysis.report.summary.total_roi, dec!(0));
    }
}
