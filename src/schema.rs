use chrono::NaiveDate;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Frequency {
    #[schemars(description = "The nominal amount is received once per calendar month")]
    Monthly,

    #[schemars(description = "The nominal amount is received once per quarter (normalized to amount/3 per month)")]
    Quarterly,

    #[schemars(description = "The nominal amount is received once per year (normalized to amount/12 per month)")]
    Annually,

    #[schemars(description = "A single occurrence; contributes nothing to recurring monthly cash flow")]
    OneTime,

    #[serde(other)]
    #[schemars(
        description = "Any unrecognized frequency tag. Normalizes to a zero monthly equivalent rather than failing."
    )]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStream {
    #[schemars(description = "Display name of the income stream (e.g. 'Unit A rent', 'Parking')")]
    pub name: String,

    #[schemars(description = "Nominal amount received per frequency period. Must be positive; validation is the caller's responsibility.")]
    pub amount: Decimal,

    #[schemars(description = "How often the nominal amount is received")]
    pub frequency: Frequency,

    #[schemars(description = "Date the stream becomes active (inclusive)")]
    pub start_date: NaiveDate,

    #[schemars(description = "Date the stream stops being active (inclusive). Absent means ongoing/indefinite.")]
    pub end_date: Option<NaiveDate>,

    #[schemars(description = "Only recurring streams contribute to monthly-equivalent cash flow")]
    pub is_recurring: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    #[schemars(description = "Single-occurrence amount. For recurring expenses this full amount counts toward every month from the start date onward.")]
    pub amount: Decimal,

    #[schemars(description = "Date of occurrence for one-time expenses, or the 'recurring from' date for recurring ones. Expenses have no end date.")]
    pub date: NaiveDate,

    pub recurring: bool,

    #[serde(default)]
    #[schemars(description = "Optional category tag (maintenance, tax, insurance, ...). Informational only.")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Mortgage {
    pub lender: String,

    #[schemars(description = "Principal at origination")]
    pub original_amount: Decimal,

    #[schemars(description = "Outstanding balance as of the snapshot")]
    pub current_balance: Decimal,

    #[schemars(description = "Annual interest rate in percent (0-100)")]
    pub interest_rate: Decimal,

    pub term_months: u32,

    pub start_date: NaiveDate,

    #[schemars(description = "Treated as an always-recurring monthly expense in cash-flow aggregation")]
    pub monthly_payment: Decimal,
}

/// One property with all the cash records attached to it, as handed over by
/// the storage layer. The engine reads this; it never writes back.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertySnapshot {
    #[schemars(description = "Stable property identifier; used to key the per-property metrics map")]
    pub id: String,

    pub name: String,

    #[schemars(description = "Current market value")]
    pub current_value: Decimal,

    #[schemars(description = "Purchase price basis")]
    pub cost_basis: Decimal,

    pub purchase_date: NaiveDate,

    #[serde(default)]
    pub income_streams: Vec<IncomeStream>,

    #[serde(default)]
    pub expenses: Vec<Expense>,

    #[serde(default)]
    pub mortgages: Vec<Mortgage>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshot {
    #[schemars(description = "All properties belonging to one investor")]
    pub properties: Vec<PropertySnapshot>,
}

impl PortfolioSnapshot {
    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(PortfolioSnapshot)
    }

    pub fn schema_as_json() -> Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_schema_generation() {
        let schema_json = PortfolioSnapshot::schema_as_json().unwrap();
        assert!(schema_json.contains("properties"));
        assert!(schema_json.contains("incomeStreams"));
        assert!(schema_json.contains("mortgages"));
    }

    #[test]
    fn test_frequency_wire_format() {
        let freq: Frequency = serde_json::from_str("\"QUARTERLY\"").unwrap();
        assert_eq!(freq, Frequency::Quarterly);

        let freq: Frequency = serde_json::from_str("\"ONE_TIME\"").unwrap();
        assert_eq!(freq, Frequency::OneTime);

        // Anything the storage layer sends that we don't recognize maps to
        // Unknown instead of failing deserialization.
        let freq: Frequency = serde_json::from_str("\"BIWEEKLY\"").unwrap();
        assert_eq!(freq, Frequency::Unknown);
    }

    #[test]
    fn test_property_round_trip() {
        let property = PropertySnapshot {
            id: "prop-1".to_string(),
            name: "Maple Street Duplex".to_string(),
            current_value: dec!(450000),
            cost_basis: dec!(380000),
            purchase_date: NaiveDate::from_ymd_opt(2020, 4, 1).unwrap(),
            income_streams: vec![IncomeStream {
                name: "Rent".to_string(),
                amount: dec!(2800),
                frequency: Frequency::Monthly,
                start_date: NaiveDate::from_ymd_opt(2020, 4, 1).unwrap(),
                end_date: None,
                is_recurring: true,
            }],
            expenses: vec![],
            mortgages: vec![],
        };

        let json = serde_json::to_string_pretty(&property).unwrap();
        assert!(json.contains("Maple Street Duplex"));
        assert!(json.contains("startDate"));

        let deserialized: PropertySnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.id, "prop-1");
        assert_eq!(deserialized.income_streams.len(), 1);
    }

    #[test]
    fn test_missing_collections_default_empty() {
        let json = r#"{
            "id": "prop-2",
            "name": "Bare Lot",
            "currentValue": "50000",
            "costBasis": "45000",
            "purchaseDate": "2023-01-15"
        }"#;

        let property: PropertySnapshot = serde_json::from_str(json).unwrap();
        assert!(property.income_streams.is_empty());
        assert!(property.expenses.is_empty());
        assert!(property.mortgages.is_empty());
    }
}
