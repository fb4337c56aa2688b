use crate::schema::Frequency;
use log::warn;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Converts a nominal per-period amount into its monthly-equivalent value.
///
/// Total over all frequency values: Monthly passes through, Quarterly and
/// Annually are amortized, OneTime contributes nothing to recurring monthly
/// cash flow. An Unknown frequency normalizes to zero as well; that case is
/// logged since it means the storage layer sent a tag we don't recognize.
pub fn monthly_equivalent(amount: Decimal, frequency: Frequency) -> Decimal {
    match frequency {
        Frequency::Monthly => amount,
        Frequency::Quarterly => amount / dec!(3),
        Frequency::Annually => amount / dec!(12),
        Frequency::OneTime => Decimal::ZERO,
        Frequency::Unknown => {
            warn!("Unknown income frequency encountered; treating monthly equivalent as 0");
            Decimal::ZERO
        }
    }
}
