use rust_decimal::RoundingStrategy;

use crate::constants::*;
use crate::types::*;

/// Formats amounts for the balance report.  Totals are accumulated at full
/// precision elsewhere; the rounding to display decimals happens here and
/// nowhere else.
#[derive(Debug)]
pub struct ReportFormatter {
    currency_symbol: String,
}

impl ReportFormatter {
    pub fn new(currency_symbol: &str) -> ReportFormatter {
        ReportFormatter {
            currency_symbol: currency_symbol.to_string(),
        }
    }

    pub fn format_amount(&self, amount: Amount) -> String {
        let rounded = amount.to_decimal().round_dp_with_strategy(
            DISPLAY_DECIMAL_DIGITS,
            RoundingStrategy::BankersRounding,
        );
        let formatted = format!("{:.*}", DISPLAY_DECIMAL_DIGITS as usize, rounded.abs());
        if rounded.is_sign_negative() && !rounded.is_zero() {
            format!("-{} {}", self.currency_symbol, formatted)
        } else {
            format!("{} {}", self.currency_symbol, formatted)
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_format_amount_rounds_at_display_only() {
        let formatter = ReportFormatter::new(DEFAULT_CURRENCY_SYMBOL);
        // 10.005 + 10.005 accumulates to 20.010 and displays as 20.01.
        let total = Amount::from_decimal(Decimal::new(10_005, 3))
            + Amount::from_decimal(Decimal::new(10_005, 3));
        assert_eq!(formatter.format_amount(total), "Bs 20.01");
    }

    #[test]
    fn test_format_amount_negative() {
        let formatter = ReportFormatter::new(DEFAULT_CURRENCY_SYMBOL);
        assert_eq!(
            formatter.format_amount(Amount::from_scaled_i64(-12_345)),
            "-Bs 12.34"
        );
    }
}
