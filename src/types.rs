use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::ops;

pub use rust_decimal::prelude::Zero;

/// Local-currency monetary amount at milliunit (scale 3) precision.
///
/// Amounts are accumulated at full scale-3 precision; rounding to the
/// currency's display decimals happens only in the report formatter.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct Amount(Decimal);

#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct ExchangeRate(Decimal);

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct PatientId(pub i64);

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct BudgetId(pub i64);

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct BudgetLineId(pub i64);

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TransferReference(pub String);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TreatmentStatus {
    Pending,
    Completed,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PaymentCurrency {
    Local,
    Foreign { exchange_rate: ExchangeRate },
}

/// A "historia clínica" entry: a treatment performed or scheduled for a
/// patient, optionally tied to a budget line.  Older records predate
/// line-level linkage and carry only a budget id plus the treatment name.
#[derive(Clone, Debug)]
pub struct TreatmentRecord {
    pub budget_id: Option<BudgetId>,
    pub budget_line_id: Option<BudgetLineId>,
    pub treatment_name: String,
    pub status: TreatmentStatus,
    pub price: Amount,
    pub performed_date: Option<NaiveDate>,
}

#[derive(Clone, Debug)]
pub struct Payment {
    pub budget_id: Option<BudgetId>,
    pub amount: Amount,
    pub currency: PaymentCurrency,
    pub paid_date: Option<NaiveDate>,
}

/// A patient's priced treatment plan ("proforma"), composed of line items.
/// Read-only from this tool's point of view.
#[derive(Clone, Debug)]
pub struct Budget {
    pub id: BudgetId,
    pub number: i64,
    pub total: Amount,
    pub lines: Vec<BudgetLine>,
}

#[derive(Clone, Debug)]
pub struct BudgetLine {
    pub id: BudgetLineId,
    pub treatment_name: String,
    pub price: Amount,
}

impl Amount {
    const SCALE: u32 = 3;

    pub fn from_scaled_i64(value: i64) -> Amount {
        Amount(Decimal::new(value, Self::SCALE))
    }

    pub fn to_scaled_i64(self) -> i64 {
        assert!(
            self.0.scale() == Self::SCALE,
            "Amount Decimal scale should be {}, but is {}",
            Self::SCALE,
            self.0.scale()
        );
        let mut result = self.0;
        result
            .set_scale(0)
            .expect("Amount Decimal scale should be settable to 0");
        result
            .to_i64()
            .expect("Amount Decimal should be convertible to i64")
    }

    pub fn from_decimal(value: Decimal) -> Amount {
        let mut result =
            value.round_dp_with_strategy(Self::SCALE, RoundingStrategy::BankersRounding);
        let pad = Self::SCALE - result.scale();
        if pad > 0 {
            result *= Decimal::new(10i64.pow(pad), 0);
            result
                .set_scale(Self::SCALE)
                .unwrap_or_else(|_| panic!("Amount scale should be settable to {}", Self::SCALE));
        }
        Amount(result)
    }

    pub fn to_decimal(self) -> Decimal {
        self.0
    }

    pub fn convert_currency(self, exchange_rate: ExchangeRate) -> Amount {
        Amount::from_decimal(
            (self.0 * exchange_rate.0)
                .round_dp_with_strategy(Self::SCALE, RoundingStrategy::BankersRounding),
        )
    }

    pub fn abs(&self) -> Amount {
        let result = Amount(self.0.abs());
        assert_eq!(result.0.scale(), Self::SCALE);
        result
    }
}

impl ops::Add for Amount {
    type Output = Amount;
    fn add(self, other: Amount) -> Amount {
        let result = Amount(self.0 + other.0);
        assert_eq!(result.0.scale(), Self::SCALE);
        result
    }
}

impl ops::AddAssign for Amount {
    fn add_assign(&mut self, other: Amount) {
        self.0 += other.0;
        assert_eq!(self.0.scale(), Self::SCALE);
    }
}

impl ops::Sub for Amount {
    type Output = Amount;
    fn sub(self, other: Amount) -> Amount {
        let result = Amount(self.0 - other.0);
        assert_eq!(result.0.scale(), Self::SCALE);
        result
    }
}

impl ops::SubAssign for Amount {
    fn sub_assign(&mut self, other: Amount) {
        self.0 -= other.0;
        assert_eq!(self.0.scale(), Self::SCALE);
    }
}

impl ops::Neg for Amount {
    type Output = Amount;
    fn neg(self) -> Amount {
        let result = Amount(self.0.neg());
        assert_eq!(result.0.scale(), Self::SCALE);
        result
    }
}

impl Zero for Amount {
    fn zero() -> Amount {
        Amount::from_scaled_i64(0)
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl ExchangeRate {
    const SCALE: u32 = 6;

    pub fn from_scaled_i64(value: i64) -> ExchangeRate {
        ExchangeRate(Decimal::new(value, Self::SCALE))
    }

    pub fn from_decimal(value: Decimal) -> ExchangeRate {
        let mut result =
            value.round_dp_with_strategy(Self::SCALE, RoundingStrategy::BankersRounding);
        let pad = Self::SCALE - result.scale();
        if pad > 0 {
            result *= Decimal::new(10i64.pow(pad), 0);
            result.set_scale(Self::SCALE).unwrap_or_else(|_| {
                panic!("ExchangeRate scale should be settable to {}", Self::SCALE)
            });
        }
        ExchangeRate(result)
    }

    pub fn to_decimal(self) -> Decimal {
        self.0
    }
}

impl Payment {
    /// The payment's contribution to local-currency totals.  Foreign
    /// payments use the exchange rate captured when the payment was
    /// recorded; it is never recomputed.
    pub fn normalized_amount(&self) -> Amount {
        match self.currency {
            PaymentCurrency::Local => self.amount,
            PaymentCurrency::Foreign { exchange_rate } => {
                self.amount.convert_currency(exchange_rate)
            }
        }
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for BudgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for BudgetLineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for TransferReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_from_to_scaled_i64() {
        assert_eq!(Amount::from_scaled_i64(12_345).to_scaled_i64(), 12_345);
    }

    #[test]
    fn test_amount_from_decimal_pads_scale() {
        assert_eq!(
            Amount::from_decimal(Decimal::new(100, 0)),
            Amount::from_scaled_i64(100_000)
        );
        assert_eq!(
            Amount::from_decimal(Decimal::new(10_005, 3)),
            Amount::from_scaled_i64(10_005)
        );
    }

    #[test]
    fn test_amount_convert_currency() {
        assert_eq!(
            Amount::from_scaled_i64(12_345)
                .convert_currency(ExchangeRate::from_scaled_i64(1_234_567)),
            Amount::from_scaled_i64(15_241)
        )
    }

    #[test]
    fn test_amount_convert_currency_exact() {
        // 100 at rate 6.96 is exactly 696.
        assert_eq!(
            Amount::from_decimal(Decimal::new(100, 0))
                .convert_currency(ExchangeRate::from_scaled_i64(6_960_000)),
            Amount::from_scaled_i64(696_000)
        )
    }

    #[test]
    fn test_exchange_rate_from_decimal() {
        assert_eq!(
            ExchangeRate::from_decimal(Decimal::new(696, 2)),
            ExchangeRate::from_scaled_i64(6_960_000)
        );
    }

    #[test]
    fn test_payment_normalized_amount() {
        let local = Payment {
            budget_id: None,
            amount: Amount::from_scaled_i64(100_000),
            currency: PaymentCurrency::Local,
            paid_date: None,
        };
        assert_eq!(local.normalized_amount(), Amount::from_scaled_i64(100_000));
        let foreign = Payment {
            budget_id: None,
            amount: Amount::from_scaled_i64(100_000),
            currency: PaymentCurrency::Foreign {
                exchange_rate: ExchangeRate::from_scaled_i64(6_960_000),
            },
            paid_date: None,
        };
        assert_eq!(
            foreign.normalized_amount(),
            Amount::from_scaled_i64(696_000)
        );
    }
}
