//! Fetch-boundary DTOs.  The backend's responses have a dynamic shape
//! (optional/partial fields, and endpoints answer either a paginated
//! envelope or a raw array), so everything is normalized into the
//! canonical entities of `types` immediately after deserialization and
//! the rest of the crate never branches on response shape.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::current_user::*;
use crate::transfer::*;
use crate::types::*;
use crate::utilities::*;

/// Endpoints answer either `{"data": [...], "total": n}` or a bare array.
/// The envelope's pagination bookkeeping is irrelevant here; only the items
/// survive the boundary.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Paginated { data: Vec<T> },
    Raw(Vec<T>),
}

impl<T> ListResponse<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListResponse::Paginated { data } => data,
            ListResponse::Raw(items) => items,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentRecordDto {
    #[serde(default)]
    pub budget_id: Option<i64>,
    #[serde(default)]
    pub budget_line_id: Option<i64>,
    #[serde(default)]
    pub treatment_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDto {
    #[serde(default)]
    pub budget_id: Option<i64>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub exchange_rate: Option<Decimal>,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetDto {
    pub id: i64,
    pub number: i64,
    #[serde(default)]
    pub total: Option<Decimal>,
    #[serde(default)]
    pub lines: Option<Vec<BudgetLineDto>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetLineDto {
    pub id: i64,
    #[serde(default)]
    pub treatment_name: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequestDto {
    pub source_patient_id: i64,
    pub source_budget_id: Option<i64>,
    pub target_patient_id: i64,
    pub target_budget_id: Option<i64>,
    pub amount: Decimal,
    pub reference: String,
    pub actor_id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferResponseDto {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl TreatmentRecordDto {
    /// Missing price is zero (conservative total, never an error); unknown
    /// status strings count as pending so they are never summed as executed.
    pub fn normalize(self) -> TreatmentRecord {
        TreatmentRecord {
            budget_id: self.budget_id.map(BudgetId),
            budget_line_id: self.budget_line_id.map(BudgetLineId),
            treatment_name: self.treatment_name.unwrap_or_default(),
            status: match self.status {
                Some(ref status) if status.eq_ignore_ascii_case("completed") => {
                    TreatmentStatus::Completed
                }
                _ => TreatmentStatus::Pending,
            },
            price: Amount::from_decimal(self.price.unwrap_or_else(Decimal::zero)),
            performed_date: self.date.as_deref().and_then(|d| parse_iso_date(d).ok()),
        }
    }
}

impl PaymentDto {
    /// A missing or "local" currency marker means local currency; anything
    /// else is foreign.  A foreign payment without a captured exchange rate
    /// contributes zero rather than failing.
    pub fn normalize(self) -> Payment {
        let currency = match self.currency {
            None => PaymentCurrency::Local,
            Some(ref marker) if marker.eq_ignore_ascii_case("local") => PaymentCurrency::Local,
            Some(_) => PaymentCurrency::Foreign {
                exchange_rate: ExchangeRate::from_decimal(
                    self.exchange_rate.unwrap_or_else(Decimal::zero),
                ),
            },
        };
        Payment {
            budget_id: self.budget_id.map(BudgetId),
            amount: Amount::from_decimal(self.amount.unwrap_or_else(Decimal::zero)),
            currency,
            paid_date: self.date.as_deref().and_then(|d| parse_iso_date(d).ok()),
        }
    }
}

impl BudgetDto {
    pub fn normalize(self) -> Budget {
        Budget {
            id: BudgetId(self.id),
            number: self.number,
            total: Amount::from_decimal(self.total.unwrap_or_else(Decimal::zero)),
            lines: self
                .lines
                .unwrap_or_default()
                .into_iter()
                .map(BudgetLineDto::normalize)
                .collect(),
        }
    }
}

impl BudgetLineDto {
    fn normalize(self) -> BudgetLine {
        BudgetLine {
            id: BudgetLineId(self.id),
            treatment_name: self.treatment_name.unwrap_or_default(),
            price: Amount::from_decimal(self.price.unwrap_or_else(Decimal::zero)),
        }
    }
}

impl TransferRequestDto {
    pub fn new(
        plan: &TransferPlan,
        reference: TransferReference,
        current_user: &CurrentUserContext,
    ) -> TransferRequestDto {
        TransferRequestDto {
            source_patient_id: plan.source_patient.0,
            source_budget_id: plan.source_budget.map(|budget_id| budget_id.0),
            target_patient_id: plan.target_patient.0,
            target_budget_id: plan.target_budget.map(|budget_id| budget_id.0),
            amount: plan.amount.to_decimal(),
            reference: reference.0,
            actor_id: current_user.actor_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_response_paginated_envelope() {
        let response: ListResponse<PaymentDto> =
            serde_json::from_str(r#"{"data": [{"amount": 100}], "total": 1}"#)
                .expect("paginated envelope should deserialize");
        assert_eq!(response.into_items().len(), 1);
    }

    #[test]
    fn test_list_response_raw_array() {
        let response: ListResponse<PaymentDto> = serde_json::from_str(r#"[{"amount": 100}]"#)
            .expect("raw array should deserialize");
        assert_eq!(response.into_items().len(), 1);
    }

    #[test]
    fn test_treatment_record_missing_price_is_zero() {
        let dto: TreatmentRecordDto =
            serde_json::from_str(r#"{"budgetId": 7, "treatmentName": "Cleaning"}"#)
                .expect("partial record should deserialize");
        let record = dto.normalize();
        assert_eq!(record.price, Amount::from_scaled_i64(0));
        assert_eq!(record.status, TreatmentStatus::Pending);
        assert_eq!(record.budget_id, Some(BudgetId(7)));
        assert_eq!(record.budget_line_id, None);
    }

    #[test]
    fn test_treatment_record_completed_status() {
        let dto: TreatmentRecordDto =
            serde_json::from_str(r#"{"status": "Completed", "price": 500}"#)
                .expect("record should deserialize");
        let record = dto.normalize();
        assert_eq!(record.status, TreatmentStatus::Completed);
        assert_eq!(record.price, Amount::from_scaled_i64(500_000));
    }

    #[test]
    fn test_payment_foreign_currency() {
        let dto: PaymentDto =
            serde_json::from_str(r#"{"amount": 100, "currency": "USD", "exchangeRate": 6.96}"#)
                .expect("payment should deserialize");
        let payment = dto.normalize();
        assert_eq!(
            payment.normalized_amount(),
            Amount::from_scaled_i64(696_000)
        );
    }

    #[test]
    fn test_payment_foreign_without_rate_contributes_zero() {
        let dto: PaymentDto = serde_json::from_str(r#"{"amount": 100, "currency": "USD"}"#)
            .expect("payment should deserialize");
        assert_eq!(
            dto.normalize().normalized_amount(),
            Amount::from_scaled_i64(0)
        );
    }

    #[test]
    fn test_budget_without_lines() {
        let dto: BudgetDto = serde_json::from_str(r#"{"id": 3, "number": 12}"#)
            .expect("budget should deserialize");
        let budget = dto.normalize();
        assert_eq!(budget.id, BudgetId(3));
        assert_eq!(budget.number, 12);
        assert!(budget.lines.is_empty());
    }
}
