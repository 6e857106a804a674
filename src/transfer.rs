use crate::errors::*;
use crate::types::*;

/// A requested movement of available credit from one patient/budget pair
/// to another.  `None` budgets address the patient's general balance.
#[derive(Clone, Copy, Debug)]
pub struct TransferPlan {
    pub source_patient: PatientId,
    pub source_budget: Option<BudgetId>,
    pub target_patient: PatientId,
    pub target_budget: Option<BudgetId>,
    pub amount: Amount,
}

impl TransferPlan {
    /// Client-side preconditions.  A plan that fails here is rejected
    /// before any request is sent; the user may correct and resubmit.
    pub fn validate(&self, credit_available: Amount) -> Result<()> {
        ensure!(
            self.target_patient.0 != 0,
            "A target patient must be selected for the transfer"
        );
        ensure!(
            self.amount > Amount::zero(),
            "Transfer amount must be greater than zero"
        );
        ensure!(
            self.amount <= credit_available,
            format!(
                "Transfer amount {} exceeds the available credit {}",
                self.amount.to_decimal(),
                credit_available.to_decimal()
            )
        );
        ensure!(
            (self.source_patient, self.source_budget)
                != (self.target_patient, self.target_budget),
            "Cannot transfer to the same budget of the same patient"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(amount: i64) -> TransferPlan {
        TransferPlan {
            source_patient: PatientId(1),
            source_budget: Some(BudgetId(10)),
            target_patient: PatientId(2),
            target_budget: Some(BudgetId(20)),
            amount: Amount::from_scaled_i64(amount),
        }
    }

    #[test]
    fn test_valid_plan_is_accepted() {
        assert!(plan(300_000)
            .validate(Amount::from_scaled_i64(300_000))
            .is_ok());
    }

    #[test]
    fn test_unset_target_patient_is_rejected() {
        let mut rejected = plan(300_000);
        rejected.target_patient = PatientId(0);
        let err = rejected
            .validate(Amount::from_scaled_i64(300_000))
            .unwrap_err();
        assert!(err.to_string().contains("target patient"));
    }

    #[test]
    fn test_non_positive_amount_is_rejected() {
        let err = plan(0).validate(Amount::from_scaled_i64(300_000)).unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
        let err = plan(-100_000)
            .validate(Amount::from_scaled_i64(300_000))
            .unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn test_amount_exceeding_credit_is_rejected() {
        let err = plan(300_001)
            .validate(Amount::from_scaled_i64(300_000))
            .unwrap_err();
        assert!(err.to_string().contains("exceeds the available credit"));
    }

    #[test]
    fn test_same_patient_and_budget_is_rejected() {
        let mut rejected = plan(100_000);
        rejected.target_patient = rejected.source_patient;
        rejected.target_budget = rejected.source_budget;
        let err = rejected
            .validate(Amount::from_scaled_i64(300_000))
            .unwrap_err();
        assert!(err.to_string().contains("same budget"));
    }

    #[test]
    fn test_same_patient_different_budget_is_accepted() {
        let mut accepted = plan(100_000);
        accepted.target_patient = accepted.source_patient;
        assert!(accepted
            .validate(Amount::from_scaled_i64(300_000))
            .is_ok());
    }
}
