use crate::types::*;

/// A patient's financial position, derived from the treatment-record and
/// payment lists fetched from the backend.  Pure arithmetic over the
/// in-memory lists; safe to recompute after every fetch.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BalanceSummary {
    pub executed: Amount,
    pub paid: Amount,
    pub credit: Amount,
    pub deficit: Amount,
}

impl BalanceSummary {
    pub fn compute(
        records: &[TreatmentRecord],
        payments: &[Payment],
        budget_filter: Option<&Budget>,
    ) -> BalanceSummary {
        let mut executed = Amount::zero();
        for record in records {
            if record.status == TreatmentStatus::Completed
                && record_matches_filter(record, budget_filter)
            {
                executed += record.price;
            }
        }
        let mut paid = Amount::zero();
        for payment in payments {
            if payment_matches_filter(payment, budget_filter) {
                paid += payment.normalized_amount();
            }
        }
        let balance = paid - executed;
        let (credit, deficit) = if balance >= Amount::zero() {
            (balance, Amount::zero())
        } else {
            (Amount::zero(), -balance)
        };
        BalanceSummary {
            executed,
            paid,
            credit,
            deficit,
        }
    }
}

fn record_matches_filter(record: &TreatmentRecord, budget_filter: Option<&Budget>) -> bool {
    let budget = match budget_filter {
        None => return true,
        Some(budget) => budget,
    };
    match record.budget_line_id {
        Some(line_id) => budget.lines.iter().any(|line| line.id == line_id),
        // Records that predate line-level linkage carry only a budget id
        // and a free-text treatment name.
        None => {
            record.budget_id == Some(budget.id)
                && budget
                    .lines
                    .iter()
                    .any(|line| line.treatment_name == record.treatment_name)
        }
    }
}

fn payment_matches_filter(payment: &Payment, budget_filter: Option<&Budget>) -> bool {
    match budget_filter {
        None => true,
        Some(budget) => payment.budget_id == Some(budget.id),
    }
}
