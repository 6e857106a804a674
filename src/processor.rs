use log::debug;
use rust_decimal::Decimal;

use crate::balance::*;
use crate::clinic_client::*;
use crate::current_user::*;
use crate::dto::*;
use crate::errors::*;
use crate::report_formatter::*;
use crate::transfer::*;
use crate::transfer_reference::*;
use crate::types::*;
use crate::utilities::*;

pub struct BalanceProcessor<'a> {
    client: &'a ClinicClient,
    formatter: &'a ReportFormatter,
    current_user: &'a CurrentUserContext,
    reference_generator: TransferReferenceGenerator,
    dry_run: bool,
}

#[derive(Debug)]
pub struct RunOptions {
    pub patient: PatientId,
    pub budget_number: Option<i64>,
    pub transfer: Option<TransferOptions>,
}

#[derive(Debug)]
pub struct TransferOptions {
    pub target_patient: PatientId,
    pub target_budget_number: Option<i64>,
    pub amount: Decimal,
}

impl<'a> BalanceProcessor<'a> {
    pub fn run(
        client: &'a ClinicClient,
        formatter: &'a ReportFormatter,
        current_user: &'a CurrentUserContext,
        dry_run: bool,
        options: RunOptions,
    ) -> Result<()> {
        BalanceProcessor {
            client,
            formatter,
            current_user,
            reference_generator: TransferReferenceGenerator::new(),
            dry_run,
        }
        .process(options)
    }

    fn process(&self, options: RunOptions) -> Result<()> {
        println!("Loading budgets for patient {}...", options.patient);
        let budgets = self.client.get_budgets(options.patient)?;
        debug!("Budgets received from backend: {:#?}", &budgets);
        let budget_filter = match options.budget_number {
            None => None,
            Some(number) => Some(resolve_budget(&budgets, options.patient, number)?),
        };

        let (records, payments) = self.load_patient_data(options.patient)?;
        let summary = BalanceSummary::compute(&records, &payments, budget_filter);
        self.print_summary(
            "Balance",
            options.patient,
            budget_filter,
            records.len(),
            payments.len(),
            &summary,
        );

        match options.transfer {
            None => Ok(()),
            Some(transfer_options) => {
                self.process_transfer(options.patient, budget_filter, transfer_options, &summary)
            }
        }
    }

    fn process_transfer(
        &self,
        source_patient: PatientId,
        source_budget: Option<&Budget>,
        options: TransferOptions,
        summary: &BalanceSummary,
    ) -> Result<()> {
        let target_budget = match options.target_budget_number {
            None => None,
            Some(number) => {
                println!(
                    "Loading budgets for target patient {}...",
                    options.target_patient
                );
                let target_budgets = self.client.get_budgets(options.target_patient)?;
                debug!("Target budgets received from backend: {:#?}", &target_budgets);
                Some(resolve_budget(&target_budgets, options.target_patient, number)?.id)
            }
        };
        let plan = TransferPlan {
            source_patient,
            source_budget: source_budget.map(|budget| budget.id),
            target_patient: options.target_patient,
            target_budget,
            amount: Amount::from_decimal(options.amount),
        };
        plan.validate(summary.credit)?;

        if self.dry_run {
            println!(
                "Dry run: would transfer {} from patient {} to patient {}{} (re-run with --yes to send).",
                self.formatter.format_amount(plan.amount),
                plan.source_patient,
                plan.target_patient,
                match target_budget {
                    None => " (general balance)".to_string(),
                    Some(budget_id) => format!(" (budget id {})", budget_id),
                }
            );
            return Ok(());
        }

        let reference = self.reference_generator.next_reference();
        println!("Sending transfer {}...", reference);
        self.client
            .transfer_balance(&TransferRequestDto::new(&plan, reference, self.current_user))?;
        println!("Transfer recorded by backend.");

        // The backend records the transfer opaquely, so the reduced credit
        // only shows up through a fresh fetch.
        println!("Reloading data for patient {}...", source_patient);
        let (records, payments) = self.load_patient_data(source_patient)?;
        let updated = BalanceSummary::compute(&records, &payments, source_budget);
        self.print_summary(
            "Updated balance",
            source_patient,
            source_budget,
            records.len(),
            payments.len(),
            &updated,
        );
        Ok(())
    }

    fn load_patient_data(
        &self,
        patient: PatientId,
    ) -> Result<(Vec<TreatmentRecord>, Vec<Payment>)> {
        println!("Loading treatment records for patient {}...", patient);
        let records = self.client.get_treatment_records(patient)?;
        debug!("Treatment records received from backend: {:#?}", &records);
        println!("Loading payments for patient {}...", patient);
        let payments = self.client.get_payments(patient)?;
        debug!("Payments received from backend: {:#?}", &payments);
        Ok((records, payments))
    }

    fn print_summary(
        &self,
        title: &str,
        patient: PatientId,
        budget_filter: Option<&Budget>,
        record_count: usize,
        payment_count: usize,
        summary: &BalanceSummary,
    ) {
        let scope = match budget_filter {
            None => "all budgets".to_string(),
            Some(budget) => format!(
                "budget #{} ({})",
                budget.number,
                self.formatter.format_amount(budget.total)
            ),
        };
        println!(
            "{} for patient {}, {}, as of {}:",
            title,
            patient,
            scope,
            format_iso_date(chrono::Local::today().naive_local())
        );
        println!(
            "  Executed treatments ({} records): {}",
            record_count,
            self.formatter.format_amount(summary.executed)
        );
        println!(
            "  Payments received ({} payments): {}",
            payment_count,
            self.formatter.format_amount(summary.paid)
        );
        println!(
            "  Credit available: {}",
            self.formatter.format_amount(summary.credit)
        );
        println!(
            "  Deficit: {}",
            self.formatter.format_amount(summary.deficit)
        );
    }
}

fn resolve_budget(budgets: &[Budget], patient: PatientId, number: i64) -> Result<&Budget> {
    match budgets.iter().find(|budget| budget.number == number) {
        Some(budget) => Ok(budget),
        None => bail!("Patient {} has no budget with number {}", patient, number),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_budget_by_display_number() {
        let budgets = vec![
            Budget {
                id: BudgetId(31),
                number: 1,
                total: Amount::zero(),
                lines: vec![],
            },
            Budget {
                id: BudgetId(47),
                number: 2,
                total: Amount::zero(),
                lines: vec![],
            },
        ];
        let resolved = resolve_budget(&budgets, PatientId(1), 2).expect("budget 2 should resolve");
        assert_eq!(resolved.id, BudgetId(47));
        assert!(resolve_budget(&budgets, PatientId(1), 3).is_err());
    }
}
