use log::debug;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

use crate::constants::*;
use crate::dto::*;
use crate::errors::*;
use crate::types::*;

/// Thin consumer of the clinic's REST backend.  Timeouts and TLS are the
/// HTTP client's concern; nothing here retries or de-duplicates requests.
pub struct ClinicClient {
    http_client: reqwest::Client,
    base_url: String,
    api_token: String,
}

impl ClinicClient {
    pub fn new(base_url: &str, api_token: &str) -> ClinicClient {
        ClinicClient {
            http_client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token: api_token.to_string(),
        }
    }

    pub fn get_treatment_records(&self, patient: PatientId) -> Result<Vec<TreatmentRecord>> {
        let dtos: ListResponse<TreatmentRecordDto> = self
            .get_patient_list(TREATMENT_RECORDS_PATH, patient)
            .chain_err(|| "Failed to load treatment records from backend")?;
        Ok(dtos
            .into_items()
            .into_iter()
            .map(TreatmentRecordDto::normalize)
            .collect())
    }

    pub fn get_payments(&self, patient: PatientId) -> Result<Vec<Payment>> {
        let dtos: ListResponse<PaymentDto> = self
            .get_patient_list(PAYMENTS_PATH, patient)
            .chain_err(|| "Failed to load payments from backend")?;
        Ok(dtos
            .into_items()
            .into_iter()
            .map(PaymentDto::normalize)
            .collect())
    }

    pub fn get_budgets(&self, patient: PatientId) -> Result<Vec<Budget>> {
        let dtos: ListResponse<BudgetDto> = self
            .get_patient_list(BUDGETS_PATH, patient)
            .chain_err(|| "Failed to load budgets from backend")?;
        Ok(dtos
            .into_items()
            .into_iter()
            .map(BudgetDto::normalize)
            .collect())
    }

    /// Asks the backend to record the transfer.  The mechanism is opaque;
    /// callers must re-fetch afterwards instead of updating optimistically.
    pub fn transfer_balance(&self, request: &TransferRequestDto) -> Result<()> {
        let url = format!("{}{}", self.base_url, TRANSFER_BALANCE_PATH);
        debug!("Transfer request to {}: {:#?}", url, request);
        let mut response = self
            .http_client
            .post(&url)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Bearer {}", self.api_token),
            )
            .json(request)
            .send()
            .chain_err(|| "Failed to send transfer request to backend")?;
        if !response.status().is_success() {
            bail!(error_message(&mut response));
        }
        let transfer_response: TransferResponseDto = response
            .json()
            .chain_err(|| "Failed to parse transfer response")?;
        debug!("Transfer response: {:#?}", transfer_response);
        if transfer_response.success {
            Ok(())
        } else {
            bail!(transfer_response
                .message
                .unwrap_or_else(|| "Backend did not record the transfer".to_string()))
        }
    }

    fn get_patient_list<T: DeserializeOwned>(
        &self,
        path: &str,
        patient: PatientId,
    ) -> Result<T> {
        let url = format!("{}{}?patientId={}", self.base_url, path, patient);
        debug!("GET {}", url);
        let mut response = self
            .http_client
            .get(&url)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Bearer {}", self.api_token),
            )
            .send()
            .chain_err(|| "Failed to get response")?;
        if !response.status().is_success() {
            bail!(error_message(&mut response));
        }
        response.json().chain_err(|| "Failed to parse response")
    }
}

/// Surfaces the backend's own message when the error body carries one,
/// else a generic message with the status code.
fn error_message(response: &mut reqwest::Response) -> String {
    let status = response.status();
    response
        .json::<HashMap<String, serde_json::Value>>()
        .ok()
        .and_then(|body| {
            body.get("message")
                .or_else(|| body.get("error"))
                .map(|value| match value {
                    serde_json::Value::String(text) => text.clone(),
                    other => other.to_string(),
                })
        })
        .unwrap_or_else(|| format!("Backend request failed with status {}", status))
}
