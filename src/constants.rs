pub const TRANSFER_REFERENCE_PREFIX: &str = "SALDO";
pub const DEFAULT_CURRENCY_SYMBOL: &str = "Bs";
pub const DISPLAY_DECIMAL_DIGITS: u32 = 2;

pub const TREATMENT_RECORDS_PATH: &str = "/treatment-records";
pub const PAYMENTS_PATH: &str = "/payments";
pub const BUDGETS_PATH: &str = "/budgets";
pub const TRANSFER_BALANCE_PATH: &str = "/payments/transfer-balance";

pub const YES_ARG: &str = "yes";
pub const BACKEND_URL_ARG: &str = "backend-url";
pub const BACKEND_URL_ENV: &str = "CLINIC_BACKEND_URL";
pub const API_TOKEN_ARG: &str = "api-token";
pub const API_TOKEN_ENV: &str = "CLINIC_API_TOKEN";
pub const ACTOR_ID_ARG: &str = "actor-id";
pub const ACTOR_ID_ENV: &str = "CLINIC_ACTOR_ID";
pub const PATIENT_ID_ARG: &str = "patient-id";
pub const BUDGET_ARG: &str = "budget";
pub const TRANSFER_TO_PATIENT_ARG: &str = "transfer-to-patient";
pub const TRANSFER_TO_BUDGET_ARG: &str = "transfer-to-budget";
pub const TRANSFER_AMOUNT_ARG: &str = "transfer-amount";
pub const CURRENCY_SYMBOL_ARG: &str = "currency-symbol";
pub const CURRENCY_SYMBOL_ENV: &str = "CLINIC_CURRENCY_SYMBOL";
