use rust_decimal::Decimal;

use crate::clinic_client::*;
use crate::constants::*;
use crate::current_user::*;
use crate::errors::*;
use crate::processor::*;
use crate::report_formatter::*;
use crate::types::*;

pub fn run() -> Result<()> {
    initialize();
    run_clap_matches(get_clap_matches())
}

fn initialize() {
    openssl_probe::init_ssl_cert_env_vars();
    dotenv::dotenv().ok();
    env_logger::init();
}

fn get_clap_matches() -> clap::ArgMatches<'static> {
    clap::App::new(clap::crate_name!())
        .version(clap::crate_version!())
        .about(clap::crate_description!())
        .arg(
            clap::Arg::with_name(YES_ARG)
                .long(YES_ARG)
                .short("y")
                .help("Send the transfer to the backend (without this, runs in \"dry run\" mode)"),
        )
        .arg(
            clap::Arg::with_name(BACKEND_URL_ARG)
                .env(BACKEND_URL_ENV)
                .long(BACKEND_URL_ARG)
                .value_name("URL")
                .help("Base URL of the clinic backend")
                .takes_value(true)
                .required(true),
        )
        .arg(
            clap::Arg::with_name(API_TOKEN_ARG)
                .env(API_TOKEN_ENV)
                .long(API_TOKEN_ARG)
                .value_name("TOKEN")
                .help("Bearer token for the clinic backend")
                .takes_value(true)
                .required(true),
        )
        .arg(
            clap::Arg::with_name(ACTOR_ID_ARG)
                .env(ACTOR_ID_ENV)
                .long(ACTOR_ID_ARG)
                .value_name("ID")
                .help("User id recorded as the actor on transfers")
                .takes_value(true)
                .required(true)
                .validator(validate_i64),
        )
        .arg(
            clap::Arg::with_name(PATIENT_ID_ARG)
                .long(PATIENT_ID_ARG)
                .value_name("ID")
                .help("Patient whose balance is computed")
                .takes_value(true)
                .required(true)
                .validator(validate_i64),
        )
        .arg(
            clap::Arg::with_name(BUDGET_ARG)
                .long(BUDGET_ARG)
                .value_name("NUMBER")
                .help("Narrow the balance to one budget, by its display number")
                .takes_value(true)
                .validator(validate_i64),
        )
        .arg(
            clap::Arg::with_name(TRANSFER_TO_PATIENT_ARG)
                .long(TRANSFER_TO_PATIENT_ARG)
                .value_name("ID")
                .help("Transfer available credit to this patient")
                .takes_value(true)
                .requires(TRANSFER_AMOUNT_ARG)
                .validator(validate_i64),
        )
        .arg(
            clap::Arg::with_name(TRANSFER_TO_BUDGET_ARG)
                .long(TRANSFER_TO_BUDGET_ARG)
                .value_name("NUMBER")
                .help("Target budget display number (omit for the target patient's general balance)")
                .takes_value(true)
                .requires(TRANSFER_TO_PATIENT_ARG)
                .validator(validate_i64),
        )
        .arg(
            clap::Arg::with_name(TRANSFER_AMOUNT_ARG)
                .long(TRANSFER_AMOUNT_ARG)
                .value_name("AMOUNT")
                .help("Credit amount to transfer, in local currency")
                .takes_value(true)
                .requires(TRANSFER_TO_PATIENT_ARG)
                .validator(validate_decimal),
        )
        .arg(
            clap::Arg::with_name(CURRENCY_SYMBOL_ARG)
                .env(CURRENCY_SYMBOL_ENV)
                .long(CURRENCY_SYMBOL_ARG)
                .value_name("SYMBOL")
                .help("Currency symbol used in the balance report")
                .takes_value(true)
                .default_value(DEFAULT_CURRENCY_SYMBOL),
        )
        .get_matches()
}

fn run_clap_matches(matches: clap::ArgMatches) -> Result<()> {
    let dry_run = !matches.is_present(YES_ARG);
    let client = ClinicClient::new(
        matches
            .value_of(BACKEND_URL_ARG)
            .expect("CLAP matches should have BACKEND_URL_ARG"),
        matches
            .value_of(API_TOKEN_ARG)
            .expect("CLAP matches should have API_TOKEN_ARG"),
    );
    let formatter = ReportFormatter::new(
        matches
            .value_of(CURRENCY_SYMBOL_ARG)
            .expect("CLAP matches should have CURRENCY_SYMBOL_ARG"),
    );
    let current_user = CurrentUserContext::new(
        clap::value_t!(matches.value_of(ACTOR_ID_ARG), i64)
            .expect("CLAP matches should have valid ACTOR_ID_ARG"),
    );
    let transfer = if matches.is_present(TRANSFER_TO_PATIENT_ARG) {
        Some(TransferOptions {
            target_patient: PatientId(
                clap::value_t!(matches.value_of(TRANSFER_TO_PATIENT_ARG), i64)
                    .expect("CLAP matches should have valid TRANSFER_TO_PATIENT_ARG"),
            ),
            target_budget_number: optional_i64(&matches, TRANSFER_TO_BUDGET_ARG),
            amount: clap::value_t!(matches.value_of(TRANSFER_AMOUNT_ARG), Decimal)
                .expect("CLAP matches should have valid TRANSFER_AMOUNT_ARG"),
        })
    } else {
        None
    };
    let options = RunOptions {
        patient: PatientId(
            clap::value_t!(matches.value_of(PATIENT_ID_ARG), i64)
                .expect("CLAP matches should have valid PATIENT_ID_ARG"),
        ),
        budget_number: optional_i64(&matches, BUDGET_ARG),
        transfer,
    };
    BalanceProcessor::run(&client, &formatter, &current_user, dry_run, options)
}

fn optional_i64(matches: &clap::ArgMatches, name: &str) -> Option<i64> {
    if matches.is_present(name) {
        Some(
            clap::value_t!(matches.value_of(name), i64)
                .unwrap_or_else(|_| panic!("CLAP matches should have valid {}", name)),
        )
    } else {
        None
    }
}

fn validate_i64(value: String) -> std::result::Result<(), String> {
    value
        .parse::<i64>()
        .map(|_| ())
        .map_err(|err| err.to_string())
}

fn validate_decimal(value: String) -> std::result::Result<(), String> {
    value
        .parse::<Decimal>()
        .map(|_| ())
        .map_err(|err| err.to_string())
}
