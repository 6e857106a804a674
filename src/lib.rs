#![warn(clippy::all)]

#[macro_use]
extern crate error_chain;

mod balance;
mod cli;
mod clinic_client;
mod constants;
mod current_user;
mod dto;
mod processor;
mod report_formatter;
mod transfer;
mod transfer_reference;
mod types;
mod utilities;

mod errors {
    error_chain! {}
}

pub use cli::run;
