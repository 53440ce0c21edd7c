mod args;
mod config;
mod reader;
mod writer;

use bkl::{input::InputCommand, services::AccountService, Bank, Result};

fn main() -> Result {
    let ledger_config = config::configure_app()?;

    log::debug!("Application configured. Beginning process...");

    let bank = bkl::build_bank(ledger_config)?;

    process_data(&bank)?;

    log::debug!("Process complete. Beginning report...");

    report_to_std_out(&bank.accounts)?;

    log::debug!("Application finished successfully!");

    Ok(())
}

/// Read input file and run every command through the ledger, skipping rejected ones
fn process_data(bank: &Bank) -> Result {
    let input_path = args::parse_input_arg()?;
    log::debug!("Found filepath as input arg: {input_path:?}");

    let mut rdr = reader::build_csv_reader(input_path)?;

    log::debug!("Deserializing reader...");
    for record in rdr.deserialize::<InputCommand>() {
        log::debug!("Parsing record into InputCommand: {record:?}");
        let input_command = match record {
            Ok(input_command) => input_command,
            Err(e) => {
                log::warn!("{e}");
                continue;
            }
        };

        log::debug!("Parsing input_command into Command: {input_command:?}");
        let command = match input_command.parse_command() {
            Ok(command) => command,
            Err(e) => {
                log::warn!("{e}");
                continue;
            }
        };

        match bank.ledger.execute(command) {
            Ok(outcome) => log::debug!("Command applied: {outcome:?}"),
            Err(e) => log::warn!("Command rejected: {e}"),
        }
    }

    Ok(())
}

/// Build report from results, and write report to stdout
fn report_to_std_out(accounts: &AccountService) -> Result {
    let report = accounts.build_report()?;
    log::debug!("Successfully built reports for {} accounts", report.len());

    let mut wtr = writer::build_csv_writer();

    log::debug!("Serializing reports...");
    for account_report in report.iter() {
        log::debug!("Serializing report: {account_report:?}");
        wtr.serialize(account_report)?;
    }

    let output = writer::write_to_string(wtr)?;

    log::debug!("Writing to stdout: {output:?}");
    print!("{}", output);

    Ok(())
}
