// Overseas voter registration checker
// Validates registration records the same way the registration form does

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use voter_registration::{
    handoff::{self, Handoff},
    models::{Field, FieldValue, RegistrationRecord, RegistrationReport},
    utils::RegistrationError,
    RegistrationValidator,
};

#[derive(Parser)]
#[command(
    name = "voter-registration",
    version,
    about = "Validate overseas voter registration records"
)]
struct Cli {
    /// Date to treat as today (YYYY-MM-DD) for age checks
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a full record stored as JSON
    Validate {
        record: PathBuf,
        /// Print the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Validate a single field value
    Field {
        /// Field key, e.g. phone, citizenshipNo, dob
        key: String,
        value: String,
        /// Current country, used by phone validation
        #[arg(long)]
        country: Option<String>,
    },
    /// Print the session payload for a record that passes validation
    Handoff { record: PathBuf },
}

// Function to print a detailed validation report
fn print_detailed_report(report: &RegistrationReport, record: &RegistrationRecord) {
    println!("\n===============================================");
    println!("      VOTER REGISTRATION VALIDATION REPORT");
    println!("===============================================\n");

    println!("APPLICANT:");
    println!("  Name: {}", record.full_name);
    println!("  Date of Birth: {:?}", record.date_of_birth);
    println!("  Passport Number: {}", record.passport_number);
    println!(
        "  Current Country: {}",
        record.country.map(|c| c.name()).unwrap_or("-")
    );

    println!("\nFIELDS:");
    for (i, field) in Field::ALL.iter().enumerate() {
        println!(
            "  {:>2}. {}: {}",
            i + 1,
            field.label(),
            if report.errors.contains(*field) { "FAILED" } else { "PASSED" }
        );
    }

    if !report.errors.is_empty() {
        println!("\nISSUES FOUND:");
        for (field, message) in report.errors.iter() {
            println!("  - [{}] {}", field.key(), message);
        }
    }

    println!(
        "\nRegistration result: {}",
        if report.is_valid { "VALID" } else { "INVALID" }
    );
}

fn run(cli: Cli) -> Result<bool, RegistrationError> {
    let validator = match cli.today {
        Some(today) => RegistrationValidator::with_reference_date(today),
        None => RegistrationValidator::new(),
    };

    match cli.command {
        Command::Validate { record, json } => {
            let record = handoff::load_record(&record)?;
            let report = validator.validate_all(&record);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_detailed_report(&report, &record);
            }
            Ok(report.is_valid)
        }
        Command::Field { key, value, country } => {
            let field: Field = key.parse()?;
            let mut record = RegistrationRecord::new();
            if let Some(country) = country {
                record.country = Some(country.parse()?);
            }

            let value = FieldValue::parse(field, &value)?;
            let record = record.with_value(value.clone());
            let outcomes = validator.validate_field(&value, &record);

            let mut ok = true;
            for outcome in outcomes {
                match outcome.verdict.message() {
                    Some(message) => {
                        ok = false;
                        println!("{}: {}", outcome.field.key(), message);
                    }
                    None => println!("{}: OK", outcome.field.key()),
                }
            }
            Ok(ok)
        }
        Command::Handoff { record } => {
            let record = handoff::load_record(&record)?;
            let report = validator.validate_all(&record);
            if !report.is_valid {
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(false);
            }
            let handoff = Handoff::from_record(&record)?;
            println!("{}={}", handoff.key, handoff.payload);
            Ok(true)
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(2)
        }
    }
}
