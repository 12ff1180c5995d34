use clap::error::ErrorKind;
use clap::Parser;
use log::{warn, LevelFilter};
use mortgage::error::MortgageError;
use mortgage::input::LoanTerms;
use mortgage::loan::Loan;
use mortgage::report::{self, ReportOptions};
use simple_logger::SimpleLogger;
use std::process::ExitCode;

/// Fixed-rate mortgage amortization calculator
#[derive(Parser, Debug)]
#[command(
    name = "mortgage",
    version,
    about = "Fixed-rate mortgage amortization calculator",
    allow_negative_numbers = true
)]
struct Cli {
    /// Original loan amount, 0 to 10000000
    amount: String,

    /// Annual interest rate as a percent, 0 to 30
    interest: String,

    /// Term of the loan in months, 0 to 600
    months: String,

    /// Accepted for compatibility, not applied to the schedule
    extra: Option<String>,

    /// Decimal places for money columns
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(0..=6))]
    precision: u8,

    /// Print every month instead of the first and last five
    #[arg(long)]
    all: bool,

    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return parse_failure(e),
    };

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if let Err(e) = SimpleLogger::new().with_level(level).init() {
        println!("Error: unable to start logger: {}", e);
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(report) => {
            print!("{}", report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<String, MortgageError> {
    if let Some(extra) = &cli.extra {
        warn!("extra payment {:?} is ignored", extra);
    }

    let terms = LoanTerms::parse(&cli.amount, &cli.interest, &cli.months)?;
    let loan = Loan::new(terms)?;
    let options = ReportOptions {
        precision: cli.precision as usize,
        show_all: cli.all,
    };
    Ok(report::render(&loan, &options)?)
}

// Help and version go to stdout with success; every other parse problem is a
// failure reported on stdout like the rest of the program's diagnostics.
fn parse_failure(e: clap::Error) -> ExitCode {
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            print!("{}", e);
            ExitCode::SUCCESS
        }
        ErrorKind::MissingRequiredArgument => {
            println!("Error: {}", MortgageError::MissingArguments);
            println!("Usage: mortgage <amount> <interest> <months> [extra]");
            ExitCode::FAILURE
        }
        _ => {
            print!("{}", e);
            ExitCode::FAILURE
        }
    }
}
