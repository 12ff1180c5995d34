use crate::loan::{Loan, LoanMonth};
use std::fmt::{self, Write};
use std::ops::Range;

const HEAD_ROWS: usize = 5;
const TAIL_ROWS: usize = 5;

const BANNER: [&str; 6] = [
    r"|      __  ___           __                            ______      __    __    |",
    r"|     /  |/  /___  _____/ /_____ _____ _____ ____     /_  __/___ _/ /_  / /__  |",
    r"|    / /|_/ / __ \/ ___/ __/ __ `/ __ `/ __ `/ _ \     / / / __ `/ __ \/ / _ \ |",
    r"|   / /  / / /_/ / /  / /_/ /_/ / /_/ / /_/ /  __/    / / / /_/ / /_/ / /  __/ |",
    r"|  /_/  /_/\____/_/   \__/\__, /\__,_/\__, /\___/    /_/  \__,_/_.___/_/\___/  |",
    r"|                        /____/      /____/                                    |",
];

/// How the schedule is printed.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ReportOptions {
    pub precision: usize, // decimal places for money columns
    pub show_all: bool,   // print every row instead of head and tail
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            precision: 2,
            show_all: false,
        }
    }
}

// column widths at two decimal places; extra places widen every money column
struct Columns {
    payment: usize,
    interest: usize,
    principal: usize,
    balance: usize,
}

impl Columns {
    fn new(precision: usize) -> Self {
        let extra = precision.saturating_sub(2);
        Self {
            payment: 10 + extra,
            interest: 9 + extra,
            principal: 9 + extra,
            balance: 12 + extra,
        }
    }
}

/// Row ranges to print: the head and, when the schedule is long enough to be
/// split, the tail. Short schedules come back whole as a single range.
pub fn selected_rows(len: usize, show_all: bool) -> (Range<usize>, Option<Range<usize>>) {
    if show_all || len <= HEAD_ROWS + TAIL_ROWS {
        (0..len, None)
    } else {
        (0..HEAD_ROWS, Some(len - TAIL_ROWS..len))
    }
}

/// Renders the full program report for `loan`.
pub fn render(loan: &Loan, options: &ReportOptions) -> Result<String, fmt::Error> {
    let prec = options.precision;
    let cols = Columns::new(prec);
    let rule = "-".repeat(80);
    let mut out = String::new();

    writeln!(out)?;
    writeln!(out, "Mortgage Amortization Calculator Program")?;
    writeln!(out, "Default Payment: ${:.prec$}", loan.get_pmt_amount())?;

    writeln!(out)?;
    writeln!(out, "{}", rule)?;
    for line in BANNER {
        writeln!(out, "{}", line)?;
    }
    writeln!(out, "{}", rule)?;
    writeln!(out)?;

    writeln!(
        out,
        "{:>3}  {:>pw$}  {:>iw$}  {:>rw$}  {:>bw$}",
        "#",
        "Payment",
        "Interest",
        "Principal",
        "Balance",
        pw = cols.payment,
        iw = cols.interest,
        rw = cols.principal,
        bw = cols.balance
    )?;
    writeln!(
        out,
        "{}  {}  {}  {}  {}",
        "-".repeat(3),
        "-".repeat(cols.payment),
        "-".repeat(cols.interest),
        "-".repeat(cols.principal),
        "-".repeat(cols.balance)
    )?;

    let schedule = loan.schedule();
    let (head, tail) = selected_rows(schedule.len(), options.show_all);
    for i in head {
        write_row(&mut out, i, &schedule[i], &cols, prec)?;
    }
    if let Some(tail) = tail {
        writeln!(
            out,
            "{:>3}  {:>pw$}  {:>iw$}  {:>rw$}  {:>bw$}",
            "...",
            "...",
            "...",
            "...",
            "...",
            pw = cols.payment,
            iw = cols.interest,
            rw = cols.principal,
            bw = cols.balance
        )?;
        for i in tail {
            write_row(&mut out, i, &schedule[i], &cols, prec)?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Total Paid: ${:.prec$}", loan.total_paid())?;
    writeln!(out, "Total Interest: ${:.prec$}", loan.total_interest())?;
    writeln!(out)?;
    writeln!(out, "Mortgage program complete")?;
    writeln!(out)?;

    Ok(out)
}

fn write_row(
    out: &mut String,
    pmt_number: usize,
    month: &LoanMonth,
    cols: &Columns,
    prec: usize,
) -> fmt::Result {
    writeln!(
        out,
        "{:>3}  {:>pw$.prec$}  {:>iw$.prec$}  {:>rw$.prec$}  {:>bw$.prec$}",
        pmt_number,
        month.payment,
        month.interest,
        month.principal,
        month.balance,
        pw = cols.payment,
        iw = cols.interest,
        rw = cols.principal,
        bw = cols.balance
    )
}
