use crate::error::{MortgageError, Result};
use crate::input::LoanTerms;
use log::{debug, trace};
use std::fmt;

/// One row of the amortization schedule.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoanMonth {
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
    pub balance: f64,
}

impl LoanMonth {
    pub fn new(payment: f64, interest: f64, principal: f64, balance: f64) -> Self {
        Self {
            payment,
            interest,
            principal,
            balance,
        }
    }

    /// The synthetic row 0: nothing paid yet, the whole principal outstanding.
    pub fn opening(principal: f64) -> Self {
        Self::new(0., 0., 0., principal)
    }
}

impl fmt::Display for LoanMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "payment ${:.4}, interest ${:.4}, principal ${:.4}, balance ${:.4}",
            self.payment, self.interest, self.principal, self.balance
        )
    }
}

#[derive(PartialEq, Debug)]
pub struct Loan {
    pub terms: LoanTerms,
    periodic_rate: f64,
    pmt_amount: f64,
    scheduled_pmts: Vec<LoanMonth>,
}

impl Loan {
    pub fn new(terms: LoanTerms) -> Result<Self> {
        let periodic_rate = get_periodic_rate(terms.rate_percent);
        let pmt_amount = get_pmt_amount(&terms.amount, &periodic_rate, &terms.months)?;
        let scheduled_pmts =
            add_scheduled_pmts(&terms.amount, &periodic_rate, &terms.months, pmt_amount)?;

        Ok(Self {
            terms,
            periodic_rate,
            pmt_amount,
            scheduled_pmts,
        })
    }

    pub fn get_pmt_amount(&self) -> &f64 {
        &self.pmt_amount
    }

    pub fn get_periodic_rate(&self) -> &f64 {
        &self.periodic_rate
    }

    /// Number of payments made, not counting the opening row.
    pub fn get_pmt_count(&self) -> usize {
        self.scheduled_pmts.len() - 1
    }

    /// Row `pmt_number` of the schedule; 0 is the opening balance.
    pub fn get_pmt_detail(&self, &pmt_number: &usize) -> Option<&LoanMonth> {
        self.scheduled_pmts.get(pmt_number)
    }

    pub fn schedule(&self) -> &[LoanMonth] {
        &self.scheduled_pmts
    }

    pub fn total_paid(&self) -> f64 {
        self.scheduled_pmts.iter().map(|m| m.payment).sum()
    }

    pub fn total_interest(&self) -> f64 {
        self.scheduled_pmts.iter().map(|m| m.interest).sum()
    }
}

/// Monthly rate as a fraction from an annual percentage.
pub fn get_periodic_rate(rate_percent: f64) -> f64 {
    rate_percent / 100. / 12.
}

/// Level payment from the annuity formula `P = A * r * g / (g - 1)`, `g = (1 + r)^n`.
///
/// A zero rate makes `g - 1` vanish, so that case is a straight split of the
/// principal over the term. A term of zero has no payment at all.
pub fn get_pmt_amount(
    &principal: &f64,     // loan principal
    &periodic_rate: &f64, // monthly rate as a fraction (i.e., 0.005)
    &term: &u32,          // term of loan in months
) -> Result<f64> {
    if term == 0 {
        return Err(MortgageError::InvalidTerm);
    }

    let factor = (1. + periodic_rate).powi(term as i32);
    let pmt_amount = if periodic_rate == 0. || factor == 1. {
        principal / term as f64
    } else {
        (principal * periodic_rate * factor) / (factor - 1.)
    };
    debug!(
        "principal {}, periodic rate {}, term {}, growth factor {}, payment {}",
        principal, periodic_rate, term, factor, pmt_amount
    );
    Ok(pmt_amount)
}

// Builds the schedule in a single buffer sized for the full term. Regular
// payments continue while the balance exceeds the level payment and at least
// one period remains; the last row then pays off whatever is left.
fn add_scheduled_pmts(
    &principal: &f64,
    &periodic_rate: &f64,
    &term: &u32,
    pmt_amount: f64,
) -> Result<Vec<LoanMonth>> {
    let rows = term as usize + 1;
    let mut sched_pmt: Vec<LoanMonth> = Vec::new();
    sched_pmt
        .try_reserve_exact(rows)
        .map_err(|_| MortgageError::ResourceExhausted { rows })?;

    sched_pmt.push(LoanMonth::opening(principal));

    let mut begin_balance = principal; // balance before this period's payment
    let mut pmt_number: u32 = 0;
    let mut interest;

    while begin_balance > pmt_amount && pmt_number + 1 < term {
        pmt_number += 1;
        interest = begin_balance * periodic_rate;
        let principal_paid = pmt_amount - interest;
        let end_balance = begin_balance - principal_paid;
        trace!(
            "pmt # {}, interest {}, principal {}, end bal {}",
            pmt_number,
            interest,
            principal_paid,
            end_balance
        );

        sched_pmt.push(LoanMonth::new(
            pmt_amount,
            interest,
            principal_paid,
            end_balance,
        ));
        begin_balance = end_balance;
    }

    // payoff row, usually a little different from the level payment
    interest = begin_balance * periodic_rate;
    trace!(
        "payoff pmt # {}, interest {}, principal {}",
        pmt_number + 1,
        interest,
        begin_balance
    );
    sched_pmt.push(LoanMonth::new(
        interest + begin_balance,
        interest,
        begin_balance,
        0.,
    ));

    Ok(sched_pmt)
}

#[cfg(test)]
mod tests {
    use super::{add_scheduled_pmts, get_periodic_rate, get_pmt_amount, Loan, LoanMonth};
    use crate::error::MortgageError;
    use crate::input::LoanTerms;
    use test_log::test;

    fn round(amt: f64, dec: i32) -> f64 {
        (amt * 10_f64.powi(dec)).round() / 10_f64.powi(dec)
    }

    fn terms(amount: f64, rate_percent: f64, months: u32) -> LoanTerms {
        LoanTerms {
            amount,
            rate_percent,
            months,
        }
    }

    #[test]
    fn test_get_periodic_rate() {
        assert_eq!(round(get_periodic_rate(6.), 10), 0.005);
        assert_eq!(get_periodic_rate(0.), 0.);
    }

    #[test]
    fn test_get_pmt_amount() {
        let rate = get_periodic_rate(6.);
        assert_eq!(
            round(get_pmt_amount(&200000., &rate, &360).unwrap(), 2),
            1199.10
        );
        assert_eq!(
            round(get_pmt_amount(&200000., &rate, &360).unwrap(), 4),
            1199.1011
        );

        let rate = get_periodic_rate(7.);
        assert_eq!(
            round(get_pmt_amount(&200000., &rate, &180).unwrap(), 4),
            1797.6565
        );

        assert_eq!(get_pmt_amount(&0., &rate, &180).unwrap(), 0.);
    }

    #[test]
    fn test_zero_rate_pmt_amount() {
        assert_eq!(get_pmt_amount(&1000., &0., &10).unwrap(), 100.);
        assert_eq!(get_pmt_amount(&1200., &0., &1).unwrap(), 1200.);
    }

    #[test]
    fn test_zero_term_is_rejected() {
        assert_eq!(
            get_pmt_amount(&1000., &0.005, &0),
            Err(MortgageError::InvalidTerm)
        );
        assert_eq!(
            Loan::new(terms(1000., 5., 0)),
            Err(MortgageError::InvalidTerm)
        );
    }

    #[test]
    fn test_thirty_year_loan() {
        let loan = Loan::new(terms(200000., 6., 360)).unwrap();

        assert_eq!(round(*loan.get_pmt_amount(), 2), 1199.10);
        assert_eq!(loan.get_pmt_count(), 360);
        assert_eq!(loan.schedule().len(), 361);

        assert_eq!(loan.get_pmt_detail(&0), Some(&LoanMonth::opening(200000.)));

        let first = loan.get_pmt_detail(&1).unwrap();
        assert_eq!(round(first.payment, 4), 1199.1011);
        assert_eq!(round(first.interest, 4), 1000.);
        assert_eq!(round(first.principal, 4), 199.1011);
        assert_eq!(round(first.balance, 4), 199800.8989);

        let second = loan.get_pmt_detail(&2).unwrap();
        assert_eq!(round(second.interest, 4), 999.0045);
        assert_eq!(round(second.balance, 4), 199600.8024);

        let penultimate = loan.get_pmt_detail(&359).unwrap();
        assert_eq!(round(penultimate.interest, 4), 11.9017);
        assert_eq!(round(penultimate.balance, 4), 1193.1354);

        let last = loan.get_pmt_detail(&360).unwrap();
        assert_eq!(round(last.payment, 4), 1199.1011);
        assert_eq!(round(last.interest, 4), 5.9657);
        assert_eq!(round(last.principal, 4), 1193.1354);
        assert_eq!(last.balance, 0.);

        assert_eq!(loan.get_pmt_detail(&361), None);
        assert_eq!(round(loan.total_interest(), 2), 231676.38);
        assert_eq!(round(loan.total_paid(), 2), 431676.38);
    }

    #[test]
    fn test_zero_rate_loan() {
        let loan = Loan::new(terms(1000., 0., 10)).unwrap();

        assert_eq!(*loan.get_pmt_amount(), 100.);
        assert_eq!(loan.schedule().len(), 11);
        for (i, month) in loan.schedule().iter().enumerate().skip(1) {
            assert_eq!(month.payment, 100.);
            assert_eq!(month.interest, 0.);
            assert_eq!(month.principal, 100.);
            assert_eq!(month.balance, 1000. - 100. * i as f64);
        }
        assert_eq!(loan.get_pmt_detail(&10).unwrap().balance, 0.);
    }

    #[test]
    fn test_zero_amount_loan() {
        let loan = Loan::new(terms(0., 5., 12)).unwrap();

        assert_eq!(loan.schedule(), &[LoanMonth::default(), LoanMonth::default()]);
        assert_eq!(loan.get_pmt_count(), 1);
    }

    #[test]
    fn test_schedule_never_exceeds_term() {
        // 1000 / 3 leaves floating residue that would otherwise need a fourth payment
        let sched = add_scheduled_pmts(&1000., &0., &3, 1000. / 3.).unwrap();
        assert_eq!(sched.len(), 4);
        assert_eq!(sched[3].balance, 0.);
        assert_eq!(sched[3].payment, sched[3].principal);

        let loan = Loan::new(terms(1000., 0., 3)).unwrap();
        assert_eq!(loan.schedule().len(), 4);
    }

    #[test]
    fn test_overpayment_ends_early() {
        // a payment larger than the level amount pays the loan off ahead of the term
        let sched = add_scheduled_pmts(&1000., &0., &10, 300.).unwrap();
        assert_eq!(sched.len(), 5);
        assert_eq!(sched[3].balance, 100.);
        assert_eq!(sched[4], LoanMonth::new(100., 0., 100., 0.));
    }

    #[test]
    fn test_single_month_loan() {
        let loan = Loan::new(terms(1200., 12., 1)).unwrap();

        assert_eq!(loan.schedule().len(), 2);
        let last = loan.get_pmt_detail(&1).unwrap();
        assert_eq!(round(last.interest, 4), 12.);
        assert_eq!(round(last.payment, 4), 1212.);
        assert_eq!(last.balance, 0.);
    }

    #[test]
    fn test_display() {
        let month = LoanMonth::new(1199.101, 1000., 199.101, 199800.899);
        assert_eq!(
            month.to_string(),
            "payment $1199.1010, interest $1000.0000, principal $199.1010, balance $199800.8990"
        );
    }
}
