//! Trial balance: every active ledger's balance in debit/credit columns.

use serde::Serialize;

use bahi_accounting::{LedgerGroup, LedgerRegistry};
use bahi_core::{Entity, LedgerId, Money};

use crate::{IntegrityWarning, active_ledgers, within_epsilon};

/// One ledger's balance split into the column its sign dictates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialBalanceRow {
    pub ledger: LedgerId,
    pub name: String,
    pub group: LedgerGroup,
    pub debit: Money,
    pub credit: Money,
}

/// The book's primary self-check: debits and credits must agree in total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialBalance {
    pub rows: Vec<TrialBalanceRow>,
    pub total_debit: Money,
    pub total_credit: Money,
    pub balanced: bool,
}

impl TrialBalance {
    pub fn integrity_warning(&self) -> Option<IntegrityWarning> {
        if self.balanced {
            return None;
        }
        let difference = self.total_debit - self.total_credit;
        Some(IntegrityWarning {
            report: "trial_balance",
            difference,
            message: format!(
                "trial balance is off by {difference}: debits {} vs credits {}",
                self.total_debit, self.total_credit
            ),
        })
    }
}

/// Compute the trial balance from current ledger state.
///
/// A positive balance lands in the debit column, a negative one in the credit
/// column as its absolute value. With only balanced vouchers posted, a
/// mismatch can still arise from lopsided opening balances; that is reported
/// as a warning, not an error.
pub fn trial_balance(registry: &LedgerRegistry) -> TrialBalance {
    let rows: Vec<TrialBalanceRow> = active_ledgers(registry)
        .into_iter()
        .map(|ledger| {
            let balance = ledger.current_balance();
            let (debit, credit) = if balance.is_negative() {
                (Money::ZERO, balance.abs())
            } else {
                (balance, Money::ZERO)
            };
            TrialBalanceRow {
                ledger: *ledger.id(),
                name: ledger.name().to_string(),
                group: ledger.group(),
                debit,
                credit,
            }
        })
        .collect();

    let total_debit: Money = rows.iter().map(|row| row.debit).sum();
    let total_credit: Money = rows.iter().map(|row| row.credit).sum();
    let balanced = within_epsilon(total_debit, total_credit);

    if !balanced {
        tracing::warn!(
            debit = %total_debit,
            credit = %total_credit,
            "trial balance does not balance"
        );
    }

    TrialBalance {
        rows,
        total_debit,
        total_credit,
        balanced,
    }
}
