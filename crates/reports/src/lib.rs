//! Financial statements derived from the ledger registry and voucher journal.
//!
//! Every report here is a pure function of book state: recomputing on an
//! unchanged book yields an identical value, and an empty book yields zeroed
//! totals rather than an error. When a report's self-check fails, that is a
//! data-integrity *warning* surfaced on the shape (and logged), never a panic.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use bahi_accounting::{Ledger, LedgerRegistry};
use bahi_core::{BALANCE_EPSILON, Money};

pub mod balance_sheet;
pub mod day_book;
pub mod profit_loss;
pub mod trial_balance;

pub use balance_sheet::{BalanceSheet, balance_sheet};
pub use day_book::{DayBook, DayBookFilter, DayBookRow, day_book};
pub use profit_loss::{ProfitAndLoss, profit_and_loss};
pub use trial_balance::{TrialBalance, TrialBalanceRow, trial_balance};

/// Inclusive date range a report is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl Period {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

/// One named balance within a report section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionItem {
    pub name: String,
    pub amount: Money,
}

/// Category of a statement: items plus their subtotal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub items: Vec<SectionItem>,
    pub subtotal: Money,
}

impl Section {
    pub(crate) fn from_items(items: Vec<SectionItem>) -> Self {
        let subtotal = items.iter().map(|item| item.amount).sum();
        Self { items, subtotal }
    }
}

/// A report self-check failed: the recorded balances are inconsistent.
///
/// Shown to the user as a visible warning; the report itself still renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntegrityWarning {
    pub report: &'static str,
    pub difference: Money,
    pub message: String,
}

pub(crate) fn within_epsilon(a: Money, b: Money) -> bool {
    (a - b).abs() <= BALANCE_EPSILON
}

/// Active ledgers in name order, for stable report output.
pub(crate) fn active_ledgers(registry: &LedgerRegistry) -> Vec<&Ledger> {
    let mut ledgers: Vec<&Ledger> = registry.iter().filter(|l| l.is_active()).collect();
    ledgers.sort_by(|a, b| a.name().cmp(b.name()));
    ledgers
}
