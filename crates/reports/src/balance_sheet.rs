//! Balance sheet: assets vs liabilities and equity.

use serde::Serialize;

use bahi_accounting::{BalanceSheetSection, LedgerRegistry, Statement};
use bahi_core::Money;

use crate::{IntegrityWarning, Section, SectionItem, active_ledgers, within_epsilon};

/// Asset side: current and fixed assets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assets {
    pub current: Section,
    pub fixed: Section,
    pub total: Money,
}

/// Liability side: current liabilities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Liabilities {
    pub current: Section,
    pub total: Money,
}

/// Equity side: capital plus earnings retained in the book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Equity {
    pub capital: Section,
    /// Net effect of every income/expense-side ledger, folded in so the
    /// balance-sheet identity closes.
    pub retained_earnings: Money,
    pub total: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceSheet {
    pub assets: Assets,
    pub liabilities: Liabilities,
    pub equity: Equity,
    /// The balance-sheet identity: assets == liabilities + equity (within ε).
    pub balanced: bool,
}

impl BalanceSheet {
    pub fn integrity_warning(&self) -> Option<IntegrityWarning> {
        if self.balanced {
            return None;
        }
        let difference = self.assets.total - (self.liabilities.total + self.equity.total);
        Some(IntegrityWarning {
            report: "balance_sheet",
            difference,
            message: format!(
                "assets {} do not equal liabilities {} + equity {}",
                self.assets.total, self.liabilities.total, self.equity.total
            ),
        })
    }
}

/// Compute the balance sheet from current ledger state.
///
/// Asset balances are shown as-is (debit-positive); liability and equity
/// balances are negated so their normal credit balances display positive.
/// Retained earnings are the negated sum of every profit-and-loss ledger
/// balance, which makes the identity exact whenever the opening balances
/// themselves balance.
pub fn balance_sheet(registry: &LedgerRegistry) -> BalanceSheet {
    let mut current_assets = Vec::new();
    let mut fixed_assets = Vec::new();
    let mut current_liabilities = Vec::new();
    let mut capital = Vec::new();
    let mut retained_earnings = Money::ZERO;

    for ledger in active_ledgers(registry) {
        let balance = ledger.current_balance();
        match ledger.group().statement() {
            Statement::BalanceSheet(section) => {
                let (bucket, amount) = match section {
                    BalanceSheetSection::CurrentAssets => (&mut current_assets, balance),
                    BalanceSheetSection::FixedAssets => (&mut fixed_assets, balance),
                    BalanceSheetSection::CurrentLiabilities => {
                        (&mut current_liabilities, -balance)
                    }
                    BalanceSheetSection::Equity => (&mut capital, -balance),
                };
                bucket.push(SectionItem {
                    name: ledger.name().to_string(),
                    amount,
                });
            }
            Statement::ProfitAndLoss(_) => retained_earnings -= balance,
        }
    }

    let assets = {
        let current = Section::from_items(current_assets);
        let fixed = Section::from_items(fixed_assets);
        let total = current.subtotal + fixed.subtotal;
        Assets {
            current,
            fixed,
            total,
        }
    };
    let liabilities = {
        let current = Section::from_items(current_liabilities);
        let total = current.subtotal;
        Liabilities { current, total }
    };
    let equity = {
        let capital = Section::from_items(capital);
        let total = capital.subtotal + retained_earnings;
        Equity {
            capital,
            retained_earnings,
            total,
        }
    };

    let balanced = within_epsilon(assets.total, liabilities.total + equity.total);
    if !balanced {
        tracing::warn!(
            assets = %assets.total,
            liabilities = %liabilities.total,
            equity = %equity.total,
            "balance sheet identity does not hold"
        );
    }

    BalanceSheet {
        assets,
        liabilities,
        equity,
        balanced,
    }
}
