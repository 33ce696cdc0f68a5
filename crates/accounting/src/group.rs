//! Ledger group classification.
//!
//! Groups are a fixed, closed set carrying their normal balance side and
//! statement placement as data, so nothing downstream ever branches on a
//! group *name*.

use serde::{Deserialize, Serialize};

use bahi_core::Money;

/// The two sides of a transaction.
///
/// Sign convention throughout the book: debit-positive, credit-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Debit,
    Credit,
}

impl Side {
    /// Apply the sign convention to a positive line amount.
    pub fn signed(self, amount: Money) -> Money {
        match self {
            Side::Debit => amount,
            Side::Credit => -amount,
        }
    }

    pub fn opposite(self) -> Side {
        match self {
            Side::Debit => Side::Credit,
            Side::Credit => Side::Debit,
        }
    }
}

/// Balance sheet placement of a group's balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceSheetSection {
    CurrentAssets,
    FixedAssets,
    CurrentLiabilities,
    Equity,
}

/// Profit & loss placement of a group's balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfitAndLossSection {
    Income,
    Expense,
}

/// Which financial statement a group's balances feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Statement {
    BalanceSheet(BalanceSheetSection),
    ProfitAndLoss(ProfitAndLossSection),
}

/// Fixed classification every ledger is tagged with. Immutable reference data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerGroup {
    CashInHand,
    BankAccounts,
    SundryDebtors,
    CurrentAssets,
    FixedAssets,
    SundryCreditors,
    CurrentLiabilities,
    DutiesAndTaxes,
    LoansLiability,
    CapitalAccount,
    SalesAccounts,
    PurchaseAccounts,
    DirectIncomes,
    IndirectIncomes,
    DirectExpenses,
    IndirectExpenses,
}

impl LedgerGroup {
    /// Side a balance of this group is conventionally shown on.
    pub fn normal_side(self) -> Side {
        use LedgerGroup::*;

        match self {
            CashInHand | BankAccounts | SundryDebtors | CurrentAssets | FixedAssets
            | PurchaseAccounts | DirectExpenses | IndirectExpenses => Side::Debit,
            SundryCreditors | CurrentLiabilities | DutiesAndTaxes | LoansLiability
            | CapitalAccount | SalesAccounts | DirectIncomes | IndirectIncomes => Side::Credit,
        }
    }

    /// Groups whose ledgers can stand as the party of a voucher.
    pub fn is_party_group(self) -> bool {
        matches!(self, LedgerGroup::SundryDebtors | LedgerGroup::SundryCreditors)
    }

    /// Statement placement used by the report aggregator.
    pub fn statement(self) -> Statement {
        use LedgerGroup::*;

        match self {
            CashInHand | BankAccounts | SundryDebtors | CurrentAssets => {
                Statement::BalanceSheet(BalanceSheetSection::CurrentAssets)
            }
            FixedAssets => Statement::BalanceSheet(BalanceSheetSection::FixedAssets),
            SundryCreditors | CurrentLiabilities | DutiesAndTaxes | LoansLiability => {
                Statement::BalanceSheet(BalanceSheetSection::CurrentLiabilities)
            }
            CapitalAccount => Statement::BalanceSheet(BalanceSheetSection::Equity),
            SalesAccounts | DirectIncomes | IndirectIncomes => {
                Statement::ProfitAndLoss(ProfitAndLossSection::Income)
            }
            PurchaseAccounts | DirectExpenses | IndirectExpenses => {
                Statement::ProfitAndLoss(ProfitAndLossSection::Expense)
            }
        }
    }

    /// Human-readable group name for report rows.
    pub fn label(self) -> &'static str {
        use LedgerGroup::*;

        match self {
            CashInHand => "Cash-in-Hand",
            BankAccounts => "Bank Accounts",
            SundryDebtors => "Sundry Debtors",
            CurrentAssets => "Current Assets",
            FixedAssets => "Fixed Assets",
            SundryCreditors => "Sundry Creditors",
            CurrentLiabilities => "Current Liabilities",
            DutiesAndTaxes => "Duties & Taxes",
            LoansLiability => "Loans (Liability)",
            CapitalAccount => "Capital Account",
            SalesAccounts => "Sales Accounts",
            PurchaseAccounts => "Purchase Accounts",
            DirectIncomes => "Direct Incomes",
            IndirectIncomes => "Indirect Incomes",
            DirectExpenses => "Direct Expenses",
            IndirectExpenses => "Indirect Expenses",
        }
    }
}

impl core::fmt::Display for LedgerGroup {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}
