//! Profit & loss: trading totals from vouchers plus income/expense ledgers.

use serde::Serialize;

use bahi_accounting::{Journal, LedgerGroup, LedgerRegistry, Voucher, VoucherKind, VoucherStatus};
use bahi_core::Money;

use crate::{Period, Section, SectionItem, active_ledgers};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfitAndLoss {
    pub period: Period,
    pub income: Section,
    pub expenses: Section,
    pub net_profit: Money,
}

/// Whether a voucher's total should count toward trading totals.
///
/// Reversed/superseded vouchers and the reversing entries themselves cancel
/// pairwise, so both sides are skipped.
fn counts(voucher: &Voucher, period: Period) -> bool {
    voucher.status() == VoucherStatus::Posted
        && !voucher.is_reversal()
        && period.contains(voucher.date())
}

/// Compute profit & loss for a period.
///
/// Trading lines come from voucher totals: sales net of credit notes on the
/// income side, purchases net of debit notes on the expense side. The
/// remaining lines are current balances of Direct/Indirect Income and
/// Expense ledgers, shown on their normal side.
pub fn profit_and_loss(
    registry: &LedgerRegistry,
    journal: &Journal,
    period: Period,
) -> ProfitAndLoss {
    let mut sales = Money::ZERO;
    let mut purchases = Money::ZERO;
    let mut credit_notes = Money::ZERO;
    let mut debit_notes = Money::ZERO;

    for voucher in journal.vouchers() {
        if !counts(voucher, period) {
            continue;
        }
        match voucher.kind() {
            VoucherKind::Sales => sales += voucher.total(),
            VoucherKind::Purchase => purchases += voucher.total(),
            VoucherKind::CreditNote => credit_notes += voucher.total(),
            VoucherKind::DebitNote => debit_notes += voucher.total(),
            _ => {}
        }
    }

    let mut income_items = vec![SectionItem {
        name: "Sales".to_string(),
        amount: sales - credit_notes,
    }];
    let mut expense_items = vec![SectionItem {
        name: "Purchases".to_string(),
        amount: purchases - debit_notes,
    }];

    for ledger in active_ledgers(registry) {
        match ledger.group() {
            LedgerGroup::DirectIncomes | LedgerGroup::IndirectIncomes => {
                income_items.push(SectionItem {
                    name: ledger.name().to_string(),
                    // Income ledgers carry credit balances; show them positive.
                    amount: -ledger.current_balance(),
                });
            }
            LedgerGroup::DirectExpenses | LedgerGroup::IndirectExpenses => {
                expense_items.push(SectionItem {
                    name: ledger.name().to_string(),
                    amount: ledger.current_balance(),
                });
            }
            _ => {}
        }
    }

    let income = Section::from_items(income_items);
    let expenses = Section::from_items(expense_items);
    let net_profit = income.subtotal - expenses.subtotal;

    ProfitAndLoss {
        period,
        income,
        expenses,
        net_profit,
    }
}
