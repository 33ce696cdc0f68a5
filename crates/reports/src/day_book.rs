//! Day book: the journal re-listed line by line for a date range.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use bahi_accounting::{Journal, LedgerRegistry, Side, Voucher, VoucherKind};
use bahi_core::{Entity, LedgerId, Money, VoucherId};

use crate::{Period, within_epsilon};

/// Narrowing applied to the day book.
///
/// A kind filter keeps whole vouchers; a ledger filter keeps single lines and
/// can therefore legitimately produce an unbalanced subset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayBookFilter {
    pub kind: Option<VoucherKind>,
    pub ledger: Option<LedgerId>,
}

impl DayBookFilter {
    pub fn by_kind(kind: VoucherKind) -> Self {
        Self {
            kind: Some(kind),
            ledger: None,
        }
    }

    pub fn by_ledger(ledger: LedgerId) -> Self {
        Self {
            kind: None,
            ledger: Some(ledger),
        }
    }
}

/// One voucher line, with its originating voucher's number/kind/party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayBookRow {
    pub date: NaiveDate,
    pub voucher: VoucherId,
    pub number: u32,
    pub kind: VoucherKind,
    pub party: Option<String>,
    pub ledger: String,
    pub particulars: Option<String>,
    pub debit: Money,
    pub credit: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayBook {
    pub period: Period,
    pub rows: Vec<DayBookRow>,
    pub total_debit: Money,
    pub total_credit: Money,
    /// False is expected (not an integrity problem) when a ledger filter
    /// shows only part of some voucher.
    pub balanced: bool,
}

fn ledger_name(registry: &LedgerRegistry, id: LedgerId) -> String {
    registry
        .ledger(id)
        .map(|ledger| ledger.name().to_string())
        .unwrap_or_else(|_| id.to_string())
}

/// List every journalized line in the period, one row per line item, ordered
/// by date then voucher number.
pub fn day_book(
    registry: &LedgerRegistry,
    journal: &Journal,
    period: Period,
    filter: DayBookFilter,
) -> DayBook {
    let mut selected: Vec<&Voucher> = journal
        .vouchers()
        .iter()
        .filter(|voucher| period.contains(voucher.date()))
        .filter(|voucher| filter.kind.is_none_or(|kind| kind == voucher.kind()))
        .collect();
    selected.sort_by_key(|voucher| (voucher.date(), voucher.number()));

    let mut rows = Vec::new();
    for voucher in selected {
        let party = voucher.party().map(|id| ledger_name(registry, id));
        for line in voucher.lines() {
            if filter.ledger.is_some_and(|id| id != line.ledger) {
                continue;
            }
            let (debit, credit) = match line.side {
                Side::Debit => (line.amount, Money::ZERO),
                Side::Credit => (Money::ZERO, line.amount),
            };
            rows.push(DayBookRow {
                date: voucher.date(),
                voucher: *voucher.id(),
                number: voucher.number(),
                kind: voucher.kind(),
                party: party.clone(),
                ledger: ledger_name(registry, line.ledger),
                particulars: line.particulars.clone(),
                debit,
                credit,
            });
        }
    }

    let total_debit: Money = rows.iter().map(|row| row.debit).sum();
    let total_credit: Money = rows.iter().map(|row| row.credit).sum();
    let balanced = within_epsilon(total_debit, total_credit);

    DayBook {
        period,
        rows,
        total_debit,
        total_credit,
        balanced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bahi_accounting::{DraftLine, DraftVoucher, LedgerGroup};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn december() -> Period {
        Period::new(date(2024, 12, 1), date(2024, 12, 31))
    }

    struct Fixture {
        registry: LedgerRegistry,
        journal: Journal,
        cash: LedgerId,
        sales: LedgerId,
        purchases: LedgerId,
        customer: LedgerId,
        supplier: LedgerId,
    }

    fn fixture() -> Fixture {
        let mut registry = LedgerRegistry::new();
        let cash = registry
            .create_ledger("Cash", LedgerGroup::CashInHand, Money::from_major(50_000))
            .unwrap();
        let sales = registry
            .create_ledger("Sales Accounts", LedgerGroup::SalesAccounts, Money::ZERO)
            .unwrap();
        let purchases = registry
            .create_ledger("Purchase Accounts", LedgerGroup::PurchaseAccounts, Money::ZERO)
            .unwrap();
        let customer = registry
            .create_ledger("Acme Traders", LedgerGroup::SundryDebtors, Money::ZERO)
            .unwrap();
        let supplier = registry
            .create_ledger("Bharat Supplies", LedgerGroup::SundryCreditors, Money::ZERO)
            .unwrap();
        Fixture {
            registry,
            journal: Journal::new(),
            cash,
            sales,
            purchases,
            customer,
            supplier,
        }
    }

    fn post_mixed_december(fixture: &mut Fixture) {
        let sale = DraftVoucher::new(VoucherKind::Sales, date(2024, 12, 26))
            .with_party(fixture.customer)
            .with_line(DraftLine::debit(fixture.cash, Money::from_major(135_000)))
            .with_line(DraftLine::credit(fixture.sales, Money::from_major(135_000)));
        fixture.journal.post(&mut fixture.registry, sale).unwrap();

        let purchase = DraftVoucher::new(VoucherKind::Purchase, date(2024, 12, 27))
            .with_party(fixture.supplier)
            .with_line(DraftLine::debit(fixture.purchases, Money::from_major(60_000)))
            .with_line(DraftLine::credit(fixture.cash, Money::from_major(60_000)));
        fixture
            .journal
            .post(&mut fixture.registry, purchase)
            .unwrap();
    }

    #[test]
    fn empty_journal_yields_zeroed_day_book() {
        let fixture = fixture();
        let report = day_book(
            &fixture.registry,
            &fixture.journal,
            december(),
            DayBookFilter::default(),
        );
        assert!(report.rows.is_empty());
        assert_eq!(report.total_debit, Money::ZERO);
        assert!(report.balanced);
    }

    #[test]
    fn one_row_per_line_item_in_date_order() {
        let mut fixture = fixture();
        post_mixed_december(&mut fixture);

        let report = day_book(
            &fixture.registry,
            &fixture.journal,
            december(),
            DayBookFilter::default(),
        );
        assert_eq!(report.rows.len(), 4);
        assert_eq!(report.rows[0].date, date(2024, 12, 26));
        assert_eq!(report.rows[0].number, 1);
        assert_eq!(report.rows[2].date, date(2024, 12, 27));
        assert_eq!(report.total_debit, Money::from_major(195_000));
        assert_eq!(report.total_credit, Money::from_major(195_000));
        assert!(report.balanced);
    }

    #[test]
    fn kind_filter_keeps_whole_vouchers_and_stays_balanced() {
        let mut fixture = fixture();
        post_mixed_december(&mut fixture);

        let report = day_book(
            &fixture.registry,
            &fixture.journal,
            december(),
            DayBookFilter::by_kind(VoucherKind::Sales),
        );
        assert_eq!(report.rows.len(), 2);
        assert!(report.rows.iter().all(|row| row.kind == VoucherKind::Sales));
        assert_eq!(report.rows[0].party.as_deref(), Some("Acme Traders"));
        assert_eq!(report.total_debit, Money::from_major(135_000));
        assert_eq!(report.total_credit, Money::from_major(135_000));
        assert!(report.balanced);
    }

    #[test]
    fn ledger_filter_may_show_an_unbalanced_subset() {
        let mut fixture = fixture();
        post_mixed_december(&mut fixture);

        // Only the cash lines: a debit of 135,000 and a credit of 60,000.
        let report = day_book(
            &fixture.registry,
            &fixture.journal,
            december(),
            DayBookFilter::by_ledger(fixture.cash),
        );
        assert_eq!(report.rows.len(), 2);
        assert!(report.rows.iter().all(|row| row.ledger == "Cash"));
        assert_eq!(report.total_debit, Money::from_major(135_000));
        assert_eq!(report.total_credit, Money::from_major(60_000));
        assert!(!report.balanced);
    }

    #[test]
    fn vouchers_outside_the_period_are_excluded() {
        let mut fixture = fixture();
        post_mixed_december(&mut fixture);
        let january_sale = DraftVoucher::new(VoucherKind::Sales, date(2025, 1, 2))
            .with_party(fixture.customer)
            .with_line(DraftLine::debit(fixture.cash, Money::from_major(1_000)))
            .with_line(DraftLine::credit(fixture.sales, Money::from_major(1_000)));
        fixture
            .journal
            .post(&mut fixture.registry, january_sale)
            .unwrap();

        let report = day_book(
            &fixture.registry,
            &fixture.journal,
            december(),
            DayBookFilter::default(),
        );
        assert_eq!(report.rows.len(), 4);
    }

    #[test]
    fn line_particulars_travel_onto_rows() {
        let mut fixture = fixture();
        let sale = DraftVoucher::new(VoucherKind::Sales, date(2024, 12, 26))
            .with_party(fixture.customer)
            .with_line(
                DraftLine::debit(fixture.cash, Money::from_major(500))
                    .with_particulars("counter sale"),
            )
            .with_line(DraftLine::credit(fixture.sales, Money::from_major(500)));
        fixture.journal.post(&mut fixture.registry, sale).unwrap();

        let report = day_book(
            &fixture.registry,
            &fixture.journal,
            december(),
            DayBookFilter::default(),
        );
        assert_eq!(report.rows[0].particulars.as_deref(), Some("counter sale"));
        assert_eq!(report.rows[1].particulars, None);
    }
}
