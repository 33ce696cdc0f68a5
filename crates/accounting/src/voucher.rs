//! Voucher records: drafts coming in from forms, posted vouchers in the
//! journal.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use bahi_core::{Entity, LedgerId, Money, VoucherId};

use crate::group::{LedgerGroup, Side};

/// Voucher kind.
///
/// The kind dictates whether a party ledger is required and which Sundry
/// group it must come from; beyond that, posting validity is the balance
/// invariant alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoucherKind {
    Sales,
    Purchase,
    Receipt,
    Payment,
    Journal,
    Contra,
    CreditNote,
    DebitNote,
}

impl VoucherKind {
    /// Party group dictated by the kind: customers on the sales side,
    /// suppliers on the purchase side, none for journal/contra entries.
    pub fn party_group(self) -> Option<LedgerGroup> {
        match self {
            VoucherKind::Sales | VoucherKind::Receipt | VoucherKind::CreditNote => {
                Some(LedgerGroup::SundryDebtors)
            }
            VoucherKind::Purchase | VoucherKind::Payment | VoucherKind::DebitNote => {
                Some(LedgerGroup::SundryCreditors)
            }
            VoucherKind::Journal | VoucherKind::Contra => None,
        }
    }

    pub fn requires_party(self) -> bool {
        self.party_group().is_some()
    }

    pub fn label(self) -> &'static str {
        match self {
            VoucherKind::Sales => "Sales",
            VoucherKind::Purchase => "Purchase",
            VoucherKind::Receipt => "Receipt",
            VoucherKind::Payment => "Payment",
            VoucherKind::Journal => "Journal",
            VoucherKind::Contra => "Contra",
            VoucherKind::CreditNote => "Credit Note",
            VoucherKind::DebitNote => "Debit Note",
        }
    }
}

impl core::fmt::Display for VoucherKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// One form row of a candidate voucher.
///
/// Rows arrive as users left them: fully blank rows (no ledger, zero amount)
/// are tolerated and skipped, half-filled rows are validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftLine {
    pub ledger: Option<LedgerId>,
    pub side: Side,
    /// Positive for a meaningful row.
    pub amount: Money,
    pub particulars: Option<String>,
}

impl DraftLine {
    pub fn debit(ledger: LedgerId, amount: Money) -> Self {
        Self {
            ledger: Some(ledger),
            side: Side::Debit,
            amount,
            particulars: None,
        }
    }

    pub fn credit(ledger: LedgerId, amount: Money) -> Self {
        Self {
            ledger: Some(ledger),
            side: Side::Credit,
            amount,
            particulars: None,
        }
    }

    pub fn with_particulars(mut self, text: impl Into<String>) -> Self {
        self.particulars = Some(text.into());
        self
    }

    pub(crate) fn is_blank(&self) -> bool {
        self.ledger.is_none() && self.amount.is_zero()
    }

    /// Resolved line, if this row carries a ledger reference.
    pub(crate) fn resolve(&self) -> Option<VoucherLine> {
        let ledger = self.ledger?;
        Some(VoucherLine {
            ledger,
            side: self.side,
            amount: self.amount,
            particulars: self.particulars.clone(),
        })
    }
}

/// Candidate voucher as captured from a form: the *draft* state.
///
/// Posting either journalizes it as a [`Voucher`] or rejects it with field
/// errors; a rejected draft has no balance effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftVoucher {
    pub kind: VoucherKind,
    pub date: NaiveDate,
    /// Party ledger (Sundry Debtor/Creditor), required for non-journal kinds.
    pub party: Option<LedgerId>,
    pub narration: Option<String>,
    pub lines: Vec<DraftLine>,
}

impl DraftVoucher {
    pub fn new(kind: VoucherKind, date: NaiveDate) -> Self {
        Self {
            kind,
            date,
            party: None,
            narration: None,
            lines: Vec::new(),
        }
    }

    pub fn with_party(mut self, ledger: LedgerId) -> Self {
        self.party = Some(ledger);
        self
    }

    pub fn with_narration(mut self, narration: impl Into<String>) -> Self {
        self.narration = Some(narration.into());
        self
    }

    pub fn with_line(mut self, line: DraftLine) -> Self {
        self.lines.push(line);
        self
    }
}

/// Posted line item: resolved ledger, side and a strictly positive amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoucherLine {
    pub ledger: LedgerId,
    pub side: Side,
    pub amount: Money,
    pub particulars: Option<String>,
}

impl VoucherLine {
    /// Signed effect on the ledger balance (debit-positive).
    pub fn signed_amount(&self) -> Money {
        self.side.signed(self.amount)
    }
}

/// Post-posting lifecycle.
///
/// A posted voucher is immutable; corrections happen through reversing
/// entries, never in place, so historical balances always re-derive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoucherStatus {
    Posted,
    /// Backed out by a reversing voucher.
    Reversed,
    /// Backed out and replaced by a correcting voucher.
    Superseded,
}

impl core::fmt::Display for VoucherStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            VoucherStatus::Posted => "posted",
            VoucherStatus::Reversed => "reversed",
            VoucherStatus::Superseded => "superseded",
        })
    }
}

/// A recorded financial transaction: balanced debit/credit line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voucher {
    id: VoucherId,
    /// Sequential number within the book, assigned at posting.
    number: u32,
    kind: VoucherKind,
    date: NaiveDate,
    party: Option<LedgerId>,
    narration: Option<String>,
    lines: Vec<VoucherLine>,
    /// Σ debit amounts (== Σ credit amounts within ε).
    total: Money,
    status: VoucherStatus,
    /// Set on a reversing voucher: the voucher it backs out.
    reverses: Option<VoucherId>,
    /// Set on a backed-out voucher: the reversing voucher.
    reversed_by: Option<VoucherId>,
}

impl Voucher {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: VoucherId,
        number: u32,
        kind: VoucherKind,
        date: NaiveDate,
        party: Option<LedgerId>,
        narration: Option<String>,
        lines: Vec<VoucherLine>,
        total: Money,
        reverses: Option<VoucherId>,
    ) -> Self {
        Self {
            id,
            number,
            kind,
            date,
            party,
            narration,
            lines,
            total,
            status: VoucherStatus::Posted,
            reverses,
            reversed_by: None,
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn kind(&self) -> VoucherKind {
        self.kind
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn party(&self) -> Option<LedgerId> {
        self.party
    }

    pub fn narration(&self) -> Option<&str> {
        self.narration.as_deref()
    }

    pub fn lines(&self) -> &[VoucherLine] {
        &self.lines
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn status(&self) -> VoucherStatus {
        self.status
    }

    /// Whether this voucher is itself a reversing entry.
    pub fn is_reversal(&self) -> bool {
        self.reverses.is_some()
    }

    pub fn reverses(&self) -> Option<VoucherId> {
        self.reverses
    }

    pub fn reversed_by(&self) -> Option<VoucherId> {
        self.reversed_by
    }

    pub(crate) fn mark_reversed(&mut self, by: VoucherId) {
        self.status = VoucherStatus::Reversed;
        self.reversed_by = Some(by);
    }

    pub(crate) fn mark_superseded(&mut self) {
        self.status = VoucherStatus::Superseded;
    }
}

impl Entity for Voucher {
    type Id = VoucherId;

    fn id(&self) -> &VoucherId {
        &self.id
    }
}
