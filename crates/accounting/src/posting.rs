//! Voucher validation and posting.
//!
//! Posting is all-or-nothing: every rule is checked and every delta resolved
//! before any balance is touched, so a rejected or failed voucher leaves the
//! book exactly as it was.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use bahi_core::{BALANCE_EPSILON, DomainError, DomainResult, Entity, LedgerId, Money, VoucherId};

use crate::group::{LedgerGroup, Side};
use crate::ledger::LedgerRegistry;
use crate::voucher::{DraftLine, DraftVoucher, Voucher, VoucherKind, VoucherLine, VoucherStatus};

/// A single field-scoped validation failure.
///
/// All violated rules are collected and reported together so one correction
/// pass fixes the whole voucher.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "issue")]
pub enum ValidationIssue {
    #[error("line {line}: amount must be positive")]
    AmountNotPositive { line: usize },

    #[error("line {line}: missing ledger reference")]
    MissingLedger { line: usize },

    #[error("line {line}: unknown ledger")]
    UnknownLedger { line: usize, ledger: LedgerId },

    #[error("line {line}: ledger '{name}' is inactive")]
    InactiveLedger { line: usize, name: String },

    #[error("voucher needs at least one line with a ledger and a positive amount")]
    NoEffectiveLines,

    #[error("{kind} voucher requires a party ledger")]
    MissingParty { kind: VoucherKind },

    #[error("party ledger does not exist")]
    UnknownParty { ledger: LedgerId },

    #[error("party ledger '{name}' must belong to {expected}")]
    PartyGroupMismatch { name: String, expected: LedgerGroup },

    #[error("debits ({debits}) and credits ({credits}) differ by more than 0.01")]
    Unbalanced { debits: Money, credits: Money },
}

impl ValidationIssue {
    /// Form field the issue belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationIssue::AmountNotPositive { .. }
            | ValidationIssue::MissingLedger { .. }
            | ValidationIssue::UnknownLedger { .. }
            | ValidationIssue::InactiveLedger { .. }
            | ValidationIssue::NoEffectiveLines => "lines",
            ValidationIssue::MissingParty { .. }
            | ValidationIssue::UnknownParty { .. }
            | ValidationIssue::PartyGroupMismatch { .. } => "party",
            ValidationIssue::Unbalanced { .. } => "total",
        }
    }
}

/// Why a voucher could not be posted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostingError {
    /// Validation failed; the draft was rejected with no balance effect.
    #[error("voucher rejected with {} validation issue(s)", .0.len())]
    Rejected(Vec<ValidationIssue>),

    /// A ledger vanished between validation and apply. Nothing was applied.
    #[error("ledger {0} not found during posting")]
    LedgerNotFound(LedgerId),

    /// The referenced voucher does not exist in this journal.
    #[error("voucher {0} not found")]
    VoucherNotFound(VoucherId),

    /// Only a voucher still in `Posted` status can be reversed or amended.
    #[error("voucher #{number} is already {status}")]
    NotReversible { number: u32, status: VoucherStatus },
}

/// Updated running balance of one ledger touched by a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LedgerBalance {
    pub ledger: LedgerId,
    pub current_balance: Money,
}

/// Outcome of a successful posting, addressed to the storage collaborator:
/// the finalized voucher plus the updated balance of every ledger it touched.
/// Persisting both atomically (and stamping storage ids/timestamps) is the
/// collaborator's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostingReceipt {
    pub voucher: Voucher,
    pub balances: Vec<LedgerBalance>,
}

/// Outcome of an audit-safe correction: the reversal and the corrected entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Amendment {
    pub reversal: PostingReceipt,
    pub correction: PostingReceipt,
}

/// Check a draft against every posting rule, collecting all violations.
///
/// An empty result means the draft may post. Date presence/parseability is
/// carried by the `NaiveDate` type, so no rule re-checks it here.
pub fn validate(registry: &LedgerRegistry, draft: &DraftVoucher) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    // Party rules, for kinds that transact with a named party.
    if let Some(expected) = draft.kind.party_group() {
        match draft.party {
            None => issues.push(ValidationIssue::MissingParty { kind: draft.kind }),
            Some(party) => match registry.ledger(party) {
                Err(_) => issues.push(ValidationIssue::UnknownParty { ledger: party }),
                Ok(ledger) if ledger.group() != expected => {
                    issues.push(ValidationIssue::PartyGroupMismatch {
                        name: ledger.name().to_string(),
                        expected,
                    });
                }
                Ok(_) => {}
            },
        }
    }

    // Line rules. Blank rows are form artifacts and are skipped outright.
    let mut debits: i128 = 0;
    let mut credits: i128 = 0;
    let mut effective = 0usize;

    for (idx, line) in draft.lines.iter().enumerate() {
        if line.is_blank() {
            continue;
        }
        let line_no = idx + 1;

        match line.ledger {
            None => issues.push(ValidationIssue::MissingLedger { line: line_no }),
            Some(id) => match registry.ledger(id) {
                Err(_) => issues.push(ValidationIssue::UnknownLedger {
                    line: line_no,
                    ledger: id,
                }),
                Ok(ledger) if !ledger.is_active() => {
                    issues.push(ValidationIssue::InactiveLedger {
                        line: line_no,
                        name: ledger.name().to_string(),
                    });
                }
                Ok(_) => {}
            },
        }

        if !line.amount.is_positive() {
            issues.push(ValidationIssue::AmountNotPositive { line: line_no });
        }

        if line.ledger.is_some() && line.amount.is_positive() {
            effective += 1;
            match line.side {
                Side::Debit => debits += i128::from(line.amount.minor()),
                Side::Credit => credits += i128::from(line.amount.minor()),
            }
        }
    }

    if effective == 0 {
        issues.push(ValidationIssue::NoEffectiveLines);
    }

    // The fundamental double-entry invariant.
    if (debits - credits).unsigned_abs() > BALANCE_EPSILON.minor().unsigned_abs() as u128 {
        let clamp = |v: i128| Money::from_minor(v.clamp(i64::MIN.into(), i64::MAX.into()) as i64);
        issues.push(ValidationIssue::Unbalanced {
            debits: clamp(debits),
            credits: clamp(credits),
        });
    }

    issues
}

/// Posted voucher history for one book, plus the posting engine itself.
///
/// Every state-changing operation takes `&mut self` and `&mut LedgerRegistry`:
/// the single-writer-per-book model is enforced by the borrow checker, so two
/// postings against the same book cannot interleave and lose updates.
#[derive(Debug, Clone)]
pub struct Journal {
    vouchers: Vec<Voucher>,
    next_number: u32,
}

impl Journal {
    pub fn new() -> Self {
        Self {
            vouchers: Vec::new(),
            next_number: 1,
        }
    }

    pub fn vouchers(&self) -> &[Voucher] {
        &self.vouchers
    }

    pub fn voucher(&self, id: VoucherId) -> DomainResult<&Voucher> {
        self.vouchers
            .iter()
            .find(|v| *v.id() == id)
            .ok_or(DomainError::NotFound)
    }

    pub fn len(&self) -> usize {
        self.vouchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vouchers.is_empty()
    }

    /// Validate and post a draft as one atomic unit.
    ///
    /// `Draft → Posted` on success; `Draft → Rejected` (no balance effect) on
    /// validation failure.
    pub fn post(
        &mut self,
        registry: &mut LedgerRegistry,
        draft: DraftVoucher,
    ) -> Result<PostingReceipt, PostingError> {
        let issues = validate(registry, &draft);
        if !issues.is_empty() {
            tracing::debug!(kind = %draft.kind, issues = issues.len(), "voucher rejected");
            return Err(PostingError::Rejected(issues));
        }

        let lines: Vec<VoucherLine> = draft.lines.iter().filter_map(DraftLine::resolve).collect();
        self.journalize(
            registry,
            draft.kind,
            draft.date,
            draft.party,
            draft.narration,
            lines,
            None,
        )
    }

    /// Post a mirror voucher that backs out `id` and mark the original
    /// `Reversed`. Both entries stay in the journal: the audit trail is
    /// append-only.
    pub fn reverse(
        &mut self,
        registry: &mut LedgerRegistry,
        id: VoucherId,
        date: NaiveDate,
    ) -> Result<PostingReceipt, PostingError> {
        let original = self
            .voucher(id)
            .map_err(|_| PostingError::VoucherNotFound(id))?;
        if original.status() != VoucherStatus::Posted {
            return Err(PostingError::NotReversible {
                number: original.number(),
                status: original.status(),
            });
        }

        let kind = original.kind();
        let party = original.party();
        let narration = format!("Reversal of voucher #{}", original.number());
        let mirrored: Vec<VoucherLine> = original
            .lines()
            .iter()
            .map(|line| VoucherLine {
                ledger: line.ledger,
                side: line.side.opposite(),
                amount: line.amount,
                particulars: line.particulars.clone(),
            })
            .collect();

        let receipt = self.journalize(
            registry,
            kind,
            date,
            party,
            Some(narration),
            mirrored,
            Some(id),
        )?;

        let reversal_id = *receipt.voucher.id();
        if let Some(original) = self.voucher_mut(id) {
            original.mark_reversed(reversal_id);
        }

        Ok(receipt)
    }

    /// Correct a posted voucher audit-safely: validate the correction first,
    /// then post a reversal plus the corrected entry and mark the original
    /// `Superseded`. A bad correction leaves the book untouched.
    pub fn amend(
        &mut self,
        registry: &mut LedgerRegistry,
        id: VoucherId,
        corrected: DraftVoucher,
    ) -> Result<Amendment, PostingError> {
        let issues = validate(registry, &corrected);
        if !issues.is_empty() {
            return Err(PostingError::Rejected(issues));
        }

        let reversal = self.reverse(registry, id, corrected.date)?;

        let lines: Vec<VoucherLine> =
            corrected.lines.iter().filter_map(DraftLine::resolve).collect();
        let correction = self.journalize(
            registry,
            corrected.kind,
            corrected.date,
            corrected.party,
            corrected.narration,
            lines,
            None,
        )?;

        if let Some(original) = self.voucher_mut(id) {
            original.mark_superseded();
        }

        Ok(Amendment {
            reversal,
            correction,
        })
    }

    /// Append an already-validated voucher and apply its balance deltas.
    ///
    /// Two phases: every ledger is resolved before any balance moves, so a
    /// missing ledger fails the whole voucher with the book unchanged.
    #[allow(clippy::too_many_arguments)]
    fn journalize(
        &mut self,
        registry: &mut LedgerRegistry,
        kind: VoucherKind,
        date: NaiveDate,
        party: Option<LedgerId>,
        narration: Option<String>,
        lines: Vec<VoucherLine>,
        reverses: Option<VoucherId>,
    ) -> Result<PostingReceipt, PostingError> {
        for line in &lines {
            if !registry.contains(line.ledger) {
                return Err(PostingError::LedgerNotFound(line.ledger));
            }
        }

        let mut balances: Vec<LedgerBalance> = Vec::new();
        for line in &lines {
            // Cannot fail: presence checked above and ledgers are never removed.
            let current = registry
                .apply_delta(line.ledger, line.signed_amount())
                .map_err(|_| PostingError::LedgerNotFound(line.ledger))?;
            match balances.iter().position(|b| b.ledger == line.ledger) {
                Some(i) => balances[i].current_balance = current,
                None => balances.push(LedgerBalance {
                    ledger: line.ledger,
                    current_balance: current,
                }),
            }
        }

        let total: Money = lines
            .iter()
            .filter(|line| line.side == Side::Debit)
            .map(|line| line.amount)
            .sum();

        let voucher = Voucher::new(
            VoucherId::new(),
            self.next_number,
            kind,
            date,
            party,
            narration,
            lines,
            total,
            reverses,
        );
        self.next_number += 1;

        tracing::info!(
            number = voucher.number(),
            kind = %kind,
            total = %total,
            lines = voucher.lines().len(),
            "voucher posted"
        );

        self.vouchers.push(voucher.clone());
        Ok(PostingReceipt { voucher, balances })
    }

    fn voucher_mut(&mut self, id: VoucherId) -> Option<&mut Voucher> {
        self.vouchers.iter_mut().find(|v| *v.id() == id)
    }
}

impl Default for Journal {
    fn default() -> Self {
        Self::new()
    }
}
