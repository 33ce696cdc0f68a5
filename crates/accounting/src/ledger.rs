//! Ledger accounts and the registry that owns them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use bahi_core::{DomainError, DomainResult, Entity, LedgerId, Money};

use crate::group::LedgerGroup;

/// Ledger status lifecycle.
///
/// Deactivation is soft: a ledger referenced by posted vouchers is never
/// physically removed, so the audit trail stays resolvable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerStatus {
    Active,
    Inactive,
}

/// A named account tracking a running balance.
///
/// Invariant: `current_balance = opening_balance + Σ signed amounts of all
/// posted voucher lines referencing this ledger`. Posting is the only path
/// that moves `current_balance`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    id: LedgerId,
    name: String,
    group: LedgerGroup,
    /// Signed, debit-positive.
    opening_balance: Money,
    current_balance: Money,
    status: LedgerStatus,
    /// Posted voucher lines referencing this ledger.
    posted_lines: u64,
}

impl Ledger {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn group(&self) -> LedgerGroup {
        self.group
    }

    pub fn opening_balance(&self) -> Money {
        self.opening_balance
    }

    pub fn current_balance(&self) -> Money {
        self.current_balance
    }

    pub fn status(&self) -> LedgerStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == LedgerStatus::Active
    }

    pub fn posted_lines(&self) -> u64 {
        self.posted_lines
    }
}

impl Entity for Ledger {
    type Id = LedgerId;

    fn id(&self) -> &LedgerId {
        &self.id
    }
}

/// Arena of ledger accounts for one book, keyed by id.
///
/// Balances mutate through `apply_delta` only, which is crate-private: the
/// posting engine is the sole writer, everything else reads.
#[derive(Debug, Default, Clone)]
pub struct LedgerRegistry {
    ledgers: HashMap<LedgerId, Ledger>,
    /// Case-folded name → id, for uniqueness within the book.
    names: HashMap<String, LedgerId>,
}

impl LedgerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ledger with the given opening balance (signed, debit-positive).
    ///
    /// Names are unique within the book, ignoring case and surrounding
    /// whitespace.
    pub fn create_ledger(
        &mut self,
        name: &str,
        group: LedgerGroup,
        opening_balance: Money,
    ) -> DomainResult<LedgerId> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("ledger name cannot be empty"));
        }

        let key = trimmed.to_lowercase();
        if self.names.contains_key(&key) {
            return Err(DomainError::duplicate_name(trimmed));
        }

        let id = LedgerId::new();
        self.names.insert(key, id);
        self.ledgers.insert(
            id,
            Ledger {
                id,
                name: trimmed.to_string(),
                group,
                opening_balance,
                current_balance: opening_balance,
                status: LedgerStatus::Active,
                posted_lines: 0,
            },
        );

        Ok(id)
    }

    pub fn ledger(&self, id: LedgerId) -> DomainResult<&Ledger> {
        self.ledgers.get(&id).ok_or(DomainError::NotFound)
    }

    pub fn ledger_by_name(&self, name: &str) -> Option<&Ledger> {
        let id = self.names.get(&name.trim().to_lowercase())?;
        self.ledgers.get(id)
    }

    pub fn contains(&self, id: LedgerId) -> bool {
        self.ledgers.contains_key(&id)
    }

    /// All ledgers, in arbitrary order; report aggregation sorts as needed.
    pub fn iter(&self) -> impl Iterator<Item = &Ledger> {
        self.ledgers.values()
    }

    pub fn len(&self) -> usize {
        self.ledgers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ledgers.is_empty()
    }

    /// Soft-deactivate a ledger.
    ///
    /// Refused once any posted voucher line references it; correcting a
    /// mistaken ledger means reversing the vouchers, not deleting the account.
    pub fn deactivate_ledger(&mut self, id: LedgerId) -> DomainResult<()> {
        let ledger = self.ledgers.get_mut(&id).ok_or(DomainError::NotFound)?;
        if ledger.posted_lines > 0 {
            return Err(DomainError::has_activity(ledger.name.clone()));
        }
        ledger.status = LedgerStatus::Inactive;
        Ok(())
    }

    /// Add a posted line's signed amount to the ledger's running balance and
    /// return the updated balance. One call per posted voucher line.
    pub(crate) fn apply_delta(&mut self, id: LedgerId, signed: Money) -> DomainResult<Money> {
        let ledger = self.ledgers.get_mut(&id).ok_or(DomainError::NotFound)?;
        ledger.current_balance += signed;
        ledger.posted_lines += 1;
        Ok(ledger.current_balance)
    }
}
