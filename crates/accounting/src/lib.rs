//! Double-entry bookkeeping core: ledger registry and voucher posting.
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns. The
//! storage collaborator persists what posting emits and supplies lookups; this
//! crate owns the rules that keep every transaction balanced.

pub mod group;
pub mod ledger;
pub mod posting;
pub mod tax;
pub mod voucher;

pub use group::{BalanceSheetSection, LedgerGroup, ProfitAndLossSection, Side, Statement};
pub use ledger::{Ledger, LedgerRegistry, LedgerStatus};
pub use posting::{
    Amendment, Journal, LedgerBalance, PostingError, PostingReceipt, ValidationIssue, validate,
};
pub use tax::{TaxSplit, flat_rate_split};
pub use voucher::{DraftLine, DraftVoucher, Voucher, VoucherKind, VoucherLine, VoucherStatus};
