//! Flat-rate tax split for tax-inclusive amounts.
//!
//! This is the illustrative split only (e.g. carving GST out of an invoice
//! total so it can be credited to a Duties & Taxes ledger); rate schedules,
//! filing and other regulatory computation live outside this core.

use serde::{Deserialize, Serialize};

use bahi_core::Money;

/// Net and tax portions of a tax-inclusive gross amount.
///
/// `net + tax == gross` always.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSplit {
    pub net: Money,
    pub tax: Money,
}

/// Split a tax-inclusive `gross` at a flat rate given in basis points
/// (e.g. 1800 for 18%).
///
/// The tax portion is `gross * rate / (10000 + rate)`, rounded half-up away
/// from zero; the net portion absorbs the rounding so the two always sum back
/// to `gross`.
pub fn flat_rate_split(gross: Money, rate_bp: u32) -> TaxSplit {
    if rate_bp == 0 {
        return TaxSplit {
            net: gross,
            tax: Money::ZERO,
        };
    }

    let rate = i128::from(rate_bp);
    let denom = 10_000 + rate;
    let magnitude = i128::from(gross.minor()).abs();
    let tax_abs = (magnitude * rate + denom / 2) / denom;

    let tax = if gross.is_negative() {
        Money::from_minor(-(tax_abs as i64))
    } else {
        Money::from_minor(tax_abs as i64)
    };

    TaxSplit {
        net: gross - tax,
        tax,
    }
}
