//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared entirely by their attribute
/// values; identity does not exist for them. `Money` is the canonical example
/// here: any two hundred-paise amounts are the same amount, whereas two
/// `Ledger`s named "Cash" are still two different ledgers.
///
/// To "modify" a value object, construct a new one. The required bounds keep
/// them cheap to copy, comparable and debuggable.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
