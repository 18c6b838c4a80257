//! Ad selection: CTR-ranked choice among targeting-eligible candidates.

pub mod ordering;
pub mod selector;

pub use selector::AdSelector;
