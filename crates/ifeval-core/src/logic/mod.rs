//! Logical combinators wrapping one inner constraint.
//!
//! Combinators only see their inner constraint through [`Constraint`], so
//! they nest freely (a negation of a negation needs no special handling).

mod double_negation;
mod negation;

pub use double_negation::DoubleNegation;
pub use negation::Negation;
