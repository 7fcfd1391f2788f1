//! Helpers for turning raw item fields into display text.

pub mod date;
pub mod link;
pub mod name;
