//! Violation types produced by failed validation.
//!
//! A [`Violation`] is one failed check at one location; [`Violations`] is the
//! non-empty collection carried by a failed [`ValidationResult`](crate::ValidationResult).

mod violation;

pub use violation::{Violation, Violations};
