//! formfold-validation
//!
//! Pure validation functions for the formfold engine. Rule evaluation returns
//! structured violations; mapping a violation to a user-facing message is a
//! separate presentation concern in `messages`.

pub mod composite;
pub mod messages;
pub mod rules;

pub use composite::{validate_article, validate_showcase};
pub use messages::message;
pub use rules::{chars_remaining, validate, Violation};
