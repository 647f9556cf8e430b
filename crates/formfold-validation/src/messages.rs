// File: src/messages.rs
// Purpose: Map structured violations to user-facing messages

use crate::rules::Violation;

/// Render one violation as a human-readable message for the error sink.
pub fn message(violation: &Violation, display_name: &str) -> String {
    match violation {
        Violation::Missing => format!("{} is required", display_name),
        Violation::InvalidEmail => "Please enter a valid email address".to_string(),
        Violation::InvalidPhoneNumber => "Please enter a valid phone number".to_string(),
        Violation::InvalidUserName => format!(
            "{} may only contain lowercase letters, numbers and underscores",
            display_name
        ),
        Violation::NotChecked => format!("{} must be checked", display_name),
        Violation::TooLong { max } => {
            format!("{} must be at most {} characters", display_name, max)
        }
        Violation::InvalidNumber => {
            format!("{} must be a whole number between 1 and 999", display_name)
        }
        Violation::InvalidPrice => {
            format!("{} must be a price between 0 and 9999", display_name)
        }
        Violation::IncompleteArticle => {
            format!("{} needs a title, content and an image", display_name)
        }
        Violation::IncompleteShowcase => format!("{} is incomplete", display_name),
        Violation::TooManyPhotos { max } => {
            format!("{} allows at most {} photos", display_name, max)
        }
    }
}
