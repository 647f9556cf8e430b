// File: src/rules.rs
// Purpose: The fixed rule catalog - pure per-value validation with exact boundary semantics

use formfold_types::{Rule, Value};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").unwrap());
static USERNAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9_]+$").unwrap());
static NUMERIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d*\.?\d*$").unwrap());

/// Structured validation failure, independent of presentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    Missing,
    InvalidEmail,
    InvalidPhoneNumber,
    InvalidUserName,
    NotChecked,
    TooLong { max: usize },
    InvalidNumber,
    InvalidPrice,
    IncompleteArticle,
    IncompleteShowcase,
    TooManyPhotos { max: usize },
}

/// Evaluate one rule against one decoded value.
///
/// `value` is the entity attribute after decode/merge/prune; `None` means the
/// attribute was never written. All thresholds are inclusive unless noted.
pub fn validate(value: Option<&Value>, rule: Rule) -> Result<(), Violation> {
    match rule {
        Rule::RequiredField => {
            let present = match value {
                Some(Value::String(s)) => !s.trim().is_empty(),
                Some(v) => v.is_truthy(),
                None => false,
            };
            if present {
                Ok(())
            } else {
                Err(Violation::Missing)
            }
        }

        Rule::Email => match value {
            Some(Value::String(s)) => {
                if s.chars().count() > 100 || !EMAIL_RE.is_match(s) {
                    Err(Violation::InvalidEmail)
                } else {
                    Ok(())
                }
            }
            _ => Ok(()),
        },

        Rule::PhoneNumber => match value {
            Some(Value::String(s)) if !s.is_empty() => {
                let digits = s.chars().filter(|c| c.is_ascii_digit()).count();
                if digits == 10 || digits == 11 {
                    Ok(())
                } else {
                    Err(Violation::InvalidPhoneNumber)
                }
            }
            _ => Ok(()),
        },

        Rule::UserName => match value {
            Some(Value::String(s)) if USERNAME_RE.is_match(s) => Ok(()),
            _ => Err(Violation::InvalidUserName),
        },

        Rule::CheckboxChecked => {
            if value.map(Value::is_truthy).unwrap_or(false) {
                Ok(())
            } else {
                Err(Violation::NotChecked)
            }
        }

        Rule::TextLengthBelow30
        | Rule::TextLengthBelow50
        | Rule::TextLengthBelow100
        | Rule::TextLengthBelow200
        | Rule::TextLengthBelow300
        | Rule::TextLengthBelow400 => {
            // Absent values always pass; the rule caps, it does not require.
            let max = rule.max_len().unwrap_or(0);
            match value {
                Some(Value::String(s)) if s.chars().count() > max => {
                    Err(Violation::TooLong { max })
                }
                _ => Ok(()),
            }
        }

        Rule::Number => match value {
            Some(Value::String(s)) if !s.is_empty() => {
                if s.chars().count() > 10 || !NUMERIC_RE.is_match(s) {
                    return Err(Violation::InvalidNumber);
                }
                let parsed: f64 = s.parse().map_err(|_| Violation::InvalidNumber)?;
                let whole = parsed.trunc();
                if whole <= 0.0 || whole > 999.0 {
                    Err(Violation::InvalidNumber)
                } else {
                    Ok(())
                }
            }
            _ => Ok(()),
        },

        Rule::Price => match value {
            Some(Value::String(s)) if !s.is_empty() => {
                if s.chars().count() > 100 || !NUMERIC_RE.is_match(s) {
                    return Err(Violation::InvalidPrice);
                }
                if let Some(fraction) = s.split('.').nth(1) {
                    if fraction.len() > 2 {
                        return Err(Violation::InvalidPrice);
                    }
                }
                let parsed: f64 = s.parse().map_err(|_| Violation::InvalidPrice)?;
                if parsed <= 0.0 || parsed > 9999.0 {
                    Err(Violation::InvalidPrice)
                } else {
                    Ok(())
                }
            }
            _ => Ok(()),
        },
    }
}

/// Remaining characters for a live counter next to a length-capped field.
/// Negative when the value already exceeds the limit.
pub fn chars_remaining(value: &str, limit: usize) -> i64 {
    limit as i64 - value.chars().count() as i64
}
