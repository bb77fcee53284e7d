//! Field validation for form inputs.
//!
//! Each raw form type implements [`Validate`], turning itself into a domain
//! value or a list of `(field, message)` violations that the form view renders
//! next to the offending inputs.

use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

pub const MSG_NOT_EMPTY: &str = "must not be empty";
pub const MSG_NOT_NULL: &str = "must not be null";
pub const MSG_PAST: &str = "must be in the past";
pub const MSG_EMAIL: &str = "not a well-formed email address";
pub const MSG_DATE_FORMAT: &str = "invalid date, expected MM/dd/yyyy";

/// A single failed constraint, attributed to the form field that caused it.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

/// Ordered set of violations collected while validating one input.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(Violation {
            field,
            message: message.into(),
        });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    /// Messages attached to `field`, in the order they were raised.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |violation| violation.field == field)
            .map(|violation| violation.message.as_str())
    }

    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.0.iter().any(|violation| violation.field == field)
    }

    /// Require a non-empty value.
    pub(crate) fn not_empty(&mut self, field: &'static str, value: &str) {
        if value.is_empty() {
            self.push(field, MSG_NOT_EMPTY);
        }
    }

    /// Require a character count within `min..=max`. Empty values are checked too.
    pub(crate) fn size(&mut self, field: &'static str, value: &str, min: usize, max: usize) {
        let len = value.chars().count();
        if len < min || len > max {
            self.push(field, format!("size must be between {min} and {max}"));
        }
    }

    pub(crate) fn email(&mut self, field: &'static str, value: &str) {
        if !value.is_empty() && !valid_email(value) {
            self.push(field, MSG_EMAIL);
        }
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for violation in &self.0 {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", violation.field, violation.message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for Violations {}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Dot-separated atoms, `@`, then dot-separated host labels or an `[IPv4]` literal.
static EMAIL_REGEX: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)^[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*",
        r"@(?:[a-z0-9-]+(?:\.[a-z0-9-]+)*|\[[0-9]{1,3}(?:\.[0-9]{1,3}){3}\])$",
    ))
    .ok()
});

/// Email syntax check. The domain needs no dot, so `user@localhost` passes.
pub fn valid_email(email: &str) -> bool {
    EMAIL_REGEX
        .as_ref()
        .is_some_and(|regex| regex.is_match(email))
}

/// A raw input that can be checked and converted into its validated form.
pub trait Validate {
    type Valid;

    /// Check every constraint against `today` and build the validated value.
    ///
    /// # Errors
    /// Returns all violations found; validation does not stop at the first one.
    fn validate(&self, today: NaiveDate) -> Result<Self::Valid, Violations>;
}

/// Source of "today" for date constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    System,
    Fixed(NaiveDate),
}

impl Clock {
    #[must_use]
    pub fn today(self) -> NaiveDate {
        match self {
            Self::System => Local::now().date_naive(),
            Self::Fixed(date) => date,
        }
    }
}

/// Validation component shared by the request handlers.
#[derive(Debug, Clone, Copy)]
pub struct Validator {
    clock: Clock,
}

impl Validator {
    #[must_use]
    pub const fn new(clock: Clock) -> Self {
        Self { clock }
    }

    #[must_use]
    pub const fn system() -> Self {
        Self::new(Clock::System)
    }

    /// # Errors
    /// Returns the violations reported by the input.
    pub fn validate<T: Validate>(&self, input: &T) -> Result<T::Valid, Violations> {
        input.validate(self.clock.today())
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::system()
    }
}
