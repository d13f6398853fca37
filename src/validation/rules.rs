//! Individual validator implementations.

use super::{Validation, Validator};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$"));

static HEX_COLOR_PATTERN: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$"));

fn matches_pattern(pattern: &LazyLock<Result<Regex, regex::Error>>, value: &str) -> bool {
    matches!(&**pattern, Ok(regex) if regex.is_match(value))
}

/// Rejects empty or whitespace-only values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Required {
    field: &'static str,
}

impl Required {
    /// Creates a presence check for the named field.
    #[must_use]
    pub const fn new(field: &'static str) -> Self {
        Self { field }
    }
}

impl Validator for Required {
    fn validate(&self, value: &str) -> Validation {
        if value.trim().is_empty() {
            return Validation::invalid(format!("{} is required", self.field));
        }
        Validation::Valid
    }
}

/// Checks that a value's character count lies within inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringLength {
    field: &'static str,
    min: usize,
    max: usize,
}

impl StringLength {
    /// Creates a length check for the named field.
    #[must_use]
    pub const fn new(field: &'static str, min: usize, max: usize) -> Self {
        Self { field, min, max }
    }
}

impl Validator for StringLength {
    fn validate(&self, value: &str) -> Validation {
        let length = value.chars().count();
        if length < self.min {
            return Validation::invalid(format!(
                "{} must be at least {} characters",
                self.field, self.min
            ));
        }
        if length > self.max {
            return Validation::invalid(format!(
                "{} cannot exceed {} characters",
                self.field, self.max
            ));
        }
        Validation::Valid
    }
}

/// Checks membership in a closed set of tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OneOf {
    field: &'static str,
    allowed: &'static [&'static str],
}

impl OneOf {
    /// Creates a membership check for the named field.
    #[must_use]
    pub const fn new(field: &'static str, allowed: &'static [&'static str]) -> Self {
        Self { field, allowed }
    }
}

impl Validator for OneOf {
    fn validate(&self, value: &str) -> Validation {
        if self.allowed.contains(&value) {
            return Validation::Valid;
        }
        Validation::invalid(format!(
            "{} must be one of: {}",
            self.field,
            self.allowed.join(", ")
        ))
    }
}

/// Checks e-mail address format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmailFormat;

impl Validator for EmailFormat {
    fn validate(&self, value: &str) -> Validation {
        if matches_pattern(&EMAIL_PATTERN, value) {
            Validation::Valid
        } else {
            Validation::invalid("Invalid email format")
        }
    }
}

/// Checks `#RRGGBB` hex colour format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HexColor;

impl Validator for HexColor {
    fn validate(&self, value: &str) -> Validation {
        if matches_pattern(&HEX_COLOR_PATTERN, value) {
            Validation::Valid
        } else {
            Validation::invalid("Invalid hex color format (e.g., #FF5733)")
        }
    }
}

/// Rejects values containing anything but letters and digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alphanumeric {
    field: &'static str,
}

impl Alphanumeric {
    /// Creates an alphanumeric check for the named field.
    #[must_use]
    pub const fn new(field: &'static str) -> Self {
        Self { field }
    }
}

impl Validator for Alphanumeric {
    fn validate(&self, value: &str) -> Validation {
        if value.chars().all(char::is_alphanumeric) {
            Validation::Valid
        } else {
            Validation::invalid(format!("{} must be alphanumeric", self.field))
        }
    }
}
