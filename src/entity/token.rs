//! Closed enumerations with canonical string tokens.

use crate::{
    error::{AppError, AppResult},
    validation::{OneOf, Validator},
};

/// An enumeration whose values have canonical snake_case tokens.
pub trait Token: Copy + PartialEq + Sized + 'static {
    /// Field name used in validation messages.
    const FIELD: &'static str;

    /// Every value, in declaration order.
    const ALL: &'static [Self];

    /// Every token, in declaration order.
    const TOKENS: &'static [&'static str];

    /// Returns the canonical token.
    fn as_str(self) -> &'static str;

    /// Parses a token, ignoring surrounding whitespace and ASCII case.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] listing the permitted tokens when
    /// `raw` is not one of them.
    fn parse(raw: &str) -> AppResult<Self> {
        let normalized = raw.trim().to_ascii_lowercase();
        OneOf::new(Self::FIELD, Self::TOKENS)
            .validate(&normalized)
            .into_result()?;
        Self::ALL
            .iter()
            .copied()
            .find(|candidate| candidate.as_str() == normalized)
            .ok_or_else(|| AppError::validation(format!("unknown {} '{raw}'", Self::FIELD)))
    }
}

/// Parses an optional token, falling back to `default` when absent.
pub(crate) fn parse_or<T: Token>(raw: Option<&str>, default: T) -> AppResult<T> {
    raw.map_or(Ok(default), T::parse)
}
