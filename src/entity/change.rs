//! Three-state updates for optional fields carried by patches.

/// How a patch treats an optional field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Change<T> {
    /// Leave the field as it is.
    #[default]
    Keep,
    /// Replace the field with a value.
    Set(T),
    /// Remove the field's value.
    Clear,
}

impl<T> Change<T> {
    /// Maps `Some` to [`Change::Set`] and `None` to [`Change::Clear`].
    #[must_use]
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(inner) => Self::Set(inner),
            None => Self::Clear,
        }
    }

    /// Writes the change into `field`.
    pub fn apply_to(self, field: &mut Option<T>) {
        match self {
            Self::Keep => {}
            Self::Set(value) => *field = Some(value),
            Self::Clear => *field = None,
        }
    }
}

impl<T> From<Option<T>> for Change<T> {
    fn from(value: Option<T>) -> Self {
        Self::from_option(value)
    }
}
