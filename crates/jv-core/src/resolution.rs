//! Explicit-or-inferred option values.

/// A setting the user either supplied or left for the pipeline to derive
/// from the data.
///
/// Built once when options are assembled; every later stage matches on it
/// instead of re-checking optional inputs.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Resolution<T> {
    Explicit(T),
    Inferred,
}

impl<T> Resolution<T> {
    pub fn explicit(&self) -> Option<&T> {
        match self {
            Resolution::Explicit(v) => Some(v),
            Resolution::Inferred => None,
        }
    }

    pub fn is_inferred(&self) -> bool {
        matches!(self, Resolution::Inferred)
    }

    /// Validate an optional raw value into a resolution.
    pub fn try_from_option<U, E>(
        raw:   Option<U>,
        parse: impl FnOnce(U) -> Result<T, E>,
    ) -> Result<Self, E> {
        raw.map(parse).transpose().map(Self::from)
    }
}

impl<T> Default for Resolution<T> {
    fn default() -> Self {
        Resolution::Inferred
    }
}

impl<T> From<Option<T>> for Resolution<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Resolution::Explicit(v),
            None => Resolution::Inferred,
        }
    }
}
