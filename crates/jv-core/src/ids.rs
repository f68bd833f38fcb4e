//! Strongly typed, zero-cost identifier wrappers.
//!
//! Both ids are `Copy + Ord + Hash` so they can be used as map keys and as
//! sort keys without ceremony.  The legacy export writes them as
//! non-negative integers; SQLite stores them as signed 64-bit `INTEGER`, so
//! each wrapper converts losslessly into `i64` and fallibly back.

use std::fmt;
use std::num::TryFromIntError;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty) => $label:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// The raw integer value.
            #[inline(always)]
            pub fn get(self) -> $inner {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, " {}"), self.0)
            }
        }

        impl From<$inner> for $name {
            #[inline(always)]
            fn from(n: $inner) -> Self {
                $name(n)
            }
        }

        impl From<$name> for i64 {
            #[inline(always)]
            fn from(id: $name) -> i64 {
                i64::from(id.0)
            }
        }

        impl TryFrom<i64> for $name {
            type Error = TryFromIntError;
            fn try_from(n: i64) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// One pedestrian.  Stable across all frames of a file.
    pub struct AgentId(u32) => "agent";
}

typed_id! {
    /// A simulation tick at which positions were recorded.
    pub struct Frame(u32) => "frame";
}

impl Frame {
    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Frame) -> u32 {
        self.0 - earlier.0
    }
}
