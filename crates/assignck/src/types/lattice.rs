//! Implicit conversion lattice
//!
//! Only identity and lossless widening are allowed:
//!
//! ```text
//! char -> int -> float
//!   \____________^
//! ```
//!
//! Everything else, including any conversion to or from `string` and
//! `void`, is rejected. The match below names every ordered pair so a new
//! [`Type`] variant cannot slip through as convertible.

use super::Type;

/// How an allowed implicit conversion changes the value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// Source and target are the same type
    Identity,
    /// Source widens to the target without losing information
    Widening,
}

impl Type {
    /// Classify the implicit conversion from `self` to `to`.
    ///
    /// Returns `None` when no implicit conversion exists.
    pub fn conversion_to(self, to: Type) -> Option<Conversion> {
        use Type::*;

        match (self, to) {
            (Void, Void) | (Char, Char) | (Int, Int) | (Float, Float) | (String, String) => {
                Some(Conversion::Identity)
            }

            (Char, Int) | (Char, Float) | (Int, Float) => Some(Conversion::Widening),

            // Narrowing, stringification and void never convert
            (Void, Char | Int | Float | String)
            | (Char, Void | String)
            | (Int, Void | Char | String)
            | (Float, Void | Char | Int | String)
            | (String, Void | Char | Int | Float) => None,
        }
    }

    /// Check if a value of this type may be stored into `to` without a cast
    pub fn converts_to(self, to: Type) -> bool {
        self.conversion_to(to).is_some()
    }
}

/// Check if `from` implicitly converts to `to`
pub fn is_implicitly_convertible(from: Type, to: Type) -> bool {
    from.converts_to(to)
}
