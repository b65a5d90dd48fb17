//! Primitive type system
//!
//! The closed set of primitive types and the implicit widening relation
//! between them.

mod lattice;
mod ty;

pub use lattice::{Conversion, is_implicitly_convertible};
pub use ty::Type;
