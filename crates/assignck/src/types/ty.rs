//! Primitive type representation

use std::fmt;

/// Primitive type of a variable or expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    /// No value
    Void,
    /// Single character
    Char,
    /// Signed integer
    Int,
    /// Floating point number
    Float,
    /// Character string
    String,
}

impl Type {
    /// Every primitive type, in widening order where one exists
    pub const ALL: [Type; 5] = [Type::Void, Type::Char, Type::Int, Type::Float, Type::String];

    /// Source keyword naming this type
    pub fn keyword(self) -> &'static str {
        match self {
            Type::Void => "void",
            Type::Char => "char",
            Type::Int => "int",
            Type::Float => "float",
            Type::String => "string",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
