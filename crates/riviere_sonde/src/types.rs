//! Resolved type facts.
//!
//! What a host language service can tell us about one binding: the display
//! string and a coarse kind. The classifier only ever asks two questions —
//! "is it function-shaped?" and "is it a non-function primitive?" — so the
//! kind lattice stays deliberately small.

use serde::{Deserialize, Serialize};

/// Coarse kind of a resolved type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    /// Primitive types (string, number, boolean, bigint, symbol).
    Primitive,
    /// Object types, including interfaces and type literals.
    Object,
    /// Array and tuple types.
    Array,
    /// Function-shaped types (callables, dispatchers, setters).
    Function,
    /// Literal types (specific values).
    Literal,
    /// Anything the oracle could not categorize.
    Unknown,
}

/// Type information for one binding, as reported by the oracle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeFacts {
    /// Human-readable type representation.
    pub display: String,
    /// Coarse kind for classification.
    pub kind: TypeKind,
}

impl TypeFacts {
    /// Create new type facts.
    pub fn new(display: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            display: display.into(),
            kind,
        }
    }

    /// A function-shaped type.
    pub fn function(display: impl Into<String>) -> Self {
        Self::new(display, TypeKind::Function)
    }

    /// A primitive type.
    pub fn primitive(display: impl Into<String>) -> Self {
        Self::new(display, TypeKind::Primitive)
    }

    /// An object-shaped type.
    pub fn object(display: impl Into<String>) -> Self {
        Self::new(display, TypeKind::Object)
    }

    /// An unknown type.
    pub fn unknown() -> Self {
        Self::new("unknown", TypeKind::Unknown)
    }

    /// Whether the binding is callable.
    #[inline]
    pub fn is_function(&self) -> bool {
        self.kind == TypeKind::Function
    }

    /// Whether the binding is a primitive (or literal) that is not callable.
    /// This is the shape that triggers the heuristic-wins override.
    #[inline]
    pub fn is_non_function_primitive(&self) -> bool {
        matches!(self.kind, TypeKind::Primitive | TypeKind::Literal)
    }
}
