//! Right-operand shape and the wrapping policy derived from it.
//!
//! `a in b` becomes `b.includes(a)`, which appends a member call to `b`.
//! Whether `b` needs `Array.from(...)` or plain parentheses first depends
//! only on its syntactic shape and on `looseIncludes`.

use dcf_parser::NodeKind;

/// Conversion applied to right operands that may be a non-array iterable.
pub const ARRAY_FROM: &str = "Array.from";

/// Syntactic kind of an operand, as far as the wrapping policy cares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperandShape {
    Identifier,
    StaticMemberAccess,
    DynamicMemberAccess,
    CallExpression,
    ArrayLiteral,
    StringLiteral,
    Other,
}

impl OperandShape {
    pub fn of(kind: &NodeKind) -> Self {
        match kind {
            NodeKind::Identifier => OperandShape::Identifier,
            NodeKind::MemberAccess { .. } => OperandShape::StaticMemberAccess,
            NodeKind::DynamicMemberAccess { .. } => OperandShape::DynamicMemberAccess,
            NodeKind::Call { .. } => OperandShape::CallExpression,
            NodeKind::ArrayLiteral { .. } => OperandShape::ArrayLiteral,
            NodeKind::String => OperandShape::StringLiteral,
            _ => OperandShape::Other,
        }
    }

    pub const fn is_array_literal(self) -> bool {
        matches!(self, OperandShape::ArrayLiteral)
    }

    /// Shapes that bind at least as tightly as a member call, so
    /// `.includes(...)` can be appended without parentheses.
    pub const fn accepts_member_call(self) -> bool {
        !matches!(self, OperandShape::Other)
    }
}

/// How the right operand is wrapped before `.includes(` is appended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RhsWrapping {
    /// Wrap in `Array.from(...)`.
    pub array_from: bool,
    /// Wrap in parentheses. Implied by `array_from`.
    pub parens: bool,
}

impl RhsWrapping {
    pub const fn decide(shape: OperandShape, loose_includes: bool) -> Self {
        let array_from = !loose_includes && !shape.is_array_literal();
        RhsWrapping {
            array_from,
            parens: array_from || !shape.accepts_member_call(),
        }
    }

    /// Apply the wrapping to already-rendered operand code.
    pub fn wrap(&self, code: &str) -> String {
        match (self.array_from, self.parens) {
            (true, _) => format!("{ARRAY_FROM}({code})"),
            (false, true) => format!("({code})"),
            (false, false) => code.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/operand_shape_tests.rs"]
mod tests;
