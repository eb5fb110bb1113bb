//! Expression parser and arena AST for the dcf patcher.
//!
//! Only the expression subset the main-stage patchers need is parsed:
//! literals, identifiers, arrays, calls, member access, unary `not`,
//! arithmetic, comparison, logical and relational operators, and
//! assignment. Parentheses never become nodes of their own; they widen the
//! outer range of the node they wrap.

pub mod node;
pub use node::{BinaryOperator, Node, NodeArena, NodeIndex, NodeKind};

pub mod parser;
pub use parser::{ParseError, ParsedSource, Parser, parse_program};
