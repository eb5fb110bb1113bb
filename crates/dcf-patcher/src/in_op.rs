//! Membership Test Transform
//!
//! The target dialect has no membership operator, so `a in b` is rewritten
//! into a call on the right operand:
//!
//! ```coffeescript
//! x in [1, 2, 3]
//! x not in list
//! foo() in bar()
//! ```
//!
//! Becomes:
//!
//! ```javascript
//! [1, 2, 3].includes(x)
//! !Array.from(list).includes(x)
//! (needle = foo(), Array.from(bar()).includes(needle))
//! ```
//!
//! The call evaluates the receiver (`b`) before the argument (`a`), the
//! reverse of the source order. When either operand is impure the left
//! operand is hoisted into a temporary that is assigned first, inside a
//! comma expression, so it still runs exactly once and before `b`.
//!
//! # Negation
//!
//! The patcher is built before anything is emitted. An enclosing `not`
//! calls [`InOpPatcher::negate`] during that build phase;
//! [`InOpPatcher::patch_as_expression`] then consumes the patcher, so a
//! late toggle cannot be expressed.

use crate::error::PatchResult;
use crate::operand_shape::{ARRAY_FROM, RhsWrapping};
use crate::patcher::{NodePatcher, RepeatableOptions};
use dcf_parser::NodeIndex;
use dcf_scanner::{SourceToken, SourceType};
use tracing::{debug, trace};

/// Base name of the temporary holding an impure left operand.
pub const NEEDLE_REF: &str = "needle";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InOpPatcher {
    node: NodeIndex,
    left: NodeIndex,
    right: NodeIndex,
    negated: bool,
}

impl InOpPatcher {
    /// `is_not` is the `not in` flag from the source.
    pub const fn new(node: NodeIndex, left: NodeIndex, right: NodeIndex, is_not: bool) -> Self {
        InOpPatcher {
            node,
            left,
            right,
            negated: is_not,
        }
    }

    pub const fn is_negated(&self) -> bool {
        self.negated
    }

    /// Flip the emitted negation. Used by an enclosing `not` that folds
    /// itself into this test instead of wrapping it.
    pub fn negate(&mut self) {
        self.negated = !self.negated;
    }

    /// Selects the `in` / `not in` token.
    pub fn operator_token_predicate() -> fn(&SourceToken) -> bool {
        |token: &SourceToken| token.kind == SourceType::Relation
    }

    /// The output is a method call or a parenthesized comma expression,
    /// both valid as a bare statement.
    pub const fn statement_needs_parens(&self) -> bool {
        false
    }

    fn rhs_wrapping<P: NodePatcher + ?Sized>(&self, patcher: &P) -> RhsWrapping {
        RhsWrapping::decide(
            patcher.operand_shape(self.right),
            patcher.options().loose_includes,
        )
    }

    /// `LEFT in RIGHT`
    pub fn patch_as_expression<P: NodePatcher + ?Sized>(self, patcher: &mut P) -> PatchResult<()> {
        // Logged for diagnostics only; the edits below address the operand
        // ranges, and the gap between them holds the operator.
        if let Some(token) = patcher.operator_token(self.node, Self::operator_token_predicate()) {
            trace!(node = %self.node, operator = ?token.span, "membership operator");
        }

        if !patcher.is_pure(self.left) || !patcher.is_pure(self.right) {
            return self.patch_with_lhs_extracted(patcher);
        }

        let left = patcher.range(self.left)?;
        let right = patcher.range(self.right)?;
        let wrapping = self.rhs_wrapping(patcher);
        debug!(node = %self.node, negated = self.negated, ?wrapping, "membership test, pure operands");

        let right_code = wrapping.wrap(&patcher.patch_and_get_code(self.right)?);

        // `a in b` → `a`
        patcher.remove(left.outer_end(), right.outer_end())?;

        if self.negated {
            // `a` → `!a`
            patcher.insert(left.outer_start(), "!")?;
        }

        // `!a` → `!b.includes(a`
        patcher.insert(left.outer_start(), &format!("{right_code}.includes("))?;

        patcher.patch(self.left)?;

        // `!b.includes(a` → `!b.includes(a)`
        patcher.insert(left.outer_end(), ")")
    }

    /// `LEFT in RIGHT` where evaluating either side may have effects.
    pub fn patch_with_lhs_extracted<P: NodePatcher + ?Sized>(
        self,
        patcher: &mut P,
    ) -> PatchResult<()> {
        let whole = patcher.range(self.node)?;
        let left = patcher.range(self.left)?;
        let right = patcher.range(self.right)?;
        let wrapping = self.rhs_wrapping(patcher);
        debug!(node = %self.node, negated = self.negated, ?wrapping, "membership test, extracting left operand");

        // `a() in b` → `(needle = a(), in b`
        patcher.insert(whole.content_start(), "(")?;
        let needle = patcher.patch_repeatable(
            self.left,
            RepeatableOptions::new(NEEDLE_REF).force_repeat(),
        )?;
        patcher.insert(left.outer_end(), ", ")?;

        // `(needle = a(), in b` → `(needle = a(), b`
        patcher.remove(left.outer_end(), right.outer_start())?;

        // `(needle = a(), b` → `(needle = a(), !Array.from(b).includes(needle))`
        if self.negated {
            patcher.insert(right.outer_start(), "!")?;
        }
        if wrapping.array_from {
            patcher.insert(right.outer_start(), ARRAY_FROM)?;
        }
        if wrapping.parens {
            patcher.insert(right.outer_start(), "(")?;
        }
        patcher.patch(self.right)?;
        if wrapping.parens {
            patcher.insert(right.outer_end(), ")")?;
        }
        patcher.insert(right.outer_end(), &format!(".includes({needle}))"))
    }
}

#[cfg(test)]
#[path = "../tests/in_op_tests.rs"]
mod tests;
