//! Main-stage traversal.
//!
//! Patching runs in two phases:
//!
//! 1. **Build**: one `InOpPatcher` is created per membership test, and every
//!    `not` whose operand is a membership test folds itself into that
//!    patcher via `negate()`.
//! 2. **Emit**: statements are patched in source order. Each `InOpPatcher`
//!    is taken out of the build map and consumed when its node is reached.
//!
//! The remaining node kinds get the small rewrites the membership rule
//! relies on (`or` → `||`, `not` → `!`, `@x` → `this.x`, ...).

use crate::binding::BindingScope;
use crate::edit_buffer::EditBuffer;
use crate::error::{PatchError, PatchResult};
use crate::in_op::InOpPatcher;
use crate::operand_shape::OperandShape;
use crate::patcher::{NodePatcher, RepeatableOptions};
use dcf_common::limits::MAX_AST_DEPTH;
use dcf_common::{NodeRange, PatchOptions, Span};
use dcf_parser::{BinaryOperator, Node, NodeIndex, NodeKind, ParsedSource};
use dcf_scanner::{SourceToken, SourceType};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

/// Result of patching one file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatchOutput {
    pub code: String,
    /// Temporaries introduced while patching, in claim order. They still need
    /// declaring in the enclosing scope.
    pub bindings: Vec<String>,
}

impl PatchOutput {
    /// `code` preceded by a `var` declaration of the temporaries, if any.
    pub fn with_declarations(&self) -> String {
        if self.bindings.is_empty() {
            return self.code.clone();
        }
        format!("var {};\n{}", self.bindings.join(", "), self.code)
    }
}

pub struct MainStage<'a> {
    parsed: &'a ParsedSource,
    options: &'a PatchOptions,
    buffer: EditBuffer,
    scope: BindingScope,
    /// Membership patchers awaiting emission.
    in_ops: FxHashMap<NodeIndex, InOpPatcher>,
    /// `not` nodes whose negation moved into a membership patcher.
    folded_nots: FxHashSet<NodeIndex>,
    depth: u32,
}

impl<'a> MainStage<'a> {
    pub fn new(parsed: &'a ParsedSource, options: &'a PatchOptions) -> Self {
        let source = parsed.source.as_str();
        let scope = BindingScope::with_used_names(
            parsed
                .arena
                .iter()
                .filter(|(_, node)| node.kind == NodeKind::Identifier)
                .map(|(_, node)| node.range.content.text(source)),
        );
        let mut stage = MainStage {
            parsed,
            options,
            buffer: EditBuffer::new(source),
            scope,
            in_ops: FxHashMap::default(),
            folded_nots: FxHashSet::default(),
            depth: 0,
        };
        stage.build();
        stage
    }

    fn build(&mut self) {
        let parsed = self.parsed;
        let arena = &parsed.arena;
        for (index, node) in arena.iter() {
            if let NodeKind::InOp {
                left,
                right,
                is_not,
            } = node.kind
            {
                self.in_ops
                    .insert(index, InOpPatcher::new(index, left, right, is_not));
            }
        }
        for (index, node) in arena.iter() {
            if let NodeKind::LogicalNot { operand, .. } = node.kind
                && let Some(in_op) = self.in_ops.get_mut(&operand)
            {
                in_op.negate();
                self.folded_nots.insert(index);
            }
        }
        debug!(
            membership_tests = self.in_ops.len(),
            folded_nots = self.folded_nots.len(),
            "built main-stage patchers"
        );
    }

    /// Whether the membership patcher for `node` will emit a negated test.
    pub fn is_negated(&self, node: NodeIndex) -> Option<bool> {
        self.in_ops.get(&node).map(InOpPatcher::is_negated)
    }

    /// Emit phase: patch every statement and render the result.
    pub fn run(mut self) -> PatchResult<PatchOutput> {
        let parsed = self.parsed;
        for &statement in parsed.statements() {
            self.patch_as_statement(statement)?;
        }
        Ok(PatchOutput {
            code: self.buffer.render(),
            bindings: self.scope.claimed().to_vec(),
        })
    }

    fn source(&self) -> &'a str {
        let parsed = self.parsed;
        &parsed.source
    }

    fn node(&self, index: NodeIndex) -> PatchResult<&'a Node> {
        let parsed = self.parsed;
        parsed.arena.get(index).ok_or(PatchError::MissingNode(index))
    }

    pub fn statement_needs_parens(&self, node: NodeIndex) -> bool {
        self.in_ops
            .get(&node)
            .is_some_and(InOpPatcher::statement_needs_parens)
    }

    /// Patch a top-level expression and terminate it with `;` unless the
    /// source already does. A following statement that opens with `(` or `[`
    /// would otherwise continue this one as a call or index.
    fn patch_as_statement(&mut self, node: NodeIndex) -> PatchResult<()> {
        let range = self.range(node)?;
        if self.statement_needs_parens(node) {
            self.insert(range.outer_start(), "(")?;
            self.patch(node)?;
            self.insert(range.outer_end(), ")")?;
        } else {
            self.patch(node)?;
        }
        if self.has_semicolon_at(range.outer_end()) {
            return Ok(());
        }
        self.insert(range.outer_end(), ";")
    }

    /// Whether the first token at or after `offset` is an explicit `;`.
    fn has_semicolon_at(&self, offset: u32) -> bool {
        let tokens = &self.parsed.tokens;
        let next = tokens.partition_point(|token| token.start() < offset);
        tokens
            .get(next)
            .is_some_and(|token| token.kind == SourceType::Semicolon)
    }

    fn patch_node(&mut self, index: NodeIndex) -> PatchResult<()> {
        let node = self.node(index)?;
        match &node.kind {
            NodeKind::Program { statements } => {
                for &statement in statements {
                    self.patch_as_statement(statement)?;
                }
                Ok(())
            }
            NodeKind::Identifier
            | NodeKind::Number
            | NodeKind::String
            | NodeKind::Bool
            | NodeKind::Null => Ok(()),
            NodeKind::This => self.patch_this(node.range.content),
            NodeKind::ArrayLiteral { elements } => self.patch_all(elements),
            NodeKind::Call { callee, arguments } => {
                self.patch(*callee)?;
                self.patch_all(arguments)
            }
            NodeKind::MemberAccess { object, member } => {
                self.patch_member_access(*object, *member)
            }
            NodeKind::DynamicMemberAccess { object, index } => {
                self.patch(*object)?;
                self.patch(*index)
            }
            NodeKind::LogicalNot { operand, operator } => {
                self.patch_logical_not(index, *operand, *operator)
            }
            NodeKind::Binary {
                left,
                operator,
                right,
            } => self.patch_binary(index, *left, *operator, *right),
            NodeKind::InOp { .. } => {
                let in_op = self
                    .in_ops
                    .remove(&index)
                    .ok_or(PatchError::AlreadyPatched(index))?;
                in_op.patch_as_expression(self)
            }
            NodeKind::Assign { target, value } => {
                self.patch(*target)?;
                self.patch(*value)
            }
        }
    }

    fn patch_all(&mut self, nodes: &[NodeIndex]) -> PatchResult<()> {
        for &node in nodes {
            self.patch(node)?;
        }
        Ok(())
    }

    /// `@` → `this`
    fn patch_this(&mut self, content: Span) -> PatchResult<()> {
        if content.text(self.source()) != "@" {
            return Ok(());
        }
        self.remove(content.start, content.end)?;
        self.insert(content.start, "this")
    }

    /// `@x` → `this.x`
    fn patch_member_access(&mut self, object: NodeIndex, member: Span) -> PatchResult<()> {
        let object_node = self.node(object)?;
        let content = object_node.range.content;
        let is_shorthand = object_node.kind == NodeKind::This
            && content.text(self.source()) == "@"
            && content.end == member.start;
        if !is_shorthand {
            return self.patch(object);
        }
        self.remove(content.start, content.end)?;
        self.insert(content.start, "this.")
    }

    fn patch_logical_not(
        &mut self,
        index: NodeIndex,
        operand: NodeIndex,
        operator: Span,
    ) -> PatchResult<()> {
        let operand_start = self.range(operand)?.outer_start();
        if self.folded_nots.contains(&index) {
            // `not (a in b)` → `(a in b)`; the membership patcher emits the `!`.
            self.remove(operator.start, operand_start)?;
        } else if operator.text(self.source()) != "!" {
            // `not a` → `!a`
            self.remove(operator.start, operand_start)?;
            self.insert(operator.start, "!")?;
        }
        self.patch(operand)
    }

    fn patch_binary(
        &mut self,
        index: NodeIndex,
        left: NodeIndex,
        operator: BinaryOperator,
        right: NodeIndex,
    ) -> PatchResult<()> {
        self.patch(left)?;
        if let Some(token) = self.operator_token(index, operator.token_predicate()) {
            let replacement = operator.js_text();
            if token.text(self.source()) != replacement {
                // `a or b` → `a || b`
                self.remove(token.start(), token.end())?;
                self.insert(token.start(), replacement)?;
            }
        }
        self.patch(right)
    }
}

impl NodePatcher for MainStage<'_> {
    fn options(&self) -> &PatchOptions {
        self.options
    }

    fn range(&self, node: NodeIndex) -> PatchResult<NodeRange> {
        self.node(node).map(|node| node.range)
    }

    fn is_pure(&self, node: NodeIndex) -> bool {
        let Ok(node) = self.node(node) else {
            return false;
        };
        match node.kind {
            NodeKind::Identifier
            | NodeKind::This
            | NodeKind::Number
            | NodeKind::String
            | NodeKind::Bool
            | NodeKind::Null => true,
            NodeKind::Program { .. } | NodeKind::Call { .. } | NodeKind::Assign { .. } => false,
            NodeKind::ArrayLiteral { .. }
            | NodeKind::MemberAccess { .. }
            | NodeKind::DynamicMemberAccess { .. }
            | NodeKind::LogicalNot { .. }
            | NodeKind::Binary { .. }
            | NodeKind::InOp { .. } => node.children().iter().all(|&child| self.is_pure(child)),
        }
    }

    fn operand_shape(&self, node: NodeIndex) -> OperandShape {
        self.node(node)
            .map_or(OperandShape::Other, |node| OperandShape::of(&node.kind))
    }

    fn operator_token(
        &self,
        node: NodeIndex,
        predicate: fn(&SourceToken) -> bool,
    ) -> Option<SourceToken> {
        let node = self.node(node).ok()?;
        let content = node.range.content;
        let children: Vec<Span> = node
            .children()
            .iter()
            .filter_map(|&child| self.node(child).ok())
            .map(|child| child.range.outer)
            .collect();
        let tokens = &self.parsed.tokens;
        let first = tokens.partition_point(|token| token.start() < content.start);
        tokens[first..]
            .iter()
            .take_while(|token| token.start() < content.end)
            .filter(|token| !children.iter().any(|child| child.contains(token.start())))
            .find(|token| predicate(token))
            .copied()
    }

    fn patch(&mut self, node: NodeIndex) -> PatchResult<()> {
        if self.depth >= MAX_AST_DEPTH {
            return Err(PatchError::NestedTooDeeply(node));
        }
        self.depth += 1;
        let result = self.patch_node(node);
        self.depth -= 1;
        result
    }

    fn patch_and_get_code(&mut self, node: NodeIndex) -> PatchResult<String> {
        self.patch(node)?;
        let range = self.range(node)?;
        Ok(self.buffer.slice(range.outer_start(), range.outer_end())?)
    }

    fn patch_repeatable(
        &mut self,
        node: NodeIndex,
        options: RepeatableOptions<'_>,
    ) -> PatchResult<String> {
        if !options.force_repeat && self.is_pure(node) {
            return self.patch_and_get_code(node);
        }
        let name = self.scope.claim(options.ref_name)?;
        let range = self.range(node)?;
        // `a()` → `needle = a()`
        self.insert(range.content_start(), &format!("{name} = "))?;
        self.patch(node)?;
        Ok(name)
    }

    fn insert(&mut self, offset: u32, text: &str) -> PatchResult<()> {
        trace!(offset, text, "insert");
        Ok(self.buffer.insert(offset, text)?)
    }

    fn remove(&mut self, start: u32, end: u32) -> PatchResult<()> {
        trace!(start, end, "remove");
        Ok(self.buffer.remove(start, end)?)
    }
}

#[cfg(test)]
#[path = "../tests/main_stage_tests.rs"]
mod tests;
