//! Operations a rewrite rule may invoke on the patch framework.
//!
//! A rule never touches child nodes or the edit buffer directly. It asks the
//! framework to patch a child, to render a child's code, or to hoist a child
//! into a temporary, and it queues its own edits through `insert`/`remove`.

use crate::error::PatchResult;
use crate::operand_shape::OperandShape;
use dcf_common::{NodeRange, PatchOptions};
use dcf_parser::NodeIndex;
use dcf_scanner::SourceToken;

/// Options for `NodePatcher::patch_repeatable`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RepeatableOptions<'a> {
    /// Base name for the temporary, e.g. `needle`.
    pub ref_name: &'a str,
    /// Introduce a temporary even when the operand is pure.
    pub force_repeat: bool,
}

impl<'a> RepeatableOptions<'a> {
    pub const fn new(ref_name: &'a str) -> Self {
        RepeatableOptions {
            ref_name,
            force_repeat: false,
        }
    }

    #[must_use]
    pub const fn force_repeat(mut self) -> Self {
        self.force_repeat = true;
        self
    }
}

pub trait NodePatcher {
    fn options(&self) -> &PatchOptions;

    /// Outer and content ranges of `node` in the original source.
    fn range(&self, node: NodeIndex) -> PatchResult<NodeRange>;

    /// Whether evaluating `node` twice is observably the same as once.
    fn is_pure(&self, node: NodeIndex) -> bool;

    fn operand_shape(&self, node: NodeIndex) -> OperandShape;

    /// First token inside `node`'s content range, between its children,
    /// that satisfies `predicate`.
    fn operator_token(
        &self,
        node: NodeIndex,
        predicate: fn(&SourceToken) -> bool,
    ) -> Option<SourceToken>;

    /// Emit `node`'s own rewritten code at its original position.
    fn patch(&mut self, node: NodeIndex) -> PatchResult<()>;

    /// Patch `node` and return its resulting text (outer range).
    fn patch_and_get_code(&mut self, node: NodeIndex) -> PatchResult<String>;

    /// Patch `node` so its value can be referenced more than once; returns
    /// the code to use for each further reference.
    fn patch_repeatable(
        &mut self,
        node: NodeIndex,
        options: RepeatableOptions<'_>,
    ) -> PatchResult<String>;

    fn insert(&mut self, offset: u32, text: &str) -> PatchResult<()>;

    fn remove(&mut self, start: u32, end: u32) -> PatchResult<()>;
}
