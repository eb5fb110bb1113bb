//! Main-stage patchers for the dcf compiler.
//!
//! Patching rewrites the original source in place through an `EditBuffer`
//! instead of printing a fresh tree, so untouched text (spacing, literals,
//! comments) survives byte for byte.
//!
//! - `EditBuffer` - ordered insertions and removals against original offsets
//! - `NodePatcher` - the per-node operations a rewrite rule may call
//! - `MainStage` - the traversal that owns the buffer and dispatches rules
//! - `InOpPatcher` - `a in b` / `a not in b` → `b.includes(a)`

pub mod error;
pub use error::{PatchError, PatchResult};

pub mod edit_buffer;
pub use edit_buffer::{EditBuffer, EditError};

pub mod binding;
pub use binding::BindingScope;

pub mod operand_shape;
pub use operand_shape::{OperandShape, RhsWrapping};

pub mod patcher;
pub use patcher::{NodePatcher, RepeatableOptions};

pub mod in_op;
pub use in_op::InOpPatcher;

pub mod main_stage;
pub use main_stage::{MainStage, PatchOutput};
