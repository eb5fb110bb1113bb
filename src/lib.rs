//! dcf - rewrites CoffeeScript-dialect source into JavaScript by patching
//! the original text in place.
//!
//! ```
//! let output = dcf::transpile("x in [1, 2, 3]", &dcf::PatchOptions::default()).unwrap();
//! assert_eq!(output.code, "[1, 2, 3].includes(x);");
//! ```

pub use dcf_common::{NodeRange, PatchOptions, Span};
pub use dcf_parser::{ParseError, ParsedSource, parse_program};
pub use dcf_patcher::{
    EditBuffer, EditError, InOpPatcher, MainStage, NodePatcher, OperandShape, PatchError,
    PatchOutput, PatchResult, RhsWrapping,
};

// Options file loading
pub mod config;
pub use config::load_options;

// Tracing subscriber setup
pub mod tracing_config;

/// Parse `source` and run the main-stage patchers over it.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn transpile(source: &str, options: &PatchOptions) -> PatchResult<PatchOutput> {
    let parsed = parse_program(source)?;
    MainStage::new(&parsed, options).run()
}
