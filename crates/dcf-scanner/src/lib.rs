//! CoffeeScript-dialect tokenizer for the dcf patcher.
//!
//! This crate provides the lexical analysis phase:
//! - `SourceType` - Token classification
//! - `SourceToken` - A classified token with its byte span
//! - `Scanner` - Tokenizer over a source string

pub mod token;
pub use token::{SourceToken, SourceType};

pub mod scanner;
pub use scanner::{ScanError, Scanner, tokenize};
