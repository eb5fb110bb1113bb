//! Tracing configuration for following a patch run.
//!
//! `DCF_LOG` takes an `EnvFilter` directive list (falling back to `RUST_LOG`).
//! Each comma-separated entry may also be one of the shortcuts below, which
//! expand to the targets that log it:
//!
//! | shortcut | shows |
//! |---|---|
//! | `rules` | which path each membership test took and how its right operand was wrapped |
//! | `edits` | every insert/remove against the edit buffer |
//! | `parse` | every node the parser builds |
//!
//! `DCF_LOG_FORMAT` picks the output: `text` (default), `tree` via
//! `tracing-tree`, or `json`.
//!
//! ```bash
//! DCF_LOG=rules,edits DCF_LOG_FORMAT=tree
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Tracing output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Tree,
    Json,
}

impl LogFormat {
    /// Parse a `DCF_LOG_FORMAT` value; anything unrecognised is `Text`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Expand `DCF_LOG` shortcuts into filter directives.
pub fn expand_filter(value: &str) -> String {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry {
            "rules" => "dcf_patcher::in_op=debug,dcf_patcher::main_stage=debug",
            "edits" => "dcf_patcher::main_stage=trace",
            "parse" => "dcf_parser=trace",
            directive => directive,
        })
        .collect::<Vec<_>>()
        .join(",")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// Expanded `EnvFilter` directives.
    pub filter: String,
    pub format: LogFormat,
}

impl TracingConfig {
    /// Build from a variable lookup. `None` when neither `DCF_LOG` nor
    /// `RUST_LOG` is set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let filter = lookup("DCF_LOG").or_else(|| lookup("RUST_LOG"))?;
        let format = lookup("DCF_LOG_FORMAT")
            .map(|value| LogFormat::parse(&value))
            .unwrap_or_default();
        Some(TracingConfig {
            filter: expand_filter(&filter),
            format,
        })
    }

    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Install as the global subscriber, writing to stderr so logs never mix
    /// with emitted code. Returns `false` if a subscriber was already set.
    pub fn try_init(&self) -> bool {
        let filter = EnvFilter::builder().parse_lossy(&self.filter);
        let installed = match self.format {
            LogFormat::Tree => {
                let tree_layer = tracing_tree::HierarchicalLayer::default()
                    .with_indent_amount(2)
                    .with_indent_lines(true)
                    .with_targets(true);
                Registry::default().with(filter).with(tree_layer).try_init()
            }
            LogFormat::Json => {
                let json_layer = fmt::layer().json().with_writer(std::io::stderr);
                Registry::default().with(filter).with(json_layer).try_init()
            }
            LogFormat::Text => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .finish()
                .try_init(),
        };
        installed.is_ok()
    }
}

/// Initialise tracing from the environment. Does nothing unless `DCF_LOG` or
/// `RUST_LOG` is set; returns whether a subscriber was installed.
pub fn init_tracing() -> bool {
    TracingConfig::from_env().is_some_and(|config| config.try_init())
}

#[cfg(test)]
#[path = "tests/tracing_config_tests.rs"]
mod tests;
