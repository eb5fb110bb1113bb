//! Temporary binding names.

use crate::error::{PatchError, PatchResult};
use dcf_common::limits::MAX_BINDING_SUFFIX;
use rustc_hash::FxHashSet;

/// Names in use within one file plus the temporaries claimed so far.
#[derive(Clone, Debug, Default)]
pub struct BindingScope {
    used: FxHashSet<String>,
    claimed: Vec<String>,
}

impl BindingScope {
    /// Scope that treats every name in `names` as taken.
    pub fn with_used_names<'s>(names: impl IntoIterator<Item = &'s str>) -> Self {
        BindingScope {
            used: names.into_iter().map(str::to_string).collect(),
            claimed: Vec::new(),
        }
    }

    pub fn is_used(&self, name: &str) -> bool {
        self.used.contains(name)
    }

    /// Claim the first free name among `base`, `base1`, `base2`, ...
    pub fn claim(&mut self, base: &str) -> PatchResult<String> {
        let name = std::iter::once(base.to_string())
            .chain((1..=MAX_BINDING_SUFFIX).map(|n| format!("{base}{n}")))
            .find(|candidate| !self.is_used(candidate))
            .ok_or_else(|| PatchError::BindingNamesExhausted {
                base: base.to_string(),
            })?;
        self.used.insert(name.clone());
        self.claimed.push(name.clone());
        Ok(name)
    }

    /// Temporaries claimed so far, in claim order.
    pub fn claimed(&self) -> &[String] {
        &self.claimed
    }
}

#[cfg(test)]
#[path = "../tests/binding_tests.rs"]
mod tests;
