//! Environment lookups for configuration overrides.
//!
//! gitscribe reads a handful of `GITSCRIBE_*` variables plus the provider's
//! own API key variable. All of them go through [`Env`], so config tests can
//! supply a map with [`Env::mock()`] instead of touching the process
//! environment.

use std::collections::HashMap;

/// Source of environment values.
///
/// Blank values are never returned: an exported but empty
/// `GITSCRIBE_MODEL=` behaves the same as an unset one.
#[derive(Clone, Debug, Default)]
pub struct Env {
    overrides: Option<HashMap<String, String>>,
}

impl Env {
    /// Read from the process environment.
    pub fn real() -> Self {
        Self { overrides: None }
    }

    /// Read only from `vars`.
    pub fn mock(vars: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>) -> Self {
        Self {
            overrides: Some(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Trimmed value of `name`, or `None` when unset, blank or not UTF-8.
    pub fn non_empty(&self, name: &str) -> Option<String> {
        let raw = match &self.overrides {
            Some(map) => map.get(name).cloned(),
            None => std::env::var(name).ok(),
        }?;
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    /// First non-blank value among `names`, in order.
    pub fn first_non_empty(&self, names: &[&str]) -> Option<String> {
        names.iter().find_map(|name| self.non_empty(name))
    }
}
