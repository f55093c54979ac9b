//! Team-identity normalization
//!
//! Data sources disagree on spelling ("Sacremento Kings" in the stadium and
//! distance tables, "Sacramento Kings" in the schedule). Every lookup key goes
//! through [`TeamNormalizer::normalize`] on both sides so that joins never
//! miss on a string mismatch.

use std::collections::HashMap;

use crate::error::{BurdenError, Result};

/// Maps known spelling variants to the canonical team identity.
///
/// Alias chains are collapsed at construction, so every alias maps directly
/// to a name that is not itself an alias. This makes `normalize` idempotent.
#[derive(Debug, Clone, Default)]
pub struct TeamNormalizer {
    aliases: HashMap<String, String>,
}

impl TeamNormalizer {
    /// Build from `(variant, canonical)` pairs. Fails on alias cycles.
    pub fn new<I, K, V>(aliases: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let raw: HashMap<String, String> = aliases
            .into_iter()
            .map(|(k, v)| (k.as_ref().trim().to_string(), v.as_ref().trim().to_string()))
            .filter(|(k, v)| !k.is_empty() && k != v)
            .collect();

        let mut resolved = HashMap::with_capacity(raw.len());
        for variant in raw.keys() {
            let mut target = &raw[variant];
            let mut hops = 0;
            while let Some(next) = raw.get(target) {
                hops += 1;
                if hops > raw.len() {
                    return Err(BurdenError::Config(format!(
                        "Alias cycle involving '{}'",
                        variant
                    )));
                }
                target = next;
            }
            resolved.insert(variant.clone(), target.clone());
        }

        Ok(TeamNormalizer { aliases: resolved })
    }

    /// Canonical identity for `name`. Unknown names pass through (trimmed).
    pub fn normalize<'a>(&'a self, name: &'a str) -> &'a str {
        let trimmed = name.trim();
        self.aliases
            .get(trimmed)
            .map(|s| s.as_str())
            .unwrap_or(trimmed)
    }

    /// True when both names resolve to the same identity
    pub fn same_team(&self, a: &str, b: &str) -> bool {
        self.normalize(a) == self.normalize(b)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
