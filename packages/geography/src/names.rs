//! Precinct name normalization.
//!
//! The arrest tables, the summary table, and the boundary file do not
//! agree on how precinct names are spelled. Every name is upper-cased and
//! known aliases are rewritten before any lookup.

use std::collections::BTreeMap;

/// Alias spellings found in the LAPD tables and their canonical names.
pub const LAPD_ALIASES: &[(&str, &str)] = &[
    ("WEST LA", "WEST LOS ANGELES"),
    ("N HOLLYWOOD", "NORTH HOLLYWOOD"),
];

/// Rewrites raw precinct names into their canonical upper-case form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameNormalizer {
    aliases: BTreeMap<String, String>,
}

impl NameNormalizer {
    /// Creates a normalizer from `(alias, canonical)` pairs. Both sides are
    /// upper-cased.
    #[must_use]
    pub fn new<I, A, C>(aliases: I) -> Self
    where
        I: IntoIterator<Item = (A, C)>,
        A: AsRef<str>,
        C: AsRef<str>,
    {
        Self {
            aliases: aliases
                .into_iter()
                .map(|(alias, canonical)| {
                    (
                        alias.as_ref().trim().to_uppercase(),
                        canonical.as_ref().trim().to_uppercase(),
                    )
                })
                .collect(),
        }
    }

    /// Returns the canonical form of `raw`.
    #[must_use]
    pub fn normalize(&self, raw: &str) -> String {
        let upper = raw.trim().to_uppercase();
        self.aliases.get(&upper).cloned().unwrap_or(upper)
    }
}

impl Default for NameNormalizer {
    fn default() -> Self {
        Self::new(LAPD_ALIASES.iter().copied())
    }
}
