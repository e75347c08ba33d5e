use std::collections::{BTreeMap, BTreeSet};

use tracing::warn;

use super::parser::RawPair;
use crate::types::FIXED_COLUMNS;

/// Attribute names kept from a camera's specifications block
pub const CAMERA_ATTRIBUTES: [&str; 10] = [
    "Video Resolution",
    "Dimensions",
    "Weight",
    "Recording Media",
    "Power Source",
    "ISO Sensitivity",
    "Lens Mount",
    "Shutter Speed",
    "Continuous Shooting Speed",
    "Sensor Resolution",
];

/// Whether `name` is one of the fixed record columns
pub fn is_reserved(name: &str) -> bool {
    FIXED_COLUMNS.contains(&name)
}

/// Fixed set of recognized attribute names (case- and whitespace-exact)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Whitelist {
    names: BTreeSet<String>,
}

impl Whitelist {
    /// Names that collide with a fixed record column are left out, since the
    /// table could never show them.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = names
            .into_iter()
            .map(Into::into)
            .filter(|name: &String| {
                let reserved = is_reserved(name);
                if reserved {
                    warn!("Ignoring attribute '{}': it is a fixed column", name);
                }
                !reserved
            })
            .collect();

        Whitelist { names }
    }

    /// The default camera attribute set
    pub fn cameras() -> Self {
        Self::new(CAMERA_ATTRIBUTES)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl Default for Whitelist {
    fn default() -> Self {
        Self::cameras()
    }
}

/// Two page keys naming the same attribute. `alias` never survives
/// normalization; its value fills `canonical` only when that is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synonym {
    pub alias: String,
    pub canonical: String,
}

impl Synonym {
    pub fn new(alias: impl Into<String>, canonical: impl Into<String>) -> Self {
        Synonym {
            alias: alias.into(),
            canonical: canonical.into(),
        }
    }

    /// "Resolution" is the older label for "Sensor Resolution"
    pub fn resolution() -> Self {
        Self::new("Resolution", "Sensor Resolution")
    }
}

/// Reduces candidate pairs to whitelisted attributes and merges synonyms
#[derive(Debug, Clone)]
pub struct FieldNormalizer {
    whitelist: Whitelist,
    synonyms: Vec<Synonym>,
}

impl FieldNormalizer {
    pub fn new(whitelist: Whitelist) -> Self {
        FieldNormalizer {
            whitelist,
            synonyms: vec![Synonym::resolution()],
        }
    }

    /// Replace the synonym rules
    pub fn with_synonyms(mut self, synonyms: Vec<Synonym>) -> Self {
        self.synonyms = synonyms;
        self
    }

    pub fn whitelist(&self) -> &Whitelist {
        &self.whitelist
    }

    /// Keep whitelisted pairs (a later duplicate overwrites an earlier one),
    /// then fold every alias into its canonical name.
    pub fn normalize<I>(&self, pairs: I) -> BTreeMap<String, String>
    where
        I: IntoIterator<Item = RawPair>,
    {
        let mut specs = BTreeMap::new();

        for (key, value) in pairs {
            let key = key.trim();
            if self.accepts(key) {
                specs.insert(key.to_string(), value.trim().to_string());
            }
        }

        for synonym in &self.synonyms {
            if let Some(value) = specs.remove(&synonym.alias)
                && self.whitelist.contains(&synonym.canonical)
            {
                specs.entry(synonym.canonical.clone()).or_insert(value);
            }
        }

        specs
    }

    fn accepts(&self, key: &str) -> bool {
        self.whitelist.contains(key)
            || self
                .synonyms
                .iter()
                .any(|s| s.alias == key && self.whitelist.contains(&s.canonical))
    }
}

impl Default for FieldNormalizer {
    fn default() -> Self {
        Self::new(Whitelist::default())
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod normalize_test;
