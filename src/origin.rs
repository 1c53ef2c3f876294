use crate::constants::value;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex_automata::meta::Regex;
use std::fmt;

/// Serialized form of an opaque origin, sent by sandboxed documents and some redirects.
pub const NULL_ORIGIN: &str = "null";

const MAX_ORIGIN_LENGTH: usize = 4_096;

// scheme "://" host [":" port], without path, query, fragment or userinfo.
static ORIGIN_SYNTAX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://[^/?#@\s]+$")
        .expect("origin syntax pattern is a valid regex")
});

/// Key of a per-origin rule: either one literal origin or every origin.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum OriginPattern {
    /// A literal serialized origin, compared case-sensitively.
    Exact(String),
    /// The wildcard entry, used for origins without a literal rule.
    Any,
}

impl OriginPattern {
    pub fn exact<S: Into<String>>(value: S) -> Self {
        Self::Exact(value.into())
    }

    pub fn any() -> Self {
        Self::Any
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// Whether a literal pattern is a syntactically valid origin.
    ///
    /// The wildcard pattern is always valid.
    pub fn is_well_formed(&self) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(origin) => is_well_formed_origin(origin),
        }
    }
}

impl From<&str> for OriginPattern {
    fn from(value: &str) -> Self {
        if value == value::WILDCARD {
            Self::Any
        } else {
            Self::Exact(value.to_owned())
        }
    }
}

impl From<String> for OriginPattern {
    fn from(value: String) -> Self {
        if value == value::WILDCARD {
            Self::Any
        } else {
            Self::Exact(value)
        }
    }
}

impl fmt::Display for OriginPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(origin) => f.write_str(origin),
            Self::Any => f.write_str(value::WILDCARD),
        }
    }
}

pub(crate) fn is_well_formed_origin(origin: &str) -> bool {
    if origin.len() > MAX_ORIGIN_LENGTH {
        return false;
    }
    origin == NULL_ORIGIN || ORIGIN_SYNTAX.is_match(origin)
}

/// A value found by [`OriginMap::find`], together with how it matched.
#[derive(Debug)]
pub struct OriginMatch<'a, T> {
    pub value: &'a T,
    /// `true` when no literal rule existed and the wildcard entry was used.
    pub via_wildcard: bool,
}

// Derived Clone/Copy would require `T: Clone`.
impl<T> Clone for OriginMatch<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for OriginMatch<'_, T> {}

/// Lookup table keyed by [`OriginPattern`], preferring literal entries over the wildcard.
#[derive(Clone, Debug)]
pub struct OriginMap<T> {
    exact: IndexMap<String, T>,
    any: Option<T>,
}

impl<T> Default for OriginMap<T> {
    fn default() -> Self {
        Self {
            exact: IndexMap::new(),
            any: None,
        }
    }
}

impl<T> OriginMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a rule, handing the value back if the pattern is already present.
    pub fn insert(&mut self, pattern: OriginPattern, value: T) -> Result<(), T> {
        match pattern {
            OriginPattern::Any => {
                if self.any.is_some() {
                    return Err(value);
                }
                self.any = Some(value);
            }
            OriginPattern::Exact(origin) => {
                if self.exact.contains_key(&origin) {
                    return Err(value);
                }
                self.exact.insert(origin, value);
            }
        }
        Ok(())
    }

    /// Finds the rule for `origin`: an exact entry wins, then the wildcard entry.
    ///
    /// No normalization is applied; an origin that differs only by case or a
    /// trailing slash does not match a literal entry.
    pub fn find(&self, origin: &str) -> Option<OriginMatch<'_, T>> {
        if let Some(value) = self.exact.get(origin) {
            return Some(OriginMatch {
                value,
                via_wildcard: false,
            });
        }
        self.any.as_ref().map(|value| OriginMatch {
            value,
            via_wildcard: true,
        })
    }

    pub fn get(&self, pattern: &OriginPattern) -> Option<&T> {
        match pattern {
            OriginPattern::Any => self.any.as_ref(),
            OriginPattern::Exact(origin) => self.exact.get(origin),
        }
    }

    pub fn len(&self) -> usize {
        self.exact.len() + usize::from(self.any.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.any.is_none()
    }

    /// Iterates literal entries in insertion order, then the wildcard entry.
    pub fn iter(&self) -> impl Iterator<Item = (OriginPattern, &T)> {
        self.exact
            .iter()
            .map(|(origin, value)| (OriginPattern::Exact(origin.clone()), value))
            .chain(self.any.iter().map(|value| (OriginPattern::Any, value)))
    }
}

#[cfg(test)]
#[path = "origin_test.rs"]
mod origin_test;
