use crate::util::{is_http_token, join_header_list, normalize_lower};
use std::collections::HashSet;
use std::ops::Deref;

/// An ordered, case-insensitively de-duplicated list of header names.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct HeaderList {
    values: Vec<String>,
    lookup: HashSet<String>,
}

impl HeaderList {
    /// Builds a list from the provided names, trimming whitespace and keeping
    /// the first spelling of names that differ only by case.
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Self::default();
        for value in values {
            let trimmed = value.into().trim().to_string();
            if trimmed.is_empty() {
                continue;
            }
            if list.lookup.insert(normalize_lower(&trimmed)) {
                list.values.push(trimmed);
            }
        }
        list
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup.contains(&normalize_lower(name))
    }

    /// Returns the first entry that is not a valid HTTP field name.
    pub(crate) fn first_invalid(&self) -> Option<&str> {
        self.values
            .iter()
            .map(String::as_str)
            .find(|value| !is_http_token(value))
    }

    pub fn header_value(&self) -> Option<String> {
        if self.values.is_empty() {
            None
        } else {
            Some(join_header_list(&self.values))
        }
    }
}

impl Deref for HeaderList {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.values
    }
}

#[cfg(test)]
#[path = "header_list_test.rs"]
mod header_list_test;
