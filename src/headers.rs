use crate::constants::header;
use crate::util::{equals_ignore_case, split_header_list};
use indexmap::IndexMap;

/// Response headers in the order they were produced.
pub type Headers = IndexMap<String, String>;

#[derive(Debug, Default, Clone)]
pub(crate) struct HeaderCollection {
    headers: Headers,
}

impl HeaderCollection {
    pub(crate) fn new() -> Self {
        Self::with_estimate(0)
    }

    pub(crate) fn with_estimate(estimate: usize) -> Self {
        Self {
            headers: IndexMap::with_capacity(estimate),
        }
    }

    pub(crate) fn push(&mut self, name: &str, value: String) {
        if equals_ignore_case(name, header::VARY) {
            self.add_vary(value);
        } else {
            self.headers.insert(name.to_string(), value);
        }
    }

    pub(crate) fn add_vary<S: Into<String>>(&mut self, value: S) {
        let incoming = value.into();
        let mut entries: Vec<String> = self
            .headers
            .get(header::VARY)
            .map(|existing| split_header_list(existing).map(str::to_string).collect())
            .unwrap_or_default();

        for entry in split_header_list(&incoming) {
            if !entries
                .iter()
                .any(|existing| equals_ignore_case(existing, entry))
            {
                entries.push(entry.to_string());
            }
        }

        if entries.is_empty() {
            self.headers.shift_remove(header::VARY);
            return;
        }

        self.headers
            .insert(header::VARY.to_string(), entries.join(", "));
    }

    pub(crate) fn extend(&mut self, other: HeaderCollection) {
        for (name, value) in other.headers {
            self.push(&name, value);
        }
    }

    pub(crate) fn into_headers(self) -> Headers {
        self.headers
    }
}

#[cfg(test)]
#[path = "headers_test.rs"]
mod headers_test;
