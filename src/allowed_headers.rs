use crate::header_list::HeaderList;

/// Request headers a cross-origin caller may send, checked during preflight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllowedHeaders {
    List(HeaderList),
    /// Wildcard: every requested header passes and is echoed back.
    Any,
}

impl Default for AllowedHeaders {
    fn default() -> Self {
        AllowedHeaders::List(HeaderList::default())
    }
}

impl AllowedHeaders {
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(HeaderList::new(values))
    }

    pub fn any() -> Self {
        Self::Any
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    pub fn allows_header(&self, name: &str) -> bool {
        match self {
            Self::Any => true,
            Self::List(allowed) => allowed.contains(name),
        }
    }

    /// Returns the requested headers that this configuration does not allow.
    pub fn disallowed<'a>(&self, requested: &[&'a str]) -> Vec<&'a str> {
        requested
            .iter()
            .copied()
            .filter(|name| !self.allows_header(name))
            .collect()
    }
}

#[cfg(test)]
#[path = "allowed_headers_test.rs"]
mod allowed_headers_test;
