use crate::constants::{SAFELISTED_RESPONSE_HEADERS, header};
use crate::header_list::HeaderList;
use crate::util::{join_header_list, normalize_lower};

/// Response headers scripts on the calling origin may read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExposedHeaders {
    List(HeaderList),
    /// Every header present on the outgoing response.
    ///
    /// Never sent as a literal `*`: browsers ignore the wildcard on
    /// credentialed responses, so it is expanded against the concrete
    /// response header names instead.
    Any,
}

impl Default for ExposedHeaders {
    fn default() -> Self {
        Self::List(HeaderList::default())
    }
}

impl ExposedHeaders {
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

    /// Serializes the configuration against the headers of the response being sent.
    ///
    /// Safelisted response headers and the CORS headers themselves are left out
    /// of a wildcard expansion. `None` means the header should be omitted.
    pub fn header_value(&self, response_headers: &[&str]) -> Option<String> {
        match self {
            Self::List(values) => values.header_value(),
            Self::Any => {
                let expanded = HeaderList::new(
                    response_headers
                        .iter()
                        .copied()
                        .filter(|name| is_exposable(name)),
                );
                if expanded.is_empty() {
                    None
                } else {
                    Some(join_header_list(expanded.values()))
                }
            }
        }
    }
}

fn is_exposable(name: &str) -> bool {
    let lowered = normalize_lower(name.trim());
    !lowered.is_empty()
        && !lowered.starts_with(header::ACCESS_CONTROL_PREFIX)
        && !lowered.eq_ignore_ascii_case(header::VARY)
        && !SAFELISTED_RESPONSE_HEADERS.contains(&lowered.as_str())
}

#[cfg(test)]
#[path = "exposed_headers_test.rs"]
mod exposed_headers_test;
