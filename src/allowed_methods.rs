use crate::util::{is_http_token, join_header_list, normalize_upper};
use indexmap::IndexSet;

/// Methods a cross-origin caller may use on a resource.
///
/// A rule without an explicit value (`Option::None` on
/// [`ResourceOptions::allow_methods`](crate::ResourceOptions::allow_methods))
/// inherits the methods registered for the resource.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum AllowedMethods {
    /// Any method is allowed.
    Any,
    /// An explicit set, stored upper-cased in configuration order.
    List(IndexSet<String>),
}

impl AllowedMethods {
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(
            values
                .into_iter()
                .map(|value| normalize_upper(value.into().trim()))
                .filter(|value| !value.is_empty())
                .collect(),
        )
    }

    pub fn any() -> Self {
        Self::Any
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// Methods are case-sensitive tokens; the request method must match exactly.
    pub fn allows_method(&self, method: &str) -> bool {
        match self {
            Self::Any => true,
            Self::List(values) => values.contains(method),
        }
    }

    pub(crate) fn first_invalid(&self) -> Option<&str> {
        match self {
            Self::Any => None,
            Self::List(values) => values
                .iter()
                .map(String::as_str)
                .find(|value| !is_http_token(value)),
        }
    }

    /// Header value for an explicit list; the wildcard is rendered by the caller.
    pub fn header_value(&self) -> Option<String> {
        match self {
            Self::Any => None,
            Self::List(values) if values.is_empty() => None,
            Self::List(values) => Some(join_header_list(values)),
        }
    }
}

#[cfg(test)]
#[path = "allowed_methods_test.rs"]
mod allowed_methods_test;
