use crate::constants::value;

pub(crate) fn normalize_lower(value: &str) -> String {
    if value.bytes().any(|byte| byte.is_ascii_uppercase()) {
        value.to_ascii_lowercase()
    } else {
        value.to_owned()
    }
}

pub(crate) fn normalize_upper(value: &str) -> String {
    if value.bytes().any(|byte| byte.is_ascii_lowercase()) {
        value.to_ascii_uppercase()
    } else {
        value.to_owned()
    }
}

/// Header names and method tokens are ASCII, so ASCII folding is sufficient.
pub(crate) fn equals_ignore_case(a: &str, b: &str) -> bool {
    a == b || a.eq_ignore_ascii_case(b)
}

pub(crate) fn is_http_token(value: &str) -> bool {
    !value.is_empty()
        && value.bytes().all(|byte| {
            matches!(
                byte,
                b'0'..=b'9'
                    | b'A'..=b'Z'
                    | b'a'..=b'z'
                    | b'!'
                    | b'#'
                    | b'$'
                    | b'%'
                    | b'&'
                    | b'\''
                    | b'*'
                    | b'+'
                    | b'-'
                    | b'.'
                    | b'^'
                    | b'_'
                    | b'`'
                    | b'|'
                    | b'~'
            )
        })
}

/// Splits a comma separated header value, trimming entries and skipping empty ones.
pub(crate) fn split_header_list(value: &str) -> impl Iterator<Item = &str> {
    value
        .split(',')
        .map(|entry| entry.trim_matches(|ch: char| ch == ' ' || ch == '\t'))
        .filter(|entry| !entry.is_empty())
}

pub(crate) fn join_header_list<I, S>(values: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut joined = String::new();
    for entry in values {
        if !joined.is_empty() {
            joined.push_str(value::LIST_SEPARATOR);
        }
        joined.push_str(entry.as_ref());
    }
    joined
}

#[cfg(test)]
#[path = "util_test.rs"]
mod util_test;
