use std::fmt;

/// The `code` member of a JSON envelope returned by the admin endpoints.
///
/// The server mixes numeric codes (`0`, `1`) with text (`"success"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseCode {
    Number(i64),
    Text(String),
}

impl ResponseCode {
    /// Numeric comparison; text codes match when they parse to `expected`.
    pub fn is(&self, expected: i64) -> bool {
        match self {
            ResponseCode::Number(n) => *n == expected,
            ResponseCode::Text(text) => text.trim().parse::<i64>().ok() == Some(expected),
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseCode::Number(n) => write!(f, "{n}"),
            ResponseCode::Text(text) => write!(f, "{text:?}"),
        }
    }
}
